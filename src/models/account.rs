//! Account model
//!
//! Represents a user's money container (debit card, credit card, savings,
//! cash). The stored opening balance is the starting point the balance
//! calculator replays transactions over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, UserId};
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccountType {
    /// Debit / checking account
    #[default]
    Debit,
    /// Credit card
    Credit,
    /// Savings account
    Savings,
    /// Cash/wallet
    Cash,
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "checking" => Some(Self::Debit),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            "savings" => Some(Self::Savings),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "Debit"),
            Self::Credit => write!(f, "Credit"),
            Self::Savings => write!(f, "Savings"),
            Self::Cash => write!(f, "Cash"),
        }
    }
}

/// A financial account owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Display name, unique within the owning user's accounts
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Stored balance the account was opened with
    pub opening_balance: Money,

    /// Owning user
    pub user_id: UserId,

    /// Issuing bank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,

    /// Account or card number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    /// Interbank CLABE code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clabe: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero opening balance
    pub fn new(name: impl Into<String>, account_type: AccountType, user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            opening_balance: Money::zero(),
            user_id,
            bank: None,
            account_number: None,
            clabe: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account with an opening balance
    pub fn with_opening_balance(
        name: impl Into<String>,
        account_type: AccountType,
        user_id: UserId,
        opening_balance: Money,
    ) -> Self {
        let mut account = Self::new(name, account_type, user_id);
        account.opening_balance = opening_balance;
        account
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_opening_balance() {
        let user = UserId::new();
        let account =
            Account::with_opening_balance("Nomina", AccountType::Debit, user, Money::from_units(15000));
        assert_eq!(account.opening_balance, Money::from_units(15000));
        assert_eq!(account.user_id, user);
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Wallet", AccountType::Cash, UserId::new());
        assert!(account.validate().is_ok());

        account.name = "  ".into();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        account.name = "a".repeat(101);
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::NameTooLong(101))
        ));
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("DEBIT"), Some(AccountType::Debit));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::Credit));
        assert_eq!(AccountType::parse("brokerage"), None);
    }

    #[test]
    fn test_type_field_serialized_as_type() {
        let account = Account::new("Ahorro", AccountType::Savings, UserId::new());
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "Savings");
        assert!(json.get("bank").is_none());
    }
}
