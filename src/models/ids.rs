//! Strongly-typed ID wrappers for all entity types
//!
//! Newtype wrappers keep a budget ID from being passed where a category ID is
//! expected, which matters here because expenses reference both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a full UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(UserId, "usr-");
define_id!(AccountId, "acc-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
define_id!(ExpenseId, "exp-");
define_id!(TransferId, "trf-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_prefix() {
        let id = BudgetId::new();
        let display = id.to_string();
        assert!(display.starts_with("bud-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = ExpenseId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: ExpenseId = format!("exp-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);
    }

    #[test]
    fn test_id_serializes_as_bare_uuid() {
        let id = AccountId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
    }

    #[test]
    fn test_ids_order_by_uuid() {
        let low = CategoryId::parse("00000000-0000-0000-0000-000000000001").unwrap();
        let high = CategoryId::parse("00000000-0000-0000-0000-000000000002").unwrap();
        assert!(low < high);
    }
}
