//! Newtype IDs for type-safe identifiers.
//!
//! Identifiers are serial integers assigned by the store. Wrapping them keeps
//! a `PromotionId` from being passed where a `ProductId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate integer newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique serial identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from its raw value.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw integer value.
            pub fn get(&self) -> i64 {
                self.0
            }

            /// The ID following this one in a serial sequence, or `None`
            /// once the integer range is used up.
            pub fn next(&self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(PromotionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ordering() {
        let mut ids = vec![ProductId::new(5), ProductId::new(2), ProductId::new(8)];
        ids.sort();
        assert_eq!(ids, vec![ProductId::new(2), ProductId::new(5), ProductId::new(8)]);
    }

    #[test]
    fn test_id_from_str() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_integer() {
        let json = serde_json::to_string(&PromotionId::new(7)).unwrap();
        assert_eq!(json, "7");
        assert_eq!(PromotionId::new(7).next(), Some(PromotionId::new(8)));
    }

    #[test]
    fn test_next_stops_at_the_last_id() {
        assert_eq!(ProductId::new(i64::MAX).next(), None);
    }
}
