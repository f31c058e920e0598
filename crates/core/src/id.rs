//! Strongly-typed identifiers used across the workspace.
//!
//! The backend hands out plain numeric ids; these newtypes keep a user id
//! from ever being passed where a business id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to parse an identifier from its string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id: {value:?}")]
pub struct ParseIdError {
    kind: &'static str,
    value: String,
}

impl ParseIdError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Identifier of a user account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a business (the scoping key for every domain screen).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(i64);

macro_rules! impl_numeric_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| ParseIdError::new($name, s))
            }
        }
    };
}

impl_numeric_id!(UserId, "user");
impl_numeric_id!(BusinessId, "business");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_strings() {
        assert_eq!("42".parse::<BusinessId>().unwrap(), BusinessId::new(42));
        assert_eq!(" 7 ".parse::<UserId>().unwrap(), UserId::new(7));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let err = "abc".parse::<BusinessId>().unwrap_err();
        assert_eq!(err.to_string(), r#"invalid business id: "abc""#);
    }

    #[test]
    fn display_round_trips() {
        let id = BusinessId::new(77);
        assert_eq!(id.to_string().parse::<BusinessId>().unwrap(), id);
    }
}
