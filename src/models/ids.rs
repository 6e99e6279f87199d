//! Transaction identifiers
//!
//! Ids are integers derived from the creation time in milliseconds, matching
//! the records already persisted by earlier versions of the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Create an id from the current time in milliseconds
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    /// Wrap an existing raw id
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw integer value
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// The id immediately following this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("txn-").unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for TransactionId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_time_derived() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = TransactionId::now();
        let after = chrono::Utc::now().timestamp_millis();
        assert!(id.as_i64() >= before && id.as_i64() <= after);
    }

    #[test]
    fn test_parse() {
        let id: TransactionId = "1730050032447".parse().unwrap();
        assert_eq!(id, TransactionId::from_raw(1730050032447));
        let id: TransactionId = "txn-42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
        assert!("abc".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_serialization() {
        let id = TransactionId::from_raw(1730049802671);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1730049802671");
        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
