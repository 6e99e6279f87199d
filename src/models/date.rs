//! Transaction dates
//!
//! Dates are calendar days with no time of day. Records coming from storage
//! may carry strings that do not parse; those are kept verbatim so nothing is
//! lost on save, and every computation orders and buckets them as the Unix
//! epoch (`1970-01-01`).
//!
//! Accepted formats, after trimming whitespace:
//! - `YYYY-MM-DD`
//! - `YYYY/MM/DD`
//! - an ISO 8601 date-time starting with `YYYY-MM-DD` followed by `T` or a
//!   space (the time part is discarded)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Date of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionDate {
    /// A date that parsed under the accepted formats
    Valid(NaiveDate),
    /// The raw text of a date that could not be parsed
    Invalid(String),
}

impl TransactionDate {
    /// Parse a date string; never fails, see the module docs for the contract
    pub fn parse(s: &str) -> Self {
        match parse_date(s) {
            Some(date) => Self::Valid(date),
            None => Self::Invalid(s.to_string()),
        }
    }

    /// The fallback date used for unparseable input
    pub fn epoch() -> NaiveDate {
        NaiveDate::default()
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The parsed date, if any
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid(_) => None,
        }
    }

    /// The date used for ordering and bucketing
    pub fn effective(&self) -> NaiveDate {
        self.as_date().unwrap_or_else(Self::epoch)
    }
}

impl From<NaiveDate> for TransactionDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl From<String> for TransactionDate {
    fn from(s: String) -> Self {
        match parse_date(&s) {
            Some(date) => Self::Valid(date),
            None => Self::Invalid(s),
        }
    }
}

impl From<TransactionDate> for String {
    fn from(date: TransactionDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => write!(f, "{}", date.format(CANONICAL_FORMAT)),
            Self::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, CANONICAL_FORMAT) {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        return Some(date);
    }

    // Date-time: keep the calendar part only
    let (day, rest) = (s.get(..10)?, s.get(10..)?);
    if rest.starts_with('T') || rest.starts_with(' ') {
        return NaiveDate::parse_from_str(day, CANONICAL_FORMAT).ok();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accepted_formats() {
        assert_eq!(TransactionDate::parse("2024-10-27").as_date(), Some(ymd(2024, 10, 27)));
        assert_eq!(TransactionDate::parse(" 2024/10/27 ").as_date(), Some(ymd(2024, 10, 27)));
        assert_eq!(
            TransactionDate::parse("2024-10-27T15:30:00Z").as_date(),
            Some(ymd(2024, 10, 27))
        );
        assert_eq!(
            TransactionDate::parse("2024-10-27 08:00").as_date(),
            Some(ymd(2024, 10, 27))
        );
    }

    #[test]
    fn test_invalid_falls_back_to_epoch() {
        for raw in ["", "yesterday", "2024-13-01", "2024-02-30", "27/10/2024"] {
            let date = TransactionDate::parse(raw);
            assert!(!date.is_valid(), "{raw:?} should be invalid");
            assert_eq!(date.effective(), ymd(1970, 1, 1));
        }
    }

    #[test]
    fn test_invalid_raw_text_is_preserved() {
        let date = TransactionDate::parse("someday");
        assert_eq!(date.to_string(), "someday");
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"someday\"");
    }

    #[test]
    fn test_serialization_is_canonical() {
        let date: TransactionDate = serde_json::from_str("\"2024/01/05\"").unwrap();
        assert_eq!(date, TransactionDate::Valid(ymd(2024, 1, 5)));
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-01-05\"");
    }
}
