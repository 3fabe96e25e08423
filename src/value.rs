//! Cell values and the coercions the grid engines rely on.
//!
//! Every cell in a grid row holds a [`Value`]: a small sum type over the
//! primitives a host page can reasonably supply (string, number, boolean,
//! or null). Filtering, sorting, and grouping never work on the raw host
//! data directly; they go through the coercions defined here so that a
//! missing field, a numeric string, or a date-shaped string all behave
//! predictably.
//!
//! # Examples
//!
//! ```rust
//! use datagrid_widgets::value::Value;
//!
//! let v = Value::from("2021-03-04");
//! assert!(v.as_timestamp().is_some());
//! assert_eq!(Value::from(42.0).coerce_string(), "42");
//! assert_eq!(Value::Null.coerce_string(), "");
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date-time layouts tried, in order, by [`Value::as_timestamp`].
static DATETIME_FORMATS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]);

/// Date-only layouts tried after the date-time layouts.
static DATE_FORMATS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]);

/// A single cell value.
///
/// Rows map column keys to `Value`s. The variants mirror what a JSON-ish
/// host hands over; anything richer (dates, durations) arrives as a
/// string and is recognized heuristically by the coercions below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A text value.
    Str(String),
    /// A numeric value (all numbers are carried as `f64`).
    Num(f64),
    /// A boolean value.
    Bool(bool),
    /// An explicit null / missing value.
    Null,
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerces the value to a display string.
    ///
    /// Null coerces to the empty string, and whole numbers render without
    /// a trailing `.0`, matching how the values read in a cell.
    pub fn coerce_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => format_number(*n),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
        }
    }

    /// Attempts to read the value as a number.
    ///
    /// Native numbers pass through; non-empty strings must parse cleanly
    /// (`"12"` yes, `"12px"` no). Booleans and null are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()
            }
            _ => None,
        }
    }

    /// Attempts to read the value as a point in time (seconds since epoch).
    ///
    /// Only strings participate: RFC 3339 first, then a fixed set of
    /// common date-time and date layouts. Bare numbers are deliberately
    /// not treated as timestamps; the numeric comparison path already
    /// orders them correctly.
    pub fn as_timestamp(&self) -> Option<i64> {
        let Value::Str(s) = self else {
            return None;
        };
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.timestamp());
        }
        for fmt in DATETIME_FORMATS.iter() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt.and_utc().timestamp());
            }
        }
        for fmt in DATE_FORMATS.iter() {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
            }
        }
        None
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coerce_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_string() {
        assert_eq!(Value::from("hello").coerce_string(), "hello");
        assert_eq!(Value::from(3.0).coerce_string(), "3");
        assert_eq!(Value::from(3.5).coerce_string(), "3.5");
        assert_eq!(Value::from(true).coerce_string(), "true");
        assert_eq!(Value::Null.coerce_string(), "");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Value::from(7.0).as_number(), Some(7.0));
        assert_eq!(Value::from("42").as_number(), Some(42.0));
        assert_eq!(Value::from(" 42.5 ").as_number(), Some(42.5));
        assert_eq!(Value::from("").as_number(), None);
        assert_eq!(Value::from("12px").as_number(), None);
        assert_eq!(Value::from(true).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_as_timestamp_formats() {
        assert!(Value::from("2021-03-04").as_timestamp().is_some());
        assert!(Value::from("2021/03/04").as_timestamp().is_some());
        assert!(Value::from("03/04/2021").as_timestamp().is_some());
        assert!(Value::from("2021-03-04T10:30:00").as_timestamp().is_some());
        assert!(Value::from("2021-03-04 10:30:00").as_timestamp().is_some());
        assert!(Value::from("2021-03-04T10:30:00+02:00")
            .as_timestamp()
            .is_some());
    }

    #[test]
    fn test_as_timestamp_rejects_non_dates() {
        assert_eq!(Value::from("hello").as_timestamp(), None);
        assert_eq!(Value::from("2020").as_timestamp(), None);
        assert_eq!(Value::from(1234.0).as_timestamp(), None);
        assert_eq!(Value::Null.as_timestamp(), None);
    }

    #[test]
    fn test_timestamp_ordering() {
        let a = Value::from("2020-01-02").as_timestamp().unwrap();
        let b = Value::from("2020-01-10").as_timestamp().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_untagged_round_trip() {
        let json = r#"["x", 2.5, true, null]"#;
        let values: Vec<Value> = serde_json::from_str(json).unwrap();
        assert_eq!(
            values,
            vec![
                Value::from("x"),
                Value::from(2.5),
                Value::from(true),
                Value::Null
            ]
        );
        assert_eq!(serde_json::to_string(&values).unwrap(), json.replace(' ', ""));
    }
}
