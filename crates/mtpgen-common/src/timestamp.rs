//! Project timestamps.
//!
//! Both the inner document and the outer container carry creation and
//! modification stamps in the `yy-MM-dd HH/mm` layout, local time.

use std::fmt;

use chrono::{Local, NaiveDateTime};

/// Default chrono format string for project timestamps (`26-01-29 13/55`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%y-%m-%d %H/%M";

/// A formatted project timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp(String);

impl Timestamp {
    /// Current local time rendered with `format`.
    pub fn now(format: &str) -> Self {
        Self(Local::now().format(format).to_string())
    }

    /// Render a fixed date/time with `format`.
    pub fn from_datetime(datetime: NaiveDateTime, format: &str) -> Self {
        Self(datetime.format(format).to_string())
    }

    /// Wrap an already formatted value.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The formatted value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_format() {
        let dt = NaiveDate::from_ymd_opt(2026, 1, 29)
            .unwrap()
            .and_hms_opt(13, 55, 49)
            .unwrap();
        let ts = Timestamp::from_datetime(dt, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(ts.as_str(), "26-01-29 13/55");
    }

    #[test]
    fn test_now_has_expected_shape() {
        let ts = Timestamp::now(DEFAULT_TIMESTAMP_FORMAT);
        let s = ts.as_str();
        assert_eq!(s.len(), 14);
        assert_eq!(&s[2..3], "-");
        assert_eq!(&s[8..9], " ");
        assert_eq!(&s[11..12], "/");
    }
}
