//! Timestamp formatting for line prefixes
//!
//! Lines written through [`LogWriter`](crate::LogWriter) are prefixed with a
//! bracketed timestamp. The default is local wall-clock time with
//! milliseconds, `2025-01-08 10:30:45.123`.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time with milliseconds: `2025-01-08 10:30:45.123`
    #[default]
    LocalMillis,

    /// ISO 8601 UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 local time with offset: `2025-01-08T10:30:45.123+02:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format applied to local time
    ///
    /// # Examples
    ///
    /// ```
    /// use line_batch_writer::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%H:%M".to_string());
    /// assert_eq!(format.format_now().len(), 5);
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::LocalMillis => datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            TimestampFormat::Iso8601 => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    #[must_use]
    pub fn format_now(&self) -> String {
        self.format(&Local::now())
    }

    /// Render `payload` as `[timestamp] payload`
    #[must_use]
    pub fn prefix_line(&self, payload: &str) -> String {
        format!("[{}] {}", self.format_now(), payload)
    }
}
