//! Log group records discovered by the inventory.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Local};
use loginventory_core::{AppError, AppResult};

use crate::size::format_bytes;

/// Log class written when the provider reports no key identifier.
pub const DEFAULT_LOG_CLASS: &str = "Standard";

/// Retention label for log groups that never expire.
pub const NEVER_EXPIRES: &str = "Never";

const CREATION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Retention setting of a log group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Events are kept for the given number of days.
    Days(i32),
    /// Events are kept indefinitely.
    Never,
}

impl Retention {
    /// Resolves an optional provider retention value.
    #[must_use]
    pub fn from_days(days: Option<i32>) -> Self {
        days.map_or(Self::Never, Self::Days)
    }

    /// Returns the retention in days, if any.
    #[must_use]
    pub fn days(self) -> Option<i32> {
        match self {
            Self::Days(days) => Some(days),
            Self::Never => None,
        }
    }
}

impl Display for Retention {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Days(days) => write!(formatter, "{days}"),
            Self::Never => formatter.write_str(NEVER_EXPIRES),
        }
    }
}

/// Calendar used to render creation timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampZone {
    /// Host local time.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
}

impl TimestampZone {
    /// Returns the stable configuration value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Utc => "utc",
        }
    }

    /// Renders epoch milliseconds as `YYYY-MM-DD HH:MM:SS`, dropping
    /// sub-second precision.
    pub fn format_epoch_millis(self, millis: i64) -> AppResult<String> {
        let instant = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            AppError::Validation(format!(
                "creation time {millis} ms is outside the supported calendar range"
            ))
        })?;

        let formatted = match self {
            Self::Local => instant
                .with_timezone(&Local)
                .format(CREATION_TIME_FORMAT)
                .to_string(),
            Self::Utc => instant.format(CREATION_TIME_FORMAT).to_string(),
        };

        Ok(formatted)
    }
}

impl FromStr for TimestampZone {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" => Ok(Self::Utc),
            _ => Err(AppError::Validation(format!(
                "unknown timestamp zone '{value}', expected 'local' or 'utc'"
            ))),
        }
    }
}

/// Raw values used to construct a [`LogGroupRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroupRecordInput {
    /// Region the log group lives in.
    pub region: String,
    /// Owning account identifier.
    pub account_id: String,
    /// Log group name.
    pub name: String,
    /// Log group ARN.
    pub arn: String,
    /// KMS key identifier, when the group is encrypted with one.
    pub kms_key_id: Option<String>,
    /// Retention in days; absent when events never expire.
    pub retention_in_days: Option<i32>,
    /// Stored bytes reported by the provider.
    pub stored_bytes: u64,
    /// Creation time in epoch milliseconds.
    pub creation_time_millis: i64,
}

/// One log group as it appears in the inventory report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroupRecord {
    region: String,
    account_id: String,
    name: String,
    arn: String,
    log_class: String,
    retention: Retention,
    stored_bytes: u64,
    stored_bytes_formatted: String,
    creation_time: String,
}

impl LogGroupRecord {
    /// Builds a record, resolving provider defaults and derived columns.
    pub fn new(input: LogGroupRecordInput, timestamp_zone: TimestampZone) -> AppResult<Self> {
        let creation_time = timestamp_zone.format_epoch_millis(input.creation_time_millis)?;

        Ok(Self {
            region: input.region,
            account_id: input.account_id,
            name: input.name,
            arn: input.arn,
            log_class: input
                .kms_key_id
                .unwrap_or_else(|| DEFAULT_LOG_CLASS.to_owned()),
            retention: Retention::from_days(input.retention_in_days),
            stored_bytes: input.stored_bytes,
            stored_bytes_formatted: format_bytes(input.stored_bytes),
            creation_time,
        })
    }

    /// Returns the region.
    #[must_use]
    pub fn region(&self) -> &str {
        self.region.as_str()
    }

    /// Returns the account identifier.
    #[must_use]
    pub fn account_id(&self) -> &str {
        self.account_id.as_str()
    }

    /// Returns the log group name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the log group ARN.
    #[must_use]
    pub fn arn(&self) -> &str {
        self.arn.as_str()
    }

    /// Returns the "Log Class" column value.
    ///
    /// This carries the provider's KMS key identifier, not its storage class;
    /// the name is kept for report compatibility.
    #[must_use]
    pub fn log_class(&self) -> &str {
        self.log_class.as_str()
    }

    /// Returns the retention setting.
    #[must_use]
    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Returns the raw stored byte count.
    #[must_use]
    pub fn stored_bytes(&self) -> u64 {
        self.stored_bytes
    }

    /// Returns the human-readable stored size.
    #[must_use]
    pub fn stored_bytes_formatted(&self) -> &str {
        self.stored_bytes_formatted.as_str()
    }

    /// Returns the creation time at second precision.
    #[must_use]
    pub fn creation_time(&self) -> &str {
        self.creation_time.as_str()
    }
}
