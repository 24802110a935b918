//! Ports for the collaborators the inventory depends on.

use std::path::Path;

use async_trait::async_trait;

use loginventory_core::AppResult;
use loginventory_domain::{InventoryReport, LogGroupRecordInput};

/// Raw log group values as returned by the listing provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroupDescriptor {
    /// Log group name.
    pub name: String,
    /// Log group ARN.
    pub arn: String,
    /// KMS key identifier, if the group is encrypted with one.
    pub kms_key_id: Option<String>,
    /// Retention in days; absent when events never expire.
    pub retention_in_days: Option<i32>,
    /// Stored bytes.
    pub stored_bytes: u64,
    /// Creation time in epoch milliseconds.
    pub creation_time_millis: i64,
}

impl LogGroupDescriptor {
    /// Attaches region and account context for record construction.
    #[must_use]
    pub fn into_record_input(self, region: &str, account_id: &str) -> LogGroupRecordInput {
        LogGroupRecordInput {
            region: region.to_owned(),
            account_id: account_id.to_owned(),
            name: self.name,
            arn: self.arn,
            kms_key_id: self.kms_key_id,
            retention_in_days: self.retention_in_days,
            stored_bytes: self.stored_bytes,
            creation_time_millis: self.creation_time_millis,
        }
    }
}

/// One page of a log group listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogGroupPage {
    /// Log groups on this page.
    pub log_groups: Vec<LogGroupDescriptor>,
    /// Cursor for the next page; `None` once the listing is exhausted.
    pub next_token: Option<String>,
}

/// Port resolving the account the inventory runs under.
#[async_trait]
pub trait AccountIdentityProvider: Send + Sync {
    /// Returns the caller's account identifier.
    async fn account_id(&self) -> AppResult<String>;
}

/// Port listing log groups of one region page by page.
#[async_trait]
pub trait LogGroupLister: Send + Sync {
    /// Returns the page addressed by `next_token`, or the first page when
    /// `None`.
    async fn list_log_groups(
        &self,
        region: &str,
        next_token: Option<String>,
    ) -> AppResult<LogGroupPage>;
}

/// Port persisting the inventory report.
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Returns whether something already occupies `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Writes the report to `path`.
    async fn write_report(&self, report: &InventoryReport, path: &Path) -> AppResult<()>;
}
