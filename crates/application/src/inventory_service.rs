//! Multi-region log group inventory.
//!
//! Resolves the account once, fans one fetch task out per region, and merges
//! results in completion order. A failing region is logged and skipped; it
//! never cancels the other regions.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};

use loginventory_core::{AppError, AppResult};
use loginventory_domain::{InventoryReport, LogGroupRecord};

use crate::inventory_ports::{AccountIdentityProvider, ReportWriter};
use crate::region_fetcher::RegionFetcher;
use crate::report_path::unique_report_path;


/// A region whose fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFailure {
    /// Region identifier.
    pub region: String,
    /// Error message of the failed fetch.
    pub message: String,
}

/// Merged result of a multi-region fetch.
#[derive(Debug, Clone)]
pub struct RegionInventory {
    /// Account the inventory ran under.
    pub account_id: String,
    /// Records of every region that succeeded, in completion order.
    pub records: Vec<LogGroupRecord>,
    /// Regions that failed.
    pub failures: Vec<RegionFailure>,
}

/// Result of a full inventory run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryOutcome {
    /// A report was written.
    Written {
        /// Path the report was written to.
        path: PathBuf,
        /// Number of data rows.
        record_count: usize,
        /// Regions left out of the report.
        failures: Vec<RegionFailure>,
    },
    /// No region returned any log group, so nothing was written.
    NoRecords {
        /// Regions that failed.
        failures: Vec<RegionFailure>,
    },
}

/// Application service producing the log group inventory report.
#[derive(Clone)]
pub struct InventoryService {
    identity_provider: Arc<dyn AccountIdentityProvider>,
    region_fetcher: RegionFetcher,
    report_writer: Arc<dyn ReportWriter>,
    report_base_path: PathBuf,
}

impl InventoryService {
    /// Creates the service from its ports and the base report path.
    #[must_use]
    pub fn new(
        identity_provider: Arc<dyn AccountIdentityProvider>,
        region_fetcher: RegionFetcher,
        report_writer: Arc<dyn ReportWriter>,
        report_base_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            identity_provider,
            region_fetcher,
            report_writer,
            report_base_path: report_base_path.into(),
        }
    }

    /// Fetches all regions concurrently and merges their records.
    ///
    /// Identity resolution failures are returned. Per-region failures are
    /// collected in [`RegionInventory::failures`].
    pub async fn collect(&self, regions: &[String]) -> AppResult<RegionInventory> {
        let account_id = self.identity_provider.account_id().await?;

        let mut tasks = JoinSet::new();
        let mut regions_by_task = HashMap::new();
        for region in distinct_regions(regions) {
            let fetcher = self.region_fetcher.clone();
            let task_region = region.clone();
            let task_account_id = account_id.clone();
            let handle = tasks.spawn(async move {
                fetcher
                    .fetch(task_region.as_str(), task_account_id.as_str())
                    .await
            });
            regions_by_task.insert(handle.id(), region);
        }

        let mut records = Vec::new();
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (task_id, result) = match joined {
                Ok((task_id, result)) => (task_id, result),
                Err(error) => (
                    error.id(),
                    Err(AppError::Internal(format!("region task did not complete: {error}"))),
                ),
            };
            let region = regions_by_task.remove(&task_id).unwrap_or_default();

            match result {
                Ok(region_records) => {
                    info!(
                        region = %region,
                        log_group_count = region_records.len(),
                        "fetched log groups"
                    );
                    records.extend(region_records);
                }
                Err(error) => {
                    warn!(
                        region = %region,
                        error = %error,
                        "failed to fetch log groups"
                    );
                    failures.push(RegionFailure {
                        region,
                        message: error.to_string(),
                    });
                }
            }
        }

        Ok(RegionInventory {
            account_id,
            records,
            failures,
        })
    }

    /// Runs the inventory and writes the report when any record was found.
    pub async fn run(&self, regions: &[String]) -> AppResult<InventoryOutcome> {
        let inventory = self.collect(regions).await?;

        if inventory.records.is_empty() {
            info!(
                failed_region_count = inventory.failures.len(),
                "no log groups found"
            );
            return Ok(InventoryOutcome::NoRecords {
                failures: inventory.failures,
            });
        }

        let report = InventoryReport::from_records(inventory.records);
        let path = unique_report_path(&self.report_base_path, |candidate| {
            self.report_writer.exists(candidate)
        });
        self.report_writer.write_report(&report, &path).await?;

        info!(
            path = %path.display(),
            account_id = %inventory.account_id,
            log_group_count = report.len(),
            "log group inventory saved"
        );

        Ok(InventoryOutcome::Written {
            path,
            record_count: report.len(),
            failures: inventory.failures,
        })
    }
}

fn distinct_regions(regions: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    regions
        .iter()
        .filter(|region| seen.insert(region.as_str()))
        .cloned()
        .collect()
}
