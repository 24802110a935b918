//! Log group inventory command.
//!
//! Lists CloudWatch Logs log groups across the configured regions and writes
//! them to an xlsx report, largest stored size first.

#![forbid(unsafe_code)]

mod config;

use std::sync::Arc;

use aws_config::BehaviorVersion;
use loginventory_application::{InventoryOutcome, InventoryService, RegionFetcher};
use loginventory_core::AppError;
use loginventory_infrastructure::{
    CloudWatchLogGroupLister, StsAccountIdentityProvider, XlsxReportWriter,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::InventoryConfig;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = InventoryConfig::load()?;
    info!(
        regions = ?config.regions,
        report_path = %config.report_path.display(),
        timestamp_zone = config.timestamp_zone.as_str(),
        "log group inventory started"
    );

    let service = build_inventory_service(&config).await;
    match service.run(&config.regions).await? {
        InventoryOutcome::Written {
            path,
            record_count,
            failures,
        } => {
            info!(
                path = %path.display(),
                log_group_count = record_count,
                failed_region_count = failures.len(),
                "log group inventory complete"
            );
        }
        InventoryOutcome::NoRecords { failures } => {
            warn!(
                failed_region_count = failures.len(),
                "log group inventory produced no report"
            );
        }
    }

    Ok(())
}

async fn build_inventory_service(config: &InventoryConfig) -> InventoryService {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let identity_provider = Arc::new(StsAccountIdentityProvider::new(&sdk_config));
    let lister = Arc::new(CloudWatchLogGroupLister::new(sdk_config));

    InventoryService::new(
        identity_provider,
        RegionFetcher::new(lister, config.timestamp_zone),
        Arc::new(XlsxReportWriter::new()),
        config.report_path.clone(),
    )
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
