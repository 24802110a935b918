//! Application services and ports.

#![forbid(unsafe_code)]

mod inventory_ports;
mod inventory_service;
mod region_fetcher;
mod report_path;

pub use inventory_ports::{
    AccountIdentityProvider, LogGroupDescriptor, LogGroupLister, LogGroupPage, ReportWriter,
};
pub use inventory_service::{InventoryOutcome, InventoryService, RegionFailure, RegionInventory};
pub use region_fetcher::RegionFetcher;
pub use report_path::unique_report_path;
