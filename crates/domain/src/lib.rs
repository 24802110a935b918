//! Domain types for the log group inventory.

#![forbid(unsafe_code)]

mod log_group;
mod report;
mod size;

pub use log_group::{
    DEFAULT_LOG_CLASS, LogGroupRecord, LogGroupRecordInput, NEVER_EXPIRES, Retention,
    TimestampZone,
};
pub use report::{InventoryReport, REPORT_COLUMNS, ReportCell, ReportRow};
pub use size::{SIZE_UNITS, format_bytes, format_bytes_with_units};
