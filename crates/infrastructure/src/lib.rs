//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod cloudwatch_log_group_lister;
mod sts_account_identity_provider;
mod xlsx_report_writer;

pub use cloudwatch_log_group_lister::CloudWatchLogGroupLister;
pub use sts_account_identity_provider::StsAccountIdentityProvider;
pub use xlsx_report_writer::XlsxReportWriter;
