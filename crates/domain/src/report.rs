//! Tabular inventory report view.

use crate::log_group::{LogGroupRecord, NEVER_EXPIRES};

/// Header row of the inventory report.
///
/// The raw stored byte count is used for ordering only and is not a column.
pub const REPORT_COLUMNS: [&str; 8] = [
    "Region",
    "Account ID",
    "LogGroup Name",
    "ARN",
    "Log Class",
    "Retention",
    "Stored bytes formatted",
    "Creation time",
];

/// A single report cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCell<'a> {
    /// Text content.
    Text(&'a str),
    /// Whole-number content.
    Integer(i32),
}

/// One data row, aligned with [`REPORT_COLUMNS`].
pub type ReportRow<'a> = [ReportCell<'a>; REPORT_COLUMNS.len()];

/// Inventory records ordered by stored bytes, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryReport {
    records: Vec<LogGroupRecord>,
}

impl InventoryReport {
    /// Builds a report, sorting records by raw stored bytes descending.
    ///
    /// Records with equal sizes keep their relative order.
    #[must_use]
    pub fn from_records(mut records: Vec<LogGroupRecord>) -> Self {
        records.sort_by(|left, right| right.stored_bytes().cmp(&left.stored_bytes()));
        Self { records }
    }

    /// Returns the header row.
    #[must_use]
    pub fn columns(&self) -> &'static [&'static str] {
        &REPORT_COLUMNS
    }

    /// Returns the ordered records.
    #[must_use]
    pub fn records(&self) -> &[LogGroupRecord] {
        self.records.as_slice()
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the report has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns data rows in report order.
    pub fn rows(&self) -> impl Iterator<Item = ReportRow<'_>> + '_ {
        self.records.iter().map(report_row)
    }
}

fn report_row(record: &LogGroupRecord) -> ReportRow<'_> {
    let retention = record
        .retention()
        .days()
        .map_or(ReportCell::Text(NEVER_EXPIRES), ReportCell::Integer);

    [
        ReportCell::Text(record.region()),
        ReportCell::Text(record.account_id()),
        ReportCell::Text(record.name()),
        ReportCell::Text(record.arn()),
        ReportCell::Text(record.log_class()),
        retention,
        ReportCell::Text(record.stored_bytes_formatted()),
        ReportCell::Text(record.creation_time()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_group::{LogGroupRecordInput, TimestampZone};

    fn record(region: &str, name: &str, stored_bytes: u64, retention: Option<i32>) -> LogGroupRecord {
        LogGroupRecord::new(
            LogGroupRecordInput {
                region: region.to_owned(),
                account_id: "123456789012".to_owned(),
                name: name.to_owned(),
                arn: format!("arn:aws:logs:{region}:123456789012:log-group:{name}:*"),
                kms_key_id: None,
                retention_in_days: retention,
                stored_bytes,
                creation_time_millis: 0,
            },
            TimestampZone::Utc,
        )
        .unwrap_or_else(|_| panic!("test record"))
    }

    #[test]
    fn rows_are_sorted_by_stored_bytes_descending() {
        let report = InventoryReport::from_records(vec![
            record("us-east-1", "small", 500, None),
            record("us-west-2", "large", 2_000_000, Some(14)),
            record("us-east-1", "medium", 4_096, None),
        ]);

        let names: Vec<&str> = report.records().iter().map(LogGroupRecord::name).collect();
        assert_eq!(names, vec!["large", "medium", "small"]);
    }

    #[test]
    fn equal_sizes_keep_insertion_order() {
        let report = InventoryReport::from_records(vec![
            record("us-east-1", "first", 10, None),
            record("us-east-1", "second", 10, None),
        ]);

        let names: Vec<&str> = report.records().iter().map(LogGroupRecord::name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn raw_byte_column_is_not_emitted() {
        let report = InventoryReport::from_records(vec![record("us-east-1", "a", 1, None)]);

        assert!(!report.columns().contains(&"Stored bytes"));
        assert!(report.columns().contains(&"Stored bytes formatted"));
        assert!(report.rows().all(|row| row.len() == report.columns().len()));
    }

    #[test]
    fn retention_cells_are_numeric_or_never() {
        let report = InventoryReport::from_records(vec![
            record("us-east-1", "kept", 20, Some(90)),
            record("us-east-1", "forever", 10, None),
        ]);

        let retention: Vec<ReportCell<'_>> = report.rows().map(|row| row[5]).collect();
        assert_eq!(
            retention,
            vec![ReportCell::Integer(90), ReportCell::Text("Never")]
        );
    }

    #[test]
    fn row_cells_follow_column_order() {
        let report =
            InventoryReport::from_records(vec![record("eu-west-1", "/app/api", 2_000_000, None)]);
        let rows: Vec<ReportRow<'_>> = report.rows().collect();

        assert_eq!(
            rows,
            vec![[
                ReportCell::Text("eu-west-1"),
                ReportCell::Text("123456789012"),
                ReportCell::Text("/app/api"),
                ReportCell::Text("arn:aws:logs:eu-west-1:123456789012:log-group:/app/api:*"),
                ReportCell::Text("Standard"),
                ReportCell::Text("Never"),
                ReportCell::Text("1.91 MB"),
                ReportCell::Text("1970-01-01 00:00:00"),
            ]]
        );
    }
}
