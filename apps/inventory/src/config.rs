use std::env;
use std::path::PathBuf;

use loginventory_core::{AppError, AppResult, NonEmptyString};
use loginventory_domain::TimestampZone;

const DEFAULT_REGIONS: [&str; 2] = ["us-east-1", "us-west-2"];
const DEFAULT_REPORT_PATH: &str = "log_groups_inventory.xlsx";

/// Runtime settings for one inventory run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub regions: Vec<String>,
    pub report_path: PathBuf,
    pub timestamp_zone: TimestampZone,
}

impl InventoryConfig {
    /// Loads settings from the process environment.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let regions = match lookup("INVENTORY_REGIONS") {
            Some(value) => parse_regions(value.as_str())?,
            None => DEFAULT_REGIONS.iter().map(|region| (*region).to_owned()).collect(),
        };

        let report_path = lookup("INVENTORY_REPORT_PATH")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH), PathBuf::from);
        if report_path.file_name().is_none() {
            return Err(AppError::Validation(format!(
                "INVENTORY_REPORT_PATH '{}' must name a file",
                report_path.display()
            )));
        }

        let timestamp_zone = match lookup("INVENTORY_TIMESTAMP_ZONE") {
            Some(value) => value.parse::<TimestampZone>().map_err(|error| {
                AppError::Validation(format!("invalid INVENTORY_TIMESTAMP_ZONE: {error}"))
            })?,
            None => TimestampZone::default(),
        };

        Ok(Self {
            regions,
            report_path,
            timestamp_zone,
        })
    }
}

fn parse_regions(value: &str) -> AppResult<Vec<String>> {
    let regions: Vec<String> = value
        .split(',')
        .filter_map(|region| NonEmptyString::new(region).ok())
        .map(String::from)
        .collect();

    if regions.is_empty() {
        return Err(AppError::Validation(
            "INVENTORY_REGIONS must list at least one region".to_owned(),
        ));
    }

    Ok(regions)
}
