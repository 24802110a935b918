//! Human-readable byte sizes.

/// Ordered magnitude units used for stored-byte sizes.
pub const SIZE_UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Formats a byte count with [`SIZE_UNITS`].
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with_units(bytes, &SIZE_UNITS)
}

/// Formats a byte count against an ordered list of magnitude units.
///
/// The magnitude is picked from the decimal digit count, `(digits - 1) / 3`,
/// clamped to the last unit. The count is then divided by `1024^magnitude` and
/// rounded to two decimals. A digit count is not a base-1024 logarithm, so
/// values near a 1024 boundary can land one unit away from a strict
/// computation: 1000 bytes prints as `0.98 KB`.
///
/// Zero is always `"0 Bytes"`. An empty unit list yields the plain count.
#[must_use]
pub fn format_bytes_with_units(bytes: u64, units: &[&str]) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let Some(last_index) = units.len().checked_sub(1) else {
        return bytes.to_string();
    };

    let digits = bytes.ilog10() as usize + 1;
    let index = ((digits - 1) / 3).min(last_index);
    let divisor = (0..index).fold(1.0_f64, |divisor, _| divisor * 1024.0);
    let value = round_to_hundredths(bytes as f64 / divisor);

    // Debug keeps a fractional digit on whole values ("1.0"), matching the
    // legacy report text.
    format!("{value:?} {}", units[index])
}

fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
