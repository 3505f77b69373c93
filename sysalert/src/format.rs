//! Display helpers shared by the usage report and the partition table

use humansize::{format_size, DECIMAL};

/// Render a byte count with SI units, e.g. `1.2 GB`
pub fn human_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Render a percentage as a whole number with a trailing `%`.
///
/// Rounds to nearest, ties to even. Display only; alert decisions always use
/// the unrounded value.
pub fn whole_percent(percent: f64) -> String {
    format!("{:.0}%", percent)
}
