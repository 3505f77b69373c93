//! Mounted filesystem listing types

use serde::Serialize;

/// One row of the filesystem table
#[derive(Debug, Clone, Serialize)]
pub struct Partition {
    /// Filesystem type (e.g., "ext4", "xfs", "apfs")
    pub filesystem: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    /// Used share of the total (0-100)
    pub usage_percent: f64,
    pub mount_point: String,
}
