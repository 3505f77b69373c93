//! OS disk metric collection
//!
//! [`DiskUsageProvider`] is the seam between the alert pipeline and the
//! operating system. Tests substitute an in-memory provider.

pub mod disk;
pub mod partitions;

use std::path::Path;

use crate::error::QueryError;
use crate::types::RawUsage;

pub use disk::SysinfoProvider;
#[cfg(unix)]
pub use disk::StatvfsProvider;

/// Source of filesystem usage figures for a path
pub trait DiskUsageProvider: Send + Sync {
    /// Usage of the filesystem containing `path`
    fn usage(&self, path: &Path) -> Result<RawUsage, QueryError>;
}

/// Provider used by the binary on this platform
#[cfg(unix)]
pub type PlatformProvider = StatvfsProvider;

/// Provider used by the binary on this platform
#[cfg(not(unix))]
pub type PlatformProvider = SysinfoProvider;
