//! Filesystem usage providers

use std::path::Path;

use sysinfo::{Disk, Disks};
use tracing::debug;

use super::DiskUsageProvider;
use crate::error::QueryError;
use crate::types::RawUsage;

/// Reads usage with `statvfs(3)`, matching what `df` reports.
///
/// Free space counts only blocks available to unprivileged users, so
/// `used + free` is below `total` whenever the filesystem reserves blocks.
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct StatvfsProvider;

#[cfg(unix)]
impl DiskUsageProvider for StatvfsProvider {
    fn usage(&self, path: &Path) -> Result<RawUsage, QueryError> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
            QueryError::InvalidPath {
                path: path.to_path_buf(),
            }
        })?;

        let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
        let ret = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
        if ret != 0 {
            return Err(QueryError::Os {
                path: path.to_path_buf(),
                source: std::io::Error::last_os_error(),
            });
        }

        #[allow(clippy::unnecessary_cast)]
        let (blocks, blocks_free, blocks_avail, fragment) = (
            stat.f_blocks as u64,
            stat.f_bfree as u64,
            stat.f_bavail as u64,
            stat.f_frsize as u64,
        );

        let usage = usage_from_blocks(blocks, blocks_free, blocks_avail, fragment);
        debug!(path = %path.display(), ?usage, "statvfs");
        Ok(usage)
    }
}

/// Convert statvfs block counts into byte figures.
///
/// The percentage is `used / (used + avail)`, which leaves the root-reserved
/// blocks out of the denominator.
#[cfg_attr(not(unix), allow(dead_code))]
pub(crate) fn usage_from_blocks(
    blocks: u64,
    blocks_free: u64,
    blocks_avail: u64,
    fragment: u64,
) -> RawUsage {
    let total = blocks.saturating_mul(fragment);
    let free = blocks_avail.saturating_mul(fragment);
    let used = blocks.saturating_sub(blocks_free).saturating_mul(fragment);

    let denominator = used.saturating_add(free);
    let used_percent = if denominator > 0 {
        (used as f64 / denominator as f64) * 100.0
    } else {
        0.0
    };

    RawUsage {
        total_bytes: total,
        used_bytes: used,
        free_bytes: free,
        used_percent,
    }
}

/// Reads usage from the mounted disk list, for platforms without statvfs.
///
/// The disk whose mount point is the longest prefix of the canonical path wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoProvider;

impl DiskUsageProvider for SysinfoProvider {
    fn usage(&self, path: &Path) -> Result<RawUsage, QueryError> {
        let canonical = path.canonicalize().map_err(|source| QueryError::Os {
            path: path.to_path_buf(),
            source,
        })?;

        let disks = Disks::new_with_refreshed_list();
        let disk = containing_disk(&disks, &canonical).ok_or_else(|| QueryError::NotMounted {
            path: path.to_path_buf(),
        })?;

        debug!(
            path = %path.display(),
            mount_point = %disk.mount_point().display(),
            "resolved mount point"
        );
        Ok(usage_from_disk(disk))
    }
}

fn containing_disk<'a>(disks: &'a Disks, path: &Path) -> Option<&'a Disk> {
    disks
        .iter()
        .filter(|disk| path.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().components().count())
}

pub(crate) fn usage_from_disk(disk: &Disk) -> RawUsage {
    let total = disk.total_space();
    let available = disk.available_space();
    let used = total.saturating_sub(available);

    RawUsage {
        total_bytes: total,
        used_bytes: used,
        free_bytes: available,
        used_percent: if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        },
    }
}
