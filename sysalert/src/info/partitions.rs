//! df-style listing of mounted filesystems

use sysinfo::Disks;

use super::disk::usage_from_disk;
use crate::format::{human_bytes, whole_percent};
use crate::types::Partition;

/// All mounted filesystems with a non-zero size
pub fn list_partitions() -> Vec<Partition> {
    let disks = Disks::new_with_refreshed_list();

    disks
        .iter()
        .filter(|disk| disk.total_space() > 0)
        .map(|disk| {
            let usage = usage_from_disk(disk);

            Partition {
                filesystem: disk.file_system().to_string_lossy().to_string(),
                total_bytes: usage.total_bytes,
                used_bytes: usage.used_bytes,
                available_bytes: usage.free_bytes,
                usage_percent: usage.used_percent,
                mount_point: disk.mount_point().to_string_lossy().to_string(),
            }
        })
        .collect()
}

/// Render partitions as a table with a header row
pub fn render_partitions(partitions: &[Partition]) -> String {
    let mut out = format_row("Filesystem", "Size", "Used", "Avail", "Use%", "Mounted on");
    for p in partitions {
        out.push_str(&format_row(
            &p.filesystem,
            &human_bytes(p.total_bytes),
            &human_bytes(p.used_bytes),
            &human_bytes(p.available_bytes),
            &whole_percent(p.usage_percent),
            &p.mount_point,
        ));
    }
    out
}

fn format_row(fs: &str, size: &str, used: &str, avail: &str, pct: &str, mount: &str) -> String {
    format!("{fs:<14} {size:>7} {used:>7} {avail:>7} {pct:>4} {mount}\n")
}
