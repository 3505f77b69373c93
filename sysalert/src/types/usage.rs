//! Disk usage types

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::format::{human_bytes, whole_percent};

/// Raw filesystem figures reported by a [`DiskUsageProvider`](crate::info::DiskUsageProvider)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawUsage {
    /// Total capacity in bytes
    pub total_bytes: u64,
    /// Used space in bytes
    pub used_bytes: u64,
    /// Space available to unprivileged users in bytes
    pub free_bytes: u64,
    /// OS-reported usage percentage (0-100), reserved blocks accounted for
    pub used_percent: f64,
}

/// Usage of the filesystem holding a configured path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    /// Path that was queried
    pub path: PathBuf,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    /// Usage percentage as reported by the provider (0-100)
    pub used_percent: f64,
}

impl UsageSummary {
    pub fn new(path: impl Into<PathBuf>, raw: RawUsage) -> Self {
        Self {
            path: path.into(),
            total_bytes: raw.total_bytes,
            used_bytes: raw.used_bytes,
            free_bytes: raw.free_bytes,
            used_percent: raw.used_percent,
        }
    }

    /// Multi-line report: path, total, used, free, percent
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UsageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path: {}", self.path.display())?;
        writeln!(f, "Total: {}", human_bytes(self.total_bytes))?;
        writeln!(f, "Used: {}", human_bytes(self.used_bytes))?;
        writeln!(f, "Free: {}", human_bytes(self.free_bytes))?;
        writeln!(f, "Pct: {}", whole_percent(self.used_percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(used_percent: f64) -> UsageSummary {
        UsageSummary::new(
            "/data",
            RawUsage {
                total_bytes: 100_000_000_000,
                used_bytes: 80_000_000_000,
                free_bytes: 20_000_000_000,
                used_percent,
            },
        )
    }

    #[test]
    fn test_render_field_order() {
        let rendered = summary(80.0).render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Path: /data");
        assert_eq!(lines[1], format!("Total: {}", human_bytes(100_000_000_000)));
        assert_eq!(lines[2], format!("Used: {}", human_bytes(80_000_000_000)));
        assert_eq!(lines[3], format!("Free: {}", human_bytes(20_000_000_000)));
        assert_eq!(lines[4], "Pct: 80%");
    }

    #[test]
    fn test_render_rounds_percent() {
        assert!(summary(82.7).render().ends_with("Pct: 83%\n"));
        assert!(summary(82.2).render().ends_with("Pct: 82%\n"));
    }
}
