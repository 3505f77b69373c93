//! Usage report for the configured path

use std::path::Path;

use tracing::debug;

use crate::error::QueryError;
use crate::info::DiskUsageProvider;
use crate::types::UsageSummary;

/// Query the provider and wrap its figures in a [`UsageSummary`].
///
/// `used_percent` is the provider's value. It is not recomputed from
/// `used / total`, which would ignore reserved blocks.
pub fn get_usage<P>(provider: &P, path: &Path) -> Result<UsageSummary, QueryError>
where
    P: DiskUsageProvider + ?Sized,
{
    let raw = provider.usage(path)?;
    debug!(path = %path.display(), used_percent = raw.used_percent, "disk usage queried");
    Ok(UsageSummary::new(path, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawUsage;

    struct FixedProvider(RawUsage);

    impl DiskUsageProvider for FixedProvider {
        fn usage(&self, _path: &Path) -> Result<RawUsage, QueryError> {
            Ok(self.0)
        }
    }

    struct FailingProvider;

    impl DiskUsageProvider for FailingProvider {
        fn usage(&self, path: &Path) -> Result<RawUsage, QueryError> {
            Err(QueryError::NotMounted {
                path: path.to_path_buf(),
            })
        }
    }

    #[test]
    fn test_percent_passes_through() {
        let provider = FixedProvider(RawUsage {
            total_bytes: 100,
            used_bytes: 80,
            free_bytes: 20,
            used_percent: 82.0,
        });

        let summary = get_usage(&provider, Path::new("/data")).unwrap();
        assert_eq!(summary.used_percent, 82.0);
        assert_eq!(summary.total_bytes, 100);
        assert_eq!(summary.used_bytes, 80);
        assert_eq!(summary.free_bytes, 20);
        assert_eq!(summary.path, Path::new("/data"));
    }

    #[test]
    fn test_query_error_propagates() {
        let result = get_usage(&FailingProvider, Path::new("/nowhere"));
        assert!(matches!(result, Err(QueryError::NotMounted { .. })));
    }
}
