//! Threshold decision

use crate::types::{AlertThreshold, UsageSummary};

/// True when usage is strictly above the threshold; equality does not alert
pub fn should_alert(summary: &UsageSummary, threshold: AlertThreshold) -> bool {
    summary.used_percent > threshold.percent()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawUsage;

    fn summary(used_percent: f64) -> UsageSummary {
        UsageSummary::new(
            "/data",
            RawUsage {
                total_bytes: 1000,
                used_bytes: 900,
                free_bytes: 100,
                used_percent,
            },
        )
    }

    fn threshold(percent: f64) -> AlertThreshold {
        AlertThreshold::new(percent).unwrap()
    }

    #[test]
    fn test_equal_does_not_alert() {
        for pct in [0.0, 42.5, 90.0, 100.0] {
            assert!(!should_alert(&summary(pct), threshold(pct)), "pct {}", pct);
        }
    }

    #[test]
    fn test_above_alerts() {
        assert!(should_alert(&summary(90.000_1), threshold(90.0)));
        assert!(should_alert(&summary(95.0), threshold(90.0)));
        assert!(should_alert(&summary(0.1), threshold(0.0)));
    }

    #[test]
    fn test_below_does_not_alert() {
        assert!(!should_alert(&summary(89.999), threshold(90.0)));
        assert!(!should_alert(&summary(50.0), threshold(90.0)));
        assert!(!should_alert(&summary(100.0), threshold(100.0)));
    }

    #[test]
    fn test_uses_unrounded_value() {
        // Renders as "90%" but is still above the threshold
        assert!(should_alert(&summary(90.4), threshold(90.0)));
    }
}
