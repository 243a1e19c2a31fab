//! Descriptive statistics helpers

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Confidence from sample size: grows linearly and saturates at `full_at` samples
pub fn sample_confidence(samples: usize, full_at: usize) -> f64 {
    if full_at == 0 {
        return 1.0;
    }
    (samples as f64 / full_at as f64).min(1.0)
}

/// Relative change from `baseline` to `value`; `None` when the baseline is not positive
pub fn relative_change(value: f64, baseline: f64) -> Option<f64> {
    if baseline > 0.0 {
        Some((value - baseline) / baseline)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0, 9.0]), Some(5.0));
    }

    #[test]
    fn test_sample_confidence_saturates() {
        assert_eq!(sample_confidence(15, 30), 0.5);
        assert_eq!(sample_confidence(45, 30), 1.0);
        assert_eq!(sample_confidence(3, 0), 1.0);
    }

    #[test]
    fn test_relative_change() {
        assert_eq!(relative_change(6.0, 5.0), Some(0.2));
        assert_eq!(relative_change(6.0, 0.0), None);
    }
}
