//! Metric helpers: accuracy, training-curve convergence, proxy A-distance,
//! and basic dataset statistics.
use std::collections::BTreeMap;

use ndarray::Array1;

use crate::data_handling::DatasetTriplet;

/// Fraction of scores that land on the right side of 0.5.
pub fn accuracy(scores: &Array1<f64>, labels: &Array1<i32>) -> f64 {
    assert_eq!(
        scores.len(),
        labels.len(),
        "scores and labels must have equal length"
    );
    let correct = scores
        .iter()
        .zip(labels.iter())
        .filter(|(&s, &label)| (s > 0.5) == (label == 1))
        .count();
    correct as f64 / labels.len() as f64
}

/// Slope-like statistic over the tail of a training accuracy curve.
///
/// Compares the mean of the final ~5% of epochs against the mean of the
/// preceding window of the same width, divided by the combined window
/// length. Near zero signals a plateau, positive signals the curve was
/// still improving when training stopped. Returns `None` for histories too
/// short to hold two windows.
pub fn convergence_indicator(history: &[f64]) -> Option<f64> {
    let n = history.len();
    if n < 2 {
        return None;
    }
    let w = (((n as f64) * 0.05).ceil() as usize).clamp(1, n / 2);

    let tail = &history[n - w..];
    let prev = &history[n - 2 * w..n - w];
    let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;

    Some((mean(tail) - mean(prev)) / (2 * w) as f64)
}

/// Proxy A-distance from a domain-discrimination accuracy: `2*acc - 1`.
/// Zero when the classifier cannot beat chance, approaching one as the
/// domains become fully separable.
pub fn half_a_distance(accuracy: f64) -> f64 {
    2.0 * accuracy - 1.0
}

/// Basic per-partition statistics recorded at generation time.
pub fn analyze_data(data: &DatasetTriplet) -> BTreeMap<String, f64> {
    let mut stats = BTreeMap::new();
    for (name, set) in [
        ("source", &data.source),
        ("global", &data.global),
        ("target", &data.target),
    ] {
        stats.insert(format!("{}-size", name), set.len() as f64);
        stats.insert(format!("{}-positive-rate", name), set.label_balance());
    }

    let center_dist = |a: &crate::data_handling::SampleSet, b: &crate::data_handling::SampleSet| {
        let diff = a.feature_means() - b.feature_means();
        diff.dot(&diff).sqrt()
    };
    stats.insert(
        "source-global-center-dist".to_string(),
        center_dist(&data.source, &data.global),
    );
    stats.insert(
        "source-target-center-dist".to_string(),
        center_dist(&data.source, &data.target),
    );
    stats.insert(
        "global-target-center-dist".to_string(),
        center_dist(&data.global, &data.target),
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn accuracy_thresholds_at_half() {
        let scores = array![0.9, 0.4, 0.6, 0.1];
        let labels = array![1, 0, 0, 1];
        assert!((accuracy(&scores, &labels) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn convergence_is_zero_for_a_constant_history() {
        let history = vec![0.8; 100];
        assert_eq!(convergence_indicator(&history), Some(0.0));
    }

    #[test]
    fn convergence_is_positive_for_a_rising_tail() {
        let history: Vec<f64> = (0..100).map(|i| i as f64 / 100.0).collect();
        assert!(convergence_indicator(&history).unwrap() > 0.0);
    }

    #[test]
    fn convergence_needs_two_epochs() {
        assert_eq!(convergence_indicator(&[0.5]), None);
        assert_eq!(convergence_indicator(&[]), None);
        assert!(convergence_indicator(&[0.5, 0.5]).is_some());
    }

    #[test]
    fn half_a_distance_bounds() {
        assert!((half_a_distance(0.5)).abs() < 1e-12);
        assert!((half_a_distance(1.0) - 1.0).abs() < 1e-12);
    }
}
