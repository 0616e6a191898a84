//! Data structures for sample sets and source/global/target triplets.
//!
//! A `SampleSet` pairs a feature matrix with a binary label vector; a
//! `DatasetTriplet` holds the three disjoint partitions produced by the
//! selectors and consumed by the evaluation engine.
use ndarray::{Array1, Array2, Axis};

use crate::error::{Result, ShiftError};

/// A feature matrix (rows are samples) with parallel binary labels {0, 1}.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    pub x: Array2<f64>,
    pub y: Array1<i32>,
}

impl SampleSet {
    /// Create a sample set, validating that row counts match and N > 0.
    pub fn new(x: Array2<f64>, y: Array1<i32>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(ShiftError::InvalidConfiguration(format!(
                "feature matrix has {} rows but label vector has {} entries",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 {
            return Err(ShiftError::InvalidConfiguration(
                "sample set must contain at least one row".to_string(),
            ));
        }
        Ok(SampleSet { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Row-select into a new set. Indices may repeat (sampling with replacement).
    pub fn select(&self, indices: &[usize]) -> SampleSet {
        SampleSet {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
        }
    }

    /// Per-feature means over all rows.
    pub fn feature_means(&self) -> Array1<f64> {
        self.x.mean_axis(Axis(0)).expect("non-empty by construction")
    }

    /// Per-feature population standard deviations.
    pub fn feature_stds(&self) -> Array1<f64> {
        self.x.std_axis(Axis(0), 0.0)
    }

    /// Fraction of rows labeled 1.
    pub fn label_balance(&self) -> f64 {
        let positives = self.y.iter().filter(|&&v| v == 1).count();
        positives as f64 / self.y.len() as f64
    }
}

/// The three partitions of one generated dataset: source (biased training
/// pool), global (unbiased reference), and target (biased evaluation pool
/// with a different bias direction than source).
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetTriplet {
    pub source: SampleSet,
    pub global: SampleSet,
    pub target: SampleSet,
}

impl DatasetTriplet {
    /// Assemble a triplet, validating that all partitions share a feature space.
    pub fn new(source: SampleSet, global: SampleSet, target: SampleSet) -> Result<Self> {
        let d = global.n_features();
        if source.n_features() != d || target.n_features() != d {
            return Err(ShiftError::InvalidConfiguration(format!(
                "partition feature counts differ: source={}, global={}, target={}",
                source.n_features(),
                global.n_features(),
                target.n_features()
            )));
        }
        Ok(DatasetTriplet {
            source,
            global,
            target,
        })
    }

    pub fn n_features(&self) -> usize {
        self.global.n_features()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn rejects_mismatched_rows() {
        let x = Array2::zeros((3, 2));
        let y = Array1::zeros(2);
        assert!(SampleSet::new(x, y).is_err());
    }

    #[test]
    fn rejects_empty_set() {
        let x = Array2::zeros((0, 2));
        let y = Array1::zeros(0);
        assert!(SampleSet::new(x, y).is_err());
    }

    #[test]
    fn select_with_repeats() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![0, 1];
        let set = SampleSet::new(x, y).unwrap();
        let picked = set.select(&[1, 1, 0]);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked.x[(0, 0)], 3.0);
        assert_eq!(picked.y[2], 0);
    }

    #[test]
    fn label_balance_counts_positives() {
        let x = Array2::zeros((4, 1));
        let y = array![1, 0, 1, 1];
        let set = SampleSet::new(x, y).unwrap();
        assert!((set.label_balance() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn triplet_rejects_feature_mismatch() {
        let a = SampleSet::new(Array2::zeros((2, 3)), Array1::zeros(2)).unwrap();
        let b = SampleSet::new(Array2::zeros((2, 2)), Array1::zeros(2)).unwrap();
        let c = SampleSet::new(Array2::zeros((2, 3)), Array1::zeros(2)).unwrap();
        assert!(DatasetTriplet::new(a, b, c).is_err());
    }
}
