//! Bias-weighted sampling from a candidate pool, with replacement.
//!
//! Two weighting policies: a sigmoid of the standardized first feature
//! (rejection sampling), and a product of per-dimension Gaussian densities
//! (weighted random choice). Both return exactly `n` rows.
use ndarray::{Array1, Array2, Axis};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use statrs::distribution::{Continuous, Normal};

use crate::error::{Result, ShiftError};

/// Floor on standard deviations to keep densities finite.
const MIN_STD: f64 = 1e-6;

/// Sample `n` rows with replacement, weighted by a sigmoid of the
/// standardized first feature dimension scaled by `bias`.
///
/// Each candidate row is accepted with probability
/// `logistic(standardized(x[0]) * bias)`; rejected draws are retried until
/// `n` rows are filled. With `bias = 0` every weight is 0.5 and the sample
/// is an unbiased draw from the pool.
///
/// # Errors
///
/// `DegenerateDistribution` when the first feature has zero variance over
/// the pool, `InsufficientData` when the pool is empty.
pub fn sample_sigmoid<R: Rng + ?Sized>(
    x: &Array2<f64>,
    y: &Array1<i32>,
    n: usize,
    bias: f64,
    rng: &mut R,
) -> Result<(Array2<f64>, Array1<i32>)> {
    let pool = x.nrows();
    if pool == 0 {
        return Err(ShiftError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }

    let v = x.column(0);
    let mean = v.mean().unwrap_or(0.0);
    let std = v.std(0.0);
    if std == 0.0 {
        return Err(ShiftError::DegenerateDistribution(
            "first feature has zero variance; sigmoid bias is meaningless".to_string(),
        ));
    }

    let probs: Vec<f64> = v
        .iter()
        .map(|&val| {
            let norm = (val - mean) / std;
            1.0 / (1.0 + (-norm * bias).exp())
        })
        .collect();

    // Acceptance probabilities are strictly positive, so this always fills.
    let mut picked = Vec::with_capacity(n);
    while picked.len() < n {
        let i = rng.gen_range(0..pool);
        if rng.gen::<f64>() < probs[i] {
            picked.push(i);
        }
    }

    Ok((x.select(Axis(0), &picked), y.select(Axis(0), &picked)))
}

/// Sample `n` rows with replacement, weighted by a zero-covariance Gaussian
/// density centered at `mean` with per-dimension `std`, normalized over the
/// pool and drawn by weighted choice.
///
/// Densities are accumulated in log space before normalization so that rows
/// far from the center do not underflow the whole weight vector.
///
/// # Errors
///
/// `InsufficientData` when the pool is empty, `InvalidConfiguration` when
/// `mean`/`std` do not match the feature count, `DegenerateDistribution`
/// when no row carries positive weight.
pub fn sample_density<R: Rng + ?Sized>(
    x: &Array2<f64>,
    y: &Array1<i32>,
    n: usize,
    mean: &Array1<f64>,
    std: &Array1<f64>,
    rng: &mut R,
) -> Result<(Array2<f64>, Array1<i32>)> {
    let pool = x.nrows();
    if pool == 0 {
        return Err(ShiftError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }
    if mean.len() != x.ncols() || std.len() != x.ncols() {
        return Err(ShiftError::InvalidConfiguration(format!(
            "density parameters have {} / {} dimensions, pool has {}",
            mean.len(),
            std.len(),
            x.ncols()
        )));
    }

    let normals: Vec<Normal> = mean
        .iter()
        .zip(std.iter())
        .map(|(&m, &s)| {
            Normal::new(m, s.max(MIN_STD)).map_err(|err| {
                ShiftError::DegenerateDistribution(format!("invalid density parameters: {}", err))
            })
        })
        .collect::<Result<_>>()?;

    let log_weights: Vec<f64> = (0..pool)
        .map(|row| {
            x.row(row)
                .iter()
                .zip(normals.iter())
                .map(|(&val, normal)| normal.ln_pdf(val))
                .sum()
        })
        .collect();

    let max_lw = log_weights
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = log_weights.iter().map(|&lw| (lw - max_lw).exp()).collect();

    let choice = WeightedIndex::new(&weights).map_err(|err| {
        ShiftError::DegenerateDistribution(format!("density weights are unusable: {}", err))
    })?;

    let picked: Vec<usize> = (0..n).map(|_| choice.sample(rng)).collect();
    Ok((x.select(Axis(0), &picked), y.select(Axis(0), &picked)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(n: usize) -> (Array2<f64>, Array1<i32>) {
        // first feature is a ramp so its variance is non-zero
        let x = Array::from_shape_fn((n, 2), |(i, j)| {
            if j == 0 {
                i as f64 / n as f64
            } else {
                0.5
            }
        });
        let y = Array::from_shape_fn(n, |i| (i % 2) as i32);
        (x, y)
    }

    #[test]
    fn sigmoid_fills_exactly_n_under_heavy_skew() {
        let (x, y) = pool(50);
        let mut rng = StdRng::seed_from_u64(7);
        // strong negative bias drives most acceptance probabilities near zero
        let (sx, sy) = sample_sigmoid(&x, &y, 200, -25.0, &mut rng).unwrap();
        assert_eq!(sx.nrows(), 200);
        assert_eq!(sy.len(), 200);
    }

    #[test]
    fn sigmoid_zero_bias_matches_unbiased_sampling() {
        let (x, y) = pool(400);
        let mut rng = StdRng::seed_from_u64(11);
        let (sx, _) = sample_sigmoid(&x, &y, 4000, 0.0, &mut rng).unwrap();
        let sampled_mean = sx.column(0).mean().unwrap();
        let pool_mean = x.column(0).mean().unwrap();
        assert!(
            (sampled_mean - pool_mean).abs() < 0.02,
            "biasless sample drifted: {} vs {}",
            sampled_mean,
            pool_mean
        );
    }

    #[test]
    fn sigmoid_positive_bias_shifts_the_marginal() {
        let (x, y) = pool(400);
        let mut rng = StdRng::seed_from_u64(13);
        let (sx, _) = sample_sigmoid(&x, &y, 2000, 4.0, &mut rng).unwrap();
        let sampled_mean = sx.column(0).mean().unwrap();
        let pool_mean = x.column(0).mean().unwrap();
        assert!(sampled_mean > pool_mean + 0.05);
    }

    #[test]
    fn sigmoid_zero_variance_is_degenerate() {
        let x = Array2::from_elem((10, 2), 1.0);
        let y = Array1::zeros(10);
        let mut rng = StdRng::seed_from_u64(3);
        match sample_sigmoid(&x, &y, 5, 1.0, &mut rng) {
            Err(ShiftError::DegenerateDistribution(_)) => {}
            other => panic!("expected DegenerateDistribution, got {:?}", other),
        }
    }

    #[test]
    fn density_prefers_rows_near_center() {
        let x = array![[0.0, 0.0], [5.0, 5.0], [10.0, 10.0]];
        let y = array![0, 1, 0];
        let mean = array![0.0, 0.0];
        let std = array![1.0, 1.0];
        let mut rng = StdRng::seed_from_u64(5);
        let (sx, _) = sample_density(&x, &y, 100, &mean, &std, &mut rng).unwrap();
        let near_origin = (0..sx.nrows()).filter(|&i| sx[(i, 0)] == 0.0).count();
        assert!(near_origin > 95, "only {} of 100 draws near center", near_origin);
    }

    #[test]
    fn density_rejects_empty_pool() {
        let x = Array2::zeros((0, 2));
        let y = Array1::zeros(0);
        let mut rng = StdRng::seed_from_u64(5);
        let res = sample_density(&x, &y, 3, &array![0.0, 0.0], &array![1.0, 1.0], &mut rng);
        assert!(matches!(res, Err(ShiftError::InsufficientData { .. })));
    }
}
