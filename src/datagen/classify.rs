//! Base dataset generation for a binary classification task.
//!
//! Produces Gaussian class clusters centered on hypercube vertices in an
//! informative feature subspace, optionally padded with redundant linear
//! combinations, repeated columns, and pure-noise features.
use std::collections::HashSet;

use ndarray::{Array1, Array2, Axis};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use crate::error::{Result, ShiftError};

/// Configuration for the base classification generator.
///
/// Defaults follow the conventional generator parameterization: 100 samples,
/// 20 features of which 2 are informative and 2 redundant, 2 clusters per
/// class, unit class separation. `random_state` pins the base distribution so
/// repeated builder calls draw fresh selections from the same pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_informative: usize,
    pub n_redundant: usize,
    pub n_repeated: usize,
    pub n_clusters_per_class: usize,
    pub class_sep: f64,
    pub random_state: Option<u64>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifyConfig {
            n_samples: 100,
            n_features: 20,
            n_informative: 2,
            n_redundant: 2,
            n_repeated: 0,
            n_clusters_per_class: 2,
            class_sep: 1.0,
            random_state: None,
        }
    }
}

impl ClassifyConfig {
    /// Validate the configuration eagerly, before any sampling happens.
    pub fn validate(&self) -> Result<()> {
        if self.n_samples < 2 {
            return Err(ShiftError::InvalidConfiguration(
                "need at least two samples".to_string(),
            ));
        }
        if self.n_informative == 0 {
            return Err(ShiftError::InvalidConfiguration(
                "need at least one informative feature".to_string(),
            ));
        }
        if self.n_informative + self.n_redundant + self.n_repeated > self.n_features {
            return Err(ShiftError::InvalidConfiguration(format!(
                "informative({}) + redundant({}) + repeated({}) exceed n_features({})",
                self.n_informative, self.n_redundant, self.n_repeated, self.n_features
            )));
        }
        if self.n_clusters_per_class == 0 {
            return Err(ShiftError::InvalidConfiguration(
                "need at least one cluster per class".to_string(),
            ));
        }
        let n_clusters = 2 * self.n_clusters_per_class;
        if self.n_informative < 64 && n_clusters > (1usize << self.n_informative) {
            return Err(ShiftError::InvalidConfiguration(format!(
                "2 * n_clusters_per_class ({}) exceeds 2^n_informative ({}) hypercube vertices",
                n_clusters,
                1usize << self.n_informative
            )));
        }
        Ok(())
    }
}

/// Generate a binary classification dataset from `config`.
///
/// When `config.random_state` is set, generation uses its own seeded
/// generator so the base distribution is reproducible independently of the
/// caller's rng (which then only drives the downstream selection stages).
pub fn make_classification<R: Rng + ?Sized>(
    config: &ClassifyConfig,
    rng: &mut R,
) -> Result<(Array2<f64>, Array1<i32>)> {
    config.validate()?;
    match config.random_state {
        Some(seed) => generate(config, &mut StdRng::seed_from_u64(seed)),
        None => generate(config, rng),
    }
}

fn generate<R: Rng + ?Sized>(
    config: &ClassifyConfig,
    rng: &mut R,
) -> Result<(Array2<f64>, Array1<i32>)> {
    let n = config.n_samples;
    let d = config.n_features;
    let n_inf = config.n_informative;
    let n_red = config.n_redundant;
    let n_rep = config.n_repeated;
    let n_clusters = 2 * config.n_clusters_per_class;

    let std_normal = Normal::new(0.0, 1.0).expect("unit normal");

    // Distinct hypercube vertices, scaled to ±class_sep, as cluster centers.
    // Draw order is kept so generation stays deterministic under a fixed rng.
    let mut seen: HashSet<u64> = HashSet::with_capacity(n_clusters);
    let mut vertices: Vec<u64> = Vec::with_capacity(n_clusters);
    while vertices.len() < n_clusters {
        let bits: u64 = if n_inf >= 64 {
            rng.gen()
        } else {
            rng.gen_range(0..(1u64 << n_inf))
        };
        if seen.insert(bits) {
            vertices.push(bits);
        }
    }
    let centers: Vec<Array1<f64>> = vertices
        .into_iter()
        .map(|bits| {
            Array1::from_shape_fn(n_inf, |j| {
                if bits >> (j % 64) & 1 == 1 {
                    config.class_sep
                } else {
                    -config.class_sep
                }
            })
        })
        .collect();

    let mut x = Array2::zeros((n, d));
    let mut y = Array1::zeros(n);

    // clusters alternate between the two classes
    for row in 0..n {
        let cluster = row % n_clusters;
        y[row] = (cluster % 2) as i32;
        for j in 0..n_inf {
            x[(row, j)] = centers[cluster][j] + std_normal.sample(rng);
        }
    }

    // redundant features: random linear combinations of the informative block
    for r in 0..n_red {
        let coeffs = Array1::from_shape_fn(n_inf, |_| rng.gen_range(-1.0..1.0));
        for row in 0..n {
            let mut acc = 0.0;
            for j in 0..n_inf {
                acc += coeffs[j] * x[(row, j)];
            }
            x[(row, n_inf + r)] = acc;
        }
    }

    // repeated features: copies of earlier informative/redundant columns
    for r in 0..n_rep {
        let src = rng.gen_range(0..n_inf + n_red);
        for row in 0..n {
            x[(row, n_inf + n_red + r)] = x[(row, src)];
        }
    }

    // the remainder is pure noise
    for j in n_inf + n_red + n_rep..d {
        for row in 0..n {
            x[(row, j)] = std_normal.sample(rng);
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    let x = x.select(Axis(0), &order);
    let y = y.select(Axis(0), &order);

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shapes_and_labels() {
        let config = ClassifyConfig {
            n_samples: 200,
            n_features: 6,
            n_informative: 3,
            n_redundant: 2,
            n_repeated: 1,
            n_clusters_per_class: 2,
            ..ClassifyConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let (x, y) = make_classification(&config, &mut rng).unwrap();
        assert_eq!(x.nrows(), 200);
        assert_eq!(x.ncols(), 6);
        assert!(y.iter().all(|&v| v == 0 || v == 1));
        let positives = y.iter().filter(|&&v| v == 1).count();
        assert!(positives > 80 && positives < 120, "unbalanced: {}", positives);
    }

    #[test]
    fn random_state_pins_the_base_distribution() {
        let config = ClassifyConfig {
            n_samples: 50,
            n_features: 4,
            n_informative: 2,
            n_redundant: 0,
            random_state: Some(123),
            ..ClassifyConfig::default()
        };
        let (x1, y1) = make_classification(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        let (x2, y2) = make_classification(&config, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(x1, x2);
        assert_eq!(y1, y2);
    }

    #[test]
    fn rejects_feature_overcommit() {
        let config = ClassifyConfig {
            n_features: 3,
            n_informative: 2,
            n_redundant: 2,
            ..ClassifyConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(make_classification(&config, &mut rng).is_err());
    }

    #[test]
    fn rejects_too_many_clusters_for_subspace() {
        let config = ClassifyConfig {
            n_features: 4,
            n_informative: 1,
            n_redundant: 0,
            n_clusters_per_class: 4,
            ..ClassifyConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(make_classification(&config, &mut rng).is_err());
    }

    #[test]
    fn classes_are_separated_in_informative_space() {
        let config = ClassifyConfig {
            n_samples: 1000,
            n_features: 2,
            n_informative: 2,
            n_redundant: 0,
            n_clusters_per_class: 1,
            class_sep: 3.0,
            ..ClassifyConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(17);
        let (x, y) = make_classification(&config, &mut rng).unwrap();
        let mut mean0 = [0.0, 0.0];
        let mut mean1 = [0.0, 0.0];
        let (mut c0, mut c1) = (0.0, 0.0);
        for row in 0..x.nrows() {
            if y[row] == 0 {
                mean0[0] += x[(row, 0)];
                mean0[1] += x[(row, 1)];
                c0 += 1.0;
            } else {
                mean1[0] += x[(row, 0)];
                mean1[1] += x[(row, 1)];
                c1 += 1.0;
            }
        }
        let gap = ((mean0[0] / c0 - mean1[0] / c1).powi(2)
            + (mean0[1] / c0 - mean1[1] / c1).powi(2))
        .sqrt();
        assert!(gap > 2.0, "class centers too close: {}", gap);
    }
}
