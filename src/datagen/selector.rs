//! Partition selectors: split a pool into disjoint source/global/target
//! subsets under a bias policy.
//!
//! `FeatureSelector` biases in feature space (covariate shift), sampling
//! source and target from density-weighted candidates on opposite sides of a
//! random bias direction. `DomainSelector` biases by synthetic domain
//! membership (concept shift), drawing source and target from disjoint
//! domain sets.
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data_handling::{DatasetTriplet, SampleSet};
use crate::datagen::sampler::sample_density;
use crate::error::{Result, ShiftError};

/// Feature-space biased selector for covariate-shift simulation.
///
/// The pool is permuted and split into an unbiased global slice plus source
/// and target candidate pools; one random unit bias direction (scaled by
/// per-feature std and `bias_dist`) pushes the source sampling center to one
/// side of the pool mean and the target center to the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSelector {
    pub n_global: usize,
    pub n_source: usize,
    pub n_target: usize,
    pub source_scale: f64,
    pub target_scale: f64,
    pub bias_dist: f64,
}

impl FeatureSelector {
    pub fn new(
        n_global: usize,
        n_source: usize,
        n_target: usize,
        source_scale: f64,
        target_scale: f64,
        bias_dist: f64,
    ) -> Result<Self> {
        if n_global == 0 || n_source == 0 || n_target == 0 {
            return Err(ShiftError::InvalidConfiguration(
                "partition sizes must all be positive".to_string(),
            ));
        }
        if source_scale <= 0.0 || target_scale <= 0.0 {
            return Err(ShiftError::InvalidConfiguration(
                "sampling scales must be positive".to_string(),
            ));
        }
        Ok(FeatureSelector {
            n_global,
            n_source,
            n_target,
            source_scale,
            target_scale,
            bias_dist,
        })
    }

    /// Split the pool into the dataset triplet.
    ///
    /// Requires `pool size > n_global + 2` so both candidate pools are
    /// non-empty after the global slice is removed.
    pub fn select<R: Rng + ?Sized>(
        &self,
        x: &Array2<f64>,
        y: &Array1<i32>,
        rng: &mut R,
    ) -> Result<DatasetTriplet> {
        let n = x.nrows();
        if n <= self.n_global + 2 {
            return Err(ShiftError::InsufficientData {
                needed: self.n_global + 3,
                available: n,
            });
        }

        let (source_pool, global, target_pool) = self.make_split(x, y, rng);

        let stds = x.std_axis(Axis(0), 0.0);
        let center = x.mean_axis(Axis(0)).expect("pool checked non-empty");

        let mut bias_dir = Array1::from_shape_fn(x.ncols(), |_| rng.gen::<f64>());
        let norm = bias_dir.dot(&bias_dir).sqrt();
        if norm > 0.0 {
            bias_dir /= norm;
        }
        let bias = &stds * &bias_dir * self.bias_dist;

        let source_center = &center + &(&bias * 0.5);
        let target_center = &center - &(&bias * 0.5);
        let source_std = &stds * self.source_scale;
        let target_std = &stds * self.target_scale;

        let (xs, ys) = sample_density(
            &source_pool.x,
            &source_pool.y,
            self.n_source,
            &source_center,
            &source_std,
            rng,
        )?;
        let (xt, yt) = sample_density(
            &target_pool.x,
            &target_pool.y,
            self.n_target,
            &target_center,
            &target_std,
            rng,
        )?;

        DatasetTriplet::new(SampleSet::new(xs, ys)?, global, SampleSet::new(xt, yt)?)
    }

    /// Permute the pool and cut it into disjoint, unbiased pieces: a global
    /// slice of `n_global` rows, then source/target candidate pools divided
    /// proportionally to `n_source : n_target`.
    fn make_split<R: Rng + ?Sized>(
        &self,
        x: &Array2<f64>,
        y: &Array1<i32>,
        rng: &mut R,
    ) -> (SampleSet, SampleSet, SampleSet) {
        let n = x.nrows();
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        let remainder = n - self.n_global;
        let st_ratio = self.n_source as f64 / (self.n_source + self.n_target) as f64;
        let m_source = (st_ratio * remainder as f64) as usize;

        let global_idx = &order[..self.n_global];
        let source_idx = &order[self.n_global..self.n_global + m_source];
        let target_idx = &order[self.n_global + m_source..];

        let slice = |idx: &[usize]| SampleSet {
            x: x.select(Axis(0), idx),
            y: y.select(Axis(0), idx),
        };
        (slice(source_idx), slice(global_idx), slice(target_idx))
    }
}

/// Domain-membership biased selector for concept-shift simulation.
///
/// Chooses disjoint source and target domain sets, takes the global slice
/// unbiased from the head of the (domain-shifted) pool, and fills source and
/// target from the remaining rows of their domain sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSelector {
    pub n_global: usize,
    pub n_source: usize,
    pub n_target: usize,
    pub n_domains_source: usize,
    pub n_domains_target: usize,
}

impl DomainSelector {
    pub fn new(
        n_global: usize,
        n_source: usize,
        n_target: usize,
        n_domains_source: usize,
        n_domains_target: usize,
    ) -> Result<Self> {
        if n_global == 0 || n_source == 0 || n_target == 0 {
            return Err(ShiftError::InvalidConfiguration(
                "partition sizes must all be positive".to_string(),
            ));
        }
        if n_domains_source == 0 || n_domains_target == 0 {
            return Err(ShiftError::InvalidConfiguration(
                "source and target need at least one domain each".to_string(),
            ));
        }
        Ok(DomainSelector {
            n_global,
            n_source,
            n_target,
            n_domains_source,
            n_domains_target,
        })
    }

    /// Split the pool into the dataset triplet using domain labels.
    ///
    /// Requires `n_domains_source + n_domains_target` distinct domains and a
    /// pool of at least `n_global + 2` rows. When a domain set holds more
    /// eligible rows than requested the surplus is truncated in array order
    /// (see `select_from_domains`); a shortfall is topped up by sampling the
    /// eligible rows with replacement.
    pub fn select<R: Rng + ?Sized>(
        &self,
        x: &Array2<f64>,
        y: &Array1<i32>,
        domain: &Array1<usize>,
        rng: &mut R,
    ) -> Result<DatasetTriplet> {
        let n = x.nrows();
        if domain.len() != n {
            return Err(ShiftError::InvalidConfiguration(format!(
                "domain labels have {} entries, pool has {} rows",
                domain.len(),
                n
            )));
        }

        let mut domains: Vec<usize> = domain.to_vec();
        domains.sort_unstable();
        domains.dedup();

        if self.n_domains_source + self.n_domains_target > domains.len() {
            return Err(ShiftError::InvalidConfiguration(format!(
                "requested {} source + {} target domains but only {} exist",
                self.n_domains_source,
                self.n_domains_target,
                domains.len()
            )));
        }
        if n < self.n_global + 2 {
            return Err(ShiftError::InsufficientData {
                needed: self.n_global + 2,
                available: n,
            });
        }

        let source_domains: Vec<usize> = domains
            .choose_multiple(rng, self.n_domains_source)
            .copied()
            .collect();
        let remaining: Vec<usize> = domains
            .iter()
            .filter(|d| !source_domains.contains(d))
            .copied()
            .collect();
        let target_domains: Vec<usize> = remaining
            .choose_multiple(rng, self.n_domains_target)
            .copied()
            .collect();

        log::debug!(
            "domain split: source={:?}, target={:?} of {:?}",
            source_domains,
            target_domains,
            domains
        );

        // global partition: head of the pool, every domain, no bias
        let global_idx: Vec<usize> = (0..self.n_global).collect();

        let rest: Vec<usize> = (self.n_global..n).collect();
        let source_idx =
            self.select_from_domains(&rest, domain, self.n_source, &source_domains, rng)?;
        let target_idx =
            self.select_from_domains(&rest, domain, self.n_target, &target_domains, rng)?;

        let slice = |idx: &[usize]| SampleSet {
            x: x.select(Axis(0), idx),
            y: y.select(Axis(0), idx),
        };
        DatasetTriplet::new(
            slice(&source_idx),
            slice(&global_idx),
            slice(&target_idx),
        )
    }

    /// Pick exactly `n` rows (indices into the full pool) whose domain lies
    /// in `wanted`.
    ///
    /// Surplus policy: eligible rows beyond `n` are dropped by taking the
    /// first `n` in array order, not by random subsampling. Array order here
    /// is whatever the upstream permutation produced, so truncation carries
    /// that ordering through; this mirrors the historical behavior and is
    /// kept as a named, testable policy.
    fn select_from_domains<R: Rng + ?Sized>(
        &self,
        rest: &[usize],
        domain: &Array1<usize>,
        n: usize,
        wanted: &[usize],
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        let eligible: Vec<usize> = rest
            .iter()
            .filter(|&&row| wanted.contains(&domain[row]))
            .copied()
            .collect();
        if eligible.is_empty() {
            return Err(ShiftError::InsufficientData {
                needed: 1,
                available: 0,
            });
        }

        if eligible.len() >= n {
            Ok(eligible[..n].to_vec())
        } else {
            let mut idx = eligible.clone();
            while idx.len() < n {
                idx.push(eligible[rng.gen_range(0..eligible.len())]);
            }
            Ok(idx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(n: usize, d: usize) -> (Array2<f64>, Array1<i32>) {
        // first column identifies the row so partition contents can be traced
        let x = Array::from_shape_fn((n, d), |(i, j)| {
            if j == 0 {
                i as f64
            } else {
                ((i * 31 + j * 7) % 97) as f64 * 0.1
            }
        });
        let y = Array::from_shape_fn(n, |i| (i % 2) as i32);
        (x, y)
    }

    #[test]
    fn feature_split_is_disjoint_and_sized() {
        let (x, y) = pool(200, 3);
        let selector = FeatureSelector::new(50, 40, 40, 1.0, 1.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let (source_pool, global, target_pool) = selector.make_split(&x, &y, &mut rng);

        assert_eq!(global.len(), 50);
        assert_eq!(source_pool.len() + target_pool.len(), 150);

        // disjointness: every pool row appears exactly once across the split
        let mut seen = std::collections::HashSet::new();
        for set in [&source_pool, &global, &target_pool] {
            for row in 0..set.len() {
                let key: Vec<u64> = set.x.row(row).iter().map(|v| v.to_bits()).collect();
                assert!(seen.insert(key), "row appears in two partitions");
            }
        }
    }

    #[test]
    fn feature_select_produces_requested_sizes() {
        let (x, y) = pool(300, 4);
        let selector = FeatureSelector::new(60, 80, 70, 1.0, 1.0, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let triplet = selector.select(&x, &y, &mut rng).unwrap();
        assert_eq!(triplet.source.len(), 80);
        assert_eq!(triplet.global.len(), 60);
        assert_eq!(triplet.target.len(), 70);
    }

    #[test]
    fn feature_select_needs_enough_rows() {
        let (x, y) = pool(52, 2);
        let selector = FeatureSelector::new(50, 10, 10, 1.0, 1.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        assert!(matches!(
            selector.select(&x, &y, &mut rng),
            Err(ShiftError::InsufficientData { .. })
        ));
    }

    fn labeled_domains(n: usize, n_domains: usize) -> Array1<usize> {
        Array::from_shape_fn(n, |i| i % n_domains)
    }

    #[test]
    fn domain_sets_are_disjoint() {
        let (x, y) = pool(400, 3);
        let domain = labeled_domains(400, 4);
        let selector = DomainSelector::new(50, 60, 60, 1, 1).unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let triplet = selector.select(&x, &y, &domain, &mut rng).unwrap();
            assert_eq!(triplet.source.len(), 60);
            assert_eq!(triplet.target.len(), 60);
        }
    }

    #[test]
    fn two_of_four_domains_stay_unused() {
        let (x, y) = pool(400, 2);
        // domain is recoverable from the row content via the second feature
        let domain = labeled_domains(400, 4);
        let mut x = x;
        for row in 0..400 {
            x[(row, 1)] = domain[row] as f64 * 1000.0;
        }
        let selector = DomainSelector::new(40, 80, 80, 1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let triplet = selector.select(&x, &y, &domain, &mut rng).unwrap();

        let domains_of = |set: &SampleSet| {
            let mut ds: Vec<usize> = (0..set.len())
                .map(|row| (set.x[(row, 1)] / 1000.0).round() as usize)
                .collect();
            ds.sort_unstable();
            ds.dedup();
            ds
        };
        let sd = domains_of(&triplet.source);
        let td = domains_of(&triplet.target);
        assert_eq!(sd.len(), 1);
        assert_eq!(td.len(), 1);
        assert_ne!(sd[0], td[0], "source and target share a domain");
        // of 4 domains, exactly 2 are untouched by the biased partitions
        let used: std::collections::HashSet<usize> = sd.into_iter().chain(td).collect();
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn surplus_rows_are_truncated_in_array_order() {
        let (x, y) = pool(100, 2);
        let domain = Array1::zeros(100); // single domain, everything eligible
        let selector = DomainSelector::new(10, 20, 20, 1, 1);
        // one domain cannot host disjoint source and target sets
        assert!(matches!(
            selector
                .unwrap()
                .select(&x, &y, &domain, &mut StdRng::seed_from_u64(0)),
            Err(ShiftError::InvalidConfiguration(_))
        ));

        // with two domains, source rows come out in pool order
        let domain = labeled_domains(100, 2);
        let selector = DomainSelector::new(10, 5, 5, 1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let triplet = selector.select(&x, &y, &domain, &mut rng).unwrap();
        let first = &triplet.source;
        // eligible rows start at index 10; the first five of the selected
        // domain appear in ascending array order
        let mut rows: Vec<usize> = Vec::new();
        for r in 0..first.len() {
            let row_value = first.x[(r, 0)];
            let original = (10..100)
                .find(|&i| (x[(i, 0)] - row_value).abs() < 1e-12)
                .unwrap();
            rows.push(original);
        }
        let mut sorted = rows.clone();
        sorted.sort_unstable();
        assert_eq!(rows, sorted, "truncation must preserve array order");
    }

    #[test]
    fn shortfall_is_topped_up_with_replacement() {
        let (x, y) = pool(60, 2);
        let domain = labeled_domains(60, 3);
        // domain 0 holds ~17 rows after the global slice; ask for 40
        let selector = DomainSelector::new(10, 40, 10, 1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        let triplet = selector.select(&x, &y, &domain, &mut rng).unwrap();
        assert_eq!(triplet.source.len(), 40);
    }

    #[test]
    fn too_many_domains_requested() {
        let (x, y) = pool(100, 2);
        let domain = labeled_domains(100, 3);
        let selector = DomainSelector::new(10, 10, 10, 2, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            selector.select(&x, &y, &domain, &mut rng),
            Err(ShiftError::InvalidConfiguration(_))
        ));
    }
}
