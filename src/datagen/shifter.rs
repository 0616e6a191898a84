//! Concept-shift simulation: split a dataset into synthetic domains and
//! apply an independent random affine transform to each non-reference domain.
use ndarray::{Array1, Array2, Axis};
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

use crate::error::{Result, ShiftError};

/// Per-domain affine transform: rotation in one coordinate plane, scaling
/// about the pool center, and a translation in units of per-feature std.
struct DomainTransform {
    plane: Option<(usize, usize)>,
    angle: f64,
    scale: Array1<f64>,
    translation: Array1<f64>,
}

impl DomainTransform {
    /// Identity transforms are skipped so unperturbed rows stay bit-identical.
    fn is_identity(&self) -> bool {
        self.plane.is_none()
            && self.scale.iter().all(|&s| s == 1.0)
            && self.translation.iter().all(|&t| t == 0.0)
    }
}

/// Splits a dataset into `n_domains` randomly-assigned groups and perturbs
/// every domain but domain 0, which stays the unperturbed reference.
///
/// Each transform magnitude is drawn uniformly within the configured bound:
/// rotation angle within `±rot` radians in a random coordinate plane,
/// per-dimension scaling within `1 ± scale`, translation along a random unit
/// direction with magnitude within `trans` (in per-feature std units).
/// Output rows correspond one-to-one with input rows; reproducibility comes
/// only from the externally seeded generator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Shifter {
    pub n_domains: usize,
    pub rot: f64,
    pub trans: f64,
    pub scale: f64,
}

impl Shifter {
    pub fn new(n_domains: usize, rot: f64, trans: f64, scale: f64) -> Result<Self> {
        if n_domains == 0 {
            return Err(ShiftError::InvalidConfiguration(
                "shifter needs at least one domain".to_string(),
            ));
        }
        if rot < 0.0 || trans < 0.0 || scale < 0.0 {
            return Err(ShiftError::InvalidConfiguration(format!(
                "shift bounds must be non-negative (rot={}, trans={}, scale={})",
                rot, trans, scale
            )));
        }
        Ok(Shifter {
            n_domains,
            rot,
            trans,
            scale,
        })
    }

    /// Assign every row a domain and transform rows of domains 1..n.
    ///
    /// Returns the transformed features, the unchanged labels, and the
    /// per-row domain labels (0-indexed).
    pub fn shift<R: Rng + ?Sized>(
        &self,
        x: &Array2<f64>,
        y: &Array1<i32>,
        rng: &mut R,
    ) -> (Array2<f64>, Array1<i32>, Array1<usize>) {
        let n = x.nrows();
        let d = x.ncols();

        let domains = Array1::from_shape_fn(n, |_| rng.gen_range(0..self.n_domains));

        let center = x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(d));
        let stds = x.std_axis(Axis(0), 0.0);

        let transforms: Vec<DomainTransform> = (0..self.n_domains)
            .map(|domain| {
                if domain == 0 {
                    self.identity_transform(d)
                } else {
                    self.random_transform(d, &stds, rng)
                }
            })
            .collect();

        let mut shifted = x.clone();
        for (row, &domain) in domains.iter().enumerate() {
            let tf = &transforms[domain];
            if tf.is_identity() {
                continue;
            }
            // x' = c + R(s . (x - c)) + t
            let mut v: Array1<f64> = &shifted.row(row) - &center;
            v *= &tf.scale;
            if let Some((a, b)) = tf.plane {
                let (sin, cos) = tf.angle.sin_cos();
                let (va, vb) = (v[a], v[b]);
                v[a] = va * cos - vb * sin;
                v[b] = va * sin + vb * cos;
            }
            v += &center;
            v += &tf.translation;
            shifted.row_mut(row).assign(&v);
        }

        log::debug!(
            "shifted {} rows into {} domains (rot<={}, trans<={}, scale<={})",
            n,
            self.n_domains,
            self.rot,
            self.trans,
            self.scale
        );

        (shifted, y.clone(), domains)
    }

    fn identity_transform(&self, d: usize) -> DomainTransform {
        DomainTransform {
            plane: None,
            angle: 0.0,
            scale: Array1::ones(d),
            translation: Array1::zeros(d),
        }
    }

    fn random_transform<R: Rng + ?Sized>(
        &self,
        d: usize,
        stds: &Array1<f64>,
        rng: &mut R,
    ) -> DomainTransform {
        let plane = if d >= 2 && self.rot > 0.0 {
            let a = rng.gen_range(0..d);
            let mut b = rng.gen_range(0..d - 1);
            if b >= a {
                b += 1;
            }
            Some((a, b))
        } else {
            None
        };
        let angle = if plane.is_some() {
            rng.gen_range(-self.rot..=self.rot)
        } else {
            0.0
        };

        let scale = Array1::from_shape_fn(d, |_| {
            rng.gen_range((1.0 - self.scale).max(0.0)..=1.0 + self.scale)
        });

        let translation = if self.trans > 0.0 {
            let std_normal = Normal::new(0.0, 1.0).expect("unit normal");
            let mut dir = Array1::from_shape_fn(d, |_| std_normal.sample(rng));
            let norm = dir.dot(&dir).sqrt();
            if norm > 0.0 {
                dir /= norm;
            }
            let magnitude = rng.gen_range(0.0..=self.trans);
            dir * magnitude * stds
        } else {
            Array1::zeros(d)
        };

        DomainTransform {
            plane,
            angle,
            scale,
            translation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base(n: usize, d: usize) -> (Array2<f64>, Array1<i32>) {
        let x = Array::from_shape_fn((n, d), |(i, j)| (i * d + j) as f64 * 0.1);
        let y = Array::from_shape_fn(n, |i| (i % 2) as i32);
        (x, y)
    }

    #[test]
    fn zero_bounds_leave_data_unchanged() {
        let (x, y) = base(40, 3);
        let shifter = Shifter::new(4, 0.0, 0.0, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let (sx, sy, domains) = shifter.shift(&x, &y, &mut rng);
        assert_eq!(sx, x);
        assert_eq!(sy, y);
        assert!(domains.iter().all(|&d| d < 4));
    }

    #[test]
    fn domain_zero_is_the_reference() {
        let (x, y) = base(200, 2);
        let shifter = Shifter::new(3, 0.5, 2.0, 0.3).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let (sx, _, domains) = shifter.shift(&x, &y, &mut rng);
        for (row, &domain) in domains.iter().enumerate() {
            if domain == 0 {
                assert_eq!(sx.row(row), x.row(row), "reference row {} moved", row);
            }
        }
    }

    #[test]
    fn rows_keep_their_labels_and_order() {
        let (x, y) = base(50, 4);
        let shifter = Shifter::new(2, 0.2, 1.0, 0.1).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let (sx, sy, domains) = shifter.shift(&x, &y, &mut rng);
        assert_eq!(sx.nrows(), 50);
        assert_eq!(sy, y);
        assert_eq!(domains.len(), 50);
    }

    #[test]
    fn translation_moves_perturbed_domains() {
        let (x, y) = base(500, 2);
        let shifter = Shifter::new(2, 0.0, 5.0, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(33);
        let (sx, _, domains) = shifter.shift(&x, &y, &mut rng);
        let moved = domains
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 1)
            .any(|(row, _)| sx.row(row) != x.row(row));
        assert!(moved, "domain 1 should be translated away from the base data");
    }

    #[test]
    fn rejects_zero_domains() {
        assert!(Shifter::new(0, 0.1, 0.1, 0.1).is_err());
    }
}
