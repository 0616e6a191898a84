//! Logistic-regression baseline with a per-epoch accuracy history.
use ndarray::{concatenate, Array1, Array2, Axis};

use crate::config::{ModelConfig, ModelType};
use crate::error::{Result, ShiftError};
use crate::models::adapt_trait::{AdaptModel, FitParams};

/// Floor on feature standard deviations during standardization.
const MIN_STD: f64 = 1e-6;

/// Full-batch gradient-descent logistic regression.
///
/// Adaptation is limited to first-moment alignment: features are
/// standardized with statistics pooled over source and target rows, so the
/// decision function lives in a space both domains share. The per-epoch
/// source accuracy is recorded as the training history.
pub struct LogisticAdapter {
    config: ModelConfig,
    weights: Option<Array1<f64>>,
    intercept: f64,
    mean: Array1<f64>,
    std: Array1<f64>,
    history: Vec<f64>,
}

impl LogisticAdapter {
    pub fn new(config: ModelConfig) -> Self {
        LogisticAdapter {
            config,
            weights: None,
            intercept: 0.0,
            mean: Array1::zeros(0),
            std: Array1::zeros(0),
            history: Vec::new(),
        }
    }

    fn l2(&self) -> f64 {
        match self.config.model_type {
            ModelType::Logistic { l2 } => l2,
            _ => 0.0,
        }
    }

    fn standardize(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut out = x.clone();
        for mut row in out.rows_mut() {
            row -= &self.mean;
            row /= &self.std;
        }
        out
    }
}

fn sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}

impl AdaptModel for LogisticAdapter {
    fn fit(
        &mut self,
        source_x: &Array2<f64>,
        source_y: &Array1<i32>,
        target_x: &Array2<f64>,
        params: &FitParams,
    ) -> Result<()> {
        if source_x.nrows() != source_y.len() {
            return Err(ShiftError::ModelFit(format!(
                "source has {} rows but {} labels",
                source_x.nrows(),
                source_y.len()
            )));
        }
        if source_x.ncols() != target_x.ncols() {
            return Err(ShiftError::ModelFit(format!(
                "source has {} features, adaptation target has {}",
                source_x.ncols(),
                target_x.ncols()
            )));
        }

        let pooled = concatenate(Axis(0), &[source_x.view(), target_x.view()])
            .map_err(|err| ShiftError::ModelFit(format!("pooling failed: {}", err)))?;
        self.mean = pooled.mean_axis(Axis(0)).ok_or_else(|| {
            ShiftError::ModelFit("cannot standardize an empty pool".to_string())
        })?;
        self.std = pooled.std_axis(Axis(0), 0.0).mapv(|s| s.max(MIN_STD));

        let x = self.standardize(source_x);
        let y: Array1<f64> = source_y.mapv(|v| v as f64);
        let n = x.nrows() as f64;
        let d = x.ncols();
        let lr = self.config.learning_rate;
        let l2 = self.l2();

        let mut w: Array1<f64> = Array1::zeros(d);
        let mut b = 0.0;
        self.history.clear();

        for epoch in 0..params.epochs {
            let logits = x.dot(&w) + b;
            let probs = logits.mapv(sigmoid);
            let resid = &probs - &y;

            let grad_w = x.t().dot(&resid) / n + &w * l2;
            let grad_b = resid.sum() / n;
            w = w - grad_w * lr;
            b -= grad_b * lr;

            let correct = probs
                .iter()
                .zip(source_y.iter())
                .filter(|(&p, &label)| (p > 0.5) == (label == 1))
                .count();
            let acc = correct as f64 / source_y.len() as f64;
            self.history.push(acc);
            log::trace!("epoch {}: source accuracy {:.4}", epoch, acc);
        }

        self.weights = Some(w);
        self.intercept = b;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let w = self
            .weights
            .as_ref()
            .ok_or_else(|| ShiftError::ModelFit("model has not been fitted".to_string()))?;
        if x.ncols() != w.len() {
            return Err(ShiftError::ModelFit(format!(
                "input has {} features, model expects {}",
                x.ncols(),
                w.len()
            )));
        }
        let logits = self.standardize(x).dot(w) + self.intercept;
        Ok(logits.mapv(sigmoid))
    }

    fn history(&self) -> Option<&[f64]> {
        if self.history.is_empty() {
            None
        } else {
            Some(&self.history)
        }
    }

    fn name(&self) -> &str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn separable(n: usize) -> (Array2<f64>, Array1<i32>) {
        let mut rng = StdRng::seed_from_u64(99);
        let x = Array::from_shape_fn((n, 2), |(i, _)| {
            let offset = if i % 2 == 0 { 2.0 } else { -2.0 };
            offset + rng.gen::<f64>() * 0.5
        });
        let y = Array::from_shape_fn(n, |i| if i % 2 == 0 { 1 } else { 0 });
        (x, y)
    }

    #[test]
    fn learns_a_separable_problem() {
        let (x, y) = separable(200);
        let mut model = LogisticAdapter::new(ModelConfig::new(
            0.5,
            ModelType::Logistic { l2: 0.0 },
        ));
        model.fit(&x, &y, &x, &FitParams { epochs: 200 }).unwrap();
        let scores = model.predict(&x).unwrap();
        let correct = scores
            .iter()
            .zip(y.iter())
            .filter(|(&s, &label)| (s > 0.5) == (label == 1))
            .count();
        assert!(correct >= 190, "only {}/200 correct", correct);
    }

    #[test]
    fn records_one_history_entry_per_epoch() {
        let (x, y) = separable(50);
        let mut model = LogisticAdapter::new(ModelConfig::default());
        model.fit(&x, &y, &x, &FitParams { epochs: 37 }).unwrap();
        assert_eq!(model.history().unwrap().len(), 37);
    }

    #[test]
    fn predict_before_fit_is_a_model_error() {
        let model = LogisticAdapter::new(ModelConfig::default());
        let x = Array2::zeros((3, 2));
        assert!(matches!(
            model.predict(&x),
            Err(ShiftError::ModelFit(_))
        ));
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let (x, y) = separable(80);
        let mut model = LogisticAdapter::new(ModelConfig::default());
        model.fit(&x, &y, &x, &FitParams::default()).unwrap();
        let scores = model.predict(&x).unwrap();
        assert!(scores.iter().all(|&s| (0.0..=1.0).contains(&s)));
    }
}
