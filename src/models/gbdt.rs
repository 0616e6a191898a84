//! Gradient Boosting Decision Tree adapter.
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::{Array1, Array2};

use crate::config::{ModelConfig, ModelType};
use crate::error::{Result, ShiftError};
use crate::models::adapt_trait::{AdaptModel, FitParams};

/// GBDT classifier behind the adaptation-model contract.
///
/// Trees are trained on the labeled source data only; the unlabeled
/// adaptation-target features are accepted for contract parity but unused,
/// making this a supervised no-adaptation reference model.
pub struct GbdtAdapter {
    model: Option<GBDT>,
    config: ModelConfig,
}

impl GbdtAdapter {
    pub fn new(config: ModelConfig) -> Self {
        GbdtAdapter {
            model: None,
            config,
        }
    }
}

impl AdaptModel for GbdtAdapter {
    fn fit(
        &mut self,
        source_x: &Array2<f64>,
        source_y: &Array1<i32>,
        _target_x: &Array2<f64>,
        _params: &FitParams,
    ) -> Result<()> {
        let feature_size = source_x.ncols();

        match &self.config.model_type {
            ModelType::Gbdt {
                max_depth,
                num_boost_round,
                debug,
                training_optimization_level,
                loss_type,
            } => {
                let mut config = Config::new();

                config.set_feature_size(feature_size);
                config.set_shrinkage(self.config.learning_rate as f32);
                config.set_max_depth(*max_depth);
                config.set_iterations(*num_boost_round as usize);
                config.set_debug(*debug);
                config.set_training_optimization_level(*training_optimization_level);
                config.set_loss(loss_type);

                let mut gbdt = GBDT::new(&config);

                let mut train_x = DataVec::new();
                for row in 0..source_x.nrows() {
                    let train_row: Vec<f32> =
                        source_x.row(row).iter().map(|&v| v as f32).collect();
                    train_x.push(Data::new_training_data(
                        train_row,
                        1.0,
                        source_y[row] as f32,
                        None,
                    ));
                }

                gbdt.fit(&mut train_x);
                self.model = Some(gbdt);
                Ok(())
            }
            other => Err(ShiftError::ModelFit(format!(
                "expected GBDT params, got {:?}",
                other
            ))),
        }
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| ShiftError::ModelFit("model has not been fitted".to_string()))?;

        let mut test_x = DataVec::new();
        for row in 0..x.nrows() {
            let test_row: Vec<f32> = x.row(row).iter().map(|&v| v as f32).collect();
            test_x.push(Data::new_training_data(test_row, 1.0, 0.0, None));
        }
        let margins = model.decision_function(&test_x);
        Ok(margins
            .iter()
            .map(|&m| 1.0 / (1.0 + (-(m as f64)).exp()))
            .collect())
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};

    #[test]
    fn fits_and_scores_a_simple_pattern() {
        // second feature perfectly separates the classes
        let x = Array::from_shape_fn((40, 3), |(i, j)| match j {
            1 => {
                if i % 2 == 0 {
                    1.0
                } else {
                    -1.0
                }
            }
            _ => (i as f64) * 0.1,
        });
        let y = Array::from_shape_fn(40, |i| ((i + 1) % 2) as i32);

        let config = ModelConfig::new(0.1, "gbdt".parse().unwrap());
        let mut model = GbdtAdapter::new(config);
        model.fit(&x, &y, &x, &FitParams::default()).unwrap();

        let scores = model.predict(&x).unwrap();
        assert_eq!(scores.len(), 40);
        assert!(scores.iter().all(|&s| (0.0..=1.0).contains(&s)));
    }

    #[test]
    fn logistic_params_are_rejected() {
        let config = ModelConfig::default();
        let mut model = GbdtAdapter::new(config);
        let x = array![[0.0, 1.0], [1.0, 0.0]];
        let y = array![0, 1];
        assert!(matches!(
            model.fit(&x, &y, &x, &FitParams::default()),
            Err(ShiftError::ModelFit(_))
        ));
    }
}
