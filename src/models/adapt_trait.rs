use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-fit parameters, passed through to every model the evaluation engine
/// trains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitParams {
    /// Training epochs for iterative models; tree models use their own
    /// configured boosting rounds instead.
    pub epochs: usize,
}

impl Default for FitParams {
    fn default() -> Self {
        FitParams { epochs: 100 }
    }
}

/// Capability contract for domain-adaptation models.
///
/// This centralizes the duck-typed fit/predict contract the evaluation
/// engine relies on: labeled source data plus unlabeled adaptation-target
/// features go in, probability-like scores come out. Unlabeled target rows
/// are a separate argument rather than sentinel-labeled rows mixed into the
/// training set, so no reserved label value exists.
pub trait AdaptModel {
    /// Train on labeled source data, adapting toward the unlabeled target
    /// features. Failures propagate as `ShiftError::ModelFit`.
    fn fit(
        &mut self,
        source_x: &Array2<f64>,
        source_y: &Array1<i32>,
        target_x: &Array2<f64>,
        params: &FitParams,
    ) -> Result<()>;

    /// Predict scores in [0, 1]; callers threshold at 0.5.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Per-epoch training accuracy, when the implementation records one.
    fn history(&self) -> Option<&[f64]> {
        None
    }

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "model"
    }
}
