use crate::config::ModelConfig;
use crate::models::adapt_trait::AdaptModel;

/// Build a boxed adaptation model from a `ModelConfig`.
/// Currently this is a thin factory implemented as a single function.
pub fn build_model(config: ModelConfig) -> Box<dyn AdaptModel> {
    match config.model_type {
        crate::config::ModelType::Logistic { .. } => {
            Box::new(crate::models::logistic::LogisticAdapter::new(config))
        }
        crate::config::ModelType::Gbdt { .. } => {
            Box::new(crate::models::gbdt::GbdtAdapter::new(config))
        }
    }
}
