use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for adaptation models in the crate.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    /// Gradient step size (logistic) or boosting shrinkage (GBDT).
    pub learning_rate: f64,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum ModelType {
    /// Logistic-regression baseline trained by gradient descent, with
    /// source+target feature standardization as its adaptation lever.
    Logistic { l2: f64 },
    Gbdt {
        max_depth: u32,
        num_boost_round: u32,
        debug: bool,
        training_optimization_level: u8,
        loss_type: String,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::Logistic { l2: 0.0 }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" => Ok(ModelType::Logistic { l2: 0.0 }),
            "gbdt" => Ok(ModelType::Gbdt {
                max_depth: 6,
                num_boost_round: 50,
                debug: false,
                training_optimization_level: 2,
                loss_type: "LogLikelyhood".to_string(),
            }),
            _ => Err(format!("Unknown model type: {}", s)),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f64, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
        }
    }

    /// Short name used in evaluation-result file names.
    pub fn model_name(&self) -> &'static str {
        match self.model_type {
            ModelType::Logistic { .. } => "logistic",
            ModelType::Gbdt { .. } => "gbdt",
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            model_type: ModelType::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_model_names() {
        assert!(matches!(
            "logistic".parse::<ModelType>(),
            Ok(ModelType::Logistic { .. })
        ));
        assert!(matches!(
            "GBDT".parse::<ModelType>(),
            Ok(ModelType::Gbdt { .. })
        ));
        assert!("mlp".parse::<ModelType>().is_err());
    }

    #[test]
    fn default_is_the_logistic_baseline() {
        let config = ModelConfig::default();
        assert_eq!(config.model_name(), "logistic");
    }
}
