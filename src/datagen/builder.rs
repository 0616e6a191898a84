//! Builder classes composing base generation, shifting, and selection into a
//! reusable triplet-producing pipeline.
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::data_handling::DatasetTriplet;
use crate::datagen::classify::{make_classification, ClassifyConfig};
use crate::datagen::selector::{DomainSelector, FeatureSelector};
use crate::datagen::shifter::Shifter;
use crate::error::Result;

/// A reusable dataset-generation pipeline.
///
/// Builders hold configuration only; `generate` mutates no internal state,
/// so repeated calls with fresh rng state produce fresh selections. Pinning
/// `random_state` in the classify config keeps the base distribution fixed
/// while the selection stages still vary with the caller's rng.
pub trait DatasetBuilder {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<DatasetTriplet>;

    /// Configuration snapshot for persistence next to generated data.
    fn config_value(&self) -> serde_json::Value;
}

/// Covariate-shift pipeline: base classification data fed straight into the
/// feature-biased selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CovariateShiftBuilder {
    pub init_classify: ClassifyConfig,
    pub selector: FeatureSelector,
}

impl CovariateShiftBuilder {
    pub fn new(init_classify: ClassifyConfig, selector: FeatureSelector) -> Self {
        CovariateShiftBuilder {
            init_classify,
            selector,
        }
    }
}

impl DatasetBuilder for CovariateShiftBuilder {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<DatasetTriplet> {
        let (x, y) = make_classification(&self.init_classify, rng)?;
        self.selector.select(&x, &y, rng)
    }

    fn config_value(&self) -> serde_json::Value {
        serde_json::json!({
            "builder": "covariate_shift",
            "config": serde_json::to_value(self).expect("builder config serializes"),
        })
    }
}

/// Concept-shift pipeline: base classification data split into domains by
/// the shifter, then partitioned by the domain-biased selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptShiftBuilder {
    pub init_classify: ClassifyConfig,
    pub shifter: Shifter,
    pub selector: DomainSelector,
}

impl ConceptShiftBuilder {
    pub fn new(init_classify: ClassifyConfig, shifter: Shifter, selector: DomainSelector) -> Self {
        ConceptShiftBuilder {
            init_classify,
            shifter,
            selector,
        }
    }
}

impl DatasetBuilder for ConceptShiftBuilder {
    fn generate(&self, rng: &mut dyn RngCore) -> Result<DatasetTriplet> {
        let (x, y) = make_classification(&self.init_classify, rng)?;
        let (x, y, domain) = self.shifter.shift(&x, &y, rng);
        self.selector.select(&x, &y, &domain, rng)
    }

    fn config_value(&self) -> serde_json::Value {
        serde_json::json!({
            "builder": "concept_shift",
            "config": serde_json::to_value(self).expect("builder config serializes"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classify_config() -> ClassifyConfig {
        ClassifyConfig {
            n_samples: 500,
            n_features: 5,
            n_informative: 3,
            n_redundant: 1,
            n_repeated: 0,
            n_clusters_per_class: 2,
            random_state: Some(77),
            ..ClassifyConfig::default()
        }
    }

    #[test]
    fn covariate_builder_generates_configured_sizes() {
        let selector = FeatureSelector::new(100, 80, 80, 1.0, 1.0, 2.0).unwrap();
        let builder = CovariateShiftBuilder::new(classify_config(), selector);
        let mut rng = StdRng::seed_from_u64(1);
        let triplet = builder.generate(&mut rng).unwrap();
        assert_eq!(triplet.source.len(), 80);
        assert_eq!(triplet.global.len(), 100);
        assert_eq!(triplet.target.len(), 80);
        assert_eq!(triplet.n_features(), 5);
    }

    #[test]
    fn concept_builder_generates_configured_sizes() {
        let shifter = Shifter::new(4, 0.2, 1.0, 0.1).unwrap();
        let selector = DomainSelector::new(100, 100, 100, 1, 1).unwrap();
        let builder = ConceptShiftBuilder::new(classify_config(), shifter, selector);
        let mut rng = StdRng::seed_from_u64(2);
        let triplet = builder.generate(&mut rng).unwrap();
        assert_eq!(triplet.source.len(), 100);
        assert_eq!(triplet.global.len(), 100);
        assert_eq!(triplet.target.len(), 100);
    }

    #[test]
    fn fixed_base_seed_varies_only_the_selection() {
        let selector = FeatureSelector::new(100, 80, 80, 1.0, 1.0, 1.0).unwrap();
        let builder = CovariateShiftBuilder::new(classify_config(), selector);
        let a = builder.generate(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = builder.generate(&mut StdRng::seed_from_u64(4)).unwrap();
        // same base pool, different splits
        assert_ne!(a.source, b.source);
        assert_eq!(a.source.n_features(), b.source.n_features());
    }

    #[test]
    fn same_selection_seed_reproduces_the_triplet() {
        let shifter = Shifter::new(3, 0.1, 0.5, 0.0).unwrap();
        let selector = DomainSelector::new(50, 50, 50, 1, 1).unwrap();
        let builder = ConceptShiftBuilder::new(classify_config(), shifter, selector);
        let a = builder.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        let b = builder.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn config_value_round_trips() {
        let selector = FeatureSelector::new(10, 10, 10, 1.0, 1.0, 1.0).unwrap();
        let builder = CovariateShiftBuilder::new(classify_config(), selector);
        let value = builder.config_value();
        assert_eq!(value["builder"], "covariate_shift");
        let parsed: CovariateShiftBuilder =
            serde_json::from_value(value["config"].clone()).unwrap();
        assert_eq!(parsed.selector.n_global, 10);
    }
}
