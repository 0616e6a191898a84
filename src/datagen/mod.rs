//! Dataset synthesis: base classification generator, bias-weighted sampling,
//! per-domain shift transforms, and source/global/target partition selectors.
pub mod builder;
pub mod classify;
pub mod sampler;
pub mod selector;
pub mod shifter;

pub use builder::{ConceptShiftBuilder, CovariateShiftBuilder, DatasetBuilder};
pub use classify::{make_classification, ClassifyConfig};
pub use selector::{DomainSelector, FeatureSelector};
pub use shifter::Shifter;
