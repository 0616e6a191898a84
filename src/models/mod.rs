pub mod adapt_trait;
pub mod factory;
pub mod gbdt;
pub mod logistic;

pub use adapt_trait::{AdaptModel, FitParams};
