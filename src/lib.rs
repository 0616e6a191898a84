//! shiftbench: dataset synthesis and evaluation for domain-adaptation research.
//!
//! This crate generates labeled datasets split into source/global/target
//! partitions with controllable selection bias (covariate shift via biased
//! feature-space sampling, concept shift via per-domain affine transforms),
//! and evaluates domain-adaptation models across partition combinations,
//! reporting accuracy matrices, convergence indicators, and proxy A-distance
//! statistics.
//!
//! Model implementations are pluggable through the `AdaptModel` capability
//! trait; the crate ships a logistic baseline and a GBDT wrapper so the
//! evaluation matrix can run without external collaborators.
pub mod batch;
pub mod config;
pub mod data_handling;
pub mod datagen;
pub mod error;
pub mod evaluate;
pub mod models;
pub mod stats;
pub mod storage;
