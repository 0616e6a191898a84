//! Run and batch drivers: generate datasets into stores, evaluate stored
//! datasets, and collect evaluation results back out of a run directory.
//!
//! Drivers iterate strictly sequentially; errors from the core propagate
//! per item and abort the batch.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::RngCore;
use serde::Deserialize;

use crate::config::ModelConfig;
use crate::datagen::builder::DatasetBuilder;
use crate::error::{Result, ShiftError};
use crate::evaluate::evaluate;
use crate::models::factory::build_model;
use crate::models::FitParams;
use crate::stats::analyze_data;
use crate::storage::Store;

/// Generate a dataset, and store it along with basic analysis and
/// configuration. With no name the store uses a timestamp.
pub fn run_generate(
    builder: &dyn DatasetBuilder,
    name: Option<&str>,
    store_path: &Path,
    rng: &mut dyn RngCore,
) -> Result<(Store, BTreeMap<String, f64>)> {
    let data = builder.generate(rng)?;
    let data_stats = analyze_data(&data);

    let store = Store::create(name, store_path, true)?;
    store.save_data(&data)?;
    store.save_config(&builder.config_value())?;
    store.save_stats(&data_stats)?;
    Ok((store, data_stats))
}

/// Load a stored dataset, evaluate a model configuration on it, and store
/// the results.
///
/// The identifier is appended to the results file name; use it to prevent
/// overwriting when evaluating multiple configurations on the same dataset.
pub fn run_eval(
    name: &str,
    store_path: &Path,
    model_config: &ModelConfig,
    fit_params: &FitParams,
    identifier: Option<&str>,
    rng: &mut dyn RngCore,
) -> Result<BTreeMap<String, f64>> {
    let store = Store::open(name, store_path)?;
    let data = store.load_data()?;

    let factory = || build_model(model_config.clone());
    let metrics = evaluate(&data, &factory, fit_params, rng)?;
    store.save_eval(&metrics, model_config.model_name(), identifier)?;
    Ok(metrics)
}

/// Generate a batch of datasets with the given builder.
///
/// Replaces the previous contents of `store_path`, or creates the directory
/// if it doesn't exist. Store names are zero-padded indices so directory
/// order matches generation order.
pub fn batch_generate(
    builder: &dyn DatasetBuilder,
    num: usize,
    store_path: &Path,
    rng: &mut dyn RngCore,
) -> Result<Vec<(Store, BTreeMap<String, f64>)>> {
    if store_path.exists() {
        fs::remove_dir_all(store_path)?;
    }
    fs::create_dir_all(store_path)?;

    let padding = num.saturating_sub(1).to_string().len();
    let mut res = Vec::with_capacity(num);
    for i in 0..num {
        log::info!("generating dataset {}/{}", i + 1, num);
        let name = format!("{:0width$}", i, width = padding);
        res.push(run_generate(builder, Some(&name), store_path, rng)?);
    }
    log::info!("finished generating {} datasets", num);
    Ok(res)
}

/// Evaluate a model configuration on every dataset store in a directory.
pub fn batch_eval(
    store_path: &Path,
    model_config: &ModelConfig,
    fit_params: &FitParams,
    identifier: Option<&str>,
    rng: &mut dyn RngCore,
) -> Result<Vec<BTreeMap<String, f64>>> {
    if !store_path.is_dir() {
        return Err(ShiftError::StoreNotFound(store_path.to_path_buf()));
    }

    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(store_path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    let mut res = Vec::with_capacity(names.len());
    for name in &names {
        log::info!("evaluating on dataset {}", name);
        let metrics = run_eval(name, store_path, model_config, fit_params, identifier, rng)?;
        res.push(metrics);
    }
    log::info!("finished evaluating {} datasets", names.len());
    Ok(res)
}

/// One persisted evaluation result, as loaded back from a run directory.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalRecord {
    #[serde(default)]
    pub dataset: String,
    pub model: String,
    pub identifier: Option<String>,
    pub metrics: BTreeMap<String, f64>,
}

/// Load *all* evaluation results from all runs in a directory of stores.
/// Returns one record per eval file, per dataset.
pub fn batch_load_eval(store_path: &Path) -> Result<Vec<EvalRecord>> {
    if !store_path.is_dir() {
        return Err(ShiftError::StoreNotFound(store_path.to_path_buf()));
    }

    let mut records = Vec::new();
    let mut dirs: Vec<_> = fs::read_dir(store_path)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|entry| entry.path().is_dir())
        .collect();
    dirs.sort_by_key(|entry| entry.file_name());

    for dir in dirs {
        let dataset = dir.file_name().to_string_lossy().into_owned();
        let mut files: Vec<_> = fs::read_dir(dir.path())?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|f| f.file_name().to_string_lossy().starts_with("eval"))
            .collect();
        files.sort_by_key(|f| f.file_name());

        for file in files {
            let text = fs::read_to_string(file.path())?;
            let mut record: EvalRecord = serde_json::from_str(&text)
                .map_err(|err| ShiftError::Corrupt(format!("bad eval file: {}", err)))?;
            record.dataset = dataset.clone();
            records.push(record);
        }
    }
    Ok(records)
}
