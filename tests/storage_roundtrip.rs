use std::collections::BTreeMap;

use ndarray::{Array, Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use shiftbench::data_handling::{DatasetTriplet, SampleSet};
use shiftbench::error::ShiftError;
use shiftbench::storage::Store;

fn random_set(n: usize, d: usize, seed: u64) -> SampleSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Array2<f64> = Array::from_shape_fn((n, d), |_| rng.gen::<f64>() * 100.0 - 50.0);
    let y: Array1<i32> = Array::from_shape_fn(n, |_| rng.gen_range(0..2));
    SampleSet::new(x, y).unwrap()
}

fn random_triplet() -> DatasetTriplet {
    DatasetTriplet::new(
        random_set(37, 5, 1),
        random_set(41, 5, 2),
        random_set(29, 5, 3),
    )
    .unwrap()
}

#[test]
fn save_then_load_is_bit_identical() {
    let dir = TempDir::new().unwrap();
    let store = Store::create(Some("roundtrip"), dir.path(), false).unwrap();

    let data = random_triplet();
    store.save_data(&data).unwrap();
    let loaded = store.load_data().unwrap();

    assert_eq!(loaded, data);
    // spot-check exact bits, not just approximate equality
    for (a, b) in data.source.x.iter().zip(loaded.source.x.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn open_missing_store_fails() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Store::open("nope", dir.path()),
        Err(ShiftError::StoreNotFound(_))
    ));
}

#[test]
fn create_refuses_to_clobber_without_overwrite() {
    let dir = TempDir::new().unwrap();
    Store::create(Some("run"), dir.path(), false).unwrap();
    assert!(matches!(
        Store::create(Some("run"), dir.path(), false),
        Err(ShiftError::StoreExists(_))
    ));
    // and replaces cleanly with overwrite
    Store::create(Some("run"), dir.path(), true).unwrap();
}

#[test]
fn eval_files_carry_model_and_identifier() {
    let dir = TempDir::new().unwrap();
    let store = Store::create(Some("run"), dir.path(), false).unwrap();

    let mut metrics = BTreeMap::new();
    metrics.insert("s-only-acc-on-s".to_string(), 0.91);

    store.save_eval(&metrics, "logistic", None).unwrap();
    store.save_eval(&metrics, "logistic", Some("tuned")).unwrap();

    assert!(store.path().join("eval_logistic.json").is_file());
    assert!(store.path().join("eval_logistic_tuned.json").is_file());
}

#[test]
fn corrupt_data_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = Store::create(Some("run"), dir.path(), false).unwrap();
    std::fs::write(store.path().join("data.bin"), b"XXXXP").unwrap();
    assert!(matches!(
        store.load_data(),
        Err(ShiftError::Corrupt(_))
    ));
}
