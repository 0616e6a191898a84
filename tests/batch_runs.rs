use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use shiftbench::batch::{batch_eval, batch_generate, batch_load_eval};
use shiftbench::config::{ModelConfig, ModelType};
use shiftbench::datagen::{ClassifyConfig, ConceptShiftBuilder, DomainSelector, Shifter};
use shiftbench::models::FitParams;

fn small_builder() -> ConceptShiftBuilder {
    let init_classify = ClassifyConfig {
        n_samples: 300,
        n_features: 3,
        n_informative: 2,
        n_redundant: 1,
        n_repeated: 0,
        n_clusters_per_class: 2,
        random_state: Some(11),
        ..ClassifyConfig::default()
    };
    let shifter = Shifter::new(3, 0.1, 1.0, 0.1).unwrap();
    let selector = DomainSelector::new(40, 40, 40, 1, 1).unwrap();
    ConceptShiftBuilder::new(init_classify, shifter, selector)
}

#[test]
fn generate_eval_load_cycle() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().unwrap();
    let batch_path = dir.path().join("runs");
    let builder = small_builder();
    let mut rng = StdRng::seed_from_u64(1);

    let generated = batch_generate(&builder, 3, &batch_path, &mut rng).unwrap();
    assert_eq!(generated.len(), 3);
    for (store, stats) in &generated {
        assert!(store.path().join("data.bin").is_file());
        assert!(store.path().join("config.json").is_file());
        assert!(store.path().join("stats.json").is_file());
        assert_eq!(stats["source-size"], 40.0);
    }

    let model_config = ModelConfig::new(0.5, ModelType::Logistic { l2: 0.0 });
    let fit_params = FitParams { epochs: 40 };
    let results = batch_eval(&batch_path, &model_config, &fit_params, None, &mut rng).unwrap();
    assert_eq!(results.len(), 3);
    for metrics in &results {
        assert!(metrics.contains_key("s-only-acc-on-s"));
        assert!(metrics.contains_key("half-A-dist-s-t"));
    }

    let records = batch_load_eval(&batch_path).unwrap();
    assert_eq!(records.len(), 3);
    let mut datasets: Vec<&str> = records.iter().map(|r| r.dataset.as_str()).collect();
    datasets.sort_unstable();
    assert_eq!(datasets, vec!["0", "1", "2"]);
    assert!(records.iter().all(|r| r.model == "logistic"));
}

#[test]
fn batch_eval_requires_an_existing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent");
    let model_config = ModelConfig::default();
    let mut rng = StdRng::seed_from_u64(2);
    assert!(batch_eval(&missing, &model_config, &FitParams::default(), None, &mut rng).is_err());
}

#[test]
fn regeneration_replaces_previous_batch() {
    let dir = TempDir::new().unwrap();
    let batch_path = dir.path().join("runs");
    let builder = small_builder();
    let mut rng = StdRng::seed_from_u64(3);

    batch_generate(&builder, 4, &batch_path, &mut rng).unwrap();
    batch_generate(&builder, 2, &batch_path, &mut rng).unwrap();

    let dirs: Vec<String> = std::fs::read_dir(&batch_path)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(dirs.len(), 2);
}
