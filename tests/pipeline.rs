use rand::rngs::StdRng;
use rand::SeedableRng;

use shiftbench::config::{ModelConfig, ModelType};
use shiftbench::datagen::{
    ClassifyConfig, ConceptShiftBuilder, CovariateShiftBuilder, DatasetBuilder, DomainSelector,
    FeatureSelector, Shifter,
};
use shiftbench::evaluate::evaluate;
use shiftbench::models::factory::build_model;
use shiftbench::models::{AdaptModel, FitParams};
use shiftbench::stats::analyze_data;

fn logistic_factory() -> impl Fn() -> Box<dyn AdaptModel> {
    || build_model(ModelConfig::new(0.5, ModelType::Logistic { l2: 0.0 }))
}

#[test]
fn concept_shift_pipeline_produces_full_metrics() {
    let init_classify = ClassifyConfig {
        n_samples: 1000,
        n_features: 5,
        n_informative: 3,
        n_redundant: 2,
        n_repeated: 0,
        n_clusters_per_class: 2,
        random_state: Some(0),
        ..ClassifyConfig::default()
    };
    let shifter = Shifter::new(4, 0.15, 2.0, 0.2).unwrap();
    let selector = DomainSelector::new(100, 100, 100, 1, 1).unwrap();
    let builder = ConceptShiftBuilder::new(init_classify, shifter, selector);

    let mut rng = StdRng::seed_from_u64(1);
    let data = builder.generate(&mut rng).unwrap();

    let factory = logistic_factory();
    let metrics = evaluate(&data, &factory, &FitParams { epochs: 80 }, &mut rng).unwrap();

    for key in [
        "s-only-acc-on-s",
        "g-only-acc-on-g",
        "t-only-acc-on-t",
        "s-only-acc-on-t",
        "g-only-acc-on-t",
        "s->t-acc-on-t",
        "s->g-acc-on-t",
        "half-A-dist-s-g",
        "half-A-dist-s-t",
        "half-A-dist-g-t",
    ] {
        assert!(metrics.contains_key(key), "missing metric {}", key);
    }
}

#[test]
fn unshifted_domains_are_statistically_indistinguishable() {
    // two domains but no transform at all: source and target come from the
    // same distribution, so the domain classifier cannot beat chance
    let init_classify = ClassifyConfig {
        n_samples: 1000,
        n_features: 4,
        n_informative: 3,
        n_redundant: 0,
        n_repeated: 0,
        n_clusters_per_class: 2,
        random_state: Some(3),
        ..ClassifyConfig::default()
    };
    let shifter = Shifter::new(2, 0.0, 0.0, 0.0).unwrap();
    let selector = DomainSelector::new(100, 100, 100, 1, 1).unwrap();
    let builder = ConceptShiftBuilder::new(init_classify, shifter, selector);

    let mut rng = StdRng::seed_from_u64(2);
    let data = builder.generate(&mut rng).unwrap();

    let factory = logistic_factory();
    let metrics = evaluate(&data, &factory, &FitParams { epochs: 100 }, &mut rng).unwrap();
    let dist = metrics["half-A-dist-s-t"];
    assert!(
        dist.abs() < 0.3,
        "no-shift source/target should sit at chance level, got {}",
        dist
    );
}

#[test]
fn feature_bias_pushes_source_and_target_apart() {
    let init_classify = ClassifyConfig {
        n_samples: 1000,
        n_features: 2,
        n_informative: 2,
        n_redundant: 0,
        n_repeated: 0,
        n_clusters_per_class: 1,
        class_sep: 2.0,
        random_state: Some(5),
        ..ClassifyConfig::default()
    };
    let selector = FeatureSelector::new(100, 100, 100, 1.0, 1.0, 3.0).unwrap();
    let builder = CovariateShiftBuilder::new(init_classify, selector);

    let mut rng = StdRng::seed_from_u64(4);
    let data = builder.generate(&mut rng).unwrap();
    let stats = analyze_data(&data);

    let st = stats["source-target-center-dist"];
    let sg = stats["source-global-center-dist"];
    let gt = stats["global-target-center-dist"];

    // the bias vector separates the sampling centers symmetrically about the
    // global center, so the direct source-target gap dominates either leg
    assert!(st > 0.5, "bias_dist=3 produced no measurable shift: {}", st);
    assert!(sg < st, "global should sit between source and target");
    assert!(gt < st, "global should sit between source and target");
}

#[test]
fn unbiased_feature_selection_keeps_centers_close() {
    let init_classify = ClassifyConfig {
        n_samples: 1000,
        n_features: 2,
        n_informative: 2,
        n_redundant: 0,
        n_repeated: 0,
        n_clusters_per_class: 1,
        class_sep: 2.0,
        random_state: Some(5),
        ..ClassifyConfig::default()
    };
    let selector = FeatureSelector::new(100, 100, 100, 1.0, 1.0, 0.0).unwrap();
    let builder = CovariateShiftBuilder::new(init_classify, selector);

    let mut rng = StdRng::seed_from_u64(6);
    let data = builder.generate(&mut rng).unwrap();
    let stats = analyze_data(&data);
    assert!(
        stats["source-target-center-dist"] < 0.5,
        "bias_dist=0 should leave centers together: {}",
        stats["source-target-center-dist"]
    );
}
