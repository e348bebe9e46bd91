mod support;

use formscope::MotionEngine;
use formscope::config::{self, CONFIG_FILE_NAME, EngineConfig};
use support::formscope_env::ConfigHomeGuard;

#[test]
fn config_round_trips_through_app_root() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = ConfigHomeGuard::set(temp.path().to_path_buf());

    assert_eq!(config::load_or_default().unwrap(), EngineConfig::default());

    let saved = EngineConfig {
        model_path: Some(temp.path().join("models").join("knee_in.json")),
        heuristic_seed: Some(5),
        default_exercise: "step_up".to_string(),
    };
    config::save(&saved).unwrap();

    let path = config::config_path().unwrap();
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(CONFIG_FILE_NAME));
    assert!(path.starts_with(temp.path()));
    assert_eq!(config::load_or_default().unwrap(), saved);
}

#[test]
fn engine_from_config_with_missing_model_still_answers() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = ConfigHomeGuard::set(temp.path().to_path_buf());
    let engine_config = EngineConfig {
        model_path: Some(temp.path().join("missing.json")),
        heuristic_seed: Some(1),
        ..EngineConfig::default()
    };
    let mut engine = MotionEngine::from_config(&engine_config);
    assert!(!engine.initialize_model());
    let result = engine.analyze_frame(&[], &engine_config.default_exercise);
    assert!(result.is_dummy);
    assert_eq!(result.exercise_type, "squat");
}
