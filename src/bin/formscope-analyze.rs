//! Developer utility that replays recorded keypoint frames through the engine.

use std::path::PathBuf;

use formscope::config::{self, EngineConfig};
use formscope::logging::{self, LogOptions};
use formscope::{Keypoint, MotionEngine};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
struct CliOptions {
    frames_path: PathBuf,
    config_path: Option<PathBuf>,
    model_path: Option<PathBuf>,
    seed: Option<u64>,
    exercise: Option<String>,
    log_dir: Option<PathBuf>,
    quiet: bool,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let log_options = LogOptions {
        log_dir: options.log_dir.clone(),
        stdout: false,
        ..LogOptions::default()
    };
    match logging::init_with(&log_options) {
        Ok(path) if !options.quiet => eprintln!("Logging to {}", path.display()),
        Ok(_) => {}
        Err(err) => eprintln!("Logging disabled: {err}"),
    }

    let engine_config = resolve_config(&options)?;
    let exercise = options
        .exercise
        .clone()
        .unwrap_or_else(|| engine_config.default_exercise.clone());

    let frames_json =
        std::fs::read_to_string(&options.frames_path).map_err(|err| err.to_string())?;
    let frames: Vec<Vec<Keypoint>> = serde_json::from_str(&frames_json)
        .map_err(|err| format!("Invalid frames file {}: {err}", options.frames_path.display()))?;

    let mut engine = MotionEngine::from_config(&engine_config);
    if !engine.initialize_model() {
        eprintln!("No trained model available; results use heuristic feedback.");
    }

    for (idx, keypoints) in frames.iter().enumerate() {
        let result = engine.analyze_frame(keypoints, &exercise);
        if !options.quiet {
            println!(
                "frame {:>4}  overall={:>3}  knee_in={:>3}  level={:<8}  dummy={}",
                idx,
                result.overall_score,
                result.knee_in_toe_out_score,
                format!("{:?}", result.feedback.level).to_ascii_lowercase(),
                result.is_dummy
            );
        }
    }

    let summary = engine.session_summary();
    let summary_json = serde_json::to_string_pretty(&summary).map_err(|err| err.to_string())?;
    println!("{summary_json}");
    engine.dispose();
    Ok(())
}

fn resolve_config(options: &CliOptions) -> Result<EngineConfig, String> {
    let mut engine_config = match &options.config_path {
        Some(path) => config::load_from_path(path).map_err(|err| err.to_string())?,
        None => config::load_or_default().unwrap_or_else(|err| {
            eprintln!("Using default config: {err}");
            EngineConfig::default()
        }),
    };
    if let Some(model_path) = &options.model_path {
        engine_config.model_path = Some(model_path.clone());
    }
    if options.seed.is_some() {
        engine_config.heuristic_seed = options.seed;
    }
    Ok(engine_config)
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut frames_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut model_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut exercise: Option<String> = None;
    let mut log_dir: Option<PathBuf> = None;
    let mut quiet = false;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--frames" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--frames requires a value".to_string())?;
                frames_path = Some(PathBuf::from(value));
            }
            "--config" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--config requires a value".to_string())?;
                config_path = Some(PathBuf::from(value));
            }
            "--model" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--model requires a value".to_string())?;
                model_path = Some(PathBuf::from(value));
            }
            "--seed" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--seed requires a value".to_string())?;
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --seed value: {value}"))?,
                );
            }
            "--exercise" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--exercise requires a value".to_string())?;
                exercise = Some(value.to_string());
            }
            "--log-dir" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--log-dir requires a value".to_string())?;
                log_dir = Some(PathBuf::from(value));
            }
            "--quiet" => quiet = true,
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let frames_path = frames_path.ok_or_else(|| "--frames is required".to_string())?;
    Ok(CliOptions {
        frames_path,
        config_path,
        model_path,
        seed,
        exercise,
        log_dir,
        quiet,
    })
}

fn help_text() -> String {
    [
        "formscope-analyze",
        "",
        "Usage:",
        "  formscope-analyze --frames <frames.json> [options]",
        "",
        "Options:",
        "  --config <config.toml>   Config file (default: app config).",
        "  --model <model.json>     Trained knee-in model (overrides config).",
        "  --seed <n>               Seed for heuristic fallback selection.",
        "  --exercise <label>       Exercise label (default: config default_exercise).",
        "  --log-dir <dir>          Write log files here (default: app logs dir).",
        "  --quiet                  Only print the session summary.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let options = parse_args(args(&[
            "--frames", "f.json", "--model", "m.json", "--seed", "9", "--exercise", "lunge",
            "--log-dir", "logs", "--quiet",
        ]))
        .unwrap();
        assert_eq!(options.frames_path, PathBuf::from("f.json"));
        assert_eq!(options.model_path, Some(PathBuf::from("m.json")));
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.exercise.as_deref(), Some("lunge"));
        assert_eq!(options.log_dir, Some(PathBuf::from("logs")));
        assert!(options.quiet);
    }

    #[test]
    fn frames_flag_is_required() {
        let err = parse_args(args(&["--seed", "1"])).unwrap_err();
        assert!(err.contains("--frames"));
    }

    #[test]
    fn rejects_bad_seed() {
        let err = parse_args(args(&["--frames", "f.json", "--seed", "x"])).unwrap_err();
        assert!(err.contains("Invalid --seed"));
    }
}
