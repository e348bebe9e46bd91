use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use formscope::analysis::{FEATURE_VECTOR_LEN, classify_alignment, normalize};
use formscope::backend::{HeuristicBackend, ModelBackend, ScenarioPicker};
use formscope::ml::{KNEE_IN_MODEL_VERSION, KneeInModel};
use formscope::{Keypoint, MotionEngine};

const HIDDEN_SIZE: usize = 32;

fn squat_pose() -> Vec<Keypoint> {
    (0..33)
        .map(|i| Keypoint::new(150.0 + (i % 7) as f32 * 12.0, 80.0 + i as f32 * 14.0, 0.9))
        .collect()
}

fn bench_model() -> KneeInModel {
    KneeInModel {
        model_version: KNEE_IN_MODEL_VERSION,
        feature_len_f32: FEATURE_VECTOR_LEN,
        hidden_size: HIDDEN_SIZE,
        weights1: (0..FEATURE_VECTOR_LEN * HIDDEN_SIZE)
            .map(|i| ((i % 13) as f32 - 6.0) * 0.01)
            .collect(),
        bias1: vec![0.05; HIDDEN_SIZE],
        weights2: (0..HIDDEN_SIZE).map(|i| (i as f32 - 16.0) * 0.02).collect(),
        bias2: 0.0,
        feature_mean: vec![0.0; FEATURE_VECTOR_LEN],
        feature_std: vec![1.0; FEATURE_VECTOR_LEN],
    }
}

fn bench_pipeline_stages(c: &mut Criterion) {
    let pose = squat_pose();
    c.bench_function("normalize", |b| b.iter(|| normalize(black_box(&pose))));
    c.bench_function("classify_alignment", |b| {
        b.iter(|| classify_alignment(black_box(&pose)))
    });
}

fn bench_analyze_frame(c: &mut Criterion) {
    let pose = squat_pose();
    let mut model_engine = MotionEngine::with_backend(
        Box::new(ModelBackend::from_model(bench_model())),
        HeuristicBackend::new(ScenarioPicker::seeded(1)),
    );
    assert!(model_engine.initialize_model(), "bench model initializes");
    let mut heuristic_engine =
        MotionEngine::heuristic_only(HeuristicBackend::new(ScenarioPicker::seeded(1)));

    for (name, engine) in [("model", &mut model_engine), ("heuristic", &mut heuristic_engine)] {
        c.bench_with_input(
            BenchmarkId::new("analyze_frame", name),
            &pose,
            |b, pose| {
                b.iter(|| {
                    let result = engine.analyze_frame(black_box(pose), "squat");
                    engine.reset_analysis();
                    result
                });
            },
        );
    }
}

criterion_group!(benches, bench_pipeline_stages, bench_analyze_frame);
criterion_main!(benches);
