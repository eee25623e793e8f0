// End-to-end show lifecycle: bring-up, a run of ticks, live quality
// and venue switches, teardown, and deterministic re-init. Everything
// here is CPU-only; no GPU is required.

use encore_engine::avatar::AnimationState;
use encore_engine::scene::{CoreConfig, SceneComposer};
use encore_engine::signal::{QualitySignal, VenueType};
use encore_engine::EngineError;

fn small_config() -> CoreConfig {
    CoreConfig {
        // scene_optimization 0 halves the crowd, keeping tests fast.
        signal: QualitySignal::new(0.5, 30.0, 0.0),
        seed: 7,
        ..Default::default()
    }
}

#[test]
fn full_show_runs_and_reports_stats() {
    let mut composer = SceneComposer::new(&small_config()).unwrap();

    let mut last = None;
    for frame in 0..120u32 {
        let t = frame as f32 / 60.0;
        let stats = composer.tick(t).unwrap();
        assert_eq!(stats.instance_count, 1500);
        assert!(stats.triangle_count > 0);
        last = Some(stats);
    }
    assert!(last.unwrap().frames_per_second >= 0.0);
}

#[test]
fn live_venue_switch_mid_show() {
    let mut composer = SceneComposer::new(&small_config()).unwrap();
    for frame in 0..10u32 {
        composer.tick(frame as f32 / 60.0).unwrap();
    }

    composer.set_venue(VenueType::Festival).unwrap();
    assert_eq!(composer.instance_count(), 6000);
    assert_eq!(composer.lighting().heads().len(), 14);

    // The next tick drives the new population without a hitch.
    let stats = composer.tick(1.0).unwrap();
    assert_eq!(stats.instance_count, 6000);
}

#[test]
fn live_quality_and_animation_switches() {
    let mut composer = SceneComposer::new(&small_config()).unwrap();
    composer.tick(0.0).unwrap();

    composer
        .set_quality_signal(QualitySignal::new(0.9, 80.0, 100.0))
        .unwrap();
    composer.set_animation_state(AnimationState::Dance);

    let stats = composer.tick(0.5).unwrap();
    assert_eq!(stats.instance_count, 4500);
}

#[test]
fn teardown_then_reinit_reproduces_the_scene() {
    let config = small_config();

    let mut first = SceneComposer::new(&config).unwrap();
    let first_stats = first.tick(2.0).unwrap();
    first.teardown();

    assert!(matches!(first.tick(2.1), Err(EngineError::TornDown)));
    assert!(matches!(
        first.set_quality_signal(QualitySignal::default()),
        Err(EngineError::TornDown)
    ));

    let mut second = SceneComposer::new(&config).unwrap();
    let second_stats = second.tick(2.0).unwrap();
    assert_eq!(second_stats.instance_count, first_stats.instance_count);
    assert_eq!(second_stats.triangle_count, first_stats.triangle_count);

    // Same seed, same placement: the committed transforms agree too.
    let first_again = SceneComposer::new(&config).unwrap();
    let batches_a = first_again.draw_list();
    let batches_b = second.draw_list();
    assert_eq!(batches_a.len(), batches_b.len());
}

#[test]
fn draw_list_is_stable_between_structural_changes() {
    let mut composer = SceneComposer::new(&small_config()).unwrap();
    let epoch = composer.epoch();
    let batch_count = composer.draw_list().len();

    for frame in 0..30u32 {
        composer.tick(frame as f32 / 60.0).unwrap();
    }
    assert_eq!(composer.epoch(), epoch);
    assert_eq!(composer.draw_list().len(), batch_count);

    composer.set_venue(VenueType::Festival).unwrap();
    assert!(composer.epoch() > epoch);
}
