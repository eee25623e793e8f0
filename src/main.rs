//! Headless demo run: compose and render a few seconds of show, then
//! print the final frame statistics as JSON.

use encore_engine::renderer::{GpuContext, StageRenderer};
use encore_engine::scene::{CoreConfig, SceneComposer};
use encore_engine::signal::VenueType;
use encore_engine::EngineResult;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = CoreConfig::default();
    if std::env::args().any(|a| a == "--festival") {
        config.venue = VenueType::Festival;
    }

    let stats = run(&config)?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn run(config: &CoreConfig) -> EngineResult<encore_engine::FrameStats> {
    let mut composer = SceneComposer::new(config)?;

    // A missing adapter downgrades to a CPU-only run rather than
    // failing: the scene math is the product, the image is a bonus.
    let gpu = match GpuContext::new(1280, 720) {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            log::warn!("[main] running without GPU: {}", e);
            None
        }
    };
    let mut renderer = gpu.as_ref().map(StageRenderer::new);

    let mut stats = encore_engine::FrameStats::default();
    for frame in 0..240u32 {
        let t = frame as f32 / 60.0;
        stats = composer.tick(t)?;
        if let (Some(gpu), Some(renderer)) = (gpu.as_ref(), renderer.as_mut()) {
            renderer.render(gpu, &composer, t);
        }
    }

    composer.teardown();
    Ok(stats)
}
