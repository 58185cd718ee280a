use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tileworld_engine::world::position::{Vec2, world_to_chunk};
use tileworld_game::clock::FixedClock;
use tileworld_game::config::GameConfig;
use tileworld_game::input::Autopilot;
use tileworld_game::session::Session;
use tokio::time::{Instant, MissedTickBehavior};

/// How often a progress line is logged.
const REPORT_EVERY: u64 = 600;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config_path: Option<PathBuf> = std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .map(Into::into);
    let frames_override: Option<u64> = std::env::args()
        .skip_while(|a| a != "--frames")
        .nth(1)
        .and_then(|s| s.parse().ok());
    let seed_override: Option<u64> = std::env::args()
        .skip_while(|a| a != "--seed")
        .nth(1)
        .and_then(|s| s.parse().ok());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = match &config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(frames) = frames_override {
        config.frames = frames;
    }
    if let Some(seed) = seed_override {
        config.seed = seed;
    }
    config.validate()?;

    tracing::info!("Tileworld -- headless session");

    let viewport = Vec2::new(config.viewport_width, config.viewport_height);
    let mut autopilot = Autopilot::new(config.seed, viewport);
    let mut clock = FixedClock::new(config.physics_interval);
    let mut session = Session::new(config.clone());

    let mut interval = tokio::time::interval(Duration::from_millis(config.frame_interval_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let started = Instant::now();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let Some(timing) = clock.frame(started.elapsed()) else {
                    continue;
                };
                let input = autopilot.next_input();
                session.frame(timing, &input);

                let frames = session.stats().frames;
                if frames % REPORT_EVERY == 0 {
                    let pos = session.player_position().unwrap_or(Vec2::ZERO);
                    let chunk = world_to_chunk(pos);
                    tracing::info!(
                        "Frame {}: player in chunk ({}, {}), {} chunks, {} entities, backlog {:.3}s",
                        frames, chunk.x, chunk.y,
                        session.map().chunk_count(),
                        session.entities().len(),
                        clock.backlog(),
                    );
                }
                if config.frames > 0 && frames >= config.frames {
                    break;
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Ctrl+C received, shutting down...");
                break;
            }
        }
    }

    let stats = session.stats();
    tracing::info!(
        "Ran {} frames, {} physics steps: {} chunks created, {} evicted, {} enemies spawned",
        stats.frames,
        stats.physics_steps,
        stats.chunks_created,
        stats.chunks_evicted,
        stats.enemies_spawned,
    );
    Ok(())
}
