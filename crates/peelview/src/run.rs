use std::time::Duration;

use anyhow::{Context, Result};
use renderer::{RenderPolicy, Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn execute(cli: Cli) -> Result<()> {
    if !cli.still && cli.still_time.is_some() {
        tracing::warn!("--still-time has no effect without --still");
    }

    let policy = if cli.still {
        RenderPolicy::Still {
            time: cli.still_time,
        }
    } else {
        RenderPolicy::Animate {
            target_fps: match cli.fps {
                Some(fps) if fps > 0.0 => Some(fps),
                _ => None,
            },
        }
    };

    let config = RendererConfig {
        surface_size: cli.size,
        image_source: cli.image,
        window_title: cli.title.unwrap_or_else(|| String::from("peelview")),
        subdivisions: cli.subdivisions,
        press_duration: Duration::from_secs_f32(cli.press_duration),
        debug_uv: cli.debug_uv,
        antialiasing: cli.antialias,
        policy,
    };

    tracing::info!(
        image = %config.image_source.display(),
        width = config.surface_size.0,
        height = config.surface_size.1,
        subdivisions = config.subdivisions,
        press_seconds = config.press_duration.as_secs_f32(),
        antialias = ?config.antialiasing,
        policy = ?config.policy,
        "starting peelview"
    );

    Renderer::new(config)
        .context("invalid renderer configuration")?
        .run()
}
