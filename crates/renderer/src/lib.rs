//! Interactive renderer for a press-to-peel image surface.
//!
//! The crate glues a `winit` preview window, a `wgpu` render pipeline, and a
//! small gesture state machine together. The overall flow is:
//!
//! ```text
//!   CLI (peelview)
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ winit event loop ──▶ GpuState::render()
//!          ▲                 │                    ▲
//!          │           press / release           │ progress, direction, time
//!          │                 ▼                   │
//!          └────────── GestureTracker ───────────┘
//! ```
//!
//! `GpuState` owns every GPU resource (surface, device, pipeline, mesh,
//! uniforms), `GestureTracker` turns pointer presses into eased progress
//! values, and `Renderer` is the thin entry point that validates the
//! configuration and hands it to the window loop. All deformation happens in
//! the vertex shader; the CPU uploads a handful of floats per frame and the
//! grid itself never changes after startup.

use anyhow::Result;

mod compile;
mod gpu;
mod input;
mod runtime;
mod tween;
mod types;
mod window;

pub use gpu::{surface_extent, SurfaceCamera, SurfaceMesh, SurfaceVertex};
pub use input::{GestureSample, GestureTracker};
pub use runtime::{
    time_source_for_policy, BoxedTimeSource, FixedTimeSource, FrameScheduler, RenderPolicy,
    SystemTimeSource, TimeSample, TimeSource,
};
pub use tween::{EasingCurve, ProgressTween};
pub use types::{
    AdapterProfile, Antialiasing, RendererConfig, DEFAULT_PRESS_SECONDS, DEFAULT_SUBDIVISIONS,
};

/// High-level entry point that owns the chosen configuration.
///
/// The heavy lifting lives inside the window loop; `Renderer` validates the
/// configuration up-front so failures surface before a window opens.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Builds a renderer for the supplied configuration.
    pub fn new(config: RendererConfig) -> Result<Self> {
        if config.surface_size.0 == 0 || config.surface_size.1 == 0 {
            anyhow::bail!(
                "surface size must be non-zero, got {}x{}",
                config.surface_size.0,
                config.surface_size.1
            );
        }
        if config.subdivisions == 0 {
            anyhow::bail!("surface needs at least one subdivision along each axis");
        }
        Ok(Self { config })
    }

    /// Opens the preview window and blocks until it closes.
    pub fn run(&self) -> Result<()> {
        window::run_windowed(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_rejects_degenerate_configs() {
        let zero_width = RendererConfig {
            surface_size: (0, 720),
            ..RendererConfig::default()
        };
        assert!(Renderer::new(zero_width).is_err());

        let flat_grid = RendererConfig {
            subdivisions: 0,
            ..RendererConfig::default()
        };
        assert!(Renderer::new(flat_grid).is_err());

        assert!(Renderer::new(RendererConfig::default()).is_ok());
    }
}
