use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::warn;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::gpu::GpuState;
use crate::input::GestureTracker;
use crate::runtime::{
    time_source_for_policy, BoxedTimeSource, FrameScheduler, RenderPolicy, TimeSample,
};
use crate::types::RendererConfig;

const SOFTWARE_FPS_CAP: f32 = 15.0;

/// Pairs the animation clock with the frame pacing decisions made in
/// `AboutToWait`.
struct RenderPolicyDriver {
    scheduler: FrameScheduler,
    time_source: BoxedTimeSource,
}

impl RenderPolicyDriver {
    fn new(policy: &RenderPolicy, target_fps: Option<f32>) -> Self {
        Self {
            scheduler: FrameScheduler::new(target_fps),
            time_source: time_source_for_policy(policy),
        }
    }

    fn sample(&mut self) -> TimeSample {
        self.time_source.sample()
    }

    fn mark_rendered(&mut self, now: Instant) {
        self.scheduler.mark_rendered(now);
    }

    fn ready_for_frame(&self, now: Instant) -> bool {
        self.scheduler.ready_for_frame(now)
    }

    fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.scheduler.next_deadline(now)
    }
}

/// Opens the preview window and runs the event loop until it closes.
pub(crate) fn run_windowed(config: &RendererConfig) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(window_size)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create preview window: {err}"))?;
    let window = Arc::new(window);

    let mut state = GpuState::new(window.as_ref(), config)?;

    let profile = state.adapter_profile().clone();
    let animate = matches!(config.policy, RenderPolicy::Animate { .. });
    let mut target_fps = match config.policy {
        RenderPolicy::Animate { target_fps } => target_fps,
        RenderPolicy::Still { .. } => None,
    };
    if animate && target_fps.is_none() && profile.is_software() {
        target_fps = Some(SOFTWARE_FPS_CAP);
        warn!(
            adapter = %profile.name,
            backend = ?profile.backend,
            cap = SOFTWARE_FPS_CAP,
            "software rasterizer detected; capping preview framerate (override with --fps)"
        );
    }

    let mut driver = RenderPolicyDriver::new(&config.policy, target_fps);
    let mut gestures = GestureTracker::new(config.press_duration);

    window.request_redraw();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::MouseInput {
                    state: button_state,
                    button: MouseButton::Left,
                    ..
                } => match button_state {
                    ElementState::Pressed => gestures.press(Instant::now()),
                    ElementState::Released => gestures.release(Instant::now()),
                },
                WindowEvent::Touch(touch) => match touch.phase {
                    TouchPhase::Started => gestures.press(Instant::now()),
                    TouchPhase::Ended | TouchPhase::Cancelled => gestures.release(Instant::now()),
                    TouchPhase::Moved => {}
                },
                WindowEvent::Resized(new_size) => {
                    state.resize(new_size);
                    window.request_redraw();
                }
                WindowEvent::ScaleFactorChanged {
                    mut inner_size_writer,
                    ..
                } => {
                    let _ = inner_size_writer.request_inner_size(state.size());
                }
                WindowEvent::RedrawRequested => {
                    let time = driver.sample();
                    let gesture = gestures.sample(Instant::now());
                    match state.render(gesture, time) {
                        Ok(()) => driver.mark_rendered(Instant::now()),
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            state.resize(state.size());
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            eprintln!("surface out of memory; exiting preview");
                            elwt.exit();
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            eprintln!("surface timeout; retrying next frame");
                        }
                        Err(other) => {
                            eprintln!("surface error: {other:?}; retrying next frame");
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                let wants_frame = animate || gestures.in_transition();
                if !wants_frame {
                    tracing::trace!("scheduler: idle (no redraw requested)");
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if driver.ready_for_frame(now) {
                    tracing::trace!("scheduler: issuing redraw now");
                    window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if let Some(deadline) = driver.next_deadline(now) {
                    let ms = deadline.saturating_duration_since(now).as_millis();
                    tracing::trace!(deadline_ms = ms, "scheduler: waiting until next frame");
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => {}
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}
