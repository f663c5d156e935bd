//! GPU orchestration for the deformable image surface.
//!
//! The path from gesture to pixels is deliberately short:
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the window resizes.
//! - `camera` derives the perspective projection whose field of view tracks
//!   the viewport height, keeping the surface pixel-aligned at rest.
//! - `mesh` tessellates the textured plane once at startup; the grid never
//!   changes afterwards, all motion happens in the vertex stage.
//! - `texture` uploads the surface image (or a placeholder when loading
//!   fails) and builds its sampler.
//! - `uniforms` mirrors the shader's std140 parameter block and is written
//!   straight through the queue each frame.
//! - `state` glues everything together and exposes the `GpuState` API used by
//!   `window`.

mod camera;
mod context;
mod mesh;
mod state;
mod texture;
mod uniforms;

pub use camera::SurfaceCamera;
pub use mesh::{surface_extent, SurfaceMesh, SurfaceVertex};
pub(crate) use state::GpuState;
