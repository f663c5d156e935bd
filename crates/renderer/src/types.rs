use std::path::PathBuf;
use std::time::Duration;

use crate::runtime::RenderPolicy;

/// Default grid density along each axis of the deformable plane.
pub const DEFAULT_SUBDIVISIONS: u32 = 50;

/// Default press/release transition length in seconds.
pub const DEFAULT_PRESS_SECONDS: f32 = 0.6;

/// Anti-aliasing policy for the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Antialiasing {
    /// Pick the highest sample count supported by the surface format.
    Auto,
    /// Disable MSAA and render directly into the swapchain.
    Off,
    /// Request a specific MSAA sample count (clamped to what the device supports).
    Samples(u32),
}

impl Default for Antialiasing {
    fn default() -> Self {
        Self::Auto
    }
}

/// Identity and limits of the adapter the renderer ended up on.
#[derive(Clone, Debug)]
pub struct AdapterProfile {
    /// Driver-reported adapter name.
    pub name: String,
    /// Backend API servicing the adapter.
    pub backend: wgpu::Backend,
    /// Reported device class (discrete, integrated, cpu, ...).
    pub device_type: wgpu::DeviceType,
    /// Largest 2D texture edge the device accepts.
    pub max_texture_dimension_2d: u32,
}

impl AdapterProfile {
    pub(crate) fn from_wgpu(info: &wgpu::AdapterInfo, limits: &wgpu::Limits) -> Self {
        Self {
            name: info.name.clone(),
            backend: info.backend,
            device_type: info.device_type,
            max_texture_dimension_2d: limits.max_texture_dimension_2d,
        }
    }

    /// True when frames will be rasterised on the CPU.
    pub fn is_software(&self) -> bool {
        if self.device_type == wgpu::DeviceType::Cpu {
            return true;
        }
        let name = self.name.to_ascii_lowercase();
        name.contains("llvmpipe") || name.contains("swiftshader") || name.contains("software")
    }
}

/// Immutable configuration passed to the renderer at start-up.
///
/// `RendererConfig` mirrors CLI flags and tells the renderer which image to
/// map onto the surface, how dense the deformation grid should be, and how
/// frames are paced.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Path to the image mapped onto the surface.
    pub image_source: PathBuf,
    /// Title for the preview window.
    pub window_title: String,
    /// Number of grid cells along each axis of the plane.
    pub subdivisions: u32,
    /// Length of the press/release progress transition.
    pub press_duration: Duration,
    /// Render interpolated uv coordinates instead of the image.
    pub debug_uv: bool,
    /// Anti-aliasing mode requested by the caller.
    pub antialiasing: Antialiasing,
    /// High-level render behaviour requested by the caller.
    pub policy: RenderPolicy,
}

impl Default for RendererConfig {
    /// Provides a 720p windowed configuration with no image selected.
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            image_source: PathBuf::new(),
            window_title: String::from("peelview"),
            subdivisions: DEFAULT_SUBDIVISIONS,
            press_duration: Duration::from_secs_f32(DEFAULT_PRESS_SECONDS),
            debug_uv: false,
            antialiasing: Antialiasing::default(),
            policy: RenderPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, device_type: wgpu::DeviceType) -> AdapterProfile {
        AdapterProfile {
            name: name.to_string(),
            backend: wgpu::Backend::Vulkan,
            device_type,
            max_texture_dimension_2d: 8192,
        }
    }

    #[test]
    fn software_rasterisers_are_detected_by_name_or_type() {
        assert!(
            profile("llvmpipe (LLVM 17.0.6, 256 bits)", wgpu::DeviceType::VirtualGpu).is_software()
        );
        assert!(profile("SwiftShader Device", wgpu::DeviceType::Other).is_software());
        assert!(profile("Some Unnamed Adapter", wgpu::DeviceType::Cpu).is_software());
        assert!(!profile("NVIDIA GeForce RTX 3060", wgpu::DeviceType::DiscreteGpu).is_software());
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = RendererConfig::default();
        assert_eq!(config.surface_size, (1280, 720));
        assert_eq!(config.subdivisions, DEFAULT_SUBDIVISIONS);
        assert!((config.press_duration.as_secs_f32() - DEFAULT_PRESS_SECONDS).abs() < 1e-6);
        assert!(!config.debug_uv);
        assert_eq!(config.antialiasing, Antialiasing::Auto);
    }
}
