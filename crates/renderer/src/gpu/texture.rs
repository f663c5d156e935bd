use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::flip_vertical_in_place;
use image::GenericImageView;
use wgpu::util::{DeviceExt, TextureDataOrder};

/// Texture resources bound to the fragment stage's single image slot.
pub(crate) struct SurfaceImage {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    /// Decoded pixel dimensions; `None` when the placeholder is in use, in
    /// which case the mesh falls back to the default aspect ratio.
    pub pixel_size: Option<(u32, u32)>,
}

/// Loads the surface image, falling back to a neutral placeholder on any
/// decode or I/O failure. The render loop must keep running either way.
pub(crate) fn create_surface_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
) -> SurfaceImage {
    match load_image(device, queue, path) {
        Ok(image) => image,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to load surface image; using placeholder"
            );
            create_placeholder(device, queue)
        }
    }
}

fn load_image(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<SurfaceImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to open surface image at {}", path.display()))?;
    let (width, height) = image.dimensions();
    let mut rgba = image.to_rgba8();
    // Image rows are stored top-down; uv origin is bottom-left.
    flip_vertical_in_place(&mut rgba);

    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some("surface image texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        &rgba,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    Ok(SurfaceImage {
        view,
        sampler: create_sampler(device),
        pixel_size: Some((width, height)),
    })
}

fn create_placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> SurfaceImage {
    let data = [255u8, 255, 255, 255];
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some("surface placeholder texture"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        &data,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    SurfaceImage {
        view,
        sampler: create_sampler(device),
        pixel_size: None,
    }
}

fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
