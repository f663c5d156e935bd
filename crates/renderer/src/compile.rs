use std::borrow::Cow;

use anyhow::Result;
use wgpu::naga::ShaderStage;

/// Compiles the surface deformation vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("surface deformation vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    }))
}

/// Compiles the texture/uv-debug fragment shader.
pub(crate) fn compile_fragment_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("surface color fragment"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(FRAGMENT_SHADER_GLSL),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

/// Vertex stage: displaces each grid vertex along z before projection.
///
/// The displacement is the sum of a gesture-shaped bulge and a travelling
/// ripple. `mix`/`clamp` terms are driven entirely by the `progress` and
/// `direction` uniforms, so a resting surface (`progress == 0`) is exactly
/// flat. The uniform block layout must match `SurfaceUniforms` in
/// `gpu/uniforms.rs`.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec3 position;
layout(location = 1) in vec2 uv;

layout(location = 0) out vec2 v_uv;

layout(std140, set = 0, binding = 0) uniform SurfaceParams {
    mat4 projection;
    mat4 model_view;
    float time;
    float progress;
    float direction;
    float debug_uv;
} ubo;

void main() {
    vec3 pos = position;

    float dist = length(uv - vec2(0.5));
    float max_dist = length(vec2(0.5));
    float norm_dist = dist / max_dist;

    float stick_to = norm_dist;
    float stick_out = -norm_dist;
    float stick_effect = mix(stick_to, stick_out, ubo.direction);

    float super_progress = min(2.0 * ubo.progress, 2.0 * (1.0 - ubo.progress));
    float z_progress = mix(
        clamp(2.0 * ubo.progress, 0.0, 1.0),
        clamp(1.0 - 2.0 * (1.0 - ubo.progress), 0.0, 1.0),
        ubo.direction);

    float offset_z = 10.0;
    pos.z += offset_z * (stick_effect * super_progress - z_progress);
    pos.z += ubo.progress * sin(dist * 10.0 - ubo.time);

    v_uv = uv;
    gl_Position = ubo.projection * ubo.model_view * vec4(pos, 1.0);
}
";

/// Fragment stage: samples the bound texture, or emits raw uv when the debug
/// toggle is set.
const FRAGMENT_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 out_color;

layout(std140, set = 0, binding = 0) uniform SurfaceParams {
    mat4 projection;
    mat4 model_view;
    float time;
    float progress;
    float direction;
    float debug_uv;
} ubo;

layout(set = 1, binding = 0) uniform texture2D surface_texture;
layout(set = 1, binding = 1) uniform sampler surface_sampler;

void main() {
    if (ubo.debug_uv > 0.5) {
        out_color = vec4(v_uv, 0.0, 1.0);
    } else {
        out_color = texture(sampler2D(surface_texture, surface_sampler), v_uv);
    }
}
";
