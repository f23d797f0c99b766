use crate::models::engine::InstanceRaw;
use wgpu::{Device, RenderPipeline};

/// Solid colored quads. Each instance is a rectangle in NDC given by its
/// top-left corner and size; the four vertices come from the vertex index.
pub const QUAD_SHADER_SRC: &str = r#"
struct InstanceInput {
    @location(0) offset: vec2<f32>,
    @location(1) size: vec2<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vi: u32, instance: InstanceInput) -> VertexOutput {
    let corner = vec2<f32>(f32(vi & 1u), f32((vi >> 1u) & 1u));
    let pos = vec2<f32>(
        instance.offset.x + corner.x * instance.size.x,
        instance.offset.y - corner.y * instance.size.y,
    );
    var out: VertexOutput;
    out.clip_position = vec4<f32>(pos, 0.0, 1.0);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Maximum number of quads drawn in one frame.
pub const MAX_QUADS: usize = 4096;

pub fn create_quad_pipeline(device: &Device, format: wgpu::TextureFormat) -> RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Quad Shader"),
        source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(QUAD_SHADER_SRC)),
    });

    let instance_desc = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }, // Offset
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            }, // Size
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            }, // Color
        ],
    };

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Quad Layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Quad Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[instance_desc],
        },
        fragment: Some(wgpu::FragmentState {
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

pub fn create_instance_buffer(device: &Device) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Instance Buffer"),
        size: (MAX_QUADS * std::mem::size_of::<InstanceRaw>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Converts a pixel rectangle (origin top-left, y down) to a quad instance.
pub fn rect_instance(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: [f32; 4],
    screen_width: f32,
    screen_height: f32,
) -> InstanceRaw {
    InstanceRaw {
        offset: [x / screen_width * 2.0 - 1.0, 1.0 - y / screen_height * 2.0],
        size: [w / screen_width * 2.0, h / screen_height * 2.0],
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_rect_covers_ndc() {
        let quad = rect_instance(0.0, 0.0, 800.0, 600.0, [1.0; 4], 800.0, 600.0);
        assert_eq!(quad.offset, [-1.0, 1.0]);
        assert_eq!(quad.size, [2.0, 2.0]);
    }

    #[test]
    fn bottom_right_quarter() {
        let quad = rect_instance(400.0, 300.0, 400.0, 300.0, [0.0; 4], 800.0, 600.0);
        assert_eq!(quad.offset, [0.0, 0.0]);
        assert_eq!(quad.size, [1.0, 1.0]);
    }

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 32);
    }
}
