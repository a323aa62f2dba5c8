use bytemuck::NoUninit;
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::controller::{uniform, ShaderSink};
use crate::utils::Vertex;

/// Fixed MSAA level, set once at startup.
pub const MSAA_SAMPLE_COUNT: u32 = 4;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Per-frame camera data: view-projection matrix plus the eye position the
/// fragment shader needs for the specular term.
#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub _pad: f32,
}

/// Phong parameter block. Field order mirrors the WGSL `Phong` struct so the
/// named-parameter writes below can address fields by byte offset.
#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct PhongUniform {
    pub ambient: [f32; 3],
    pub shininess: f32,
    pub diffuse: [f32; 3],
    pub intensity: f32,
    pub specular: [f32; 3],
    pub constant: f32,
    pub light_position: [f32; 3],
    pub linear: f32,
    pub quadratic: f32,
    pub _pad: [f32; 3],
}

/// Model transform plus flat color for the grid and the light gizmo.
#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct UnlitUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Byte offset of a named shader parameter inside [`PhongUniform`].
fn param_offset(name: &str) -> Option<u64> {
    let offset = match name {
        uniform::MATERIAL_AMBIENT => std::mem::offset_of!(PhongUniform, ambient),
        uniform::MATERIAL_SHININESS => std::mem::offset_of!(PhongUniform, shininess),
        uniform::MATERIAL_DIFFUSE => std::mem::offset_of!(PhongUniform, diffuse),
        uniform::LIGHT_INTENSITY => std::mem::offset_of!(PhongUniform, intensity),
        uniform::MATERIAL_SPECULAR => std::mem::offset_of!(PhongUniform, specular),
        uniform::LIGHT_CONSTANT => std::mem::offset_of!(PhongUniform, constant),
        uniform::LIGHT_POSITION => std::mem::offset_of!(PhongUniform, light_position),
        uniform::LIGHT_LINEAR => std::mem::offset_of!(PhongUniform, linear),
        uniform::LIGHT_QUADRATIC => std::mem::offset_of!(PhongUniform, quadratic),
        _ => return None,
    };
    Some(offset as u64)
}

/// Shader-parameter sink backed by partial writes into the Phong uniform
/// buffer. Unknown names are logged and dropped.
pub struct PhongParamWriter<'a> {
    pub queue: &'a wgpu::Queue,
    pub buffer: &'a wgpu::Buffer,
}

impl ShaderSink for PhongParamWriter<'_> {
    fn set_vec3(&mut self, name: &str, value: Vec3) {
        match param_offset(name) {
            Some(offset) => {
                self.queue
                    .write_buffer(self.buffer, offset, bytemuck::cast_slice(&value.to_array()));
            }
            None => tracing::warn!(name, "ignoring unknown vec3 shader parameter"),
        }
    }

    fn set_scalar(&mut self, name: &str, value: f32) {
        match param_offset(name) {
            Some(offset) => {
                self.queue
                    .write_buffer(self.buffer, offset, bytemuck::bytes_of(&value));
            }
            None => tracing::warn!(name, "ignoring unknown scalar shader parameter"),
        }
    }
}

pub struct SceneResources {
    pub camera_buffer: wgpu::Buffer,
    pub phong_buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

pub struct UnlitResources {
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub grid_buffer: wgpu::Buffer,
    pub grid_bind_group: wgpu::BindGroup,
    pub gizmo_buffer: wgpu::Buffer,
    pub gizmo_bind_group: wgpu::BindGroup,
}

pub struct Pipelines {
    pub phong: wgpu::RenderPipeline,
    pub unlit: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
}

pub fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: MSAA_SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
    (depth_texture, depth_view)
}

/// Multisampled color target, resolved into the surface each frame.
pub fn create_msaa_texture(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let msaa_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("msaa_texture"),
        size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: MSAA_SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let msaa_view = msaa_texture.create_view(&wgpu::TextureViewDescriptor::default());
    (msaa_texture, msaa_view)
}

pub fn create_scene_resources(device: &wgpu::Device) -> SceneResources {
    let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("camera_buffer"),
        size: std::mem::size_of::<CameraUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let phong_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("phong_buffer"),
        size: std::mem::size_of::<PhongUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: phong_buffer.as_entire_binding() },
        ],
    });

    SceneResources {
        camera_buffer,
        phong_buffer,
        bind_group_layout,
        bind_group,
    }
}

pub fn create_unlit_resources(
    device: &wgpu::Device,
    camera_buffer: &wgpu::Buffer,
) -> UnlitResources {
    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("unlit_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });

    // The grid never moves; its transform and color are written once here.
    let grid_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("grid_uniform"),
        contents: bytemuck::bytes_of(&UnlitUniform {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            color: [0.45, 0.45, 0.45, 1.0],
        }),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    // The light gizmo follows the light each frame.
    let gizmo_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("gizmo_uniform"),
        contents: bytemuck::bytes_of(&UnlitUniform {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0, 1.0, 1.0, 1.0],
        }),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let grid_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("grid_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: grid_buffer.as_entire_binding() },
        ],
    });
    let gizmo_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("gizmo_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: gizmo_buffer.as_entire_binding() },
        ],
    });

    UnlitResources {
        bind_group_layout,
        grid_buffer,
        grid_bind_group,
        gizmo_buffer,
        gizmo_bind_group,
    }
}

const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        wgpu::VertexAttribute { offset: 0, shader_location: 0, format: wgpu::VertexFormat::Float32x3 },
        wgpu::VertexAttribute { offset: 12, shader_location: 1, format: wgpu::VertexFormat::Float32x3 },
    ],
};

pub fn create_pipelines(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    scene_bgl: &wgpu::BindGroupLayout,
    unlit_bgl: &wgpu::BindGroupLayout,
) -> Pipelines {
    let phong_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("phong_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/phong.wgsl").into()),
    });
    let unlit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("unlit_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/unlit.wgsl").into()),
    });

    let phong_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("phong_pipeline_layout"),
        bind_group_layouts: &[scene_bgl],
        push_constant_ranges: &[],
    });
    let unlit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("unlit_pipeline_layout"),
        bind_group_layouts: &[unlit_bgl],
        push_constant_ranges: &[],
    });

    let depth_stencil = Some(wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    });
    let multisample = wgpu::MultisampleState {
        count: MSAA_SAMPLE_COUNT,
        mask: !0,
        alpha_to_coverage_enabled: false,
    };
    let color_target = Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
    });

    let phong = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("phong_pipeline"),
        layout: Some(&phong_layout),
        vertex: wgpu::VertexState {
            module: &phong_shader,
            entry_point: Some("vs_main"),
            buffers: &[VERTEX_LAYOUT],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &phong_shader,
            entry_point: Some("fs_main"),
            targets: &[color_target.clone()],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_stencil.clone(),
        multisample,
        multiview: None,
        cache: None,
    });

    let unlit = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("unlit_pipeline"),
        layout: Some(&unlit_layout),
        vertex: wgpu::VertexState {
            module: &unlit_shader,
            entry_point: Some("vs_main"),
            buffers: &[VERTEX_LAYOUT],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &unlit_shader,
            entry_point: Some("fs_main"),
            targets: &[color_target.clone()],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_stencil.clone(),
        multisample,
        multiview: None,
        cache: None,
    });

    let lines = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("line_pipeline"),
        layout: Some(&unlit_layout),
        vertex: wgpu::VertexState {
            module: &unlit_shader,
            entry_point: Some("vs_main"),
            buffers: &[VERTEX_LAYOUT],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &unlit_shader,
            entry_point: Some("fs_main"),
            targets: &[color_target],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil,
        multisample,
        multiview: None,
        cache: None,
    });

    Pipelines { phong, unlit, lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_parameter_has_an_offset() {
        for name in [
            uniform::MATERIAL_AMBIENT,
            uniform::MATERIAL_DIFFUSE,
            uniform::MATERIAL_SPECULAR,
            uniform::MATERIAL_SHININESS,
            uniform::LIGHT_POSITION,
            uniform::LIGHT_INTENSITY,
            uniform::LIGHT_CONSTANT,
            uniform::LIGHT_LINEAR,
            uniform::LIGHT_QUADRATIC,
        ] {
            assert!(param_offset(name).is_some(), "no offset for {name}");
        }
        assert!(param_offset("material.bogus").is_none());
    }

    #[test]
    fn phong_uniform_layout_matches_wgsl_block() {
        // WGSL std140-ish layout: vec3 fields at 16-byte boundaries with the
        // following scalar packed into the pad slot.
        assert_eq!(param_offset(uniform::MATERIAL_AMBIENT), Some(0));
        assert_eq!(param_offset(uniform::MATERIAL_SHININESS), Some(12));
        assert_eq!(param_offset(uniform::MATERIAL_DIFFUSE), Some(16));
        assert_eq!(param_offset(uniform::LIGHT_INTENSITY), Some(28));
        assert_eq!(param_offset(uniform::MATERIAL_SPECULAR), Some(32));
        assert_eq!(param_offset(uniform::LIGHT_CONSTANT), Some(44));
        assert_eq!(param_offset(uniform::LIGHT_POSITION), Some(48));
        assert_eq!(param_offset(uniform::LIGHT_LINEAR), Some(60));
        assert_eq!(param_offset(uniform::LIGHT_QUADRATIC), Some(64));
        assert_eq!(std::mem::size_of::<PhongUniform>(), 80);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
