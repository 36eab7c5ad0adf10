use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::scene::camera::Camera;
use crate::scene::lights::Lights;

use super::instance::BoxInstance;

/// Cube vertex — position relative to center, outward face normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,  // position
        1 => Float32x3,  // normal
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const fn v(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Vertex {
    Vertex {
        position: [x, y, z],
        normal: [nx, ny, nz],
    }
}

/// Unit cube centered at origin, four vertices per face so each face gets a
/// flat normal. Instances scale it to each part's box dimensions.
pub const CUBE_VERTICES: [Vertex; 24] = [
    // +x
    v(0.5, -0.5, -0.5, 1.0, 0.0, 0.0),
    v(0.5, 0.5, -0.5, 1.0, 0.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0, 0.0),
    // -x
    v(-0.5, -0.5, 0.5, -1.0, 0.0, 0.0),
    v(-0.5, 0.5, 0.5, -1.0, 0.0, 0.0),
    v(-0.5, 0.5, -0.5, -1.0, 0.0, 0.0),
    v(-0.5, -0.5, -0.5, -1.0, 0.0, 0.0),
    // +y
    v(-0.5, 0.5, -0.5, 0.0, 1.0, 0.0),
    v(-0.5, 0.5, 0.5, 0.0, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 0.0, 1.0, 0.0),
    v(0.5, 0.5, -0.5, 0.0, 1.0, 0.0),
    // -y
    v(-0.5, -0.5, 0.5, 0.0, -1.0, 0.0),
    v(-0.5, -0.5, -0.5, 0.0, -1.0, 0.0),
    v(0.5, -0.5, -0.5, 0.0, -1.0, 0.0),
    v(0.5, -0.5, 0.5, 0.0, -1.0, 0.0),
    // +z
    v(-0.5, -0.5, 0.5, 0.0, 0.0, 1.0),
    v(0.5, -0.5, 0.5, 0.0, 0.0, 1.0),
    v(0.5, 0.5, 0.5, 0.0, 0.0, 1.0),
    v(-0.5, 0.5, 0.5, 0.0, 0.0, 1.0),
    // -z
    v(0.5, -0.5, -0.5, 0.0, 0.0, -1.0),
    v(-0.5, -0.5, -0.5, 0.0, 0.0, -1.0),
    v(-0.5, 0.5, -0.5, 0.0, 0.0, -1.0),
    v(0.5, 0.5, -0.5, 0.0, 0.0, -1.0),
];

pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // +x
    4, 5, 6, 4, 6, 7, // -x
    8, 9, 10, 8, 10, 11, // +y
    12, 13, 14, 12, 14, 15, // -y
    16, 17, 18, 16, 18, 19, // +z
    20, 21, 22, 20, 22, 23, // -z
];

/// Maximum number of box instances the instance buffer can hold.
/// The figure plus ground is 12; headroom costs nothing.
pub const MAX_INSTANCES: usize = 16;

/// Frame-global shading data. Light colors arrive premultiplied by
/// intensity; vec3s are padded out to 16 bytes for WGSL layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    pub ambient_color: [f32; 4],
}

impl SceneUniform {
    pub fn new(camera: &Camera, lights: &Lights) -> Self {
        let dir = lights.directional.direction();
        let key: Vec3 = lights.directional.color * lights.directional.intensity;
        let ambient: Vec3 = lights.ambient.color * lights.ambient.intensity;
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_dir: [dir.x, dir.y, dir.z, 0.0],
            light_color: [key.x, key.y, key.z, 0.0],
            ambient_color: [ambient.x, ambient.y, ambient.z, 0.0],
        }
    }
}

/// All GPU resources for the box-figure rendering pipeline.
pub struct FigurePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    pub scene_uniform_buffer: wgpu::Buffer,
    pub scene_bind_group: wgpu::BindGroup,
    pub num_instances: u32,
}

impl FigurePipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        // Load shader
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("figure_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/figure.wgsl").into()),
        });

        // Bind group layout for the scene uniform
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_uniform_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("figure_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Instance buffer layout (80 bytes per instance)
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BoxInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // model matrix columns (4 x vec4<f32>) — 0, 16, 32, 48
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 5,
                },
                // color (u32) — 64
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Uint32,
                    offset: 64,
                    shader_location: 6,
                },
            ],
        };

        // Render pipeline — opaque boxes, depth-tested
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("figure_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout(), instance_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: super::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Create buffers
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("figure_instance_buffer"),
            size: (MAX_INSTANCES * std::mem::size_of::<BoxInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Scene uniform — rewritten each frame before the draw
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniform_buffer"),
            size: std::mem::size_of::<SceneUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            scene_uniform_buffer,
            scene_bind_group,
            num_instances: 0,
        }
    }

    /// Upload new instance data to the GPU.
    pub fn update_instances(&mut self, queue: &wgpu::Queue, instances: &[BoxInstance]) {
        let count = instances.len().min(MAX_INSTANCES);
        self.num_instances = count as u32;
        if count > 0 {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&instances[..count]),
            );
        }
    }

    /// Upload the frame's camera + light uniform.
    pub fn update_scene_uniform(&self, queue: &wgpu::Queue, uniform: &SceneUniform) {
        queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::cast_slice(std::slice::from_ref(uniform)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_mesh_is_consistent() {
        assert_eq!(CUBE_VERTICES.len(), 24);
        assert_eq!(CUBE_INDICES.len(), 36);
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
        // Every face normal points away from the cube center.
        for vert in &CUBE_VERTICES {
            let p = Vec3::from(vert.position);
            let n = Vec3::from(vert.normal);
            assert!(p.dot(n) > 0.0);
        }
    }

    #[test]
    fn uniform_premultiplies_intensity() {
        let camera = Camera::new(1.0);
        let lights = Lights::new();
        let uniform = SceneUniform::new(&camera, &lights);
        assert_eq!(uniform.ambient_color[0], 0.6);
        assert_eq!(uniform.light_color[1], 0.6);
        let dir = Vec3::new(
            uniform.light_dir[0],
            uniform.light_dir[1],
            uniform.light_dir[2],
        );
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }
}
