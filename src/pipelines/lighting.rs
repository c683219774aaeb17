//! wgpu backend of [`ShaderProgram`].
//!
//! Uniform uploads are collected into a [`LightingUniform`] block. The draw
//! call writes the block into the one uniform buffer the pipeline owns and
//! [`LightingProgram::encode`] replays the draw into a render pass afterwards.
//!
//! Buffers and bind groups are created once: the uniform group in
//! [`LightingPipeline::new`], one texture group per scene material in
//! [`LightingPipeline::prepare_scenes`].

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        model::{DrawMesh, ModelVertex, Vertex},
        registry::SceneRegistry,
        texture::Texture,
    },
    error::{AssetLoadError, UniformError},
    resources::{
        GpuAssets, MeshHandle, TextureHandle, TextureKind,
        shader::validated,
        texture::{TEXTURE_UNITS, texture_units_bind_group, texture_units_layout},
    },
    uniforms::{ShaderProgram, UniformName, UniformValue},
};

/// Layout of `struct Lighting` in `lighting.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub world: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub split: f32,
    pub light_pos: [f32; 3],
    pub use_albedo: u32,
    pub light_color: [f32; 3],
    pub use_normal_map: u32,
    pub object_color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub screen_size: [f32; 2],
    _padding2: [u32; 2],
}

impl LightingUniform {
    /// Writes an already type-checked value into its field.
    fn write(&mut self, name: UniformName, value: UniformValue) {
        match (name, value) {
            (UniformName::ViewMatrix, UniformValue::Mat4(m)) => self.view = m.into(),
            (UniformName::ProjectionMatrix, UniformValue::Mat4(m)) => self.projection = m.into(),
            (UniformName::ModelViewProjectionMatrix, UniformValue::Mat4(m)) => {
                self.view_proj = m.into()
            }
            (UniformName::WorldMatrix, UniformValue::Mat4(m)) => self.world = m.into(),
            (UniformName::ViewPos, UniformValue::Vec3(v)) => self.view_pos = v.into(),
            (UniformName::LightPos, UniformValue::Vec3(v)) => self.light_pos = v.into(),
            (UniformName::LightColor, UniformValue::Vec3(v)) => self.light_color = v.into(),
            (UniformName::ObjectColor, UniformValue::Vec3(v)) => self.object_color = v.into(),
            (UniformName::Split, UniformValue::Float(f)) => self.split = f,
            (UniformName::ScreenSize, UniformValue::Vec2(v)) => self.screen_size = v.into(),
            (UniformName::UseAlbedo, UniformValue::Bool(b)) => self.use_albedo = b as u32,
            (UniformName::UseNormalMap, UniformValue::Bool(b)) => self.use_normal_map = b as u32,
            _ => (),
        }
    }
}

/// Texture handle bound to each unit, `None` where the fallback is sampled.
pub type TextureUnits = [Option<TextureHandle>; TEXTURE_UNITS];

/// The compiled lighting pipeline and the GPU resources its draws are bound with.
#[derive(Debug)]
pub struct LightingPipeline {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    // sampled by units the active material leaves empty
    blank_colour: Texture,
    flat_normal: Texture,
    fallback_textures: wgpu::BindGroup,
    texture_groups: HashMap<TextureUnits, wgpu::BindGroup>,
}

impl LightingPipeline {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        shader: &wgpu::ShaderModule,
    ) -> Result<Self, AssetLoadError> {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            label: Some("lighting_uniform_layout"),
        });
        let texture_layout = texture_units_layout(device);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Lighting Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let pipeline = validated(device, "lighting pipeline", || {
            mk_render_pipeline(device, &layout, color_format, shader)
        })?;

        let uniform: LightingUniform = bytemuck::Zeroable::zeroed();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lighting Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("lighting_uniform_bind_group"),
        });

        let blank_colour = Texture::solid(device, queue, TextureKind::Colour, "blank_colour");
        let flat_normal = Texture::solid(device, queue, TextureKind::NormalMap, "flat_normal");
        let fallback_textures = texture_units_bind_group(
            device,
            &texture_layout,
            [&blank_colour, &blank_colour, &flat_normal, &flat_normal],
        );

        Ok(Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            blank_colour,
            flat_normal,
            fallback_textures,
            texture_groups: HashMap::new(),
        })
    }

    /// Builds the texture bind group of every registered scene's material.
    pub fn prepare_scenes(
        &mut self,
        device: &wgpu::Device,
        assets: &GpuAssets,
        registry: &SceneRegistry,
    ) {
        for scene in registry.iter() {
            let units = scene.material.texture_units();
            if self.texture_groups.contains_key(&units) {
                continue;
            }
            let textures: [&Texture; TEXTURE_UNITS] = std::array::from_fn(|unit| {
                units[unit]
                    .and_then(|handle| assets.texture(handle))
                    .unwrap_or_else(|| self.fallback(unit))
            });
            let group = texture_units_bind_group(device, &self.texture_layout, textures);
            self.texture_groups.insert(units, group);
        }
        log::debug!("Prepared {} texture bind groups", self.texture_groups.len());
    }

    /// Starts collecting the draw of one frame.
    pub fn program<'a>(
        &'a self,
        queue: &'a wgpu::Queue,
        assets: &'a GpuAssets,
    ) -> LightingProgram<'a> {
        LightingProgram {
            queue,
            pipeline: self,
            assets,
            uniform: bytemuck::Zeroable::zeroed(),
            units: [None; TEXTURE_UNITS],
            draw: None,
        }
    }

    fn fallback(&self, unit: usize) -> &Texture {
        if unit < 2 {
            &self.blank_colour
        } else {
            &self.flat_normal
        }
    }

    fn texture_group(&self, units: &TextureUnits) -> &wgpu::BindGroup {
        if units.iter().all(Option::is_none) {
            return &self.fallback_textures;
        }
        match self.texture_groups.get(units) {
            Some(group) => group,
            None => {
                log::warn!("No texture bind group prepared for {:?}", units);
                &self.fallback_textures
            }
        }
    }
}

fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Lighting Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[ModelVertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // the kitchen is looked at from the inside
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

#[derive(Debug, Clone, Copy)]
struct PreparedDraw {
    mesh: MeshHandle,
    units: TextureUnits,
}

/// One frame's uniform uploads and its draw call.
///
/// Every draw writes the same uniform buffer, so only the last draw of a
/// frame is kept.
#[derive(Debug)]
pub struct LightingProgram<'a> {
    queue: &'a wgpu::Queue,
    pipeline: &'a LightingPipeline,
    assets: &'a GpuAssets,
    uniform: LightingUniform,
    units: TextureUnits,
    draw: Option<PreparedDraw>,
}

impl LightingProgram<'_> {
    /// Replays the collected draw.
    pub fn encode<'p>(&'p self, render_pass: &mut wgpu::RenderPass<'p>) {
        let Some(draw) = self.draw else {
            return;
        };
        let Some(mesh) = self.assets.mesh(draw.mesh) else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline.pipeline);
        render_pass.draw_mesh(
            mesh,
            &self.pipeline.uniform_bind_group,
            self.pipeline.texture_group(&draw.units),
        );
    }
}

impl ShaderProgram for LightingProgram<'_> {
    fn begin(&mut self) {
        self.uniform = bytemuck::Zeroable::zeroed();
        self.units = [None; TEXTURE_UNITS];
    }

    fn set_uniform(&mut self, name: UniformName, value: UniformValue) -> Result<(), UniformError> {
        name.check(&value)?;
        match value {
            UniformValue::Texture { unit, handle } => {
                if self.assets.texture(handle).is_none() {
                    return Err(UniformError::UnknownTexture(handle.0));
                }
                self.units[unit as usize] = Some(handle);
            }
            value => self.uniform.write(name, value),
        }
        Ok(())
    }

    fn draw(&mut self, mesh: MeshHandle) {
        if self.assets.mesh(mesh).is_none() {
            log::error!("Skipping draw of unknown mesh {}", mesh.0);
            return;
        }
        self.queue.write_buffer(
            &self.pipeline.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
        if self.draw.is_some() {
            log::warn!("Replacing the earlier draw of this frame with mesh {}", mesh.0);
        }
        self.draw = Some(PreparedDraw {
            mesh,
            units: self.units,
        });
    }

    fn end(&mut self) {
        self.units = [None; TEXTURE_UNITS];
    }
}

#[cfg(test)]
mod tests {
    use super::LightingUniform;

    #[test]
    fn uniform_block_matches_the_wgsl_struct() {
        // four mat4x4 (256) + four vec3/scalar pairs (64) + vec2 padded to 16
        assert_eq!(std::mem::size_of::<LightingUniform>(), 336);
        assert_eq!(std::mem::size_of::<LightingUniform>() % 16, 0);
    }
}
