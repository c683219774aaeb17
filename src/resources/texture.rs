use crate::data_structures::texture::Texture;

/// Number of texture units the lighting shader samples from.
pub const TEXTURE_UNITS: usize = 4;

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

/// Layout of the per-draw texture group: units 0..4 followed by one shared sampler.
///
/// Unit 0 is `texA`/`albedoTex`, unit 1 `texB`, unit 2 `normalMapA` and
/// unit 3 `normalMapB`.
pub fn texture_units_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            texture_entry(0),
            texture_entry(1),
            texture_entry(2),
            texture_entry(3),
            wgpu::BindGroupLayoutEntry {
                binding: TEXTURE_UNITS as u32,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_units_layout"),
    })
}

pub fn texture_units_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    units: [&Texture; TEXTURE_UNITS],
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&units[0].view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&units[1].view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&units[2].view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(&units[3].view),
            },
            wgpu::BindGroupEntry {
                binding: TEXTURE_UNITS as u32,
                resource: wgpu::BindingResource::Sampler(&units[0].sampler),
            },
        ],
        label: Some("texture_units_bind_group"),
    })
}
