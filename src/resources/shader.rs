use std::path::{Path, PathBuf};

use crate::error::AssetLoadError;

/// Where the shader with logical name `name` lives below the asset directory.
pub fn shader_path(base: &Path, name: &str) -> PathBuf {
    base.join("shaders").join(format!("{name}.wgsl"))
}

/// Runs `f` inside a validation error scope and turns a captured error into
/// [`AssetLoadError::ShaderCompile`].
pub fn validated<T>(
    device: &wgpu::Device,
    name: &str,
    f: impl FnOnce() -> T,
) -> Result<T, AssetLoadError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    match futures::executor::block_on(device.pop_error_scope()) {
        Some(err) => Err(AssetLoadError::ShaderCompile {
            name: name.to_string(),
            message: err.to_string(),
        }),
        None => Ok(value),
    }
}

pub fn compile_wgsl(
    device: &wgpu::Device,
    name: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, AssetLoadError> {
    validated(device, name, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    })
}
