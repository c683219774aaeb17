use std::{
    fmt,
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use crate::{
    data_structures::{model::GpuMesh, texture::Texture},
    error::AssetLoadError,
    resources::mesh::MeshData,
};

/**
 * This module contains all logic for loading meshes/textures/shaders from the
 * asset directory.
 */
pub mod mesh;
pub mod shader;
pub mod texture;

/// Opaque reference to a mesh owned by an [`AssetLoader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub usize);

/// Opaque reference to a texture owned by an [`AssetLoader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub usize);

/// Colour textures are sampled as sRGB, normal maps as linear data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureKind {
    Colour,
    NormalMap,
}

/// Where the geometry of a scene comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshSource {
    Obj(String),
    Sphere { radius: f32, resolution: u32 },
}

impl fmt::Display for MeshSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshSource::Obj(path) => f.write_str(path),
            MeshSource::Sphere { radius, resolution } => {
                write!(f, "sphere(r={radius}, res={resolution})")
            }
        }
    }
}

/// Loads assets once at setup and hands out handles to them.
///
/// Every load returns a `Result` so callers decide explicitly what a missing
/// file means for them.
pub trait AssetLoader {
    type Shader;

    fn load_shader(&mut self, name: &str) -> Result<Self::Shader, AssetLoadError>;

    fn load_mesh(&mut self, source: &MeshSource) -> Result<MeshHandle, AssetLoadError>;

    fn load_texture(
        &mut self,
        path: &str,
        kind: TextureKind,
    ) -> Result<TextureHandle, AssetLoadError>;
}

pub fn load_string(base: &Path, file_name: &str) -> Result<String, AssetLoadError> {
    let path = base.join(file_name);
    std::fs::read_to_string(&path).map_err(|e| AssetLoadError::io(path, e))
}

pub fn load_binary(base: &Path, file_name: &str) -> Result<Vec<u8>, AssetLoadError> {
    let path = base.join(file_name);
    std::fs::read(&path).map_err(|e| AssetLoadError::io(path, e))
}

/// Parses an obj file into a single triangle list, ignoring its mtl library.
pub fn load_obj(base: &Path, file_name: &str) -> Result<MeshData, AssetLoadError> {
    let obj_text = load_string(base, file_name)?;
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));

    let (models, _) = tobj::load_obj_buf(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        // built-in materials are never drawn, so the mtl file is not even opened
        |_| Err(tobj::LoadError::OpenFileFailed),
    )
    .map_err(|source| AssetLoadError::Obj {
        path: base.join(file_name),
        source,
    })?;

    let data = mesh::obj_geometry(&models);
    if data.indices.is_empty() {
        return Err(AssetLoadError::EmptyMesh(base.join(file_name)));
    }
    Ok(data)
}

/// [`AssetLoader`] that uploads everything straight to the GPU.
#[derive(Debug)]
pub struct GpuAssets {
    device: wgpu::Device,
    queue: wgpu::Queue,
    base: PathBuf,
    meshes: Vec<GpuMesh>,
    textures: Vec<Texture>,
}

impl GpuAssets {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, base: impl Into<PathBuf>) -> Self {
        Self {
            device,
            queue,
            base: base.into(),
            meshes: Vec::new(),
            textures: Vec::new(),
        }
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&GpuMesh> {
        self.meshes.get(handle.0)
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0)
    }
}

impl AssetLoader for GpuAssets {
    type Shader = wgpu::ShaderModule;

    fn load_shader(&mut self, name: &str) -> Result<wgpu::ShaderModule, AssetLoadError> {
        let path = shader::shader_path(&self.base, name);
        let source = std::fs::read_to_string(&path).map_err(|e| AssetLoadError::io(path, e))?;
        let module = shader::compile_wgsl(&self.device, name, &source)?;
        log::info!("Loaded shader {name}");
        Ok(module)
    }

    fn load_mesh(&mut self, source: &MeshSource) -> Result<MeshHandle, AssetLoadError> {
        let data = match source {
            MeshSource::Obj(file_name) => load_obj(&self.base, file_name)?,
            MeshSource::Sphere { radius, resolution } => mesh::uv_sphere(*radius, *resolution),
        };
        let name = source.to_string();
        log::info!("Loaded mesh {} ({} triangles)", name, data.triangle_count());
        self.meshes.push(data.upload(&self.device, &name));
        Ok(MeshHandle(self.meshes.len() - 1))
    }

    fn load_texture(
        &mut self,
        file_name: &str,
        kind: TextureKind,
    ) -> Result<TextureHandle, AssetLoadError> {
        let bytes = load_binary(&self.base, file_name)?;
        let texture = Texture::from_bytes(&self.device, &self.queue, &bytes, file_name, kind)
            .map_err(|source| AssetLoadError::Image {
                path: self.base.join(file_name),
                source,
            })?;
        log::info!("Loaded texture {file_name}");
        self.textures.push(texture);
        Ok(TextureHandle(self.textures.len() - 1))
    }
}
