#![allow(dead_code)]

use std::{collections::HashSet, path::PathBuf};

use cgmath::Deg;
use painterly_viewer::{
    camera::{CameraMatrices, OrbitCamera, Projection},
    config::Config,
    data_structures::scene::{SceneDescriptor, default_scenes},
    error::{AssetLoadError, UniformError},
    input::default_key_bindings,
    resources::{AssetLoader, MeshHandle, MeshSource, TextureHandle, TextureKind},
    uniforms::{ShaderProgram, UniformName, UniformValue},
    viewer::{LIGHTING_SHADER, Viewer, setup},
};

pub const EPSILON: f32 = 1e-4;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
}

pub fn assert_close(a: f32, b: f32) {
    assert!(approx_eq(a, b), "{a} is not close to {b}");
}

/// Everything a [`RecordingProgram`] was asked to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Begin,
    Set(UniformName, UniformValue),
    Draw(MeshHandle),
    End,
}

/// Shader program double that records calls instead of talking to a GPU.
#[derive(Debug, Default)]
pub struct RecordingProgram {
    pub calls: Vec<Call>,
    /// Uniform that is rejected as if the shader did not accept its value.
    pub reject: Option<UniformName>,
}

impl RecordingProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(name: UniformName) -> Self {
        Self {
            calls: Vec::new(),
            reject: Some(name),
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn uploads_of(&self, name: UniformName) -> Vec<UniformValue> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Set(n, value) if *n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn uploaded(&self, name: UniformName) -> Option<UniformValue> {
        self.uploads_of(name).last().copied()
    }

    pub fn uniform_names(&self) -> Vec<UniformName> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Set(name, _) => Some(*name),
                _ => None,
            })
            .collect()
    }

    pub fn draws(&self) -> Vec<MeshHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(mesh) => Some(*mesh),
                _ => None,
            })
            .collect()
    }
}

impl ShaderProgram for RecordingProgram {
    fn begin(&mut self) {
        self.calls.push(Call::Begin);
    }

    fn set_uniform(&mut self, name: UniformName, value: UniformValue) -> Result<(), UniformError> {
        name.check(&value)?;
        if self.reject == Some(name) {
            return Err(UniformError::UnknownTexture(usize::MAX));
        }
        self.calls.push(Call::Set(name, value));
        Ok(())
    }

    fn draw(&mut self, mesh: MeshHandle) {
        self.calls.push(Call::Draw(mesh));
    }

    fn end(&mut self) {
        self.calls.push(Call::End);
    }
}

/// Asset loader double. Every file exists unless listed in `missing`.
#[derive(Debug, Default)]
pub struct FakeLoader {
    pub missing: HashSet<String>,
    pub shader_missing: bool,
    /// Every load request in order, shaders prefixed with `shader:`.
    pub requests: Vec<String>,
    pub meshes: Vec<MeshSource>,
    pub textures: Vec<(String, TextureKind)>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_shader() -> Self {
        Self {
            shader_missing: true,
            ..Self::default()
        }
    }

    pub fn missing(files: &[&str]) -> Self {
        Self {
            missing: files.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn texture_name(&self, handle: TextureHandle) -> &str {
        &self.textures[handle.0].0
    }

    pub fn mesh_source(&self, handle: MeshHandle) -> &MeshSource {
        &self.meshes[handle.0]
    }

    fn check(&self, file: &str) -> Result<(), AssetLoadError> {
        if self.missing.contains(file) {
            Err(AssetLoadError::NotFound(PathBuf::from(file)))
        } else {
            Ok(())
        }
    }
}

impl AssetLoader for FakeLoader {
    type Shader = String;

    fn load_shader(&mut self, name: &str) -> Result<String, AssetLoadError> {
        self.requests.push(format!("shader:{name}"));
        if self.shader_missing {
            return Err(AssetLoadError::NotFound(PathBuf::from(format!(
                "shaders/{name}.wgsl"
            ))));
        }
        Ok(name.to_string())
    }

    fn load_mesh(&mut self, source: &MeshSource) -> Result<MeshHandle, AssetLoadError> {
        self.requests.push(source.to_string());
        if let MeshSource::Obj(file) = source {
            self.check(file)?;
        }
        self.meshes.push(source.clone());
        Ok(MeshHandle(self.meshes.len() - 1))
    }

    fn load_texture(
        &mut self,
        path: &str,
        kind: TextureKind,
    ) -> Result<TextureHandle, AssetLoadError> {
        self.requests.push(path.to_string());
        self.check(path)?;
        self.textures.push((path.to_string(), kind));
        Ok(TextureHandle(self.textures.len() - 1))
    }
}

pub fn scenes() -> Vec<SceneDescriptor> {
    default_scenes()
}

/// A viewer over the default scenes with nothing missing and an 800x600 window.
pub fn viewer(loader: &mut FakeLoader) -> Viewer<String> {
    let mut viewer = setup(loader, LIGHTING_SHADER, &scenes(), &default_key_bindings())
        .expect("setup with every asset present");
    viewer.resized(800, 600);
    viewer
}

/// Camera matrices of the configured start position.
pub fn start_camera() -> CameraMatrices {
    let config = Config::default().camera;
    let camera = OrbitCamera::look_at(config.eye, config.target);
    let projection = Projection::new(
        800,
        600,
        Deg(config.fovy_degrees),
        config.znear,
        config.zfar,
    );
    CameraMatrices::new(&camera, &projection)
}
