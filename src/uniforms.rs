//! The uniform contract between the viewer and the lighting shader.
//!
//! Uniform names form a closed set, so a misspelled name does not compile.
//! Values are checked against the kind (and, for textures, the unit) each
//! name expects; a mismatch is reported as [`UniformError`] instead of being
//! dropped on the floor.

use std::fmt;

use cgmath::{Matrix4, Vector2, Vector3};

use crate::{
    error::UniformError,
    resources::{MeshHandle, TextureHandle},
};

/// Every uniform the lighting shader declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformName {
    ViewMatrix,
    ProjectionMatrix,
    ModelViewProjectionMatrix,
    ViewPos,
    LightPos,
    LightColor,
    ObjectColor,
    WorldMatrix,
    Split,
    ScreenSize,
    UseAlbedo,
    TexA,
    TexB,
    AlbedoTex,
    UseNormalMap,
    NormalMapA,
    NormalMapB,
}

/// The uniforms uploaded once per frame before any scene is considered.
pub const SHARED_UNIFORMS: [UniformName; 7] = [
    UniformName::ViewMatrix,
    UniformName::ProjectionMatrix,
    UniformName::ModelViewProjectionMatrix,
    UniformName::ViewPos,
    UniformName::LightPos,
    UniformName::LightColor,
    UniformName::ObjectColor,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformKind {
    Mat4,
    Vec3,
    Vec2,
    Float,
    Bool,
    Texture,
}

impl UniformName {
    /// Name as declared in the shader source.
    pub fn as_str(self) -> &'static str {
        match self {
            UniformName::ViewMatrix => "viewMatrix",
            UniformName::ProjectionMatrix => "projectionMatrix",
            UniformName::ModelViewProjectionMatrix => "modelViewProjectionMatrix",
            UniformName::ViewPos => "viewPos",
            UniformName::LightPos => "lightPos",
            UniformName::LightColor => "lightColor",
            UniformName::ObjectColor => "objectColor",
            UniformName::WorldMatrix => "worldMatrix",
            UniformName::Split => "split",
            UniformName::ScreenSize => "screenSize",
            UniformName::UseAlbedo => "useAlbedo",
            UniformName::TexA => "texA",
            UniformName::TexB => "texB",
            UniformName::AlbedoTex => "albedoTex",
            UniformName::UseNormalMap => "useNormalMap",
            UniformName::NormalMapA => "normalMapA",
            UniformName::NormalMapB => "normalMapB",
        }
    }

    pub fn kind(self) -> UniformKind {
        match self {
            UniformName::ViewMatrix
            | UniformName::ProjectionMatrix
            | UniformName::ModelViewProjectionMatrix
            | UniformName::WorldMatrix => UniformKind::Mat4,
            UniformName::ViewPos
            | UniformName::LightPos
            | UniformName::LightColor
            | UniformName::ObjectColor => UniformKind::Vec3,
            UniformName::ScreenSize => UniformKind::Vec2,
            UniformName::Split => UniformKind::Float,
            UniformName::UseAlbedo | UniformName::UseNormalMap => UniformKind::Bool,
            UniformName::TexA
            | UniformName::TexB
            | UniformName::AlbedoTex
            | UniformName::NormalMapA
            | UniformName::NormalMapB => UniformKind::Texture,
        }
    }

    /// Fixed texture unit of a sampler uniform. `albedoTex` shares unit 0 with `texA`.
    pub fn texture_unit(self) -> Option<u32> {
        match self {
            UniformName::TexA | UniformName::AlbedoTex => Some(0),
            UniformName::TexB => Some(1),
            UniformName::NormalMapA => Some(2),
            UniformName::NormalMapB => Some(3),
            _ => None,
        }
    }

    /// Checks that `value` may be uploaded to this uniform.
    pub fn check(self, value: &UniformValue) -> Result<(), UniformError> {
        let expected = self.kind();
        let actual = value.kind();
        if expected != actual {
            return Err(UniformError::TypeMismatch {
                name: self,
                expected,
                actual,
            });
        }
        if let (UniformValue::Texture { unit, .. }, Some(expected)) = (value, self.texture_unit()) {
            if *unit != expected {
                return Err(UniformError::WrongTextureUnit {
                    name: self,
                    expected,
                    actual: *unit,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for UniformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec3(Vector3<f32>),
    Vec2(Vector2<f32>),
    Float(f32),
    Bool(bool),
    Texture { unit: u32, handle: TextureHandle },
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Mat4(_) => UniformKind::Mat4,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Bool(_) => UniformKind::Bool,
            UniformValue::Texture { .. } => UniformKind::Texture,
        }
    }
}

/// A bound shader program that accepts uniforms and draw calls.
///
/// The frame step in [`crate::render`] only talks to this trait. The wgpu
/// backend lives in [`crate::pipelines::lighting`]; tests use a recorder.
pub trait ShaderProgram {
    fn begin(&mut self);

    fn set_uniform(&mut self, name: UniformName, value: UniformValue) -> Result<(), UniformError>;

    /// Binds `name` to the texture unit it is declared on.
    fn set_texture(&mut self, name: UniformName, handle: TextureHandle) -> Result<(), UniformError> {
        let unit = name.texture_unit().ok_or(UniformError::TypeMismatch {
            name,
            expected: name.kind(),
            actual: UniformKind::Texture,
        })?;
        self.set_uniform(name, UniformValue::Texture { unit, handle })
    }

    fn draw(&mut self, mesh: MeshHandle);

    fn end(&mut self);
}

/// Maps the pointer's horizontal position onto `[0, 1]` across the window width.
///
/// Positions left of the window give 0, positions right of it give 1.
pub fn split_factor(pointer_x: f64, width: u32) -> f32 {
    if width == 0 || pointer_x.is_nan() {
        return 0.0;
    }
    (pointer_x / width as f64).clamp(0.0, 1.0) as f32
}
