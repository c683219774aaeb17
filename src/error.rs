//! Typed errors for asset loading, setup and uniform uploads.
//!
//! GPU and window glue uses `anyhow`; the errors here are the ones callers are
//! expected to match on.

use std::path::PathBuf;

use thiserror::Error;

use crate::uniforms::{UniformKind, UniformName};

/// A single asset (shader, mesh or texture) could not be loaded.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("asset {0:?} not found")]
    NotFound(PathBuf),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to parse obj {path:?}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("obj {0:?} contains no triangles")]
    EmptyMesh(PathBuf),
    #[error("shader {name} failed to compile: {message}")]
    ShaderCompile { name: String, message: String },
}

impl AssetLoadError {
    pub(crate) fn io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

/// Errors that abort startup before the frame loop is entered.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("lighting shader failed to load: {0}")]
    Shader(#[source] AssetLoadError),
    #[error("none of the {attempted} scenes could be loaded")]
    NoScenes { attempted: usize },
}

/// A uniform value that does not fit the slot it was uploaded to.
#[derive(Debug, Error, PartialEq)]
pub enum UniformError {
    #[error("uniform {name} expects {expected:?}, got {actual:?}")]
    TypeMismatch {
        name: UniformName,
        expected: UniformKind,
        actual: UniformKind,
    },
    #[error("texture {name} is bound to unit {expected}, got unit {actual}")]
    WrongTextureUnit {
        name: UniformName,
        expected: u32,
        actual: u32,
    },
    #[error("texture handle {0} is not loaded")]
    UnknownTexture(usize),
}
