//! Viewer data structures: meshes, textures, transforms and scenes.
//!
//! - `model` contains the vertex layout and GPU meshes
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `transform` holds static placement and continuous spin
//! - `scene` describes the selectable scenes and their materials
//! - `registry` owns the scenes that loaded successfully

pub mod model;
pub mod registry;
pub mod scene;
pub mod texture;
pub mod transform;
