//! painterly-viewer
//!
//! A small wgpu viewer that shows one of a fixed set of scenes (the earth,
//! a dragon, a kitchen, a chair, a cow and a bunny) with a Blinn-Phong
//! lighting shader. Keys `0` to `5` switch the active scene; the horizontal
//! pointer position moves a split line between the original textures of a
//! scene and their painted variants.
//!
//! High-level modules
//! - `camera`: orbit camera, projection and its mouse controller
//! - `config`: startup configuration and the constant lighting state
//! - `context`: window, surface and device
//! - `data_structures`: meshes, textures, transforms, scenes and the registry
//! - `flow`: the winit event loop
//! - `input`: key to scene dispatch
//! - `pipelines`: the lighting render pipeline
//! - `render`: the per-frame uniform and draw sequence
//! - `resources`: loading meshes, textures and shaders from the asset directory
//! - `uniforms`: uniform names, values and the `ShaderProgram` seam
//! - `viewer`: setup and per-frame application state
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod uniforms;
pub mod viewer;
