//! Startup configuration of the viewer.

use std::{ffi::OsString, path::PathBuf};

use cgmath::{Point3, Vector3};

use crate::{
    data_structures::scene::{SceneDescriptor, SceneId, default_scenes},
    input::{KeyPolicy, default_key_bindings},
    viewer::LIGHTING_SHADER,
};

/// Environment variable that overrides [`Config::asset_dir`].
pub const ASSET_DIR_VAR: &str = "PAINTERLY_ASSETS";

/// Light and material colours shared by every scene. Constant for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingState {
    pub light_position: Vector3<f32>,
    pub light_color: Vector3<f32>,
    pub object_color: Vector3<f32>,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            light_position: Vector3::new(-500.0, 3000.0, 1000.0),
            light_color: Vector3::new(3.0, 3.0, 3.0),
            object_color: Vector3::new(0.6, 0.6, 0.9),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Radians per dragged pixel.
    pub sensitivity: f32,
    /// Fraction of the distance covered by one wheel notch.
    pub zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 1000.0, 7000.0),
            target: Point3::new(0.0, 0.0, 0.0),
            fovy_degrees: 60.0,
            znear: 1.0,
            zfar: 20000.0,
            sensitivity: 0.005,
            zoom_step: 0.1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub asset_dir: PathBuf,
    /// Logical name of the lighting shader, resolved to `shaders/<name>.wgsl`.
    pub shader_name: String,
    pub window_title: String,
    pub window_size: (u32, u32),
    pub clear_colour: wgpu::Color,
    pub camera: CameraConfig,
    pub lighting: LightingState,
    pub key_policy: KeyPolicy,
    pub key_bindings: Vec<(char, SceneId)>,
    pub scenes: Vec<SceneDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            shader_name: LIGHTING_SHADER.to_string(),
            window_title: "Painterly Viewer".to_string(),
            window_size: (1280, 720),
            clear_colour: wgpu::Color {
                r: 0.05,
                g: 0.05,
                b: 0.05,
                a: 1.0,
            },
            camera: CameraConfig::default(),
            lighting: LightingState::default(),
            key_policy: KeyPolicy::default(),
            key_bindings: default_key_bindings(),
            scenes: default_scenes(),
        }
    }
}

impl Config {
    /// Defaults with the asset directory taken from `PAINTERLY_ASSETS` if set.
    pub fn from_env() -> Self {
        Self::default().with_asset_dir_override(std::env::var_os(ASSET_DIR_VAR))
    }

    /// Replaces the asset directory unless `dir` is missing or empty.
    pub fn with_asset_dir_override(mut self, dir: Option<OsString>) -> Self {
        match dir {
            Some(dir) if !dir.is_empty() => {
                log::info!("Using asset directory {:?} from {}", dir, ASSET_DIR_VAR);
                self.asset_dir = PathBuf::from(dir);
            }
            _ => (),
        }
        self
    }
}
