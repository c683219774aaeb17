use std::{ffi::OsString, path::Path};

use cgmath::{Point3, Vector3};
use painterly_viewer::{
    config::{ASSET_DIR_VAR, Config, LightingState},
    input::KeyPolicy,
    resources::shader::shader_path,
};

#[test]
fn defaults_match_the_shipped_viewer() {
    let config = Config::default();

    assert_eq!(config.asset_dir, Path::new("assets"));
    assert_eq!(config.shader_name, "lighting");
    assert_eq!(config.key_policy, KeyPolicy::Sticky);
    assert_eq!(config.scenes.len(), 6);
    assert_eq!(config.key_bindings.len(), 6);
    assert_eq!(config.camera.eye, Point3::new(0.0, 1000.0, 7000.0));
    assert_eq!(config.camera.fovy_degrees, 60.0);
    assert_eq!(config.camera.znear, 1.0);
    assert_eq!(config.camera.zfar, 20000.0);
}

#[test]
fn lighting_is_constant_white_light_over_a_blue_object() {
    let lighting = LightingState::default();
    assert_eq!(lighting.light_position, Vector3::new(-500.0, 3000.0, 1000.0));
    assert_eq!(lighting.light_color, Vector3::new(3.0, 3.0, 3.0));
    assert_eq!(lighting.object_color, Vector3::new(0.6, 0.6, 0.9));
}

#[test]
fn asset_dir_can_be_overridden() {
    assert_eq!(ASSET_DIR_VAR, "PAINTERLY_ASSETS");

    let config = Config::default().with_asset_dir_override(Some(OsString::from("/srv/assets")));
    assert_eq!(config.asset_dir, Path::new("/srv/assets"));

    let config = Config::default().with_asset_dir_override(Some(OsString::new()));
    assert_eq!(config.asset_dir, Path::new("assets"));

    let config = Config::default().with_asset_dir_override(None);
    assert_eq!(config.asset_dir, Path::new("assets"));
}

#[test]
fn lighting_shader_ships_with_the_crate() {
    let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let path = shader_path(&assets, "lighting");

    assert!(path.ends_with("shaders/lighting.wgsl"));
    let source = std::fs::read_to_string(&path).unwrap();
    assert!(source.contains("fn vs_main"));
    assert!(source.contains("fn fs_main"));
}
