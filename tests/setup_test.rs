use cgmath::Vector3;
use painterly_viewer::{
    data_structures::{
        registry::SceneRegistry,
        scene::{MaterialDescriptor, SceneId, default_scenes},
    },
    error::{AssetLoadError, SetupError},
    input::default_key_bindings,
    resources::MeshSource,
    viewer::{LIGHTING_SHADER, setup},
};

use crate::common::test_utils::{FakeLoader, RecordingProgram, start_camera};

mod common;

#[test]
fn missing_shader_aborts_before_any_scene_loads() {
    let mut loader = FakeLoader::without_shader();

    let result = setup(
        &mut loader,
        LIGHTING_SHADER,
        &default_scenes(),
        &default_key_bindings(),
    );

    assert!(matches!(
        result,
        Err(SetupError::Shader(AssetLoadError::NotFound(_)))
    ));
    assert_eq!(loader.requests, ["shader:lighting"]);
    assert!(loader.meshes.is_empty());
    assert!(loader.textures.is_empty());
}

#[test]
fn shader_is_loaded_first() {
    let mut loader = FakeLoader::new();
    setup(
        &mut loader,
        LIGHTING_SHADER,
        &default_scenes(),
        &default_key_bindings(),
    )
    .unwrap();

    assert_eq!(loader.requests[0], "shader:lighting");
    assert_eq!(loader.requests[1], "sphere(r=2000, res=16)");
}

#[test]
fn every_default_scene_registers_in_order() {
    let mut loader = FakeLoader::new();
    let viewer = setup(
        &mut loader,
        LIGHTING_SHADER,
        &default_scenes(),
        &default_key_bindings(),
    )
    .unwrap();

    let ids: Vec<SceneId> = viewer.registry.iter().map(|scene| scene.id).collect();
    assert_eq!(
        ids,
        [
            SceneId::Earth,
            SceneId::Dragon,
            SceneId::Kitchen,
            SceneId::Chair,
            SceneId::Cow,
            SceneId::Bunny,
        ]
    );
    assert_eq!(viewer.keys.len(), 6);
    // four maps for earth and dragon, two for cow and bunny
    assert_eq!(loader.textures.len(), 12);
}

#[test]
fn failed_scene_is_skipped_and_indices_compact() {
    let mut loader = FakeLoader::missing(&["dragon_normals_SLIC.png"]);
    let mut viewer = setup(
        &mut loader,
        LIGHTING_SHADER,
        &default_scenes(),
        &default_key_bindings(),
    )
    .unwrap();

    assert_eq!(viewer.registry.len(), 5);
    assert_eq!(viewer.registry.index_of(SceneId::Dragon), None);
    assert_eq!(viewer.registry.index_of(SceneId::Kitchen), Some(1));

    // the dragon key is gone, the others still reach their scene
    assert_eq!(viewer.keys.get('1'), None);
    assert!(!viewer.key_pressed('1'));
    assert_eq!(viewer.active_scene().id, SceneId::Earth);
    assert!(viewer.key_pressed('2'));
    assert_eq!(viewer.active_scene().id, SceneId::Kitchen);
    assert!(viewer.key_pressed('5'));
    assert_eq!(viewer.active_scene().id, SceneId::Bunny);
}

#[test]
fn missing_mesh_drops_its_scene() {
    let mut loader = FakeLoader::missing(&["chair.obj"]);
    let viewer = setup(
        &mut loader,
        LIGHTING_SHADER,
        &default_scenes(),
        &default_key_bindings(),
    )
    .unwrap();

    assert_eq!(viewer.registry.index_of(SceneId::Chair), None);
    assert_eq!(viewer.registry.len(), 5);
}

#[test]
fn no_loadable_scene_is_fatal() {
    let every_scene_asset: Vec<&str> = vec![
        "dragonModel.obj",
        "kitchen.obj",
        "chair.obj",
        "cowModel.obj",
        "bunnyModel.obj",
        "earth_albedo.jpg",
    ];
    let mut loader = FakeLoader::missing(&every_scene_asset);

    let result = setup(
        &mut loader,
        LIGHTING_SHADER,
        &default_scenes(),
        &default_key_bindings(),
    );

    assert!(matches!(result, Err(SetupError::NoScenes { attempted: 6 })));
}

#[test]
fn missing_default_scene_moves_the_fallback() {
    let mut loader = FakeLoader::missing(&["earth_albedo_painted.png"]);
    let mut viewer = setup(
        &mut loader,
        LIGHTING_SHADER,
        &default_scenes(),
        &default_key_bindings(),
    )
    .unwrap();

    assert_eq!(viewer.active_scene().id, SceneId::Dragon);
    assert_eq!(viewer.keys.get('0'), None);

    let mut program = RecordingProgram::new();
    viewer.key_pressed('0');
    viewer.draw(&start_camera(), &mut program).unwrap();
    assert_eq!(program.draws().len(), 1);
}

#[test]
fn out_of_range_selection_resolves_to_the_default() {
    let mut loader = FakeLoader::new();
    let mut viewer = setup(
        &mut loader,
        LIGHTING_SHADER,
        &default_scenes(),
        &default_key_bindings(),
    )
    .unwrap();

    viewer.state.selection.current_model = 42;
    assert_eq!(viewer.active_scene().id, SceneId::Earth);
    assert_eq!(
        viewer.registry.resolve(42).id,
        viewer.registry.default_scene().id
    );

    let mut program = RecordingProgram::new();
    viewer.draw(&start_camera(), &mut program).unwrap();
    assert_eq!(program.draws(), [viewer.registry.default_scene().mesh]);
}

#[test]
fn empty_registry_is_refused() {
    assert!(SceneRegistry::new(Vec::new()).is_none());
}

#[test]
fn default_scene_table() {
    let scenes = default_scenes();
    assert_eq!(scenes.len(), 6);

    let earth = &scenes[0];
    assert_eq!(
        earth.mesh,
        MeshSource::Sphere {
            radius: 2000.0,
            resolution: 16
        }
    );
    let spin = earth.spin.expect("earth spins");
    assert_eq!(spin.degrees_per_frame, 0.1);
    assert_eq!(spin.axis, Vector3::new(0.0, 1.0, 0.0));

    for scene in &scenes[1..] {
        assert!(scene.spin.is_none(), "{} should not spin", scene.id);
        assert!(matches!(scene.mesh, MeshSource::Obj(_)));
        assert_eq!(scene.transform.rotations.len(), 2);
    }

    let plain: Vec<SceneId> = scenes
        .iter()
        .filter(|scene| matches!(scene.material, MaterialDescriptor::Plain { .. }))
        .map(|scene| scene.id)
        .collect();
    assert_eq!(plain, [SceneId::Kitchen, SceneId::Chair]);

    assert_eq!(scenes[1].transform.scale, Vector3::new(8.0, 8.0, 8.0));
    assert_eq!(scenes[2].transform.scale, Vector3::new(10.0, 10.0, 10.0));
}
