use painterly_viewer::{
    data_structures::{registry::SceneRegistry, scene::SceneId},
    input::{KeyMap, KeyPolicy, SelectionState, default_key_bindings, key_char},
};
use winit::keyboard::{Key, NamedKey, SmolStr};

use crate::common::test_utils::{FakeLoader, RecordingProgram, start_camera, viewer};

mod common;

fn keys() -> KeyMap {
    let mut keys = KeyMap::new();
    for (index, key) in ['0', '1', '2', '3', '4', '5'].into_iter().enumerate() {
        keys.bind(key, index);
    }
    keys
}

#[test]
fn starts_on_the_default_scene() {
    assert_eq!(SelectionState::default().current_model, SceneRegistry::DEFAULT_INDEX);

    let mut loader = FakeLoader::new();
    let viewer = viewer(&mut loader);
    assert_eq!(viewer.current_model(), 0);
    assert_eq!(viewer.active_scene().id, SceneId::Earth);
}

#[test]
fn mapped_keys_select_their_scene() {
    let keys = keys();
    let mut selection = SelectionState::default();

    assert!(selection.apply_key('1', &keys, KeyPolicy::Sticky));
    assert_eq!(selection.current_model, 1);
    assert!(selection.apply_key('3', &keys, KeyPolicy::Sticky));
    assert_eq!(selection.current_model, 3);
    assert!(selection.apply_key('0', &keys, KeyPolicy::Sticky));
    assert_eq!(selection.current_model, 0);
}

#[test]
fn repeated_key_is_idempotent() {
    let keys = keys();
    let mut selection = SelectionState::default();

    assert!(selection.apply_key('2', &keys, KeyPolicy::Sticky));
    assert!(!selection.apply_key('2', &keys, KeyPolicy::Sticky));
    assert!(!selection.apply_key('2', &keys, KeyPolicy::ResetToDefault));
    assert_eq!(selection.current_model, 2);
}

#[test]
fn sticky_policy_ignores_unmapped_keys() {
    let keys = keys();
    let mut selection = SelectionState::new(2);

    for key in ['x', '9', ' ', 'é'] {
        assert!(!selection.apply_key(key, &keys, KeyPolicy::Sticky));
        assert_eq!(selection.current_model, 2);
    }
}

#[test]
fn reset_policy_returns_to_the_default_on_unmapped_keys() {
    let keys = keys();
    let mut selection = SelectionState::new(2);

    assert!(selection.apply_key('x', &keys, KeyPolicy::ResetToDefault));
    assert_eq!(selection.current_model, SceneRegistry::DEFAULT_INDEX);
    // already on the default: nothing changes
    assert!(!selection.apply_key('q', &keys, KeyPolicy::ResetToDefault));
}

#[test]
fn viewer_applies_its_configured_policy() {
    let mut loader = FakeLoader::new();
    let mut sticky = viewer(&mut loader);
    sticky.key_pressed('4');
    sticky.key_pressed('z');
    assert_eq!(sticky.active_scene().id, SceneId::Cow);

    let mut loader = FakeLoader::new();
    let mut resetting = viewer(&mut loader).with_policy(KeyPolicy::ResetToDefault);
    resetting.key_pressed('4');
    resetting.key_pressed('z');
    assert_eq!(resetting.active_scene().id, SceneId::Earth);
}

#[test]
fn default_bindings_cover_every_scene() {
    let bindings = default_key_bindings();
    let expected = [
        ('0', SceneId::Earth),
        ('1', SceneId::Dragon),
        ('2', SceneId::Kitchen),
        ('3', SceneId::Chair),
        ('4', SceneId::Cow),
        ('5', SceneId::Bunny),
    ];
    assert_eq!(bindings, expected);
}

#[test]
fn pressing_one_switches_to_the_dragon() {
    let mut loader = FakeLoader::new();
    let mut viewer = viewer(&mut loader);
    let camera = start_camera();

    assert!(viewer.key_pressed('1'));
    viewer.update();
    let mut program = RecordingProgram::new();
    viewer.draw(&camera, &mut program).unwrap();

    assert_eq!(viewer.current_model(), 1);
    let draws = program.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(loader.mesh_source(draws[0]).to_string(), "dragonModel.obj");
}

#[test]
fn key_char_accepts_single_characters_only() {
    assert_eq!(key_char(&Key::Character(SmolStr::new("1"))), Some('1'));
    assert_eq!(key_char(&Key::Character(SmolStr::new("ab"))), None);
    assert_eq!(key_char(&Key::Character(SmolStr::new(""))), None);
    assert_eq!(key_char(&Key::Named(NamedKey::Enter)), None);
}
