//! Keyboard dispatch: single characters select the active scene.

use std::collections::HashMap;

use winit::keyboard::Key;

use crate::data_structures::{registry::SceneRegistry, scene::SceneId};

/// What an unmapped key does to the selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Unmapped keys are ignored.
    #[default]
    Sticky,
    /// Unmapped keys select the default scene.
    ResetToDefault,
}

/// Keys `0` to `5` select the scenes of [`crate::data_structures::scene::default_scenes`].
pub fn default_key_bindings() -> Vec<(char, SceneId)> {
    vec![
        ('0', SceneId::Earth),
        ('1', SceneId::Dragon),
        ('2', SceneId::Kitchen),
        ('3', SceneId::Chair),
        ('4', SceneId::Cow),
        ('5', SceneId::Bunny),
    ]
}

/// The character typed by `key`, if it produced exactly one.
pub fn key_char(key: &Key) -> Option<char> {
    let Key::Character(text) = key else {
        return None;
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Fixed character to scene-index table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<char, usize>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds each key to the registry index of its scene.
    ///
    /// Keys whose scene did not load are left unbound.
    pub fn resolve(bindings: &[(char, SceneId)], registry: &SceneRegistry) -> Self {
        let mut keys = Self::new();
        for &(key, id) in bindings {
            match registry.index_of(id) {
                Some(index) => keys.bind(key, index),
                None => log::warn!("Key {key:?} stays unbound: scene {id} is not loaded"),
            }
        }
        keys
    }

    pub fn bind(&mut self, key: char, index: usize) {
        self.bindings.insert(key, index);
    }

    pub fn get(&self, key: char) -> Option<usize> {
        self.bindings.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Which scene is active. Only key presses change it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionState {
    pub current_model: usize,
}

impl SelectionState {
    pub fn new(current_model: usize) -> Self {
        Self { current_model }
    }

    /// Applies a key press and returns whether the selection changed.
    pub fn apply_key(&mut self, key: char, keys: &KeyMap, policy: KeyPolicy) -> bool {
        let next = match (keys.get(key), policy) {
            (Some(index), _) => index,
            (None, KeyPolicy::ResetToDefault) => SceneRegistry::DEFAULT_INDEX,
            (None, KeyPolicy::Sticky) => {
                log::debug!("Ignoring unmapped key {key:?}");
                return false;
            }
        };
        let changed = next != self.current_model;
        self.current_model = next;
        changed
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(SceneRegistry::DEFAULT_INDEX)
    }
}
