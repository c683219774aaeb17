//! The ordered set of scenes that loaded successfully.

use crate::{
    data_structures::scene::{Scene, SceneDescriptor, SceneId},
    error::AssetLoadError,
    resources::AssetLoader,
};

/// Scenes indexed by their position. Never empty.
///
/// The first scene is the default: it is active at startup and is drawn
/// whenever the selection points past the end of the registry.
#[derive(Clone, Debug)]
pub struct SceneRegistry {
    scenes: Vec<Scene>,
}

impl SceneRegistry {
    pub const DEFAULT_INDEX: usize = 0;

    /// Returns `None` when there is no scene to fall back to.
    pub fn new(scenes: Vec<Scene>) -> Option<Self> {
        if scenes.is_empty() {
            None
        } else {
            Some(Self { scenes })
        }
    }

    /// Loads every descriptor in order and keeps the scenes whose assets all loaded.
    ///
    /// Failed scenes are logged and returned next to the scenes that made it,
    /// so they can never be selected.
    pub fn load<L: AssetLoader>(
        descriptors: &[SceneDescriptor],
        loader: &mut L,
    ) -> (Vec<Scene>, Vec<(SceneId, AssetLoadError)>) {
        let mut scenes = Vec::with_capacity(descriptors.len());
        let mut failed = Vec::new();
        for descriptor in descriptors {
            match Scene::load(descriptor, loader) {
                Ok(scene) => {
                    log::info!("Registered scene {} at index {}", scene.id, scenes.len());
                    scenes.push(scene);
                }
                Err(e) => {
                    log::error!("Scene {} is not selectable: {}", descriptor.id, e);
                    failed.push((descriptor.id, e));
                }
            }
        }
        (scenes, failed)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn index_of(&self, id: SceneId) -> Option<usize> {
        self.scenes.iter().position(|scene| scene.id == id)
    }

    pub fn default_scene(&self) -> &Scene {
        &self.scenes[Self::DEFAULT_INDEX]
    }

    /// The scene drawn for `index`: the scene at that position, or the
    /// default scene when there is none.
    pub fn resolve(&self, index: usize) -> &Scene {
        self.scenes
            .get(index)
            .unwrap_or_else(|| self.default_scene())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    pub fn resolve_mut(&mut self, index: usize) -> &mut Scene {
        let index = if index < self.scenes.len() {
            index
        } else {
            Self::DEFAULT_INDEX
        };
        &mut self.scenes[index]
    }
}
