//! Setup and the per-frame state of the viewer.
//!
//! [`setup`] loads the lighting shader and every scene through an
//! [`AssetLoader`]. The resulting [`Viewer`] owns the registry, the key map
//! and the mutable [`AppState`]; window events feed it and every frame calls
//! [`Viewer::update`] followed by [`Viewer::draw`].

use cgmath::Vector2;

use crate::{
    camera::CameraMatrices,
    config::LightingState,
    data_structures::{
        registry::SceneRegistry,
        scene::{MaterialInputs, Scene, SceneDescriptor, SceneId},
    },
    error::{SetupError, UniformError},
    input::{KeyMap, KeyPolicy, SelectionState},
    render::render_frame,
    resources::AssetLoader,
    uniforms::{ShaderProgram, split_factor},
};

/// Logical name of the shader every scene is drawn with.
pub const LIGHTING_SHADER: &str = "lighting";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vector2<f32> {
        Vector2::new(self.width as f32, self.height as f32)
    }
}

/// Last known pointer position in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
}

/// Everything that changes between frames apart from scene animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AppState {
    pub selection: SelectionState,
    pub pointer: PointerState,
    pub viewport: Viewport,
}

impl AppState {
    pub fn material_inputs(&self) -> MaterialInputs {
        MaterialInputs {
            split: split_factor(self.pointer.x, self.viewport.width),
            screen_size: self.viewport.size(),
        }
    }
}

#[derive(Debug)]
pub struct Viewer<S> {
    pub shader: S,
    pub registry: SceneRegistry,
    pub keys: KeyMap,
    pub policy: KeyPolicy,
    pub lighting: LightingState,
    pub state: AppState,
}

/// Loads the lighting shader, then every scene in `descriptors`.
///
/// A missing or broken shader stops setup before any scene is touched.
/// Scenes whose assets fail are skipped; when none is left setup fails.
pub fn setup<L: AssetLoader>(
    loader: &mut L,
    shader_name: &str,
    descriptors: &[SceneDescriptor],
    key_bindings: &[(char, SceneId)],
) -> Result<Viewer<L::Shader>, SetupError> {
    let shader = loader.load_shader(shader_name).map_err(SetupError::Shader)?;

    let (scenes, failed) = SceneRegistry::load(descriptors, loader);
    if !failed.is_empty() {
        log::warn!(
            "{} of {} scenes failed to load",
            failed.len(),
            descriptors.len()
        );
    }
    let registry = SceneRegistry::new(scenes).ok_or(SetupError::NoScenes {
        attempted: descriptors.len(),
    })?;
    let keys = KeyMap::resolve(key_bindings, &registry);
    log::info!(
        "Setup complete: {} scenes, {} key bindings",
        registry.len(),
        keys.len()
    );

    Ok(Viewer {
        shader,
        registry,
        keys,
        policy: KeyPolicy::default(),
        lighting: LightingState::default(),
        state: AppState::default(),
    })
}

impl<S> Viewer<S> {
    pub fn with_policy(mut self, policy: KeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_lighting(mut self, lighting: LightingState) -> Self {
        self.lighting = lighting;
        self
    }

    /// Handles a typed character. Returns whether the active scene changed.
    pub fn key_pressed(&mut self, key: char) -> bool {
        let changed = self
            .state
            .selection
            .apply_key(key, &self.keys, self.policy);
        if changed {
            log::info!("Showing {}", self.active_scene().id);
        }
        changed
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.state.pointer = PointerState { x, y };
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        self.state.viewport = Viewport::new(width, height);
    }

    pub fn current_model(&self) -> usize {
        self.state.selection.current_model
    }

    pub fn active_scene(&self) -> &Scene {
        self.registry.resolve(self.current_model())
    }

    /// Advances the animation of the active scene only.
    pub fn update(&mut self) {
        self.registry.resolve_mut(self.current_model()).update();
    }

    /// Acquires the frame target, then advances the active scene.
    ///
    /// A frame whose target cannot be acquired leaves every scene untouched.
    pub fn advance_frame<T, E>(
        &mut self,
        acquire: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let target = acquire()?;
        self.update();
        Ok(target)
    }

    pub fn draw<P: ShaderProgram>(
        &self,
        camera: &CameraMatrices,
        program: &mut P,
    ) -> Result<(), UniformError> {
        render_frame(
            self.active_scene(),
            camera,
            &self.lighting,
            &self.state.material_inputs(),
            program,
        )
    }
}
