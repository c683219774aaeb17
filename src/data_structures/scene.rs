//! Selectable scenes: a mesh, a static transform and a material.
//!
//! A [`SceneDescriptor`] names the files a scene needs; [`Scene::load`] turns
//! it into handles through an [`AssetLoader`]. Each [`SceneMaterial`] variant
//! knows which uniforms it uploads, so adding a scene never touches the frame
//! step.

use std::fmt;

use cgmath::{Matrix4, Vector2};

use crate::{
    data_structures::transform::{Spin, Transform},
    error::{AssetLoadError, UniformError},
    resources::{
        AssetLoader, MeshHandle, MeshSource, TextureHandle, TextureKind, texture::TEXTURE_UNITS,
    },
    uniforms::{ShaderProgram, UniformName, UniformValue},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneId {
    Earth,
    Dragon,
    Kitchen,
    Chair,
    Cow,
    Bunny,
}

impl SceneId {
    pub fn name(self) -> &'static str {
        match self {
            SceneId::Earth => "earth",
            SceneId::Dragon => "dragon",
            SceneId::Kitchen => "kitchen",
            SceneId::Chair => "chair",
            SceneId::Cow => "cow",
            SceneId::Bunny => "bunny",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An original texture and its painted variant, as file names.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPair {
    pub original: String,
    pub painted: String,
}

impl PathPair {
    pub fn new(original: impl Into<String>, painted: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            painted: painted.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MaterialDescriptor {
    /// Cross-fade between two albedo maps, optionally with matching normal maps.
    Blend {
        albedo: PathPair,
        normals: Option<PathPair>,
    },
    /// Lighting only, with an optional albedo map.
    Plain { albedo: Option<String> },
}

#[derive(Clone, Debug)]
pub struct SceneDescriptor {
    pub id: SceneId,
    pub mesh: MeshSource,
    pub transform: Transform,
    pub spin: Option<Spin>,
    pub material: MaterialDescriptor,
}

/// The scenes shipped with the viewer, in registry order.
pub fn default_scenes() -> Vec<SceneDescriptor> {
    // models are exported upside down and facing away from the camera
    let upright = |scale: f32| {
        Transform::new()
            .with_position([0.0, 0.0, 0.0])
            .with_uniform_scale(scale)
            .then_rotate(180.0, [0.0, 1.0, 0.0])
            .then_rotate(180.0, [0.0, 0.0, 1.0])
    };
    vec![
        SceneDescriptor {
            id: SceneId::Earth,
            mesh: MeshSource::Sphere {
                radius: 2000.0,
                resolution: 16,
            },
            transform: Transform::new(),
            spin: Some(Spin::new(0.1, [0.0, 1.0, 0.0])),
            material: MaterialDescriptor::Blend {
                albedo: PathPair::new("earth_albedo.jpg", "earth_albedo_painted.png"),
                normals: Some(PathPair::new("earth_normals.png", "earth_normals_SLIC.png")),
            },
        },
        SceneDescriptor {
            id: SceneId::Dragon,
            mesh: MeshSource::Obj("dragonModel.obj".to_string()),
            transform: upright(8.0),
            spin: None,
            material: MaterialDescriptor::Blend {
                albedo: PathPair::new("dragon_albedo.png", "dragon_albedo_painted.png"),
                normals: Some(PathPair::new("dragon_normals.png", "dragon_normals_SLIC.png")),
            },
        },
        SceneDescriptor {
            id: SceneId::Kitchen,
            mesh: MeshSource::Obj("kitchen.obj".to_string()),
            transform: upright(10.0),
            spin: None,
            material: MaterialDescriptor::Plain { albedo: None },
        },
        SceneDescriptor {
            id: SceneId::Chair,
            mesh: MeshSource::Obj("chair.obj".to_string()),
            transform: upright(10.0),
            spin: None,
            material: MaterialDescriptor::Plain { albedo: None },
        },
        SceneDescriptor {
            id: SceneId::Cow,
            mesh: MeshSource::Obj("cowModel.obj".to_string()),
            transform: upright(8.0),
            spin: None,
            material: MaterialDescriptor::Blend {
                albedo: PathPair::new("cow_albedo.png", "cow_albedo_painted.png"),
                normals: None,
            },
        },
        SceneDescriptor {
            id: SceneId::Bunny,
            mesh: MeshSource::Obj("bunnyModel.obj".to_string()),
            transform: upright(8.0),
            spin: None,
            material: MaterialDescriptor::Blend {
                albedo: PathPair::new("bunny_albedo.png", "bunny_albedo_painted.png"),
                normals: None,
            },
        },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TexturePair {
    pub original: TextureHandle,
    pub painted: TextureHandle,
}

impl TexturePair {
    fn load<L: AssetLoader>(
        paths: &PathPair,
        kind: TextureKind,
        loader: &mut L,
    ) -> Result<Self, AssetLoadError> {
        Ok(Self {
            original: loader.load_texture(&paths.original, kind)?,
            painted: loader.load_texture(&paths.painted, kind)?,
        })
    }
}

/// Per-frame values a material may need besides its own textures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialInputs {
    pub split: f32,
    pub screen_size: Vector2<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneMaterial {
    Blend {
        albedo: TexturePair,
        normals: Option<TexturePair>,
    },
    Plain {
        albedo: Option<TextureHandle>,
    },
}

impl SceneMaterial {
    fn load<L: AssetLoader>(
        descriptor: &MaterialDescriptor,
        loader: &mut L,
    ) -> Result<Self, AssetLoadError> {
        Ok(match descriptor {
            MaterialDescriptor::Blend { albedo, normals } => SceneMaterial::Blend {
                albedo: TexturePair::load(albedo, TextureKind::Colour, loader)?,
                normals: normals
                    .as_ref()
                    .map(|paths| TexturePair::load(paths, TextureKind::NormalMap, loader))
                    .transpose()?,
            },
            MaterialDescriptor::Plain { albedo } => SceneMaterial::Plain {
                albedo: albedo
                    .as_deref()
                    .map(|path| loader.load_texture(path, TextureKind::Colour))
                    .transpose()?,
            },
        })
    }

    /// Texture bound to each unit whenever this material is drawn.
    pub fn texture_units(&self) -> [Option<TextureHandle>; TEXTURE_UNITS] {
        let mut units = [None; TEXTURE_UNITS];
        let mut bind = |name: UniformName, handle: TextureHandle| {
            if let Some(unit) = name.texture_unit() {
                units[unit as usize] = Some(handle);
            }
        };
        match self {
            SceneMaterial::Blend { albedo, normals } => {
                bind(UniformName::TexA, albedo.original);
                bind(UniformName::TexB, albedo.painted);
                if let Some(normals) = normals {
                    bind(UniformName::NormalMapA, normals.original);
                    bind(UniformName::NormalMapB, normals.painted);
                }
            }
            SceneMaterial::Plain { albedo } => {
                if let Some(albedo) = albedo {
                    bind(UniformName::AlbedoTex, *albedo);
                }
            }
        }
        units
    }

    /// Uploads the uniforms this material contributes to a draw call.
    pub fn upload<P: ShaderProgram>(
        &self,
        inputs: &MaterialInputs,
        program: &mut P,
    ) -> Result<(), UniformError> {
        match self {
            SceneMaterial::Blend { albedo, normals } => {
                program.set_uniform(UniformName::Split, UniformValue::Float(inputs.split))?;
                program.set_uniform(
                    UniformName::ScreenSize,
                    UniformValue::Vec2(inputs.screen_size),
                )?;
                program.set_uniform(UniformName::UseAlbedo, UniformValue::Bool(true))?;
                program.set_texture(UniformName::TexA, albedo.original)?;
                program.set_texture(UniformName::TexB, albedo.painted)?;
                program.set_uniform(
                    UniformName::UseNormalMap,
                    UniformValue::Bool(normals.is_some()),
                )?;
                if let Some(normals) = normals {
                    program.set_texture(UniformName::NormalMapA, normals.original)?;
                    program.set_texture(UniformName::NormalMapB, normals.painted)?;
                }
            }
            SceneMaterial::Plain { albedo } => {
                program.set_uniform(UniformName::UseAlbedo, UniformValue::Bool(albedo.is_some()))?;
                if let Some(albedo) = albedo {
                    program.set_texture(UniformName::AlbedoTex, *albedo)?;
                }
            }
        }
        Ok(())
    }
}

/// A loaded, selectable scene.
#[derive(Clone, Debug)]
pub struct Scene {
    pub id: SceneId,
    pub mesh: MeshHandle,
    pub transform: Transform,
    pub spin: Option<Spin>,
    pub material: SceneMaterial,
    base_matrix: Matrix4<f32>,
}

impl Scene {
    /// Loads mesh and textures of `descriptor`. The first failing asset aborts the scene.
    pub fn load<L: AssetLoader>(
        descriptor: &SceneDescriptor,
        loader: &mut L,
    ) -> Result<Self, AssetLoadError> {
        let mesh = loader.load_mesh(&descriptor.mesh)?;
        let material = SceneMaterial::load(&descriptor.material, loader)?;
        Ok(Self {
            id: descriptor.id,
            mesh,
            transform: descriptor.transform.clone(),
            spin: descriptor.spin,
            material,
            base_matrix: descriptor.transform.to_matrix(),
        })
    }

    /// Advances continuous animation by one frame.
    pub fn update(&mut self) {
        if let Some(spin) = &mut self.spin {
            spin.advance();
        }
    }

    pub fn world_matrix(&self) -> Matrix4<f32> {
        match &self.spin {
            Some(spin) => self.transform.to_matrix_with(spin.rotation()),
            None => self.base_matrix,
        }
    }
}
