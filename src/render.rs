//! The per-frame render step.
//!
//! Every frame binds the lighting shader once, uploads the shared camera and
//! light uniforms, then draws the active scene with a single draw call:
//!
//! 1. [`ShaderProgram::begin`]
//! 2. the seven [`SHARED_UNIFORMS`], each exactly once
//! 3. `worldMatrix` of the active scene
//! 4. the uniforms of its [`crate::data_structures::scene::SceneMaterial`]
//! 5. [`ShaderProgram::draw`] for its mesh
//! 6. [`ShaderProgram::end`]
//!
//! The program is always ended, even when an upload was rejected.

use crate::{
    camera::CameraMatrices,
    config::LightingState,
    data_structures::scene::{MaterialInputs, Scene},
    error::UniformError,
    uniforms::{SHARED_UNIFORMS, ShaderProgram, UniformName, UniformValue},
};

/// Value of one of the [`SHARED_UNIFORMS`] for this frame.
pub fn shared_value(
    name: UniformName,
    camera: &CameraMatrices,
    lighting: &LightingState,
) -> Option<UniformValue> {
    Some(match name {
        UniformName::ViewMatrix => UniformValue::Mat4(camera.view),
        UniformName::ProjectionMatrix => UniformValue::Mat4(camera.projection),
        UniformName::ModelViewProjectionMatrix => UniformValue::Mat4(camera.view_proj),
        UniformName::ViewPos => UniformValue::Vec3(camera.eye),
        UniformName::LightPos => UniformValue::Vec3(lighting.light_position),
        UniformName::LightColor => UniformValue::Vec3(lighting.light_color),
        UniformName::ObjectColor => UniformValue::Vec3(lighting.object_color),
        _ => return None,
    })
}

/// Uploads camera and light uniforms to a bound program.
pub fn upload_shared<P: ShaderProgram>(
    camera: &CameraMatrices,
    lighting: &LightingState,
    program: &mut P,
) -> Result<(), UniformError> {
    for name in SHARED_UNIFORMS {
        if let Some(value) = shared_value(name, camera, lighting) {
            program.set_uniform(name, value)?;
        }
    }
    Ok(())
}

/// Runs steps 1 to 6 for `scene`.
pub fn render_frame<P: ShaderProgram>(
    scene: &Scene,
    camera: &CameraMatrices,
    lighting: &LightingState,
    inputs: &MaterialInputs,
    program: &mut P,
) -> Result<(), UniformError> {
    program.begin();
    let result = draw_scene(scene, camera, lighting, inputs, program);
    program.end();
    result
}

fn draw_scene<P: ShaderProgram>(
    scene: &Scene,
    camera: &CameraMatrices,
    lighting: &LightingState,
    inputs: &MaterialInputs,
    program: &mut P,
) -> Result<(), UniformError> {
    upload_shared(camera, lighting, program)?;
    program.set_uniform(
        UniformName::WorldMatrix,
        UniformValue::Mat4(scene.world_matrix()),
    )?;
    scene.material.upload(inputs, program)?;
    program.draw(scene.mesh);
    Ok(())
}
