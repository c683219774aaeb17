//! Static scene transforms and continuous spin.
//!
//! A [`Transform`] is position, per-axis scale and an ordered list of
//! rotation steps. Rotations do not commute, so the steps are kept in the
//! order they were declared and composed so that the first step is applied
//! to the vertices first.

use cgmath::{Deg, InnerSpace, Matrix4, One, Quaternion, Rotation3, Vector3};

/// One rotation of `degrees` around `axis`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationStep {
    pub degrees: f32,
    pub axis: Vector3<f32>,
}

impl RotationStep {
    pub fn new(degrees: f32, axis: impl Into<Vector3<f32>>) -> Self {
        Self {
            degrees,
            axis: axis.into(),
        }
    }

    pub fn to_quaternion(&self) -> Quaternion<f32> {
        axis_angle(self.axis, self.degrees)
    }
}

fn axis_angle(axis: Vector3<f32>, degrees: f32) -> Quaternion<f32> {
    // A zero axis has no direction to rotate around
    if axis.magnitude2() == 0.0 {
        return Quaternion::one();
    }
    Quaternion::from_axis_angle(axis.normalize(), Deg(degrees))
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub rotations: Vec<RotationStep>,
}

impl Transform {
    /// Identity transform: no move, no rotation, unit scale.
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotations: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: impl Into<Vector3<f32>>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_scale(mut self, scale: impl Into<Vector3<f32>>) -> Self {
        self.scale = scale.into();
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale([scale; 3])
    }

    /// Appends a rotation that is applied after all previously declared ones.
    pub fn then_rotate(mut self, degrees: f32, axis: impl Into<Vector3<f32>>) -> Self {
        self.rotations.push(RotationStep::new(degrees, axis));
        self
    }

    /// Composed orientation of all rotation steps.
    ///
    /// The first declared step acts on the vertices first, so the result is
    /// `Rn * .. * R1 * R0`. Multiplying the steps left to right in declaration
    /// order would apply them the other way round.
    pub fn rotation(&self) -> Quaternion<f32> {
        self.rotations
            .iter()
            .fold(Quaternion::one(), |acc, step| step.to_quaternion() * acc)
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        self.to_matrix_with(Quaternion::one())
    }

    /// Model matrix with an extra world-space rotation applied after the static ones.
    pub fn to_matrix_with(&self, extra: Quaternion<f32>) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(extra * self.rotation())
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Continuous rotation that advances a fixed amount every frame.
///
/// The accumulated angle is never wrapped; only the rotation derived from it
/// is reduced modulo a full turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub axis: Vector3<f32>,
    pub degrees_per_frame: f64,
    accumulated: f64,
}

impl Spin {
    pub fn new(degrees_per_frame: f64, axis: impl Into<Vector3<f32>>) -> Self {
        Self {
            axis: axis.into(),
            degrees_per_frame,
            accumulated: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.accumulated += self.degrees_per_frame;
    }

    /// Total rotation since setup.
    pub fn angle(&self) -> Deg<f64> {
        Deg(self.accumulated)
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        axis_angle(self.axis, (self.accumulated % 360.0) as f32)
    }
}
