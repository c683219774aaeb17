//! Orbit camera, projection and the matrices uploaded each frame.

use std::f32::consts::FRAC_PI_2;

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// A camera circling `target` at `distance`.
///
/// yaw is measured around +Y starting from +Z, pitch is the elevation above
/// the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3<f32>,
    pub distance: f32,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
    pub min_distance: f32,
}

impl OrbitCamera {
    pub fn look_at(eye: Point3<f32>, target: Point3<f32>) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude();
        let (yaw, pitch) = if distance > 0.0 {
            (
                Rad(offset.x.atan2(offset.z)),
                Rad((offset.y / distance).clamp(-1.0, 1.0).asin()),
            )
        } else {
            (Rad(0.0), Rad(0.0))
        };
        let mut camera = Self {
            target,
            distance,
            yaw,
            pitch,
            min_distance: 1.0,
        };
        camera.orbit(Rad(0.0), Rad(0.0));
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let direction = Vector3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        self.target + direction * self.distance
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }

    /// Rotates around the target. Pitch stops just short of the poles.
    pub fn orbit(&mut self, yaw: Rad<f32>, pitch: Rad<f32>) {
        self.yaw += yaw;
        self.pitch = Rad((self.pitch + pitch).0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2));
    }

    /// Moves toward (`factor < 1`) or away from the target.
    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).max(self.min_distance);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// The camera state of one frame, computed once when the camera "begins".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraMatrices {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub view_proj: Matrix4<f32>,
    pub eye: Vector3<f32>,
}

impl CameraMatrices {
    pub fn new(camera: &OrbitCamera, projection: &Projection) -> Self {
        let view = camera.calc_matrix();
        let projection = projection.calc_matrix();
        Self {
            view,
            projection,
            view_proj: projection * view,
            eye: camera.position().to_vec(),
        }
    }
}

/// Turns left-drag into orbiting and the mouse wheel into zoom.
#[derive(Clone, Debug)]
pub struct CameraController {
    sensitivity: f32,
    zoom_step: f32,
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    scroll: f32,
}

impl CameraController {
    pub fn new(sensitivity: f32, zoom_step: f32) -> Self {
        Self {
            sensitivity,
            zoom_step,
            dragging: false,
            last_cursor: None,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            scroll: 0.0,
        }
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.dragging = *state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(last)) = (self.dragging, self.last_cursor) {
                    self.handle_drag(position.x - last.x, position.y - last.y);
                }
                self.last_cursor = Some(*position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll += match delta {
                    MouseScrollDelta::LineDelta(_, lines) => *lines,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
            }
            _ => (),
        }
    }

    /// Pointer movement in pixels while the orbit button is held.
    pub fn handle_drag(&mut self, dx: f64, dy: f64) {
        self.rotate_horizontal += dx as f32;
        self.rotate_vertical += dy as f32;
    }

    /// Applies and clears everything accumulated since the last frame.
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        // dragging right swings the camera left around the target
        camera.orbit(
            Rad(-self.rotate_horizontal * self.sensitivity),
            Rad(self.rotate_vertical * self.sensitivity),
        );
        if self.scroll != 0.0 {
            camera.zoom((1.0 - self.zoom_step).powf(self.scroll));
        }
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
        self.scroll = 0.0;
    }
}
