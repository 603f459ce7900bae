use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

const MIN_DISTANCE: f32 = 1.1;
const MAX_DISTANCE: f32 = 100.0;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Camera parameters consumed by the renderer and the picker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub view_proj: Mat4,
    pub position: Vec3,
}

/// Orbit camera circling a focus point.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    fov_degrees: f32,
    near: f32,
    far: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    pan_speed: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: config.distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            yaw: 0.0,
            pitch: 0.0,
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + offset * self.distance
    }

    pub fn params(&self, aspect: f32) -> CameraParams {
        let position = self.eye();
        let view = Mat4::look_at_rh(position, self.target, Vec3::Y);
        let projection = Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            aspect.max(0.01),
            self.near,
            self.far,
        );
        CameraParams {
            view_proj: projection * view,
            position,
        }
    }

    /// Rotates around the target by a pointer delta in pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.rotate_speed;
        self.pitch = (self.pitch + delta.y * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Moves the target in the view plane by a pointer delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.pan_speed * self.distance;
        self.target += (-right * delta.x + up * delta.y) * scale;
    }

    /// Scroll lines toward (positive) or away from (negative) the target.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - lines * self.zoom_speed).max(0.1);
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
