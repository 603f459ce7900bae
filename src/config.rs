use std::time::Duration;

use crate::attributes::Rgb;

/// Camera defaults.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.0015,
        }
    }
}

/// Editor settings. Everything is a compile-time default; logging is the only
/// runtime knob (`RUST_LOG`).
#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub window_title: String,
    pub panel_title: String,
    pub background: Rgb,
    pub sphere_radius: f32,
    pub sphere_segments: u32,
    pub camera: CameraConfig,
    pub double_click_interval: Duration,
    pub double_click_distance: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_title: "Sphere Editor".to_string(),
            panel_title: "Controls".to_string(),
            background: Rgb::WHITE,
            sphere_radius: 1.0,
            sphere_segments: 32,
            camera: CameraConfig::default(),
            double_click_interval: Duration::from_millis(400),
            double_click_distance: 6.0,
        }
    }
}
