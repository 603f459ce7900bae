//! Cursor picking by ray casting against the spheres of the scene graph.

use glam::{Vec2, Vec3};

use crate::camera::CameraParams;
use crate::scene::{EntityId, SceneGraph};

/// A world-space ray with a normalized direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Converts a cursor position in physical pixels to a ray through the scene.
    pub fn from_screen(cursor: Vec2, viewport: Vec2, camera: &CameraParams) -> Option<Self> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let ndc_x = 2.0 * cursor.x / viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * cursor.y / viewport.y;

        let inverse = camera.view_proj.inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        let direction = far - near;
        if !direction.is_finite() || direction.length_squared() <= f32::EPSILON {
            return None;
        }
        Some(Self::new(near, direction))
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first hit with the sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let offset = self.origin - center;
        let b = offset.dot(self.direction);
        let c = offset.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }
}

/// Closest entity hit by the ray.
pub fn pick_entity(scene: &SceneGraph, ray: &Ray) -> Option<EntityId> {
    scene
        .iter()
        .filter_map(|(id, renderable)| {
            ray.intersect_sphere(renderable.position, renderable.radius)
                .map(|distance| (id, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Rgb;
    use crate::camera::OrbitCamera;
    use crate::config::CameraConfig;
    use crate::scene::Renderable;

    fn sphere(position: Vec3) -> Renderable {
        Renderable {
            position,
            color: Rgb::new(0x00ff00),
            radius: 1.0,
        }
    }

    #[test]
    fn ray_sphere_hits_and_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((hit - 4.0).abs() < 1e-5);
        assert!((ray.point_at(hit) - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 9.0), 1.0).is_none());
    }

    #[test]
    fn ray_from_inside_sphere_hits_far_side() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!((ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn picks_nearest_sphere_under_cursor() {
        let mut scene = SceneGraph::default();
        let back = scene.insert(sphere(Vec3::new(0.0, 0.0, -2.0)));
        let front = scene.insert(sphere(Vec3::new(0.0, 0.0, 1.5)));
        let aside = scene.insert(sphere(Vec3::new(2.0, 2.0, 0.0)));

        let camera = OrbitCamera::new(&CameraConfig::default()).params(1.0);
        let viewport = Vec2::new(800.0, 800.0);
        let center = Ray::from_screen(Vec2::new(400.0, 400.0), viewport, &camera).unwrap();
        assert!(center.direction.z < -0.99);
        assert_eq!(pick_entity(&scene, &center), Some(front));

        scene.remove(front);
        assert_eq!(pick_entity(&scene, &center), Some(back));

        let corner = Ray::from_screen(Vec2::new(5.0, 795.0), viewport, &camera).unwrap();
        assert_eq!(pick_entity(&scene, &corner), None);

        let toward_aside = Ray::new(camera.position, Vec3::new(2.0, 2.0, 0.0) - camera.position);
        assert_eq!(pick_entity(&scene, &toward_aside), Some(aside));
    }

    #[test]
    fn degenerate_viewport_yields_no_ray() {
        let camera = OrbitCamera::new(&CameraConfig::default()).params(1.0);
        assert!(Ray::from_screen(Vec2::ZERO, Vec2::ZERO, &camera).is_none());
    }
}
