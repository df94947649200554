// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perspective camera and pick-ray derivation.

use glam::{Mat4, Vec3};

use crate::ray::Ray;

/// A right-handed perspective camera looking from `eye` towards `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up direction used to orient the view.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 45_f32.to_radians(),
            aspect: 1.0,
        }
    }
}

impl PerspectiveCamera {
    /// Camera at `eye` looking at `target` with `+Y` up.
    pub fn looking_at(eye: Vec3, target: Vec3, fov_y: f32, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y,
            aspect,
        }
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Ray from the eye through normalized device coordinates (`[-1, 1]`, `+y` up).
    ///
    /// The direction is a unit vector, so ray parameters are world distances.
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let half = (self.fov_y * 0.5).tan();
        let in_camera = Vec3::new(ndc_x * half * self.aspect, ndc_y * half, -1.0);
        let direction = self
            .view()
            .inverse()
            .transform_vector3(in_camera)
            .normalize_or_zero();
        Ray::new(self.eye, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let cam = PerspectiveCamera::default();
        let ray = cam.ray_through(0.0, 0.0);
        assert_eq!(ray.origin, cam.eye);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn corners_diverge_symmetrically() {
        let cam = PerspectiveCamera::default();
        let left = cam.ray_through(-1.0, 0.0);
        let right = cam.ray_through(1.0, 0.0);
        assert!(left.direction.x < 0.0 && right.direction.x > 0.0);
        assert!((left.direction.x + right.direction.x).abs() < 1e-5);
        let top = cam.ray_through(0.0, 1.0);
        assert!(top.direction.y > 0.0, "+y in NDC is up");
    }
}
