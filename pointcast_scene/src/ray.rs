// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rays and ray/shape intersection.
//!
//! A ray is `r(t) = origin + t * direction`. Shape tests run in the shape's
//! local space: the world ray is mapped through the inverse world transform
//! without renormalizing, so the parameter `t` of a local hit is also the
//! parameter of the world hit. With a unit world direction that parameter is
//! the world-space distance.

use glam::{Affine3A, Vec3};

use crate::types::Shape;

/// Ray in 3D space defined by origin and direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3,
    /// Direction of the ray. Picking rays use a unit vector so hit parameters are distances.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }

    /// Map this ray through `transform`, keeping the parameterization.
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        Self {
            origin: transform.transform_point3(self.origin),
            direction: transform.transform_vector3(self.direction),
        }
    }

    /// Nearest non-negative hit parameter against `shape` placed with `world`.
    ///
    /// Returns `None` for misses, for [`Shape::Empty`], and for degenerate
    /// transforms that cannot be inverted.
    pub fn intersect_shape(&self, shape: &Shape, world: &Affine3A) -> Option<f32> {
        if matches!(shape, Shape::Empty) {
            return None;
        }
        let inverse = world.inverse();
        if !inverse.is_finite() {
            return None;
        }
        let local = self.transformed(&inverse);
        match *shape {
            Shape::Empty => None,
            Shape::Sphere { radius } => local.intersect_sphere(radius),
            Shape::Cuboid { half_extents } => local.intersect_cuboid(half_extents),
        }
    }

    /// Intersect with a sphere of `radius` centered on the origin.
    ///
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, radius: f32) -> Option<f32> {
        let a = self.direction.length_squared();
        if a <= f32::EPSILON {
            return None;
        }
        let half_b = self.origin.dot(self.direction);
        let c = self.origin.length_squared() - radius * radius;
        let disc = half_b * half_b - a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = (-half_b - root) / a;
        if near >= 0.0 {
            return Some(near);
        }
        let far = (-half_b + root) / a;
        (far >= 0.0).then_some(far)
    }

    /// Intersect with an axis-aligned box of `half_extents` centered on the origin (slab test).
    ///
    /// A ray starting inside the box reports the exit point.
    pub fn intersect_cuboid(&self, half_extents: Vec3) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            let h = half_extents[axis];
            if d.abs() <= f32::EPSILON {
                if o < -h || o > h {
                    return None;
                }
                continue;
            }
            let t1 = (-h - o) / d;
            let t2 = (h - o) / d;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
        }
        if t_max < t_min.max(0.0) {
            return None;
        }
        Some(if t_min >= 0.0 { t_min } else { t_max })
    }
}
