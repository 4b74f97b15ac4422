//! Axis-aligned boxes, bounding spheres and rays
//!
//! The collision pass, the planet radius and mouse picking all run on the
//! same `Aabb` type. Boxes live in model space on the geometry side and are
//! carried into world space with `transformed` before any test.

use nalgebra::Rotation3;

use super::states::NVec3;

/// Axis-aligned bounding box, `min`/`max` corners in the same space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: NVec3,
    pub max: NVec3,
}

impl Aabb {
    pub fn new(min: NVec3, max: NVec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: NVec3, half: NVec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> NVec3 {
        0.5 * (self.min + self.max)
    }

    pub fn half_extents(&self) -> NVec3 {
        0.5 * (self.max - self.min)
    }

    pub fn size(&self) -> NVec3 {
        self.max - self.min
    }

    /// Smallest box containing both operands.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// True only for overlap with positive volume: boxes that merely share
    /// a face, edge or corner do not count as intersecting.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Shrink about the center by `fraction` of the extent on every axis.
    /// `fraction = 0.25` leaves a box three quarters of its full size.
    pub fn shrunk(&self, fraction: f64) -> Aabb {
        Aabb::from_center_half_extents(self.center(), self.half_extents() * (1.0 - fraction))
    }

    /// Carry a model-space box into world space under an Euler rotation and
    /// a translation. The result is the enclosing axis-aligned box of the
    /// rotated body: |R|·h bounds the rotated half extents per axis.
    pub fn transformed(&self, position: NVec3, rotation: NVec3) -> Aabb {
        let rot = Rotation3::from_euler_angles(rotation.x, rotation.y, rotation.z);
        let center = rot * self.center() + position;
        let half = rot.matrix().abs() * self.half_extents();
        Aabb::from_center_half_extents(center, half)
    }

    /// Sphere enclosing the box: centered on the box, radius of half the
    /// diagonal. The planet radius is defined against this sphere.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere {
            center: self.center(),
            radius: 0.5 * self.size().norm(),
        }
    }

    /// Slab test. Returns the entry distance along `ray` (0.0 when the
    /// origin is already inside), or `None` on a miss. The distance is in
    /// units of the ray direction's length, so comparisons between hits of
    /// the same ray are valid without normalizing.
    pub fn ray_hit(&self, ray: &Ray) -> Option<f64> {
        let mut t_enter = 0.0_f64;
        let mut t_exit = f64::INFINITY;

        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];

            if d.abs() < 1e-12 {
                // Ray parallel to this slab: must already be between the planes
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
            } else {
                let inv = 1.0 / d;
                let mut t0 = (self.min[axis] - o) * inv;
                let mut t1 = (self.max[axis] - o) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_enter = t_enter.max(t0);
                t_exit = t_exit.min(t1);
                if t_enter > t_exit {
                    return None;
                }
            }
        }

        Some(t_enter)
    }
}

/// Center and radius derived from a box via [`Aabb::bounding_sphere`].
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    pub center: NVec3,
    pub radius: f64,
}

/// World-space picking ray, fed in by the viewer from the camera.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: NVec3,
    pub direction: NVec3,
}
