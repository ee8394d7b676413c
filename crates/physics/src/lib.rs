#![warn(missing_docs)]
//! Geometric primitives (AABB, rays, intersection tests).

use glam::{Vec2, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Create an AABB from a center point and half extents.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    /// Slab test against a ray. Returns the distance to the first surface the
    /// ray crosses, or the exit distance when the origin is inside the box.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let inv = ray.direction.recip();
        let t1 = (self.min - ray.origin) * inv;
        let t2 = (self.max - ray.origin) * inv;

        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        // Entire box behind the origin
        if tmax < 0.0 {
            return None;
        }
        if tmin > tmax {
            return None;
        }

        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

/// A half-line with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin in world space.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`. Returns `None` for a zero-length direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Upright cylinder standing on `base` (center of the bottom cap).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalCylinder {
    /// Center of the bottom cap.
    pub base: Vec3,
    /// Radius in the XZ plane.
    pub radius: f32,
    /// Height along +Y.
    pub height: f32,
}

impl VerticalCylinder {
    /// Distance to the nearest surface point hit by `ray`, if any.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let top = self.base.y + self.height;
        let o = Vec2::new(ray.origin.x - self.base.x, ray.origin.z - self.base.z);
        let d = Vec2::new(ray.direction.x, ray.direction.z);
        let r2 = self.radius * self.radius;

        let mut best: Option<f32> = None;
        let mut consider = |t: f32| {
            if t >= 0.0 && best.map_or(true, |b| t < b) {
                best = Some(t);
            }
        };

        // Side wall
        let a = d.length_squared();
        if a > f32::EPSILON {
            let b = 2.0 * o.dot(d);
            let c = o.length_squared() - r2;
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sq = disc.sqrt();
                for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                    let y = ray.origin.y + ray.direction.y * t;
                    if y >= self.base.y && y <= top {
                        consider(t);
                    }
                }
            }
        }

        // Caps
        if ray.direction.y.abs() > f32::EPSILON {
            for cap_y in [self.base.y, top] {
                let t = (cap_y - ray.origin.y) / ray.direction.y;
                let p = o + d * t;
                if p.length_squared() <= r2 {
                    consider(t);
                }
            }
        }

        best
    }
}

/// Distance along `ray` to the horizontal plane `y = height`, if the ray reaches it.
pub fn ray_ground_plane(ray: &Ray, height: f32) -> Option<f32> {
    if ray.direction.y.abs() <= f32::EPSILON {
        return None;
    }
    let t = (height - ray.origin.y) / ray.direction.y;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, dir: Vec3) -> Ray {
        Ray::new(origin, dir).expect("non-zero direction")
    }

    #[test]
    fn aabb_ray_intersection() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));

        let hit = aabb.ray_intersection(&ray(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z));
        assert!((hit.unwrap() - 1.5).abs() < 1e-4);

        let miss = aabb.ray_intersection(&ray(Vec3::new(2.0, 0.0, 2.0), Vec3::NEG_Z));
        assert!(miss.is_none());

        let behind = aabb.ray_intersection(&ray(Vec3::new(0.0, 0.0, 2.0), Vec3::Z));
        assert!(behind.is_none());
    }

    #[test]
    fn aabb_ray_from_inside_reports_exit() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let hit = aabb.ray_intersection(&ray(Vec3::ZERO, Vec3::X)).unwrap();
        assert!((hit - 1.0).abs() < 1e-4);
    }

    #[test]
    fn aabb_ray_hits_near_face_and_misses_beside() {
        let aabb = Aabb::new(Vec3::new(-1.0, 0.0, -6.0), Vec3::new(1.0, 2.0, -4.0));
        let hit = aabb
            .ray_intersection(&ray(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z))
            .unwrap();
        assert!((hit - 4.0).abs() < 1e-4);
        assert!(aabb
            .ray_intersection(&ray(Vec3::new(3.0, 1.0, 0.0), Vec3::NEG_Z))
            .is_none());
        assert!(aabb
            .ray_intersection(&ray(Vec3::new(0.0, 1.0, 0.0), Vec3::Z))
            .is_none());
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }

    #[test]
    fn cylinder_side_hit() {
        let cyl = VerticalCylinder {
            base: Vec3::new(0.0, 0.0, -5.0),
            radius: 0.5,
            height: 4.0,
        };
        let t = cyl
            .ray_intersection(&ray(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z))
            .unwrap();
        assert!((t - 4.5).abs() < 1e-4);
    }

    #[test]
    fn cylinder_miss_above_top() {
        let cyl = VerticalCylinder {
            base: Vec3::new(0.0, 0.0, -5.0),
            radius: 0.5,
            height: 2.0,
        };
        assert!(cyl
            .ray_intersection(&ray(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Z))
            .is_none());
    }

    #[test]
    fn cylinder_cap_hit_from_above() {
        let cyl = VerticalCylinder {
            base: Vec3::ZERO,
            radius: 1.0,
            height: 2.0,
        };
        let t = cyl
            .ray_intersection(&ray(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y))
            .unwrap();
        assert!((t - 3.0).abs() < 1e-4);
    }

    #[test]
    fn ground_plane_only_when_looking_down() {
        let down = ray(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, -1.0));
        let t = ray_ground_plane(&down, 0.0).unwrap();
        assert!((down.at(t).y).abs() < 1e-4);

        let level = ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z);
        assert!(ray_ground_plane(&level, 0.0).is_none());
    }
}
