//! Ray/primitive intersection.
//!
//! Every primitive answers `intersect(ray)` with the nearest hit or `None`.
//! A miss is a normal outcome, never an error.

use prism_core::{Plane, Primitive, Scene, Sphere};
use prism_math::Ray;

/// A hit between a ray and a primitive.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// The primitive that was hit
    pub primitive: &'a Primitive,
    /// The ray that hit it
    pub ray: Ray,
    /// Parametric distance along `ray.dir`; the hit point is `ray.at(dist)`
    pub dist: f64,
}

/// Shapes that can be hit by rays.
pub trait Intersect {
    /// Distance along `ray` to the hit, if any.
    fn intersect_dist(&self, ray: &Ray) -> Option<f64>;
}

impl Intersect for Sphere {
    fn intersect_dist(&self, ray: &Ray) -> Option<f64> {
        let eo = self.center() - ray.start;
        let v = eo.dot(ray.dir);

        // Behind the ray, or the ray starts inside facing away: both miss
        let mut dist = 0.0;
        if v > 0.0 {
            let disc = self.radius2() - (eo.dot(eo) - v * v);
            if disc > 0.0 {
                dist = v - disc.sqrt();
            }
        }

        // A hit at exactly zero is discarded along with the misses
        if dist == 0.0 {
            None
        } else {
            Some(dist)
        }
    }
}

impl Intersect for Plane {
    fn intersect_dist(&self, ray: &Ray) -> Option<f64> {
        let normal = self.normal(ray.start);
        let denom = normal.dot(ray.dir);

        // Moving away from the front side, or parallel to the plane
        if denom > 0.0 || denom == 0.0 {
            return None;
        }
        Some((normal.dot(ray.start) + self.offset()) / (-denom))
    }
}

impl Intersect for Primitive {
    fn intersect_dist(&self, ray: &Ray) -> Option<f64> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect_dist(ray),
            Primitive::Plane(plane) => plane.intersect_dist(ray),
        }
    }
}

/// Intersect a single primitive.
pub fn intersect<'a>(primitive: &'a Primitive, ray: &Ray) -> Option<Intersection<'a>> {
    primitive.intersect_dist(ray).map(|dist| Intersection {
        primitive,
        ray: *ray,
        dist,
    })
}

/// Nearest hit among `primitives`, scanned in order.
///
/// A hit replaces the current best only when strictly closer, so the first
/// primitive wins an exact tie.
pub fn nearest_intersection<'a>(ray: &Ray, primitives: &'a [Primitive]) -> Option<Intersection<'a>> {
    let mut closest = f64::INFINITY;
    let mut closest_hit = None;

    for primitive in primitives {
        if let Some(hit) = intersect(primitive, ray) {
            if hit.dist < closest {
                closest = hit.dist;
                closest_hit = Some(hit);
            }
        }
    }

    closest_hit
}

/// Distance to the nearest hit in `scene`, if any.
pub fn test_ray(ray: &Ray, scene: &Scene) -> Option<f64> {
    nearest_intersection(ray, &scene.primitives).map(|hit| hit.dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{default_scene, Surface};
    use prism_math::{Vector3, VectorExt};

    fn unit_sphere_at(center: Vector3) -> Sphere {
        Sphere::new(center, 1.0, Surface::Shiny)
    }

    #[test]
    fn test_sphere_hit_distance() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 0.5, Surface::Shiny);
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));

        let dist = sphere.intersect_dist(&ray).unwrap();
        assert!((dist - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_hit_towards_center_off_axis() {
        let center = Vector3::new(3.0, -2.0, 7.0);
        let start = Vector3::new(-1.0, 4.0, 0.5);
        let sphere = Sphere::new(center, 1.25, Surface::Shiny);
        let ray = Ray::new(start, (center - start).norm());

        let dist = sphere.intersect_dist(&ray).unwrap();
        let expected = (center - start).length() - 1.25;
        assert!((dist - expected).abs() < 1e-9, "{dist} vs {expected}");
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let sphere = unit_sphere_at(Vector3::new(0.0, 0.0, 5.0));
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect_dist(&ray).is_none());
    }

    #[test]
    fn test_sphere_side_miss() {
        let sphere = unit_sphere_at(Vector3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect_dist(&ray).is_none());
    }

    #[test]
    fn test_sphere_tangent_ray_misses() {
        // disc == 0 exactly
        let sphere = unit_sphere_at(Vector3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect_dist(&ray).is_none());
    }

    #[test]
    fn test_sphere_ray_inside_facing_away_misses() {
        // center is behind the start point
        let sphere = unit_sphere_at(Vector3::new(0.0, 0.0, 0.5));
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect_dist(&ray).is_none());
    }

    #[test]
    fn test_sphere_ray_inside_facing_center_goes_negative() {
        // v > 0 but the near root lies behind the start point
        let sphere = unit_sphere_at(Vector3::new(0.0, 0.0, -0.5));
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));
        let dist = sphere.intersect_dist(&ray).unwrap();
        assert!((dist + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_hit_at_zero_discarded() {
        // Start exactly on the surface, heading through the center
        let sphere = unit_sphere_at(Vector3::new(0.0, 0.0, -1.0));
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect_dist(&ray).is_none());
    }

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(Vector3::Y, 0.0, Surface::Checkerboard);
        let ray = Ray::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(plane.intersect_dist(&ray), Some(2.0));

        let offset_plane = Plane::new(Vector3::Y, 1.0, Surface::Checkerboard);
        // y = -1 plane
        assert_eq!(offset_plane.intersect_dist(&ray), Some(3.0));
    }

    #[test]
    fn test_plane_facing_away_misses() {
        let plane = Plane::new(Vector3::Y, 0.0, Surface::Checkerboard);
        let ray = Ray::new(Vector3::new(0.0, -2.0, 0.0), Vector3::Y);
        assert!(plane.intersect_dist(&ray).is_none());
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = Plane::new(Vector3::Y, 0.0, Surface::Checkerboard);
        let above = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::X);
        let below = Ray::new(Vector3::new(0.0, -1.0, 0.0), Vector3::Z);
        assert!(plane.intersect_dist(&above).is_none());
        assert!(plane.intersect_dist(&below).is_none());
    }

    #[test]
    fn test_intersection_record() {
        let primitive = Primitive::from(unit_sphere_at(Vector3::new(0.0, 0.0, -3.0)));
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));

        let hit = intersect(&primitive, &ray).unwrap();
        assert_eq!(hit.ray, ray);
        assert_eq!(hit.dist, 2.0);
        assert_eq!(hit.primitive, &primitive);
        assert_eq!(hit.ray.at(hit.dist), Vector3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_nearest_picks_closest() {
        let primitives = [
            Primitive::from(unit_sphere_at(Vector3::new(0.0, 0.0, -10.0))),
            Primitive::from(unit_sphere_at(Vector3::new(0.0, 0.0, -4.0))),
            Primitive::from(unit_sphere_at(Vector3::new(0.0, 0.0, -7.0))),
        ];
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));

        let hit = nearest_intersection(&ray, &primitives).unwrap();
        assert_eq!(hit.dist, 3.0);
        assert!(std::ptr::eq(hit.primitive, &primitives[1]));
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let primitives = [
            Primitive::from(Sphere::new(Vector3::new(0.0, 0.0, -4.0), 1.0, Surface::Shiny)),
            Primitive::from(Sphere::new(Vector3::new(0.0, 0.0, -4.0), 1.0, Surface::Checkerboard)),
        ];
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));

        let hit = nearest_intersection(&ray, &primitives).unwrap();
        assert_eq!(*hit.primitive.surface(), Surface::Shiny);
    }

    #[test]
    fn test_nearest_none_on_empty_or_miss() {
        let ray = Ray::new(Vector3::ZERO, Vector3::Y);
        assert!(nearest_intersection(&ray, &[]).is_none());

        let scene = default_scene();
        // Straight up from above the floor: only sky
        let up = Ray::new(Vector3::new(10.0, 5.0, 10.0), Vector3::Y);
        assert!(test_ray(&up, &scene).is_none());
    }

    #[test]
    fn test_ray_hits_floor_in_default_scene() {
        let scene = default_scene();
        let down = Ray::new(Vector3::new(10.0, 5.0, 10.0), -Vector3::Y);
        assert_eq!(test_ray(&down, &scene), Some(5.0));
    }
}
