//! Recursive Whitted-style shading.
//!
//! `trace_ray` finds the nearest hit and shades it with local illumination
//! (diffuse + specular, shadow tested per light) plus a recursively traced
//! mirror reflection. Recursion stops at `max_depth`, where a constant grey
//! stands in for the reflected color.

use prism_core::{Primitive, Scene};
use prism_math::{Color, Ray, Vector3, VectorExt};

use crate::hittable::{nearest_intersection, test_ray, Intersection};

/// Default reflection recursion limit.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// What stands in for the reflected color once `max_depth` is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthCutoff {
    /// Constant grey, regardless of the surface
    #[default]
    Grey,
    /// Grey scaled by the surface reflectivity, like a traced reflection
    ReflectedGrey,
}

/// Ray counters gathered while tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceStats {
    /// Calls into `trace_ray` at depth 0
    pub primary_rays: u64,
    /// Recursive reflection rays
    pub reflection_rays: u64,
    /// Rays cast towards lights
    pub shadow_rays: u64,
    /// Deepest recursion level entered
    pub max_depth_reached: u32,
}

impl TraceStats {
    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &TraceStats) {
        self.primary_rays += other.primary_rays;
        self.reflection_rays += other.reflection_rays;
        self.shadow_rays += other.shadow_rays;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
    }

    pub fn total_rays(&self) -> u64 {
        self.primary_rays + self.reflection_rays + self.shadow_rays
    }
}

/// Shading engine settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTracer {
    /// Reflection recursion limit
    pub max_depth: u32,
    /// Color of escaping rays, also added as an ambient floor on every hit
    pub background: Color,
    pub cutoff: DepthCutoff,
}

impl Default for RayTracer {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            background: Color::BACKGROUND,
            cutoff: DepthCutoff::default(),
        }
    }
}

impl RayTracer {
    pub fn new(max_depth: u32, background: Color) -> Self {
        Self {
            max_depth,
            background,
            ..Default::default()
        }
    }

    pub fn with_cutoff(mut self, cutoff: DepthCutoff) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Color seen along `ray`, starting at recursion level `depth`.
    pub fn trace_ray(&self, ray: &Ray, scene: &Scene, depth: u32) -> Color {
        self.trace_ray_counted(ray, scene, depth, &mut TraceStats::default())
    }

    /// [`RayTracer::trace_ray`], recording ray counts into `stats`.
    pub fn trace_ray_counted(
        &self,
        ray: &Ray,
        scene: &Scene,
        depth: u32,
        stats: &mut TraceStats,
    ) -> Color {
        if depth == 0 {
            stats.primary_rays += 1;
        } else {
            stats.reflection_rays += 1;
        }
        stats.max_depth_reached = stats.max_depth_reached.max(depth);

        match nearest_intersection(ray, &scene.primitives) {
            None => self.background,
            Some(isect) => self.shade(&isect, scene, depth, stats),
        }
    }

    fn shade(&self, isect: &Intersection<'_>, scene: &Scene, depth: u32, stats: &mut TraceStats) -> Color {
        let d = isect.ray.dir;
        let pos = isect.ray.at(isect.dist);
        let normal = isect.primitive.normal(pos);
        let reflect_dir = d - normal * normal.dot(d) * 2.0;

        let natural =
            self.background + self.natural_color_counted(isect.primitive, pos, normal, reflect_dir, scene, stats);
        let reflected = if depth >= self.max_depth {
            self.cutoff_color(isect.primitive, pos)
        } else {
            self.reflection_color(isect.primitive, pos, reflect_dir, scene, depth, stats)
        };

        natural + reflected
    }

    fn cutoff_color(&self, primitive: &Primitive, pos: Vector3) -> Color {
        match self.cutoff {
            DepthCutoff::Grey => Color::GREY,
            DepthCutoff::ReflectedGrey => Color::GREY.scale(primitive.surface().reflect(pos)),
        }
    }

    fn reflection_color(
        &self,
        primitive: &Primitive,
        pos: Vector3,
        reflect_dir: Vector3,
        scene: &Scene,
        depth: u32,
        stats: &mut TraceStats,
    ) -> Color {
        let ray = Ray::new(pos, reflect_dir);
        self.trace_ray_counted(&ray, scene, depth + 1, stats)
            .scale(primitive.surface().reflect(pos))
    }

    /// Direct illumination at `pos`, summed over the scene lights in order.
    ///
    /// A light contributes nothing when the nearest hit towards it is no
    /// farther than the light itself.
    pub fn natural_color(
        &self,
        primitive: &Primitive,
        pos: Vector3,
        normal: Vector3,
        reflect_dir: Vector3,
        scene: &Scene,
    ) -> Color {
        self.natural_color_counted(primitive, pos, normal, reflect_dir, scene, &mut TraceStats::default())
    }

    fn natural_color_counted(
        &self,
        primitive: &Primitive,
        pos: Vector3,
        normal: Vector3,
        reflect_dir: Vector3,
        scene: &Scene,
        stats: &mut TraceStats,
    ) -> Color {
        let surface = primitive.surface();

        scene.lights.iter().fold(Color::BLACK, |col, light| {
            let to_light = light.pos - pos;
            let light_dir = to_light.norm();

            stats.shadow_rays += 1;
            let in_shadow = match test_ray(&Ray::new(pos, light_dir), scene) {
                Some(dist) => dist <= to_light.length(),
                None => false,
            };
            if in_shadow {
                return col;
            }

            let illum = light_dir.dot(normal);
            let diffuse_light = if illum > 0.0 {
                light.color.scale(illum)
            } else {
                Color::BLACK
            };

            let specular = light_dir.dot(reflect_dir.norm());
            let specular_light = if specular > 0.0 {
                light.color.scale(specular.powf(surface.roughness()))
            } else {
                Color::BLACK
            };

            col + (surface.diffuse(pos).times(diffuse_light) + surface.specular(pos).times(specular_light))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{default_scene, Camera, Light, Plane, Sphere, Surface};

    fn matte(reflect: f64) -> Surface {
        Surface::Uniform {
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            reflect,
            roughness: 1.0,
        }
    }

    fn camera() -> Camera {
        Camera::new(Vector3::new(0.0, 1.0, 10.0), Vector3::new(0.0, 1.0, 0.0))
    }

    /// Mirrors at y = 0 (facing up) and y = 2 (facing down).
    fn mirror_corridor(reflect: f64) -> Scene {
        Scene::new(camera())
            .with_primitive(Plane::new(Vector3::Y, 0.0, matte(reflect)))
            .with_primitive(Plane::new(-Vector3::Y, 2.0, matte(reflect)))
    }

    fn assert_color_near(actual: Color, expected: Color) {
        let close = (actual.r - expected.r).abs() < 1e-9
            && (actual.g - expected.g).abs() < 1e-9
            && (actual.b - expected.b).abs() < 1e-9;
        assert!(close, "{actual:?} != {expected:?}");
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::new(camera());
        let tracer = RayTracer::new(5, Color::new(0.1, 0.2, 0.3));
        let color = tracer.trace_ray(&Ray::new(Vector3::ZERO, Vector3::Z), &scene, 0);
        assert_eq!(color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_recursion_stops_at_max_depth() {
        let scene = mirror_corridor(0.5);
        let tracer = RayTracer::new(3, Color::BLACK);
        let ray = Ray::new(Vector3::new(0.0, 1.0, 0.0), -Vector3::Y);

        let mut stats = TraceStats::default();
        let color = tracer.trace_ray_counted(&ray, &scene, 0, &mut stats);

        assert_eq!(stats.primary_rays, 1);
        assert_eq!(stats.reflection_rays, 3);
        assert_eq!(stats.max_depth_reached, 3);
        // 0.5^3 of the grey that replaces the fourth bounce
        assert_eq!(color, Color::GREY.scale(0.125));
    }

    #[test]
    fn test_cutoff_at_max_depth_is_grey() {
        let scene = mirror_corridor(0.5);
        let tracer = RayTracer::new(5, Color::BLACK);
        let ray = Ray::new(Vector3::new(0.0, 1.0, 0.0), -Vector3::Y);

        let mut stats = TraceStats::default();
        let color = tracer.trace_ray_counted(&ray, &scene, 5, &mut stats);

        assert_eq!(color, Color::GREY);
        assert_eq!(stats.reflection_rays, 1);
        assert_eq!(stats.max_depth_reached, 5);
    }

    #[test]
    fn test_reflected_grey_cutoff_scales_by_reflectivity() {
        let scene = mirror_corridor(0.5);
        let tracer = RayTracer::new(0, Color::BLACK).with_cutoff(DepthCutoff::ReflectedGrey);
        let ray = Ray::new(Vector3::new(0.0, 1.0, 0.0), -Vector3::Y);

        assert_eq!(tracer.trace_ray(&ray, &scene, 0), Color::GREY.scale(0.5));

        let deeper = RayTracer { max_depth: 2, ..tracer };
        // 0.5 * 0.5 * (grey * 0.5)
        assert_eq!(deeper.trace_ray(&ray, &scene, 0), Color::GREY.scale(0.125));
    }

    #[test]
    fn test_background_added_as_ambient_floor() {
        let scene = mirror_corridor(0.0);
        let background = Color::new(0.25, 0.0, 0.0);
        let tracer = RayTracer::new(0, background);
        let ray = Ray::new(Vector3::new(0.0, 1.0, 0.0), -Vector3::Y);

        // no lights: background floor + grey cutoff
        assert_eq!(tracer.trace_ray(&ray, &scene, 0), background + Color::GREY);
    }

    fn shadow_scene(light: Light) -> (Scene, Primitive) {
        let floor = Primitive::from(Plane::new(Vector3::Y, 0.0, matte(0.0)));
        let scene = Scene::new(camera())
            .with_primitive(floor)
            .with_primitive(Sphere::new(Vector3::new(0.0, 3.0, 0.0), 1.0, Surface::Shiny))
            .with_light(light);
        (scene, floor)
    }

    #[test]
    fn test_occluded_point_gets_no_light() {
        let (scene, floor) = shadow_scene(Light::new(Vector3::new(0.0, 6.0, 0.0), Color::WHITE));
        let color = RayTracer::default().natural_color(&floor, Vector3::ZERO, Vector3::Y, Vector3::Y, &scene);
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_occluder_beyond_light_does_not_shadow() {
        let (scene, floor) = shadow_scene(Light::new(Vector3::new(0.0, 1.0, 0.0), Color::WHITE));
        let color = RayTracer::default().natural_color(&floor, Vector3::ZERO, Vector3::Y, Vector3::X, &scene);
        // full diffuse, no specular on a black specular surface
        assert_eq!(color, Color::WHITE);
    }

    #[test]
    fn test_occluder_exactly_at_light_distance_shadows() {
        // sphere surface at y = 2, light at y = 2
        let (scene, floor) = shadow_scene(Light::new(Vector3::new(0.0, 2.0, 0.0), Color::WHITE));
        let color = RayTracer::default().natural_color(&floor, Vector3::ZERO, Vector3::Y, Vector3::Y, &scene);
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_unoccluded_point_lambert_term() {
        let (scene, floor) = shadow_scene(Light::new(Vector3::new(0.0, 6.0, 0.0), Color::WHITE));
        let pos = Vector3::new(12.0, 0.0, 0.0);
        let color = RayTracer::default().natural_color(&floor, pos, Vector3::Y, -Vector3::Y, &scene);

        let illum = 6.0 / (12.0f64 * 12.0 + 36.0).sqrt();
        assert_color_near(color, Color::new(illum, illum, illum));
    }

    #[test]
    fn test_light_facing_away_contributes_black() {
        let (scene, floor) = shadow_scene(Light::new(Vector3::new(5.0, -3.0, 0.0), Color::WHITE));
        let color = RayTracer::default().natural_color(&floor, Vector3::ZERO, Vector3::Y, -Vector3::Y, &scene);
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_specular_highlight_uses_roughness() {
        let surface = Surface::Uniform {
            diffuse: Color::BLACK,
            specular: Color::WHITE,
            reflect: 0.0,
            roughness: 3.0,
        };
        let floor = Primitive::from(Plane::new(Vector3::Y, 0.0, surface));
        let light_pos = Vector3::new(3.0, 4.0, 0.0);
        let scene = Scene::new(camera())
            .with_primitive(floor)
            .with_light(Light::new(light_pos, Color::WHITE));

        // unnormalized reflection direction straight up
        let color = RayTracer::default().natural_color(&floor, Vector3::ZERO, Vector3::Y, Vector3::new(0.0, 2.0, 0.0), &scene);
        let expected = 0.8f64.powf(3.0);
        assert_color_near(color, Color::new(expected, expected, expected));
    }

    #[test]
    fn test_shadowing_independent_of_other_lights() {
        let a = Light::new(Vector3::new(-4.0, 5.0, 1.0), Color::new(0.3, 0.1, 0.0));
        let b = Light::new(Vector3::new(0.0, 6.0, 0.0), Color::new(0.0, 0.4, 0.9));
        let (scene_a, floor) = shadow_scene(a);
        let (scene_b, _) = shadow_scene(b);
        let scene_ab = scene_a.clone().with_light(b);
        let scene_ba = scene_b.clone().with_light(a);

        let tracer = RayTracer::default();
        let shade = |scene: &Scene| tracer.natural_color(&floor, Vector3::new(0.5, 0.0, 0.0), Vector3::Y, Vector3::Y, scene);

        let only_a = shade(&scene_a);
        let only_b = shade(&scene_b);
        assert_eq!(shade(&scene_ab), only_a + only_b);
        assert_eq!(shade(&scene_ba), only_a + only_b);
        // b sits right above the sphere
        assert_eq!(only_b, Color::BLACK);
        assert_ne!(only_a, Color::BLACK);
    }

    #[test]
    fn test_default_scene_primary_ray_is_bounded() {
        let scene = default_scene();
        let tracer = RayTracer::default();
        let dir = (Vector3::new(0.0, 1.0, -0.25) - scene.camera.pos).norm();

        let mut stats = TraceStats::default();
        let color = tracer.trace_ray_counted(&Ray::new(scene.camera.pos, dir), &scene, 0, &mut stats);

        assert!(stats.max_depth_reached <= DEFAULT_MAX_DEPTH);
        assert!(color.r.is_finite() && color.g.is_finite() && color.b.is_finite());
        assert!(stats.shadow_rays > 0);
    }

    #[test]
    fn test_stats_merge() {
        let mut a = TraceStats { primary_rays: 1, reflection_rays: 2, shadow_rays: 3, max_depth_reached: 1 };
        let b = TraceStats { primary_rays: 10, reflection_rays: 20, shadow_rays: 30, max_depth_reached: 4 };
        a.merge(&b);
        assert_eq!(a, TraceStats { primary_rays: 11, reflection_rays: 22, shadow_rays: 33, max_depth_reached: 4 });
        assert_eq!(a.total_rays(), 66);
    }
}
