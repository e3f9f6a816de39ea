// scene/ - Ambient background scenes
//
// A scene is a small arena of shape records plus one particle field. Each
// tick walks the arena and updates every record in place from the elapsed
// time; nothing is shared between scenes and nothing outlives the mount.

mod light;
mod particles;
pub mod presets;
mod shape;

pub use light::{LIGHT_SCALE, MouseLight};
pub use particles::ParticleField;
pub use shape::{DecorativeShape, Float, ShapeSpec};

use rand::Rng;

use crate::config::{DecorConfig, Rgb};
use crate::error::Result;
use crate::geometry::MeshSet;
use crate::render::Camera;
use presets::*;

// Ambient + directional light every edge receives
const BASE_LIGHT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleStyle {
    pub color: Rgb,
    pub size: f32,
    pub alpha: f32,
}

pub struct Scene {
    shapes: Vec<DecorativeShape>,
    meshes: MeshSet,
    particles: ParticleField,
    particle_style: ParticleStyle,
    light: Option<MouseLight>,
    shape_opacity: f32,
    camera: Camera,
    elapsed: f64,
}

impl Scene {
    /// Full-bleed hero background
    pub fn hero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let shapes = HERO_SHAPES
            .iter()
            .map(|&spec| DecorativeShape::new(spec, HERO_SPIN, hero_float(spec.speed)))
            .collect();

        let mut scene = Self {
            shapes,
            meshes: MeshSet::new(),
            particles: ParticleField::generate(HERO_PARTICLES, HERO_EXTENT, HERO_FIELD_RATE, rng),
            particle_style: ParticleStyle {
                color: PARTICLE_COLOR,
                size: HERO_PARTICLE_SIZE,
                alpha: HERO_PARTICLE_ALPHA,
            },
            light: Some(MouseLight::default()),
            shape_opacity: 1.0,
            camera: Camera::HERO,
            elapsed: 0.0,
        };
        scene.tick(0.0);
        scene
    }

    /// Section decoration in the configured color
    pub fn decor<R: Rng + ?Sized>(config: &DecorConfig, rng: &mut R) -> Result<Self> {
        Ok(Self::decor_with(config.rgb()?, rng))
    }

    pub fn decor_with<R: Rng + ?Sized>(color: Rgb, rng: &mut R) -> Self {
        let mut scene = Self {
            shapes: vec![DecorativeShape::new(gem(color), GEM_SPIN, GEM_FLOAT)],
            meshes: MeshSet::new(),
            particles: ParticleField::generate(DECOR_PARTICLES, DECOR_EXTENT, DECOR_FIELD_RATE, rng),
            particle_style: ParticleStyle {
                color: PARTICLE_COLOR,
                size: DECOR_PARTICLE_SIZE,
                alpha: DECOR_PARTICLE_ALPHA,
            },
            light: None,
            shape_opacity: DECOR_SHAPE_OPACITY,
            camera: Camera::DECOR,
            elapsed: 0.0,
        };
        scene.tick(0.0);
        scene
    }

    /// Advance every record to `elapsed` seconds since mount
    pub fn tick(&mut self, elapsed: f64) {
        self.elapsed = elapsed;
        for shape in &mut self.shapes {
            shape.update(elapsed);
        }
        self.particles.rotate(elapsed);
    }

    /// Normalized pointer position, [-1, 1] on both axes. No-op without a light.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if let Some(light) = &mut self.light {
            light.track(x, y);
        }
    }

    /// Light an edge at `p` receives, before opacity
    pub fn shade(&self, p: glam::Vec3) -> f32 {
        let lit = self.light.map_or(0.0, |l| l.illuminate(p));
        (BASE_LIGHT + lit * 0.1).min(1.0)
    }

    pub fn shapes(&self) -> &[DecorativeShape] {
        &self.shapes
    }

    pub fn meshes(&self) -> &MeshSet {
        &self.meshes
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn particle_style(&self) -> ParticleStyle {
        self.particle_style
    }

    pub fn light(&self) -> Option<&MouseLight> {
        self.light.as_ref()
    }

    pub fn shape_opacity(&self) -> f32 {
        self.shape_opacity
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Side;
    use crate::error::Error;
    use crate::geometry::ShapeKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn hero_layout() {
        let scene = Scene::hero(&mut rng());
        assert_eq!(scene.shapes().len(), 7);
        assert_eq!(scene.particles().len(), HERO_PARTICLES);
        assert!(scene.light().is_some());
        assert_eq!(scene.camera(), Camera::HERO);
    }

    #[test]
    fn decor_uses_configured_color() {
        let cfg = DecorConfig { position: Side::Left, color: "#0891b2".into() };
        let scene = Scene::decor(&cfg, &mut rng()).unwrap();
        assert_eq!(scene.shapes().len(), 1);
        let spec = scene.shapes()[0].spec();
        assert_eq!(spec.kind, ShapeKind::Icosahedron);
        assert_eq!(spec.color, Rgb::new(0x08, 0x91, 0xb2));
        assert!(scene.light().is_none());
    }

    #[test]
    fn decor_rejects_bad_color() {
        let cfg = DecorConfig { position: Side::Right, color: "cyan".into() };
        assert!(matches!(Scene::decor(&cfg, &mut rng()), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn tick_updates_every_shape() {
        let mut scene = Scene::hero(&mut rng());
        scene.tick(5.0);
        for shape in scene.shapes() {
            assert_eq!(shape.rotation(), shape.spin(5.0));
        }
        assert_eq!(scene.elapsed(), 5.0);
    }

    #[test]
    fn ticks_never_regenerate_particles() {
        let mut scene = Scene::hero(&mut rng());
        let before = scene.particles().points().to_vec();
        for i in 0..120 {
            scene.tick(i as f64 / 60.0);
        }
        assert_eq!(scene.particles().points(), &before[..]);
    }

    #[test]
    fn pointer_moves_hero_light_only() {
        let mut hero = Scene::hero(&mut rng());
        hero.set_pointer(0.5, -0.3);
        let p = hero.light().unwrap().position();
        assert!((p.x - 2.5).abs() < 1e-6 && (p.y + 1.5).abs() < 1e-6);

        let mut decor = Scene::decor_with(Rgb::new(1, 2, 3), &mut rng());
        decor.set_pointer(1.0, 1.0);
        assert!(decor.light().is_none());
    }

    #[test]
    fn edges_near_the_light_are_brighter() {
        let mut scene = Scene::hero(&mut rng());
        scene.set_pointer(1.0, 1.0);
        let near = scene.shade(glam::Vec3::new(5.0, 5.0, -1.0));
        let far = scene.shade(glam::Vec3::new(-5.0, -5.0, -6.0));
        assert!(near > far);
        assert!(near <= 1.0);
    }
}
