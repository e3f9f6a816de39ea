// presets.rs - Authored scene layouts
//
// Hero banner: seven shapes scattered behind the headline, a large
// particle cube and the pointer light. Section decor: one gem with a
// small particle cloud, tinted per section.

use glam::{Vec2, Vec3};

use super::shape::{Float, ShapeSpec};
use crate::config::Rgb;
use crate::geometry::ShapeKind;

pub const PARTICLE_COLOR: Rgb = Rgb::new(0x14, 0xb8, 0xa6);

// ============================================================================
// HERO
// ============================================================================

pub const HERO_SPIN: Vec2 = Vec2::new(0.2, 0.3);
pub const HERO_PARTICLES: usize = 300;
pub const HERO_EXTENT: Vec3 = Vec3::splat(10.0);
pub const HERO_FIELD_RATE: Vec2 = Vec2::new(0.01, 0.02);
pub const HERO_PARTICLE_SIZE: f32 = 0.03;
pub const HERO_PARTICLE_ALPHA: f32 = 0.6;

pub const HERO_SHAPES: [ShapeSpec; 7] = [
    spec(-4.0, 2.0, -3.0, ShapeKind::Sphere, Rgb::new(0x14, 0xb8, 0xa6), 0.8, 0.8, 0.4),
    spec(4.0, -1.0, -4.0, ShapeKind::Icosahedron, Rgb::new(0x08, 0x91, 0xb2), 0.7, 1.2, 0.3),
    spec(-3.0, -2.0, -2.0, ShapeKind::Torus, Rgb::new(0x06, 0xb6, 0xd4), 0.5, 0.6, 0.2),
    spec(3.0, 2.5, -5.0, ShapeKind::Box, Rgb::new(0x0d, 0x94, 0x88), 0.6, 1.0, 0.5),
    spec(0.0, -3.0, -3.0, ShapeKind::Sphere, Rgb::new(0x2d, 0xd4, 0xbf), 0.4, 1.5, 0.3),
    spec(-5.0, 0.0, -6.0, ShapeKind::Icosahedron, Rgb::new(0x14, 0xb8, 0xa6), 0.5, 0.7, 0.4),
    spec(5.0, 1.0, -2.0, ShapeKind::Torus, Rgb::new(0x0e, 0x74, 0x90), 0.4, 0.9, 0.2),
];

/// Hero shapes float at twice their spin speed
pub fn hero_float(speed: f32) -> Float {
    Float {
        speed: speed * 2.0,
        rotation_intensity: 0.5,
        float_intensity: 1.0,
    }
}

// ============================================================================
// SECTION DECOR
// ============================================================================

pub const GEM_SPIN: Vec2 = Vec2::new(0.3, 0.4);
pub const GEM_SCALE: f32 = 1.5;
pub const GEM_DISTORT: f32 = 0.3;
pub const GEM_FLOAT: Float = Float {
    speed: 2.0,
    rotation_intensity: 0.3,
    float_intensity: 0.5,
};
pub const DECOR_PARTICLES: usize = 30;
pub const DECOR_EXTENT: Vec3 = Vec3::new(5.0, 5.0, 2.5);
pub const DECOR_FIELD_RATE: Vec2 = Vec2::new(0.0, 0.05);
pub const DECOR_PARTICLE_SIZE: f32 = 0.02;
pub const DECOR_PARTICLE_ALPHA: f32 = 0.4;
pub const DECOR_SHAPE_OPACITY: f32 = 0.7;

/// Decor only shows on large viewports (CSS px)
pub const DECOR_MIN_VIEWPORT: f64 = 1024.0;

pub fn decor_fits(viewport_width: f64) -> bool {
    viewport_width >= DECOR_MIN_VIEWPORT
}

pub fn gem(color: Rgb) -> ShapeSpec {
    ShapeSpec {
        position: Vec3::ZERO,
        kind: ShapeKind::Icosahedron,
        color,
        scale: GEM_SCALE,
        speed: 1.0,
        distort: GEM_DISTORT,
    }
}

#[allow(clippy::too_many_arguments)]
const fn spec(
    x: f32,
    y: f32,
    z: f32,
    kind: ShapeKind,
    color: Rgb,
    scale: f32,
    speed: f32,
    distort: f32,
) -> ShapeSpec {
    ShapeSpec {
        position: Vec3::new(x, y, z),
        kind,
        color,
        scale,
        speed,
        distort,
    }
}
