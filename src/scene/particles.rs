// particles.rs - Rigid particle field
//
// Positions are drawn once from the caller's random source and never
// touched again. Per frame only the field's rotation changes.

use glam::{EulerRot, Mat3, Vec2, Vec3};
use rand::Rng;

use super::shape::wrap;

#[derive(Debug, Clone)]
pub struct ParticleField {
    points: Box<[Vec3]>,
    half_extents: Vec3,
    rate: Vec2,
    angle: Vec2,
    rotation: Mat3,
}

impl ParticleField {
    /// `count` points uniform in `[-h, h]` on each axis. `rate` is the
    /// angular speed about x and y in radians per second.
    pub fn generate<R: Rng + ?Sized>(
        count: usize,
        half_extents: Vec3,
        rate: Vec2,
        rng: &mut R,
    ) -> Self {
        let half_extents = half_extents.abs();
        let points = (0..count)
            .map(|_| {
                Vec3::new(
                    axis(rng, half_extents.x),
                    axis(rng, half_extents.y),
                    axis(rng, half_extents.z),
                )
            })
            .collect();

        Self {
            points,
            half_extents,
            rate,
            angle: Vec2::ZERO,
            rotation: Mat3::IDENTITY,
        }
    }

    /// Rotation `t` seconds in, wrapped to one turn per axis
    pub fn rotate(&mut self, t: f64) {
        let angle = self.rate.as_dvec2() * t;
        self.angle = Vec2::new(wrap(angle.x), wrap(angle.y));
        self.rotation = Mat3::from_euler(EulerRot::XYZ, self.angle.x, self.angle.y, 0.0);
    }

    /// Points in field space, as generated
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Points with the current rotation applied
    pub fn world_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().map(move |&p| self.rotation * p)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    pub fn angle(&self) -> Vec2 {
        self.angle
    }
}

#[inline]
fn axis<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 { rng.gen_range(-half..=half) } else { 0.0 }
}
