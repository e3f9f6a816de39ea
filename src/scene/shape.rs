// shape.rs - Floating decorative shapes
//
// A shape spins about its own center at a fixed per-axis rate scaled by
// its speed, and rides a floating group that bobs and tilts around the
// scene origin. Spin only ever grows with time; the float motion is
// periodic and kept separate. Time and spin angles stay f64 so spin keeps
// growing after days of uptime; only the wrapped angles go to f32.

use std::f64::consts::TAU;

use glam::{DVec3, EulerRot, Mat3, Vec2, Vec3};

use crate::config::Rgb;
use crate::geometry::ShapeKind;

// Distortion: radial vertex wobble
const DISTORT_AMPLITUDE: f32 = 0.15;
const DISTORT_SPEED: f64 = 2.0;

/// Authoring-time placement of one shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSpec {
    pub position: Vec3,
    pub kind: ShapeKind,
    pub color: Rgb,
    pub scale: f32,
    pub speed: f32,
    pub distort: f32,
}

/// Float group parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Float {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

#[derive(Debug, Clone)]
pub struct DecorativeShape {
    spec: ShapeSpec,
    spin_rate: Vec2,
    float: Float,

    // Per-frame state
    rotation: DVec3,
    spin_m: Mat3,
    tilt: Vec3,
    tilt_m: Mat3,
    bob: f32,
    wobble: f32,
}

impl DecorativeShape {
    pub fn new(spec: ShapeSpec, spin_rate: Vec2, float: Float) -> Self {
        Self {
            spec,
            spin_rate,
            float,
            rotation: DVec3::ZERO,
            spin_m: Mat3::IDENTITY,
            tilt: Vec3::ZERO,
            tilt_m: Mat3::IDENTITY,
            bob: 0.0,
            wobble: 0.0,
        }
    }

    /// Own rotation at time `t`: x and y only, each at its own rate
    #[inline]
    pub fn spin(&self, t: f64) -> DVec3 {
        let speed = self.spec.speed as f64;
        DVec3::new(
            t * self.spin_rate.x as f64 * speed,
            t * self.spin_rate.y as f64 * speed,
            0.0,
        )
    }

    pub fn update(&mut self, t: f64) {
        self.rotation = self.spin(t);
        self.spin_m = Mat3::from_euler(
            EulerRot::XYZ,
            wrap(self.rotation.x),
            wrap(self.rotation.y),
            0.0,
        );

        let ft = t * self.float.speed as f64 / 4.0;
        let (sin, cos) = (ft.sin() as f32, ft.cos() as f32);
        let ri = self.float.rotation_intensity;
        self.tilt = Vec3::new(cos / 8.0 * ri, sin / 8.0 * ri, sin / 20.0 * ri);
        self.tilt_m = Mat3::from_euler(EulerRot::XYZ, self.tilt.x, self.tilt.y, self.tilt.z);
        self.bob = sin / 10.0 * self.float.float_intensity;
        self.wobble = wrap(DISTORT_SPEED * t);
    }

    /// Mesh-local vertex to world space
    pub fn transform(&self, v: Vec3) -> Vec3 {
        let phase = v.x * 3.0 + v.y * 2.0 + v.z;
        let wobble = 1.0 + self.spec.distort * DISTORT_AMPLITUDE * (self.wobble + phase).sin();
        let local = self.spin_m * (v * wobble * self.spec.scale) + self.spec.position;
        self.tilt_m * local + Vec3::new(0.0, self.bob, 0.0)
    }

    pub fn spec(&self) -> &ShapeSpec {
        &self.spec
    }

    pub fn rotation(&self) -> DVec3 {
        self.rotation
    }

    pub fn tilt(&self) -> Vec3 {
        self.tilt
    }

    pub fn bob(&self) -> f32 {
        self.bob
    }
}

/// Angle into [0, TAU) before it loses precision as f32
#[inline]
pub(super) fn wrap(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}
