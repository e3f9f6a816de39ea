// light.rs - Pointer-following point light

use glam::{Vec2, Vec3};

pub const LIGHT_SCALE: f32 = 5.0;
const LIGHT_INTENSITY: f32 = 2.0;
const LIGHT_DISTANCE: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseLight {
    scale: f32,
    intensity: f32,
    distance: f32,
    position: Vec3,
}

impl Default for MouseLight {
    fn default() -> Self {
        Self::new(LIGHT_SCALE)
    }
}

impl MouseLight {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            intensity: LIGHT_INTENSITY,
            distance: LIGHT_DISTANCE,
            position: Vec3::ZERO,
        }
    }

    /// Map normalized pointer coords straight onto the light position
    pub fn track(&mut self, x: f32, y: f32) {
        let p = Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE) * self.scale;
        self.position.x = p.x;
        self.position.y = p.y;
    }

    /// Light reaching `p`, linear falloff to zero at `distance`
    pub fn illuminate(&self, p: Vec3) -> f32 {
        let d = self.position.distance(p);
        if d >= self.distance {
            0.0
        } else {
            self.intensity * (1.0 - d / self.distance)
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_maps_by_scale() {
        let mut light = MouseLight::default();
        light.track(0.5, -0.3);
        let p = light.position();
        assert!((p.x - 2.5).abs() < 1e-6);
        assert!((p.y + 1.5).abs() < 1e-6);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn no_smoothing_between_frames() {
        let mut light = MouseLight::default();
        light.track(-1.0, 1.0);
        light.track(1.0, -1.0);
        assert_eq!(light.position(), Vec3::new(5.0, -5.0, 0.0));
    }

    #[test]
    fn out_of_range_pointer_is_clamped() {
        let mut light = MouseLight::default();
        light.track(3.0, -7.0);
        assert_eq!(light.position(), Vec3::new(5.0, -5.0, 0.0));
    }

    #[test]
    fn falloff() {
        let light = MouseLight::default();
        assert_eq!(light.illuminate(Vec3::ZERO), LIGHT_INTENSITY);
        assert!(light.illuminate(Vec3::new(0.0, 0.0, -7.5)) < LIGHT_INTENSITY);
        assert_eq!(light.illuminate(Vec3::new(0.0, 0.0, -20.0)), 0.0);
    }
}
