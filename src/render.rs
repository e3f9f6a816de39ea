// render.rs - Project a scene frame into flat buffers for the canvas
//
// Output layout (f32, screen pixels, origin top-left):
//   segments: [x0, y0, x1, y1, r, g, b, a] per visible mesh edge
//   points:   [x, y, size, a]              per visible particle
//
// The buffers are reused between frames; only their lengths change.

use glam::{Vec2, Vec3};

use crate::scene::Scene;

pub const SEGMENT_STRIDE: usize = 8;
pub const POINT_STRIDE: usize = 4;

const NEAR: f32 = 0.1;
const MIN_POINT_PX: f32 = 1.0;

/// Perspective camera on the z axis looking toward -z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub z: f32,
    /// Vertical field of view, degrees
    pub fov_y: f32,
    /// Cap on device pixel ratio for the backing canvas
    pub max_dpr: f32,
}

impl Camera {
    pub const HERO: Camera = Camera { z: 8.0, fov_y: 60.0, max_dpr: 2.0 };
    pub const DECOR: Camera = Camera { z: 5.0, fov_y: 50.0, max_dpr: 1.5 };

    /// Focal length in pixels for a viewport `h` pixels tall
    #[inline]
    pub fn focal(&self, h: f32) -> f32 {
        h * 0.5 / (self.fov_y.to_radians() * 0.5).tan()
    }

    /// Screen position and view depth, or None when behind the near plane
    #[inline]
    pub fn project(&self, p: Vec3, w: f32, h: f32) -> Option<(Vec2, f32)> {
        let depth = self.z - p.z;
        if depth <= NEAR {
            return None;
        }
        let f = self.focal(h) / depth;
        Some((Vec2::new(w * 0.5 + p.x * f, h * 0.5 - p.y * f), depth))
    }
}

pub struct Encoder {
    segments: Vec<f32>,
    points: Vec<f32>,
    // Per-shape vertex scratch
    world: Vec<Vec3>,
    screen: Vec<Option<Vec2>>,
    w: u32,
    h: u32,
}

impl Encoder {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            segments: Vec::new(),
            points: Vec::new(),
            world: Vec::new(),
            screen: Vec::new(),
            w,
            h,
        }
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.points.clear();
    }

    /// Encode the scene's current state
    pub fn encode(&mut self, scene: &Scene) {
        self.clear();
        self.encode_shapes(scene);
        self.encode_particles(scene);
    }

    fn encode_shapes(&mut self, scene: &Scene) {
        let (w, h) = (self.w as f32, self.h as f32);
        let camera = scene.camera();
        let opacity = scene.shape_opacity();

        for shape in scene.shapes() {
            let spec = shape.spec();
            let mesh = scene.meshes().get(spec.kind);
            let [r, g, b] = spec.color.to_unit();

            self.world.clear();
            self.screen.clear();
            for &v in &mesh.vertices {
                let p = shape.transform(v);
                self.world.push(p);
                self.screen.push(camera.project(p, w, h).map(|(s, _)| s));
            }

            for &[i, j] in &mesh.edges {
                let (i, j) = (i as usize, j as usize);
                let (Some(p0), Some(p1)) = (self.screen[i], self.screen[j]) else {
                    continue;
                };
                let alpha = scene.shade((self.world[i] + self.world[j]) * 0.5) * opacity;
                self.segments
                    .extend_from_slice(&[p0.x, p0.y, p1.x, p1.y, r, g, b, alpha]);
            }
        }
    }

    fn encode_particles(&mut self, scene: &Scene) {
        let (w, h) = (self.w as f32, self.h as f32);
        let camera = scene.camera();
        let style = scene.particle_style();
        let focal = camera.focal(h);

        for p in scene.particles().world_points() {
            let Some((s, depth)) = camera.project(p, w, h) else {
                continue;
            };
            let size = (style.size * focal / depth).max(MIN_POINT_PX);
            self.points.extend_from_slice(&[s.x, s.y, size, style.alpha]);
        }
    }

    pub fn segments(&self) -> &[f32] {
        &self.segments
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / SEGMENT_STRIDE
    }

    pub fn point_count(&self) -> usize {
        self.points.len() / POINT_STRIDE
    }

    pub fn segments_ptr(&self) -> *const f32 {
        self.segments.as_ptr()
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr()
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgb;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn origin_projects_to_center() {
        let (s, depth) = Camera::HERO.project(Vec3::ZERO, 800.0, 600.0).unwrap();
        assert_eq!(s, Vec2::new(400.0, 300.0));
        assert_eq!(depth, 8.0);
    }

    #[test]
    fn up_is_up_on_screen() {
        let (s, _) = Camera::HERO.project(Vec3::new(1.0, 1.0, 0.0), 800.0, 600.0).unwrap();
        assert!(s.x > 400.0 && s.y < 300.0);
    }

    #[test]
    fn behind_camera_is_culled() {
        assert!(Camera::HERO.project(Vec3::new(0.0, 0.0, 9.0), 800.0, 600.0).is_none());
        assert!(Camera::DECOR.project(Vec3::new(0.0, 0.0, 5.0), 800.0, 600.0).is_none());
    }

    #[test]
    fn focal_matches_fov() {
        // 90 degree fov: half height equals focal length
        let cam = Camera { z: 1.0, fov_y: 90.0, max_dpr: 1.0 };
        assert!((cam.focal(600.0) - 300.0).abs() < 1e-3);
    }

    #[test]
    fn decor_frame_has_every_gem_edge() {
        let mut scene = Scene::decor_with(Rgb::new(0x06, 0xb6, 0xd4), &mut StdRng::seed_from_u64(1));
        scene.tick(2.0);
        let mut enc = Encoder::new(256, 256);
        enc.encode(&scene);

        // gem sits 5 units in front of the camera, fully visible
        assert_eq!(enc.segment_count(), 30);
        assert_eq!(enc.segments().len() % SEGMENT_STRIDE, 0);
        // particle z is within 2.5 of the origin, always in front
        assert_eq!(enc.point_count(), scene.particles().len());
        for p in enc.points().chunks_exact(POINT_STRIDE) {
            assert!(p[2] >= MIN_POINT_PX);
        }
    }

    #[test]
    fn hero_frame_culls_particles_behind_camera() {
        let mut scene = Scene::hero(&mut StdRng::seed_from_u64(2));
        scene.tick(0.0);
        let mut enc = Encoder::new(1280, 720);
        enc.encode(&scene);

        let visible = scene
            .particles()
            .world_points()
            .filter(|p| Camera::HERO.z - p.z > NEAR)
            .count();
        assert_eq!(enc.point_count(), visible);
        assert!(enc.segment_count() > 0);
    }

    #[test]
    fn encode_reuses_buffers() {
        let mut scene = Scene::decor_with(Rgb::new(0, 0, 0), &mut StdRng::seed_from_u64(3));
        let mut enc = Encoder::new(100, 100);
        enc.encode(&scene);
        let first = enc.segment_count();
        scene.tick(1.0);
        enc.encode(&scene);
        assert_eq!(enc.segment_count(), first);
    }
}
