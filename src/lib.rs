use wasm_bindgen::prelude::*;

// ============================================================================
// PORTFOLIO ENGINE - Scroll reveal latch and ambient 3D backgrounds
// ============================================================================

pub mod config;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod render;
pub mod reveal;
pub mod scene;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{RevealHandle, SceneHandle, mount_decor, mount_hero, mount_reveal};

use config::{DecorConfig, RevealConfig};
use render::Encoder;
use reveal::{Cascade, Section};
use scene::Scene;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
    }
    log::debug!("portfolio engine loaded");
}

/// Ambient scene for front-ends that draw the frame themselves.
/// After `tick`, read `segments_len()` floats from `segments_ptr()` and
/// `points_len()` floats from `points_ptr()`; layouts are in `render`.
#[wasm_bindgen]
pub struct AmbientWorld {
    scene: Scene,
    encoder: Encoder,
}

#[wasm_bindgen]
impl AmbientWorld {
    /// Hero background
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            scene: Scene::hero(&mut rand::thread_rng()),
            encoder: Encoder::new(w, h),
        }
    }

    /// Section decoration from `{ position, color }`
    pub fn decor(w: u32, h: u32, config: JsValue) -> Result<AmbientWorld, JsValue> {
        let config = DecorConfig::from_js(config)?;
        Ok(Self {
            scene: Scene::decor(&config, &mut rand::thread_rng())?,
            encoder: Encoder::new(w, h),
        })
    }

    /// Advance to `elapsed` seconds since mount and encode the frame
    pub fn tick(&mut self, elapsed: f64) {
        self.scene.tick(elapsed);
        self.encoder.encode(&self.scene);
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.scene.set_pointer(x, y);
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.encoder.resize(w, h);
    }

    // Accessors for WASM
    pub fn segments_ptr(&self) -> *const f32 { self.encoder.segments_ptr() }
    pub fn segments_len(&self) -> usize { self.encoder.segments().len() }
    pub fn points_ptr(&self) -> *const f32 { self.encoder.points_ptr() }
    pub fn points_len(&self) -> usize { self.encoder.points().len() }
    pub fn width(&self) -> u32 { self.encoder.width() }
    pub fn height(&self) -> u32 { self.encoder.height() }
}

/// Reveal latch for front-ends that run their own visibility observer
#[wasm_bindgen]
pub struct RevealLatch {
    section: Section,
}

#[wasm_bindgen]
impl RevealLatch {
    #[wasm_bindgen(constructor)]
    pub fn new(id: String, children: usize, config: JsValue) -> Result<RevealLatch, JsValue> {
        let config = RevealConfig::from_js(config)?;
        Ok(Self {
            section: Section::new(id, &Cascade::from_config(&config), children),
        })
    }

    /// True exactly once: on the first sample that reports the section visible
    pub fn observe(&mut self, intersecting: bool) -> bool {
        self.section.observe(intersecting)
    }

    pub fn force_reveal(&mut self) -> bool {
        self.section.force_reveal()
    }

    pub fn revealed(&self) -> bool {
        self.section.is_revealed()
    }

    /// Start delay of child `index`, seconds
    pub fn delay(&self, index: usize) -> Option<f32> {
        self.section.steps().get(index).map(|s| s.delay)
    }

    pub fn duration(&self) -> Option<f32> {
        self.section.steps().first().map(|s| s.duration)
    }

    /// `[opacity, dx, dy, scale]` of child `index`, `t` seconds after the
    /// reveal, on the CSS `ease-out` curve
    pub fn frame(&self, index: usize, t: f32) -> Option<Vec<f32>> {
        self.section
            .frame(index, t)
            .map(|f| vec![f.opacity, f.dx, f.dy, f.scale])
    }
}
