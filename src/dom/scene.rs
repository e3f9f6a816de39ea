// scene.rs - Canvas 2D surface and animation loop for ambient scenes
//
// One surface per mounted scene, never shared. The frame callback reaches
// its ticker through a weak reference, so the handle holds the only strong
// one; dropping it cancels the pending frame and detaches the pointer
// listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent, Window};

use super::{set_styles, window};
use crate::config::{DEFAULT_COLOR, DecorConfig, Side};
use crate::error::{Error, Result};
use crate::lifecycle::{Detach, Scheduler, Subscription, Ticker};
use crate::render::{Encoder, POINT_STRIDE, SEGMENT_STRIDE};
use crate::scene::Scene;
use crate::scene::presets::decor_fits;

type FrameCallback = Closure<dyn FnMut(f64)>;
type PointerCallback = Closure<dyn FnMut(PointerEvent)>;

#[wasm_bindgen]
pub struct SceneHandle {
    running: Option<Running>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// False when the scene degraded to rendering nothing
    pub fn active(&self) -> bool {
        self.running.is_some()
    }

    /// Stop the loop and detach listeners
    pub fn unmount(self) {}
}

impl SceneHandle {
    fn idle() -> Self {
        Self { running: None }
    }
}

struct Running {
    _ticker: Rc<Ticker<AnimationFrames>>,
    _pointer: Option<Subscription<PointerListener>>,
}

impl Drop for Running {
    fn drop(&mut self) {
        log::debug!("scene unmounted");
    }
}

struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl Scheduler for AnimationFrames {
    fn request(&self) -> Result<i32> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .map_err(|_| Error::SurfaceUnavailable("requestAnimationFrame"))
    }

    fn cancel(&self, id: i32) {
        let _ = self.window.cancel_animation_frame(id);
    }
}

struct PointerListener {
    window: Window,
    callback: PointerCallback,
}

impl Detach for PointerListener {
    fn detach(&self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("pointermove", self.callback.as_ref().unchecked_ref());
    }
}

/// Hero background with the pointer light
#[wasm_bindgen]
pub fn mount_hero(canvas: HtmlCanvasElement) -> SceneHandle {
    let scene = Scene::hero(&mut rand::thread_rng());
    run(canvas, scene, Mode::Hero).unwrap_or_else(degrade)
}

/// Section decoration from `{ position: "left" | "right", color }`.
/// Hidden and paused while the viewport is narrower than the breakpoint.
#[wasm_bindgen]
pub fn mount_decor(canvas: HtmlCanvasElement, config: JsValue) -> SceneHandle {
    let config = DecorConfig::from_js(config).unwrap_or_else(|e| {
        log::warn!("{e}, using default decor config");
        DecorConfig::default()
    });

    place(&canvas, config.position);
    let color = config.rgb().unwrap_or_else(|e| {
        log::warn!("{e}, using {DEFAULT_COLOR}");
        DEFAULT_COLOR
    });
    let scene = Scene::decor_with(color, &mut rand::thread_rng());
    run(canvas, scene, Mode::Decor).unwrap_or_else(degrade)
}

fn degrade(e: Error) -> SceneHandle {
    log::warn!("{e}, scene disabled");
    SceneHandle::idle()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Hero,
    Decor,
}

/// Pin the decor canvas half off the given edge of its section
fn place(canvas: &HtmlCanvasElement, side: Side) {
    let (edge, shift) = match side {
        Side::Left => ("left", "-25%"),
        Side::Right => ("right", "25%"),
    };
    let transform = format!("translate({shift}, -50%)");
    set_styles(canvas, &[
        ("position", "absolute"),
        ("top", "50%"),
        (edge, "0"),
        ("width", "16rem"),
        ("height", "16rem"),
        ("opacity", "0.5"),
        ("pointer-events", "none"),
        ("transform", transform.as_str()),
    ]);
}

struct Surface {
    scene: Scene,
    encoder: Encoder,
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
    particle_fill: String,
    start: Option<f64>,
    gated: bool,
    shown: Option<bool>,
}

impl Surface {
    fn frame(&mut self, now: f64) {
        if !self.visible() {
            return;
        }
        let start = *self.start.get_or_insert(now);
        self.fit();
        self.scene.tick((now - start) / 1000.0);
        self.encoder.encode(&self.scene);
        self.draw();
    }

    /// Decor follows the viewport breakpoint: `display: none` below it
    fn visible(&mut self) -> bool {
        if !self.gated {
            return true;
        }
        let fits = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .is_some_and(decor_fits);
        if self.shown != Some(fits) {
            self.shown = Some(fits);
            set_styles(&self.canvas, &[("display", if fits { "block" } else { "none" })]);
            log::debug!("decor {}", if fits { "shown" } else { "hidden" });
        }
        fits
    }

    /// Match the backing store to the element's CSS size
    fn fit(&mut self) {
        let w = (self.canvas.client_width() as f64 * self.dpr).round() as u32;
        let h = (self.canvas.client_height() as f64 * self.dpr).round() as u32;
        if w != self.canvas.width() || h != self.canvas.height() {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.encoder.resize(w, h);
        }
    }

    fn draw(&self) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        ctx.set_line_width(self.dpr);

        let mut stroke = [f32::NAN; 3];
        for seg in self.encoder.segments().chunks_exact(SEGMENT_STRIDE) {
            let &[x0, y0, x1, y1, r, g, b, a] = seg else { continue };
            if stroke != [r, g, b] {
                stroke = [r, g, b];
                ctx.set_stroke_style_str(&css_rgb(r, g, b));
            }
            ctx.set_global_alpha(a as f64);
            ctx.begin_path();
            ctx.move_to(x0 as f64, y0 as f64);
            ctx.line_to(x1 as f64, y1 as f64);
            ctx.stroke();
        }

        ctx.set_fill_style_str(&self.particle_fill);
        for p in self.encoder.points().chunks_exact(POINT_STRIDE) {
            let &[x, y, size, a] = p else { continue };
            let half = size as f64 * 0.5;
            ctx.set_global_alpha(a as f64);
            ctx.fill_rect(x as f64 - half, y as f64 - half, size as f64, size as f64);
        }
        ctx.set_global_alpha(1.0);
    }
}

fn css_rgb(r: f32, g: f32, b: f32) -> String {
    let c = |v: f32| (v * 255.0).round() as u8;
    format!("rgb({}, {}, {})", c(r), c(g), c(b))
}

fn run(canvas: HtmlCanvasElement, scene: Scene, mode: Mode) -> Result<SceneHandle> {
    let window = window()?;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(Error::SurfaceUnavailable("no 2d context"))?;

    let dpr = window.device_pixel_ratio().min(scene.camera().max_dpr as f64);
    let particle_fill = scene.particle_style().color.to_string();
    let surface = Rc::new(RefCell::new(Surface {
        scene,
        encoder: Encoder::new(canvas.width(), canvas.height()),
        window: window.clone(),
        canvas: canvas.clone(),
        ctx,
        dpr,
        particle_fill,
        start: None,
        gated: mode == Mode::Decor,
        shown: None,
    }));
    // Apply the breakpoint before the first frame
    surface.borrow_mut().visible();

    let pointer = match mode {
        Mode::Hero => Some(listen_pointer(&window, &canvas, surface.clone())?),
        Mode::Decor => None,
    };

    let ticker = Rc::new_cyclic(|weak: &Weak<Ticker<AnimationFrames>>| {
        let weak = weak.clone();
        let callback = FrameCallback::new(move |now: f64| {
            if let Some(ticker) = weak.upgrade() {
                ticker.fire(now);
            }
        });
        Ticker::new(AnimationFrames { window: window.clone(), callback }, move |now| {
            surface.borrow_mut().frame(now);
        })
    });
    ticker.start()?;

    log::debug!("scene mounted at dpr {dpr}");
    Ok(SceneHandle {
        running: Some(Running { _ticker: ticker, _pointer: pointer }),
    })
}

fn listen_pointer(
    window: &Window,
    canvas: &HtmlCanvasElement,
    surface: Rc<RefCell<Surface>>,
) -> Result<Subscription<PointerListener>> {
    let canvas = canvas.clone();
    let callback = PointerCallback::new(move |e: PointerEvent| {
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let x = (e.client_x() as f64 - rect.left()) / rect.width() * 2.0 - 1.0;
        let y = -((e.client_y() as f64 - rect.top()) / rect.height() * 2.0 - 1.0);
        surface.borrow_mut().scene.set_pointer(x as f32, y as f32);
    });
    window
        .add_event_listener_with_callback("pointermove", callback.as_ref().unchecked_ref())
        .map_err(|_| Error::SurfaceUnavailable("pointer events"))?;
    Ok(Subscription::new(PointerListener { window: window.clone(), callback }))
}
