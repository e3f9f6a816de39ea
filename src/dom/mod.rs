// dom/ - Browser bindings
//
// Everything here owns a piece of the page: observers, listeners, animation
// frame callbacks. Each handle releases what it owns in Drop. Handles are
// not garbage collected, so the page must call `unmount()` (or `free()`)
// when the element goes away.

mod reveal;
mod scene;

pub use reveal::{RevealHandle, mount_reveal};
pub use scene::{SceneHandle, mount_decor, mount_hero};

use web_sys::{HtmlElement, Window};

use crate::error::{Error, Result};

fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::SurfaceUnavailable("no window"))
}

/// Set inline styles, skipping any the browser refuses
fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for &(name, value) in styles {
        if style.set_property(name, value).is_err() {
            log::debug!("style {name}: {value} rejected");
        }
    }
}
