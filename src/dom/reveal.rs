// reveal.rs - IntersectionObserver binding for the reveal latch
//
// Children of the root element are hidden at mount and cascade in on the
// first intersection. The observer disconnects as soon as the latch fires,
// and again (a no-op by then) when the handle is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use super::set_styles;
use crate::config::RevealConfig;
use crate::error::{Error, Result};
use crate::lifecycle::{Detach, Subscription};
use crate::reveal::{Cascade, RevealStep, Section};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

#[wasm_bindgen]
pub struct RevealHandle {
    section: Rc<RefCell<Section>>,
    _observer: Option<Subscription<Observer>>,
}

struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Detach for Observer {
    fn detach(&self) {
        self.observer.disconnect();
    }
}

#[wasm_bindgen]
impl RevealHandle {
    pub fn revealed(&self) -> bool {
        self.section.borrow().is_revealed()
    }

    /// Disconnect the observer
    pub fn unmount(self) {}
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        if let Ok(section) = self.section.try_borrow() {
            log::debug!("reveal `{}` unmounted", section.id());
        }
    }
}

/// Wrap `root`'s children in a one-shot reveal cascade
#[wasm_bindgen]
pub fn mount_reveal(root: Element, config: JsValue) -> RevealHandle {
    let config = RevealConfig::from_js(config).unwrap_or_else(|e| {
        log::warn!("{e}, using default reveal config");
        RevealConfig::default()
    });

    let children: Rc<[HtmlElement]> = child_elements(&root).into();
    let section = Rc::new(RefCell::new(Section::new(
        root.id(),
        &Cascade::from_config(&config),
        children.len(),
    )));

    match observe(&root, &config, section.clone(), children) {
        Ok(observer) => RevealHandle {
            section,
            _observer: Some(Subscription::new(observer)),
        },
        Err(e) => {
            // Children were never hidden, so they are already at rest
            log::warn!("{e}, showing section without animation");
            section.borrow_mut().force_reveal();
            RevealHandle { section, _observer: None }
        }
    }
}

fn observe(
    root: &Element,
    config: &RevealConfig,
    section: Rc<RefCell<Section>>,
    children: Rc<[HtmlElement]>,
) -> Result<Observer> {
    let hidden = children.clone();
    let latch = section.clone();
    let callback = ObserverCallback::new(move |entries: Array, observer: IntersectionObserver| {
        let visible = entries
            .iter()
            .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
            .any(|e| e.is_intersecting());

        if !latch.borrow_mut().observe(visible) {
            return;
        }
        observer.disconnect();
        for (el, step) in children.iter().zip(latch.borrow().steps()) {
            show(el, step);
        }
    });

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&config.root_margin());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|_| Error::ObserverUnavailable)?;

    for (el, step) in hidden.iter().zip(section.borrow().steps()) {
        hide(el, step);
    }
    observer.observe(root);
    log::debug!("reveal `{}` observing {} children", section.borrow().id(), hidden.len());

    Ok(Observer { observer, _callback: callback })
}

fn child_elements(root: &Element) -> Vec<HtmlElement> {
    let list = root.children();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn hide(el: &HtmlElement, step: &RevealStep) {
    set_styles(el, &[
        ("opacity", "0"),
        ("transform", step.start_transform().as_str()),
        ("will-change", "opacity, transform"),
    ]);
}

fn show(el: &HtmlElement, step: &RevealStep) {
    set_styles(el, &[
        ("transition", step.transition().as_str()),
        ("opacity", "1"),
        ("transform", "none"),
    ]);
}
