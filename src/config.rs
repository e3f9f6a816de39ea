// config.rs - Configuration surfaces exposed to the page
//
// Two shapes only: the reveal wrapper config and the decor scene config.
// Both arrive as plain JS objects with every field optional.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::{Error, Result};

pub const DEFAULT_COLOR: Rgb = Rgb { r: 0x14, g: 0xb8, b: 0xa6 };

/// 8-bit sRGB color parsed from `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as floats in [0, 1]
    pub fn to_unit(self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        match hex.len() {
            3 => {
                // #abc == #aabbcc
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Rgb::new(
                    short(0).map_err(|_| bad())?,
                    short(1).map_err(|_| bad())?,
                    short(2).map_err(|_| bad())?,
                ))
            }
            6 => Ok(Rgb::new(
                channel(0..2).map_err(|_| bad())?,
                channel(2..4).map_err(|_| bad())?,
                channel(4..6).map_err(|_| bad())?,
            )),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Which edge of its section a decor scene hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    #[default]
    Right,
}

/// `{ position: "left" | "right", color: "#rrggbb" }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecorConfig {
    pub position: Side,
    pub color: String,
}

impl Default for DecorConfig {
    fn default() -> Self {
        Self {
            position: Side::Right,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl DecorConfig {
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn rgb(&self) -> Result<Rgb> {
        self.color.parse()
    }
}

/// Named cascade timings the page uses, `"header"`, `"skillCards"`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevealPreset {
    Header,
    Highlights,
    SkillCards,
    Cards,
}

/// Reveal wrapper options. Times are in seconds, offsets in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    /// Intersection root margin. Negative values shrink the viewport, so the
    /// section must be this far inside it before it counts as visible.
    pub margin: f32,
    /// When set, replaces every timing and offset field below
    pub preset: Option<RevealPreset>,
    pub base_delay: f32,
    pub increment: f32,
    pub duration: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub start_scale: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            margin: -100.0,
            preset: None,
            base_delay: 0.5,
            increment: 0.1,
            duration: 0.5,
            offset_x: 0.0,
            offset_y: 40.0,
            start_scale: 1.0,
        }
    }
}

impl RevealConfig {
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| Error::Config(e.to_string()))
    }

    /// Margin in the CSS form IntersectionObserver expects
    pub fn root_margin(&self) -> String {
        format!("{}px", self.margin)
    }
}
