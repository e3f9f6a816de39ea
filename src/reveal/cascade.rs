// cascade.rs - Staggered reveal timing
//
// A cascade turns a child index into a start delay. Each child animates
// from an offset, transparent start state to its resting state.

use crate::config::{RevealConfig, RevealPreset};

/// Smallest delay step a cascade accepts. Keeps delays strictly increasing.
pub const MIN_INCREMENT: f32 = 0.01;

/// Upper bound for any single timing value, seconds
pub const MAX_DELAY: f32 = 60.0;

// CSS `ease-out` is cubic-bezier(0, 0, 0.58, 1)
const EASE_OUT_X2: f32 = 0.58;

/// Where a child sits before its section is revealed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartState {
    pub dx: f32,
    pub dy: f32,
    pub scale: f32,
}

impl StartState {
    pub const RISE_20: Self = Self { dx: 0.0, dy: 20.0, scale: 1.0 };
    pub const RISE_40: Self = Self { dx: 0.0, dy: 40.0, scale: 1.0 };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cascade {
    base_delay: f32,
    increment: f32,
    duration: f32,
    from: StartState,
}

impl Cascade {
    /// Section header: badge, heading, lead paragraph
    pub const HEADER: Self = Self::preset(0.1, 0.1, 0.5, StartState::RISE_20);

    /// About-section highlight list, slides in from the right
    pub const HIGHLIGHTS: Self =
        Self::preset(0.5, 0.1, 0.5, StartState { dx: 20.0, dy: 0.0, scale: 1.0 });

    /// Skill grid cards, rise and grow
    pub const SKILL_CARDS: Self =
        Self::preset(0.1, 0.05, 0.4, StartState { dx: 0.0, dy: 30.0, scale: 0.9 });

    /// Project and blog cards
    pub const CARDS: Self = Self::preset(0.2, 0.1, 0.5, StartState::RISE_40);

    const fn preset(base_delay: f32, increment: f32, duration: f32, from: StartState) -> Self {
        Self { base_delay, increment, duration, from }
    }

    /// Non-finite timings fall back to the defaults. Everything else is
    /// clamped to `[0, MAX_DELAY]`, the increment to at least `MIN_INCREMENT`.
    pub fn new(base_delay: f32, increment: f32, duration: f32, from: StartState) -> Self {
        let fallback = RevealConfig::default();
        let increment = match finite("increment", increment, fallback.increment) {
            inc if inc < MIN_INCREMENT => {
                log::warn!("cascade increment {inc} too small, using {MIN_INCREMENT}");
                MIN_INCREMENT
            }
            inc => inc.min(MAX_DELAY),
        };
        Self {
            base_delay: finite("base delay", base_delay, fallback.base_delay).clamp(0.0, MAX_DELAY),
            increment,
            duration: finite("duration", duration, fallback.duration).clamp(0.0, MAX_DELAY),
            from,
        }
    }

    /// A named preset wins over the config's own timings
    pub fn from_config(cfg: &RevealConfig) -> Self {
        if let Some(preset) = cfg.preset {
            return preset.into();
        }
        Self::new(
            cfg.base_delay,
            cfg.increment,
            cfg.duration,
            StartState { dx: cfg.offset_x, dy: cfg.offset_y, scale: cfg.start_scale },
        )
    }

    #[inline]
    pub fn delay(&self, index: usize) -> f32 {
        self.base_delay + index as f32 * self.increment
    }

    pub fn steps(&self, count: usize) -> Vec<RevealStep> {
        (0..count)
            .map(|index| RevealStep {
                index,
                delay: self.delay(index),
                duration: self.duration,
                from: self.from,
            })
            .collect()
    }

    pub fn increment(&self) -> f32 {
        self.increment
    }
}

impl From<RevealPreset> for Cascade {
    fn from(preset: RevealPreset) -> Self {
        match preset {
            RevealPreset::Header => Self::HEADER,
            RevealPreset::Highlights => Self::HIGHLIGHTS,
            RevealPreset::SkillCards => Self::SKILL_CARDS,
            RevealPreset::Cards => Self::CARDS,
        }
    }
}

fn finite(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("cascade {name} {value} is not finite, using {fallback}");
        fallback
    }
}

/// One child's animation, from `from` to rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStep {
    pub index: usize,
    pub delay: f32,
    pub duration: f32,
    pub from: StartState,
}

/// Sampled visual state of a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepFrame {
    pub opacity: f32,
    pub dx: f32,
    pub dy: f32,
    pub scale: f32,
}

impl RevealStep {
    /// State `t` seconds after the section was revealed, on the same curve
    /// the CSS transition uses
    pub fn sample(&self, t: f32) -> StepFrame {
        let local = t - self.delay;
        let p = if local <= 0.0 {
            0.0
        } else if self.duration <= 0.0 || local >= self.duration {
            1.0
        } else {
            ease_out(local / self.duration)
        };
        let rest = 1.0 - p;
        StepFrame {
            opacity: p,
            dx: self.from.dx * rest,
            dy: self.from.dy * rest,
            scale: self.from.scale + (1.0 - self.from.scale) * p,
        }
    }

    /// CSS transform for the hidden state
    pub fn start_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.from.dx, self.from.dy, self.from.scale
        )
    }

    /// CSS transition that carries the child to rest
    pub fn transition(&self) -> String {
        format!(
            "opacity {d}s ease-out {delay}s, transform {d}s ease-out {delay}s",
            d = self.duration,
            delay = self.delay
        )
    }
}

/// Progress on the CSS `ease-out` curve for time fraction `x` in [0, 1]
fn ease_out(x: f32) -> f32 {
    // The bezier's x(s) is monotonic on [0, 1]; bisect for s, then y(s)
    let bx = |s: f32| 3.0 * (1.0 - s) * s * s * EASE_OUT_X2 + s * s * s;
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..24 {
        let mid = 0.5 * (lo + hi);
        if bx(mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let s = 0.5 * (lo + hi);
    s * s * (3.0 - 2.0 * s)
}
