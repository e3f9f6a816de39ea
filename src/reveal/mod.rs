// reveal/ - Scroll-reveal latch
//
// A section starts hidden and is revealed by the first intersection sample
// that reports it on screen. The latch never resets while the section is
// mounted, so scrolling back past it does not replay the cascade.

mod cascade;

pub use cascade::{Cascade, MAX_DELAY, MIN_INCREMENT, RevealStep, StartState, StepFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

#[derive(Debug, Clone)]
pub struct Section {
    id: String,
    steps: Vec<RevealStep>,
    state: RevealState,
}

impl Section {
    pub fn new(id: impl Into<String>, cascade: &Cascade, children: usize) -> Self {
        Self {
            id: id.into(),
            steps: cascade.steps(children),
            state: RevealState::Hidden,
        }
    }

    /// Feed one intersection sample. Returns true only on the sample that
    /// flips the latch; the caller starts the cascade then.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        match (self.state, intersecting) {
            (RevealState::Hidden, true) => {
                self.state = RevealState::Revealed;
                log::debug!("section `{}` revealed ({} steps)", self.id, self.steps.len());
                true
            }
            _ => false,
        }
    }

    /// Reveal without a sample. Used when visibility can't be observed.
    pub fn force_reveal(&mut self) -> bool {
        self.observe(true)
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    /// Child `index`, `t` seconds after the reveal. Until the latch fires
    /// every child holds its start state whatever `t` is.
    pub fn frame(&self, index: usize, t: f32) -> Option<StepFrame> {
        let step = self.steps.get(index)?;
        let t = if self.is_revealed() { t } else { f32::NEG_INFINITY };
        Some(step.sample(t))
    }
}
