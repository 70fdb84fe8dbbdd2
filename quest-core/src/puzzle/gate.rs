use crate::process::{Outcome, ProcessCx};
use crate::scene::SceneId;

pub const NEXT: &str = "next";

/// When a stage's "next" control becomes reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// After any evaluated answer, right or wrong.
    Answered,
    /// Only while the last evaluation passed.
    Passed,
}

/// The "next" button of a quiz stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextButton {
    gate: Gate,
    next: SceneId,
    enabled: bool,
}

impl NextButton {
    pub fn new(gate: Gate, next: SceneId) -> Self {
        Self { gate, next, enabled: false }
    }

    pub fn answered(next: SceneId) -> Self {
        Self::new(Gate::Answered, next)
    }

    pub fn passed(next: SceneId) -> Self {
        Self::new(Gate::Passed, next)
    }

    /// Records an evaluation on the mission board and updates the button.
    pub fn judge(&mut self, cx: &mut ProcessCx<'_>, mission: &str, passed: bool) {
        if passed { cx.pass(mission) } else { cx.fail(mission) }
        let enabled = match self.gate {
            Gate::Answered => true,
            Gate::Passed => passed,
        };
        if enabled != self.enabled {
            self.enabled = enabled;
            cx.enable(NEXT, enabled);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `Goto(next)` when enabled; a press on a hidden button does nothing.
    pub fn press(&self) -> Outcome {
        if self.enabled {
            Outcome::Goto(self.next)
        } else {
            log::debug!("next pressed while hidden");
            Outcome::Stay
        }
    }
}
