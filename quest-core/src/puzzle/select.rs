//! Reusable selection puzzles: pick the right option, select everything, confirm, tap through.

use std::collections::BTreeSet;
use std::time::Duration;
use log::debug;

use crate::event::{Control, Prompt, PromptOption};
use crate::process::{Outcome, Process, ProcessCx, PuzzleInput};
use crate::runtime::Session;
use crate::scene::{Line, Scene, SceneId};

pub type OptionsFn = fn(&Session) -> Vec<PromptOption>;
pub type RewardFn = fn(&Session, &str) -> Vec<Line>;
pub type AcceptFn = fn(&mut Session, &str);

/// Shows `lines` before moving on to `next`, or moves on directly when there are none.
pub fn then(lines: Vec<Line>, next: SceneId) -> Outcome {
    if lines.is_empty() {
        Outcome::Goto(next)
    } else {
        Outcome::Splice(Scene::transient(lines, next))
    }
}

/// One or more correct options among distractors. Wrong picks toast and stay.
pub struct PickOne {
    title: String,
    body: Vec<String>,
    options: Vec<PromptOption>,
    options_with: Option<OptionsFn>,
    shown: Vec<PromptOption>,
    accept: Vec<String>,
    wrong: Vec<(String, String)>,
    otherwise: String,
    lines: Vec<Line>,
    reward_with: Option<RewardFn>,
    on_accept: Option<AcceptFn>,
    mission: Option<String>,
    misses: Option<String>,
    next: SceneId,
}

impl PickOne {
    pub fn new(title: impl Into<String>, next: SceneId) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
            options: Vec::new(),
            options_with: None,
            shown: Vec::new(),
            accept: Vec::new(),
            wrong: Vec::new(),
            otherwise: String::new(),
            lines: Vec::new(),
            reward_with: None,
            on_accept: None,
            mission: None,
            misses: None,
            next,
        }
    }

    pub fn body(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    pub fn option(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(PromptOption::new(id, label));
        self
    }

    /// Builds the option list from the session when the puzzle starts.
    pub fn options_with(mut self, f: OptionsFn) -> Self {
        self.options_with = Some(f);
        self
    }

    pub fn correct(mut self, id: impl Into<String>) -> Self {
        self.accept.push(id.into());
        self
    }

    /// Toast for one specific wrong option.
    pub fn wrong(mut self, id: impl Into<String>, toast: impl Into<String>) -> Self {
        self.wrong.push((id.into(), toast.into()));
        self
    }

    /// Toast for every other wrong option.
    pub fn otherwise(mut self, toast: impl Into<String>) -> Self {
        self.otherwise = toast.into();
        self
    }

    pub fn reward(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn reward_with(mut self, f: RewardFn) -> Self {
        self.reward_with = Some(f);
        self
    }

    pub fn on_accept(mut self, f: AcceptFn) -> Self {
        self.on_accept = Some(f);
        self
    }

    /// Mission passed on the right pick.
    pub fn mission(mut self, key: impl Into<String>) -> Self {
        self.mission = Some(key.into());
        self
    }

    /// Session counter bumped on every wrong pick.
    pub fn count_misses(mut self, key: impl Into<String>) -> Self {
        self.misses = Some(key.into());
        self
    }

    fn pick(&mut self, cx: &mut ProcessCx<'_>, id: &str) -> Outcome {
        if !self.shown.iter().any(|o| o.id == id) {
            debug!("'{}' is not offered", id);
            return Outcome::Stay;
        }
        if self.accept.iter().any(|a| a == id) {
            if let Some(key) = &self.mission {
                cx.pass(key);
            }
            if let Some(f) = self.on_accept {
                f(cx.session, id);
            }
            let lines = match self.reward_with {
                Some(f) => f(cx.session, id),
                None => self.lines.clone(),
            };
            return then(lines, self.next);
        }

        if let Some(key) = &self.misses {
            cx.session.bump(key);
        }
        let toast = self.wrong.iter()
            .find(|(w, _)| w == id)
            .map(|(_, t)| t.clone())
            .unwrap_or_else(|| self.otherwise.clone());
        if !toast.is_empty() {
            cx.toast(toast);
        }
        Outcome::Stay
    }
}

impl Process for PickOne {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        self.shown = match self.options_with {
            Some(f) => f(cx.session),
            None => self.options.clone(),
        };
        let mut prompt = Prompt::new(self.title.clone(), Control::Options(self.shown.clone()));
        prompt.body = self.body.clone();
        cx.prompt(prompt);
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Pick(id) => self.pick(cx, &id),
            _ => Outcome::Stay,
        }
    }
}

/// Toggle items on and off; confirming succeeds only with every item selected.
pub struct MultiSelectAll {
    title: String,
    items: Vec<PromptOption>,
    selected: BTreeSet<String>,
    incomplete: String,
    lines: Vec<Line>,
    next: SceneId,
}

impl MultiSelectAll {
    pub fn new(title: impl Into<String>, next: SceneId) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            selected: BTreeSet::new(),
            incomplete: String::new(),
            lines: Vec::new(),
            next,
        }
    }

    pub fn item(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(PromptOption::new(id, label));
        self
    }

    /// Toast when confirming with items left out.
    pub fn incomplete(mut self, toast: impl Into<String>) -> Self {
        self.incomplete = toast.into();
        self
    }

    pub fn reward(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

impl Process for MultiSelectAll {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        self.selected.clear();
        cx.prompt(
            Prompt::new(self.title.clone(), Control::MultiSelect(self.items.clone()))
                .action("confirm", "확인"),
        );
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Toggle(id) => {
                if !self.items.iter().any(|i| i.id == id) {
                    return Outcome::Stay;
                }
                let on = if self.selected.remove(&id) {
                    false
                } else {
                    self.selected.insert(id.clone());
                    true
                };
                cx.readout(id, if on { "on" } else { "off" });
                Outcome::Stay
            }
            PuzzleInput::Confirm => {
                if self.selected.len() == self.items.len() {
                    then(self.lines.clone(), self.next)
                } else {
                    cx.toast(self.incomplete.clone());
                    Outcome::Stay
                }
            }
            _ => Outcome::Stay,
        }
    }
}

/// A single confirm button.
pub struct ConfirmOnly {
    title: String,
    body: Vec<String>,
    label: String,
    next: SceneId,
}

impl ConfirmOnly {
    pub fn new(title: impl Into<String>, next: SceneId) -> Self {
        Self { title: title.into(), body: Vec::new(), label: "확인".into(), next }
    }

    pub fn body(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Process for ConfirmOnly {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        let mut prompt = Prompt::new(self.title.clone(), Control::None).action("confirm", self.label.clone());
        prompt.body = self.body.clone();
        cx.prompt(prompt);
        Outcome::Stay
    }

    fn on_input(&mut self, _cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Confirm => Outcome::Goto(self.next),
            PuzzleInput::Pick(id) if id == "confirm" => Outcome::Goto(self.next),
            _ => Outcome::Stay,
        }
    }
}

const REVEAL: u32 = 1;

/// A full-screen overlay that waits for one tap, optionally after a delay.
pub struct TapThrough {
    prompt: Prompt,
    delay: Option<Duration>,
    reveal_effect: Option<String>,
    tap_effect: Option<String>,
    shown: bool,
    lines: Vec<Line>,
    next: SceneId,
}

impl TapThrough {
    pub fn new(title: impl Into<String>, next: SceneId) -> Self {
        Self {
            prompt: Prompt::new(title, Control::Tap),
            delay: None,
            reveal_effect: None,
            tap_effect: None,
            shown: false,
            lines: Vec::new(),
            next,
        }
    }

    pub fn body(mut self, line: impl Into<String>) -> Self {
        self.prompt = self.prompt.body(line);
        self
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Effect emitted together with the overlay.
    pub fn on_reveal(mut self, effect: impl Into<String>) -> Self {
        self.reveal_effect = Some(effect.into());
        self
    }

    /// Effect emitted when the overlay is dismissed.
    pub fn on_tap(mut self, effect: impl Into<String>) -> Self {
        self.tap_effect = Some(effect.into());
        self
    }

    pub fn reward(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    fn reveal(&mut self, cx: &mut ProcessCx<'_>) {
        self.shown = true;
        if let Some(effect) = &self.reveal_effect {
            cx.effect(effect.clone());
        }
        cx.prompt(self.prompt.clone());
    }
}

impl Process for TapThrough {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        match self.delay {
            Some(delay) => {
                cx.schedule(delay, REVEAL);
            }
            None => self.reveal(cx),
        }
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        if !self.shown {
            return Outcome::Stay;
        }
        match input {
            PuzzleInput::Dismiss | PuzzleInput::Confirm | PuzzleInput::Next => {
                cx.close_prompt();
                if let Some(effect) = &self.tap_effect {
                    cx.effect(effect.clone());
                }
                then(self.lines.clone(), self.next)
            }
            _ => Outcome::Stay,
        }
    }

    fn on_timer(&mut self, cx: &mut ProcessCx<'_>, tag: u32) -> Outcome {
        if tag == REVEAL && !self.shown {
            self.reveal(cx);
        }
        Outcome::Stay
    }
}
