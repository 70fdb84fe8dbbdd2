//! Quiz-page stages shared by the single-page games.
//!
//! Each stage evaluates an answer onto the mission board, shows a success or error
//! message and unlocks its "next" button according to a [`Gate`].

use std::time::Duration;
use log::debug;

use quest_core::event::{Control, Prompt, PromptOption, Tone};
use quest_core::puzzle::rules::{Press, PressOrder, SlotBoard};
use quest_core::puzzle::{Gate, NextButton};
use quest_core::{Outcome, Process, ProcessCx, PuzzleInput, SceneId};

/// When a stage stops accepting answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lock {
    Never,
    /// After the first evaluated answer.
    OnAnswer,
    /// Once an answer passed.
    OnPass,
}

/// What a stage shows for a pass and for a failure.
#[derive(Debug, Clone)]
pub struct Verdicts {
    pub success: String,
    pub error: String,
}

impl Verdicts {
    pub fn new(success: impl Into<String>, error: impl Into<String>) -> Self {
        Self { success: success.into(), error: error.into() }
    }
}

/// Mission and "next" state shared by every stage.
struct Judge {
    mission: String,
    next: NextButton,
    lock: Lock,
    locked: bool,
}

impl Judge {
    fn new(mission: &str, gate: Gate, next: SceneId) -> Self {
        Self {
            mission: mission.to_string(),
            next: NextButton::new(gate, next),
            lock: Lock::Never,
            locked: false,
        }
    }

    fn accepts(&self) -> bool {
        if self.locked {
            debug!("stage '{}' is locked", self.mission);
        }
        !self.locked
    }

    fn judge(&mut self, cx: &mut ProcessCx<'_>, passed: bool, message: &str) {
        self.next.judge(cx, &self.mission, passed);
        cx.message(if passed { Tone::Success } else { Tone::Error }, message);
        self.locked = match self.lock {
            Lock::Never => false,
            Lock::OnAnswer => true,
            Lock::OnPass => passed,
        };
    }

    fn verdict(&mut self, cx: &mut ProcessCx<'_>, passed: bool, verdicts: &Verdicts) {
        let message = if passed { &verdicts.success } else { &verdicts.error };
        self.judge(cx, passed, message);
    }
}

const DOORS_OPENED: u32 = 1;

/// Title page: the start button opens the doors, then the guide follows.
pub struct Intro {
    title: String,
    doors: Duration,
    opening: bool,
    next: SceneId,
}

impl Intro {
    pub fn new(title: &str, doors: Duration, next: SceneId) -> Self {
        Self { title: title.to_string(), doors, opening: false, next }
    }
}

impl Process for Intro {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        cx.prompt(Prompt::new(self.title.clone(), Control::None).action("start", "시작하기"));
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        let start = matches!(&input, PuzzleInput::Confirm | PuzzleInput::Dismiss)
            || matches!(&input, PuzzleInput::Pick(id) if id == "start");
        if start && !self.opening {
            self.opening = true;
            cx.close_prompt();
            cx.effect("doors_open");
            cx.schedule(self.doors, DOORS_OPENED);
        }
        Outcome::Stay
    }

    fn on_timer(&mut self, _cx: &mut ProcessCx<'_>, tag: u32) -> Outcome {
        if tag == DOORS_OPENED {
            Outcome::Goto(self.next)
        } else {
            Outcome::Stay
        }
    }
}

/// Pick one option; one option is right.
pub struct ChoiceStage {
    prompt: Prompt,
    correct: String,
    verdicts: Verdicts,
    judge: Judge,
}

impl ChoiceStage {
    pub fn new(mission: &str, title: &str, gate: Gate, next: SceneId) -> Self {
        Self {
            prompt: Prompt::new(title, Control::Options(Vec::new())),
            correct: String::new(),
            verdicts: Verdicts::new("", ""),
            judge: Judge::new(mission, gate, next),
        }
    }

    pub fn body(mut self, line: &str) -> Self {
        self.prompt = self.prompt.body(line);
        self
    }

    pub fn option(mut self, id: &str, label: &str) -> Self {
        if let Control::Options(options) = &mut self.prompt.control {
            options.push(PromptOption::new(id, label));
        }
        self
    }

    pub fn correct(mut self, id: &str, verdicts: Verdicts) -> Self {
        self.correct = id.to_string();
        self.verdicts = verdicts;
        self
    }

    pub fn lock(mut self, lock: Lock) -> Self {
        self.judge.lock = lock;
        self
    }
}

impl Process for ChoiceStage {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        cx.prompt(self.prompt.clone().action("next", "다음"));
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Pick(id) => {
                let offered = matches!(&self.prompt.control, Control::Options(o) if o.iter().any(|o| o.id == id));
                if offered && self.judge.accepts() {
                    let passed = id == self.correct;
                    self.judge.verdict(cx, passed, &self.verdicts);
                }
                Outcome::Stay
            }
            PuzzleInput::Next => self.judge.next.press(),
            _ => Outcome::Stay,
        }
    }
}

pub type SliderReadout = fn(i32) -> Vec<(&'static str, String)>;
pub type SliderJudge = fn(i32) -> Result<(), String>;

/// A slider whose value is judged live or on "check".
pub struct SliderStage {
    title: String,
    body: Vec<String>,
    min: i32,
    max: i32,
    step: i32,
    value: i32,
    readout: SliderReadout,
    rule: SliderJudge,
    success: String,
    live: bool,
    judge: Judge,
}

impl SliderStage {
    pub fn new(mission: &str, title: &str, gate: Gate, next: SceneId) -> Self {
        Self {
            title: title.to_string(),
            body: Vec::new(),
            min: 0,
            max: 100,
            step: 1,
            value: 0,
            readout: |_| Vec::new(),
            rule: |_| Ok(()),
            success: String::new(),
            live: false,
            judge: Judge::new(mission, gate, next),
        }
    }

    pub fn body(mut self, line: &str) -> Self {
        self.body.push(line.to_string());
        self
    }

    pub fn range(mut self, min: i32, max: i32, step: i32) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self.value = min;
        self
    }

    pub fn readout(mut self, f: SliderReadout) -> Self {
        self.readout = f;
        self
    }

    /// `Err` carries the message shown for that value.
    pub fn rule(mut self, f: SliderJudge, success: &str) -> Self {
        self.rule = f;
        self.success = success.to_string();
        self
    }

    /// Judge as the value moves and only report a pass.
    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }

    pub fn lock(mut self, lock: Lock) -> Self {
        self.judge.lock = lock;
        self
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    fn show(&self, cx: &mut ProcessCx<'_>) {
        for (label, value) in (self.readout)(self.value) {
            cx.readout(label, value);
        }
    }

    fn check(&mut self, cx: &mut ProcessCx<'_>) {
        if !self.judge.accepts() {
            return;
        }
        match (self.rule)(self.value) {
            Ok(()) => {
                let success = self.success.clone();
                self.judge.judge(cx, true, &success);
            }
            Err(message) if !self.live => self.judge.judge(cx, false, &message),
            Err(_) => {}
        }
    }
}

impl Process for SliderStage {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        let control = Control::Slider { min: self.min, max: self.max, value: self.value, step: self.step };
        let mut prompt = Prompt::new(self.title.clone(), control);
        prompt.body = self.body.clone();
        if !self.live {
            prompt = prompt.action("check", "확인");
        }
        cx.prompt(prompt.action("next", "다음"));
        self.show(cx);
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Value(v) => {
                self.value = v.clamp(self.min, self.max);
                self.show(cx);
                if self.live {
                    self.check(cx);
                }
                Outcome::Stay
            }
            PuzzleInput::Pick(id) if id == "minus" || id == "plus" => {
                let delta = if id == "plus" { self.step } else { -self.step };
                self.value = (self.value + delta).clamp(self.min, self.max);
                self.show(cx);
                if self.live {
                    self.check(cx);
                }
                Outcome::Stay
            }
            PuzzleInput::Confirm if !self.live => {
                self.check(cx);
                Outcome::Stay
            }
            PuzzleInput::Next => self.judge.next.press(),
            _ => Outcome::Stay,
        }
    }
}

pub type TextJudge = fn(&str) -> bool;

/// Free text checked on confirm.
pub struct TextStage {
    title: String,
    body: Vec<String>,
    placeholder: String,
    exact_len: Option<usize>,
    input: String,
    rule: TextJudge,
    verdicts: Verdicts,
    judge: Judge,
}

impl TextStage {
    pub fn new(mission: &str, title: &str, gate: Gate, next: SceneId) -> Self {
        Self {
            title: title.to_string(),
            body: Vec::new(),
            placeholder: String::new(),
            exact_len: None,
            input: String::new(),
            rule: |_| false,
            verdicts: Verdicts::new("", ""),
            judge: Judge::new(mission, gate, next),
        }
    }

    pub fn body(mut self, line: &str) -> Self {
        self.body.push(line.to_string());
        self
    }

    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = text.to_string();
        self
    }

    /// Confirm stays disabled until the input has exactly `n` characters.
    pub fn exact_len(mut self, n: usize) -> Self {
        self.exact_len = Some(n);
        self
    }

    pub fn rule(mut self, f: TextJudge, verdicts: Verdicts) -> Self {
        self.rule = f;
        self.verdicts = verdicts;
        self
    }

    pub fn lock(mut self, lock: Lock) -> Self {
        self.judge.lock = lock;
        self
    }

    fn confirm_enabled(&self) -> bool {
        self.exact_len.is_none_or(|n| self.input.chars().count() == n)
    }
}

impl Process for TextStage {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        let mut prompt = Prompt::new(self.title.clone(), Control::Text { placeholder: self.placeholder.clone() });
        prompt.body = self.body.clone();
        cx.prompt(prompt.action("check", "확인").action("next", "다음"));
        if self.exact_len.is_some() {
            cx.enable("check", false);
        }
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Text(text) => {
                self.input = text.trim_end_matches(['\r', '\n']).to_string();
                if self.exact_len.is_some() {
                    cx.enable("check", self.confirm_enabled() && !self.judge.locked);
                }
                Outcome::Stay
            }
            PuzzleInput::Confirm => {
                if !self.confirm_enabled() {
                    debug!("confirm disabled for {:?}", self.input);
                } else if self.judge.accepts() {
                    let passed = (self.rule)(&self.input);
                    self.judge.verdict(cx, passed, &self.verdicts);
                    if self.judge.locked && self.exact_len.is_some() {
                        cx.enable("check", false);
                    }
                }
                Outcome::Stay
            }
            PuzzleInput::Next => self.judge.next.press(),
            _ => Outcome::Stay,
        }
    }
}

/// Switches pressed in a required order; a wrong press starts over.
pub struct OrderStage {
    title: String,
    switches: Vec<PromptOption>,
    order: PressOrder,
    verdicts: Verdicts,
    judge: Judge,
}

impl OrderStage {
    pub fn new(mission: &str, title: &str, order: PressOrder, gate: Gate, next: SceneId) -> Self {
        Self {
            title: title.to_string(),
            switches: Vec::new(),
            order,
            verdicts: Verdicts::new("", ""),
            judge: Judge::new(mission, gate, next),
        }
    }

    pub fn switch(mut self, id: &str, label: &str) -> Self {
        self.switches.push(PromptOption::new(id, label));
        self
    }

    pub fn verdicts(mut self, verdicts: Verdicts) -> Self {
        self.verdicts = verdicts;
        self
    }

    fn show(&self, cx: &mut ProcessCx<'_>) {
        cx.prompt(
            Prompt::new(self.title.clone(), Control::Options(self.switches.clone()))
                .action("reset", "초기화")
                .action("next", "다음"),
        );
    }
}

impl Process for OrderStage {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        self.order.reset();
        self.show(cx);
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Pick(id) if id == "reset" => {
                self.order.reset();
                self.show(cx);
            }
            PuzzleInput::Pick(id) => {
                if !self.switches.iter().any(|s| s.id == id) || self.order.is_complete() {
                    return Outcome::Stay;
                }
                if self.order.pressed().iter().any(|p| *p == id) {
                    debug!("switch '{}' already on", id);
                    return Outcome::Stay;
                }
                match self.order.press(&id) {
                    Press::Correct => cx.readout(id, "on"),
                    Press::Complete => {
                        cx.readout(id, "on");
                        let success = self.verdicts.success.clone();
                        self.judge.judge(cx, true, &success);
                    }
                    Press::Wrong => {
                        let error = self.verdicts.error.clone();
                        self.judge.judge(cx, false, &error);
                        for s in &self.switches {
                            cx.readout(s.id.clone(), "off");
                        }
                    }
                }
            }
            PuzzleInput::Next => return self.judge.next.press(),
            _ => {}
        }
        Outcome::Stay
    }
}

/// Items placed into ordered slots; judged once every slot is filled.
pub struct SlotStage {
    title: String,
    items: Vec<PromptOption>,
    board: SlotBoard,
    verdicts: Verdicts,
    judge: Judge,
}

impl SlotStage {
    pub fn new(mission: &str, title: &str, expected: &[&str], gate: Gate, next: SceneId) -> Self {
        Self {
            title: title.to_string(),
            items: Vec::new(),
            board: SlotBoard::new(expected.iter().map(|s| s.to_string()).collect()),
            verdicts: Verdicts::new("", ""),
            judge: Judge::new(mission, gate, next),
        }
    }

    pub fn item(mut self, id: &str, label: &str) -> Self {
        self.items.push(PromptOption::new(id, label));
        self
    }

    pub fn verdicts(mut self, verdicts: Verdicts) -> Self {
        self.verdicts = verdicts;
        self
    }

    fn show_slots(&self, cx: &mut ProcessCx<'_>) {
        let filled: Vec<&str> = self.board.slots().iter().map(|s| s.as_deref().unwrap_or("_")).collect();
        cx.readout("slots", filled.join(" → "));
    }
}

impl Process for SlotStage {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome {
        self.board.clear();
        cx.prompt(
            Prompt::new(self.title.clone(), Control::Options(self.items.clone()))
                .action("clear", "다시 배치")
                .action("next", "다음"),
        );
        self.show_slots(cx);
        Outcome::Stay
    }

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome {
        match input {
            PuzzleInput::Pick(id) if id == "clear" => {
                self.board.clear();
                self.show_slots(cx);
            }
            PuzzleInput::Pick(id) => {
                if !self.items.iter().any(|i| i.id == id) {
                    return Outcome::Stay;
                }
                let verdict = self.board.place(&id);
                self.show_slots(cx);
                if let Some(passed) = verdict {
                    self.judge.verdict(cx, passed, &self.verdicts);
                }
            }
            PuzzleInput::Next => return self.judge.next.press(),
            _ => {}
        }
        Outcome::Stay
    }
}
