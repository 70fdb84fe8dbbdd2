use serde::Serialize;
use crate::process::PuzzleInput;
use crate::runtime::ResultsSummary;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptOption {
    pub id: String,
    pub label: String,
}

impl PromptOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

/// The control a puzzle panel offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Control {
    /// Pick one; answered with `PuzzleInput::Pick`.
    Options(Vec<PromptOption>),
    /// Toggle several, then confirm.
    MultiSelect(Vec<PromptOption>),
    Slider { min: i32, max: i32, value: i32, step: i32 },
    Text { placeholder: String },
    /// Any tap dismisses.
    Tap,
    Stars { max: u8 },
    /// Nothing to answer; the panel only shows information.
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prompt {
    pub title: String,
    pub body: Vec<String>,
    pub control: Control,
    /// Extra buttons shown under the control (close, next, confirm ...).
    pub actions: Vec<PromptOption>,
}

impl Prompt {
    pub fn new(title: impl Into<String>, control: Control) -> Self {
        Self { title: title.into(), body: Vec::new(), control, actions: Vec::new() }
    }

    pub fn body(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    pub fn action(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.actions.push(PromptOption::new(id, label));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OutputEvent {
    SetBackground { image: String },
    ShowLine { speaker: Option<String>, portrait: Option<String> },
    /// Everything revealed so far of the current line.
    Reveal { text: String },
    LineComplete,
    ShowChoices { options: Vec<String> },
    ClearChoices,
    ClearDialogue,
    HideDialogue,

    Prompt(Prompt),
    ClosePrompt,
    Readout { label: String, value: String },
    Message { tone: Tone, text: String },
    /// Marks a control as reachable, e.g. a hidden "next" button.
    Enable { id: String, enabled: bool },
    Toast { text: String },
    HideToast,

    MissionUpdated { key: String, passed: bool },
    /// Named presentation effect (creature reveal, alert flash ...).
    Effect { name: String },
    PlayMusic { path: String },

    Results(ResultsSummary),
    Rating { value: u8, committed: bool },

    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Tap,
    ChoiceMade { index: usize },
    Puzzle(PuzzleInput),
    Exit,
}
