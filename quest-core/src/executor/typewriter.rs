/// Result of one reveal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// More characters remain.
    Typing,
    /// The line just became fully visible. Reported once per line.
    Finished,
    /// Nothing to do.
    Idle,
}

/// Character-by-character reveal of one dialogue line.
#[derive(Debug, Clone)]
pub struct Typewriter {
    full_text: String,
    chars: Vec<char>,
    shown: usize,
    line_break: String,

    display_text: String,
    skip_requested: bool,
    finished: bool,
}

impl Typewriter {
    pub fn new(line_break: impl Into<String>) -> Self {
        Self {
            full_text: String::new(),
            chars: Vec::new(),
            shown: 0,
            line_break: line_break.into(),

            display_text: String::new(),
            skip_requested: false,
            finished: true,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.full_text = text.to_string();
        self.chars = text.chars().collect();
        self.shown = 0;
        self.display_text.clear();
        self.skip_requested = false;
        self.finished = false;
    }

    /// Reveals the next character, or everything when a skip is pending.
    pub fn step(&mut self) -> Reveal {
        if self.finished {
            return Reveal::Idle;
        }
        if self.skip_requested {
            self.shown = self.chars.len();
            self.display_text = self.render(&self.full_text);
        } else if self.shown < self.chars.len() {
            let c = self.chars[self.shown];
            if c == '\n' {
                self.display_text.push_str(&self.line_break);
            } else {
                self.display_text.push(c);
            }
            self.shown += 1;
        }

        if self.shown >= self.chars.len() {
            self.finished = true;
            self.skip_requested = false;
            Reveal::Finished
        } else {
            Reveal::Typing
        }
    }

    /// Idempotent; honoured by the next [`step`](Self::step).
    pub fn request_skip(&mut self) {
        if !self.finished {
            self.skip_requested = true;
        }
    }

    pub fn skip_requested(&self) -> bool {
        self.skip_requested
    }

    pub fn is_active(&self) -> bool {
        !self.finished
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// `text` as the dialogue surface shows it once complete.
    pub fn render(&self, text: &str) -> String {
        text.replace('\n', &self.line_break)
    }

    pub fn clear(&mut self) {
        self.full_text.clear();
        self.chars.clear();
        self.shown = 0;
        self.display_text.clear();
        self.skip_requested = false;
        self.finished = true;
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new("\n")
    }
}
