use crate::event::{Control, InputEvent, OutputEvent, Prompt, Tone};
use crate::process::PuzzleInput;
use crate::renderer::Renderer;
use std::io::{stdin, stdout, Write};

/// Line-oriented front end: prints finished lines and reads commands from stdin.
#[derive(Default)]
pub struct TerminalRenderer {
    speaker: Option<String>,
    text: String,
    prompt: Option<Prompt>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, out: &OutputEvent) -> Option<InputEvent> {
        match out {
            OutputEvent::SetBackground { image } => {
                println!("[Background] {}", image);
                None
            }
            OutputEvent::ShowLine { speaker, .. } => {
                self.speaker = speaker.clone();
                self.text.clear();
                None
            }
            OutputEvent::Reveal { text } => {
                self.text.clone_from(text);
                None
            }
            OutputEvent::LineComplete => {
                match &self.speaker {
                    Some(name) => println!("[Dialogue] {}: {}", name, self.text),
                    None => println!("[Narration] {}", self.text),
                }
                self.wait_continue()
            }
            OutputEvent::ShowChoices { options } => {
                for (i, o) in options.iter().enumerate() {
                    println!("  [{}] {}", i + 1, o);
                }
                self.wait_choice(options.len())
            }
            OutputEvent::Prompt(prompt) => {
                print_prompt(prompt);
                self.prompt = Some(prompt.clone());
                None
            }
            OutputEvent::ClosePrompt => {
                self.prompt = None;
                None
            }
            OutputEvent::Readout { label, value } => {
                println!("  {} = {}", label, value);
                None
            }
            OutputEvent::Message { tone, text } => {
                let tag = match tone {
                    Tone::Success => "OK",
                    Tone::Error => "!!",
                    Tone::Info => "--",
                };
                println!("[{}] {}", tag, text);
                None
            }
            OutputEvent::Enable { id, enabled } => {
                println!("  ({} {})", id, if *enabled { "available" } else { "hidden" });
                None
            }
            OutputEvent::Toast { text } => {
                println!("[Toast] {}", text);
                None
            }
            OutputEvent::MissionUpdated { key, passed } => {
                println!("[Mission] {} {}", key, if *passed { "passed" } else { "failed" });
                None
            }
            OutputEvent::Effect { name } => {
                println!("[Effect] {}", name);
                None
            }
            OutputEvent::PlayMusic { path } => {
                println!("[PlayMusic] {}", path);
                None
            }
            OutputEvent::Results(summary) => {
                println!("=== {}% ({}/{}) {} ===", summary.percent, summary.correct, summary.total, summary.verdict);
                for e in &summary.entries {
                    println!("  {} - {}", e.label, if e.passed { "완료" } else { "실패" });
                }
                None
            }
            OutputEvent::Rating { value, committed } => {
                let stars: String = (0..*value).map(|_| '★').collect();
                println!("  {}{}", stars, if *committed { " (selected)" } else { "" });
                None
            }
            OutputEvent::End => {
                println!("[End]");
                None
            }
            _ => None,
        }
    }

    fn poll(&mut self) -> Option<InputEvent> {
        let line = read_line("? ");
        let cmd = line.trim();
        if cmd.eq_ignore_ascii_case("exit") {
            return Some(InputEvent::Exit);
        }
        let Some(prompt) = &self.prompt else {
            return Some(InputEvent::Tap);
        };
        Some(InputEvent::Puzzle(parse_command(prompt, cmd)))
    }
}

impl TerminalRenderer {
    fn wait_continue(&mut self) -> Option<InputEvent> {
        loop {
            let buf = read_line("> ");
            let trimmed = buf.trim_end();
            if trimmed.is_empty() {
                return Some(InputEvent::Tap);
            }
            if trimmed.eq_ignore_ascii_case("exit") {
                return Some(InputEvent::Exit);
            }
            println!("invalid");
        }
    }

    fn wait_choice(&mut self, len: usize) -> Option<InputEvent> {
        loop {
            let buf = read_line("Select> ");
            if buf.trim().eq_ignore_ascii_case("exit") {
                return Some(InputEvent::Exit);
            }
            if let Ok(n) = buf.trim().parse::<usize>() {
                if n >= 1 && n <= len {
                    return Some(InputEvent::ChoiceMade { index: n - 1 });
                }
            }
            println!("invalid");
        }
    }
}

/// End of input reads as "exit".
fn read_line(marker: &str) -> String {
    print!("{}", marker);
    let _ = stdout().flush();
    let mut buf = String::new();
    match stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => "exit".into(),
        Ok(_) => buf,
    }
}

fn print_prompt(prompt: &Prompt) {
    println!("--- {} ---", prompt.title);
    for line in &prompt.body {
        println!("  {}", line);
    }
    match &prompt.control {
        Control::Options(options) | Control::MultiSelect(options) => {
            for (i, o) in options.iter().enumerate() {
                println!("  [{}] {}", i + 1, o.label);
            }
        }
        Control::Slider { min, max, value, .. } => println!("  slider {}..={} at {}", min, max, value),
        Control::Text { placeholder } => println!("  <{}>", placeholder),
        Control::Tap => println!("  (press enter)"),
        Control::Stars { max } => println!("  rate 1..={}; :hover N, :leave", max),
        Control::None => {}
    }
    for a in &prompt.actions {
        println!("  :{} {}", a.id, a.label);
    }
}

/// Maps one typed command onto puzzle input for the open prompt.
pub fn parse_command(prompt: &Prompt, cmd: &str) -> PuzzleInput {
    if let Some(action) = cmd.strip_prefix(':') {
        let mut parts = action.split_whitespace();
        return match (parts.next().unwrap_or(""), parts.next()) {
            ("next", _) => PuzzleInput::Next,
            ("ok" | "confirm" | "submit" | "check", _) => PuzzleInput::Confirm,
            ("close" | "", _) => PuzzleInput::Dismiss,
            ("leave", _) => PuzzleInput::Leave,
            ("hover", Some(n)) => n.parse().map(PuzzleInput::Hover).unwrap_or(PuzzleInput::Leave),
            (other, _) => PuzzleInput::Pick(other.to_string()),
        };
    }
    let index = cmd.parse::<usize>().ok().filter(|n| *n >= 1).map(|n| n - 1);
    match &prompt.control {
        Control::Tap if cmd.is_empty() => PuzzleInput::Dismiss,
        Control::Options(options) => match index.and_then(|i| options.get(i)) {
            Some(o) => PuzzleInput::Pick(o.id.clone()),
            None => PuzzleInput::Pick(cmd.to_string()),
        },
        Control::MultiSelect(options) => match index.and_then(|i| options.get(i)) {
            Some(o) => PuzzleInput::Toggle(o.id.clone()),
            None => PuzzleInput::Toggle(cmd.to_string()),
        },
        Control::Slider { .. } | Control::Stars { .. } => match cmd.parse::<i32>() {
            Ok(v) => PuzzleInput::Value(v),
            Err(_) => PuzzleInput::Pick(cmd.to_string()),
        },
        Control::Text { .. } => PuzzleInput::Text(cmd.to_string()),
        _ if cmd.is_empty() => PuzzleInput::Dismiss,
        _ => PuzzleInput::Pick(cmd.to_string()),
    }
}
