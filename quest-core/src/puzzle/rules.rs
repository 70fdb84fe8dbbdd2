//! Literal pass/fail rules of the bundled puzzles.
//!
//! Everything here is pure: no session, no timers, no events.

use once_cell::sync::Lazy;
use regex::Regex;

// ---- ventilation ----

pub const VENT_START_PPM: i32 = 1200;
pub const VENT_PPM_PER_MINUTE: i32 = 200;
pub const VENT_MIN_MINUTES: i32 = 3;

/// Predicted CO₂ after `minutes` of ventilation, floored at zero.
pub fn predicted_co2(minutes: i32) -> i32 {
    (VENT_START_PPM - minutes * VENT_PPM_PER_MINUTE).max(0)
}

pub fn ventilation_passes(minutes: i32) -> bool {
    minutes >= VENT_MIN_MINUTES
}

// ---- curtain ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurtainVerdict {
    Pass,
    TooDark,
    TooBright,
}

pub const LUX_PER_PERCENT: i32 = 7;

pub fn curtain_lux(percent: i32) -> i32 {
    percent * LUX_PER_PERCENT
}

/// Open between 40 and 50 percent inclusive.
pub fn curtain(percent: i32) -> CurtainVerdict {
    if percent < 40 {
        CurtainVerdict::TooDark
    } else if percent > 50 {
        CurtainVerdict::TooBright
    } else {
        CurtainVerdict::Pass
    }
}

// ---- codes and typed answers ----

pub const DOOR_PASSWORD: &str = "0421";

/// Exact match, no trimming.
pub fn door_password(input: &str) -> bool {
    input == DOOR_PASSWORD
}

static VOICE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\s,!"']"#).expect("static pattern"));

/// Strips whitespace and the punctuation a player tends to type around a command.
pub fn normalize_voice(input: &str) -> String {
    VOICE_NOISE.replace_all(input.trim(), "").into_owned()
}

pub fn voice_command(input: &str) -> bool {
    let n = normalize_voice(input);
    n.contains("베스틴") && n.contains("집을열어줘")
}

pub const BUTLER_KEYWORDS: [&str; 4] = ["보안", "편의", "안전", "절약"];
pub const BUTLER_NAMES: [&str; 3] = ["AI", "ai", "집사"];

/// All four keywords plus one way of naming the butler, whitespace ignored.
pub fn butler_answer(input: &str) -> bool {
    let answer: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    BUTLER_KEYWORDS.iter().all(|k| answer.contains(k))
        && BUTLER_NAMES.iter().any(|k| answer.contains(k))
}

// ---- colour temperature ----

pub const KELVIN_COOL: u32 = 5700;
pub const KELVIN_WARM: u32 = 3000;
pub const SUNSET: &str = "노을빛";

/// Slider position 0 (top, cool) ..= 100 (bottom, warm) to kelvin.
pub fn kelvin(value: i32) -> u32 {
    let t = f64::from(value.clamp(0, 100)) / 100.0;
    (f64::from(KELVIN_COOL) - f64::from(KELVIN_COOL - KELVIN_WARM) * t).round() as u32
}

/// Inverse of [`kelvin`], clamped to the slider range.
pub fn slider_for_kelvin(k: u32) -> i32 {
    let t = (f64::from(KELVIN_COOL) - f64::from(k)) / f64::from(KELVIN_COOL - KELVIN_WARM);
    ((t * 100.0).round() as i32).clamp(0, 100)
}

pub fn kelvin_label(k: u32) -> &'static str {
    if k >= 5200 {
        "차가운 흰색"
    } else if k >= 4200 {
        "중성 백색"
    } else if k >= 3600 {
        "따뜻한 백색"
    } else {
        SUNSET
    }
}

// ---- ordering ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// Right button, more to go.
    Correct,
    /// Right button and the sequence is done.
    Complete,
    /// Wrong button; progress was reset.
    Wrong,
}

/// Buttons that must be pressed in one fixed order. A wrong press starts over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressOrder {
    expected: Vec<String>,
    done: usize,
}

impl PressOrder {
    pub fn new(expected: Vec<String>) -> Self {
        Self { expected, done: 0 }
    }

    /// Order by ascending weight, e.g. switches by wattage.
    pub fn ascending<'a>(items: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut items: Vec<(&str, u32)> = items.into_iter().collect();
        items.sort_by_key(|(_, w)| *w);
        Self::new(items.into_iter().map(|(id, _)| id.to_string()).collect())
    }

    pub fn press(&mut self, id: &str) -> Press {
        if self.is_complete() {
            return Press::Complete;
        }
        if self.expected[self.done] == id {
            self.done += 1;
            if self.is_complete() { Press::Complete } else { Press::Correct }
        } else {
            self.done = 0;
            Press::Wrong
        }
    }

    /// Ids already pressed in the right order.
    pub fn pressed(&self) -> &[String] {
        &self.expected[..self.done]
    }

    pub fn is_complete(&self) -> bool {
        self.done == self.expected.len()
    }

    pub fn reset(&mut self) {
        self.done = 0;
    }
}

/// Items dropped into numbered slots, judged once every slot is filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBoard {
    expected: Vec<String>,
    slots: Vec<Option<String>>,
}

impl SlotBoard {
    pub fn new(expected: Vec<String>) -> Self {
        let slots = vec![None; expected.len()];
        Self { expected, slots }
    }

    /// Puts `id` into the first free slot.
    ///
    /// `None` while slots remain free or when the item was already placed;
    /// `Some(correct)` when the last slot fills.
    pub fn place(&mut self, id: &str) -> Option<bool> {
        if self.slots.iter().flatten().any(|s| s == id) {
            return None;
        }
        let free = self.slots.iter_mut().find(|s| s.is_none())?;
        *free = Some(id.to_string());
        if self.slots.iter().all(Option::is_some) {
            Some(self.is_correct())
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_correct(&self) -> bool {
        self.slots.iter().zip(&self.expected).all(|(s, e)| s.as_deref() == Some(e.as_str()))
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}
