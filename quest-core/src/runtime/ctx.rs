use std::collections::VecDeque;
use rustc_hash::FxHashMap;
use serde::Serialize;
use crate::event::OutputEvent;
use crate::executor::timer::TimerHandle;
use crate::runtime::missions::MissionBoard;
use crate::scene::MissionDef;

/// Everything one play-through owns. A fresh session is a fresh game.
#[derive(Debug, Default)]
pub struct Session {
    pub missions: MissionBoard,
    pub dialogue_history: Vec<DialogueRecord>,
    flags: FxHashMap<String, bool>,
    vars: FxHashMap<String, String>,
    counters: FxHashMap<String, u32>,
    toast: Option<String>,
    pub(crate) toast_timer: Option<TimerHandle>,
    event_queue: VecDeque<OutputEvent>,
}

impl Session {
    pub fn new(missions: &[MissionDef]) -> Self {
        Self {
            missions: MissionBoard::new(missions),
            ..Self::default()
        }
    }

    pub fn push(&mut self, event: OutputEvent) {
        self.event_queue.push_back(event);
    }
    pub fn pop(&mut self) -> Option<OutputEvent> {
        self.event_queue.pop_front()
    }
    pub fn drain(&mut self) -> Vec<OutputEvent> {
        self.event_queue.drain(..).collect()
    }
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    /// Unset flags read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn counter(&self, key: &str) -> u32 {
        self.counters.get(key).copied().unwrap_or(0)
    }
    /// Increments and returns the new value.
    pub fn bump(&mut self, key: &str) -> u32 {
        let c = self.counters.entry(key.to_string()).or_insert(0);
        *c += 1;
        *c
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }
    pub(crate) fn set_toast(&mut self, text: Option<String>) {
        self.toast = text;
    }

    /// Passes or fails a mission and announces the change.
    pub fn record(&mut self, key: &str, passed: bool) {
        if self.missions.set(key, passed) {
            self.push(OutputEvent::MissionUpdated { key: key.to_string(), passed });
        } else {
            log::warn!("Unknown mission '{}'", key);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueRecord {
    pub speaker: Option<String>,
    pub text: String,
}
