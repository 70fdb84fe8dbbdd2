use std::sync::Arc;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Typing,
    WaitingForTap,
    ShowingChoices,
    InProcess,
}

/// Where the sequencer stands inside the current scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub scene: Option<Arc<Scene>>,
    pub line_index: usize,
    pub phase: Phase,
}

impl Cursor {
    pub fn new() -> Self {
        Self { scene: None, line_index: 0, phase: Phase::Idle }
    }

    pub fn reset(&mut self, scene: Arc<Scene>) {
        self.scene = Some(scene);
        self.line_index = 0;
        self.phase = Phase::Idle;
    }

    pub fn on_last_line(&self) -> bool {
        self.scene
            .as_ref()
            .is_some_and(|s| self.line_index + 1 >= s.lines.len())
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}
