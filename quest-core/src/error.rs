use thiserror::Error;
use crate::scene::SceneId;

/// Failures surfaced by the sequencer instead of silently stalling the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    #[error("unknown scene id {0}")]
    UnknownScene(SceneId),
    #[error("no choices are being shown")]
    NotShowingChoices,
    #[error("choice {index} out of range ({available} available)")]
    NoSuchChoice { index: usize, available: usize },
    #[error("no process registered under '{0}'")]
    UnknownProcess(String),
    #[error("no hook registered under '{0}'")]
    UnknownHook(String),
}

pub type Result<T> = std::result::Result<T, SequencerError>;
