pub mod config;
pub mod error;
pub mod event;
pub mod scene;
pub mod manager;
pub mod runtime;
pub mod executor;
pub mod process;
pub mod puzzle;
pub mod renderer;

pub use error::SequencerError;
pub use event::{InputEvent, OutputEvent};
pub use executor::{Advance, Sequencer};
pub use manager::SceneManager;
pub use process::{Game, Outcome, Process, ProcessCx, ProcessRegistry, PuzzleInput};
pub use runtime::Session;
pub use scene::{Choice, Effect, Line, Scene, SceneGraph, SceneId};
pub use renderer::Renderer;
pub use renderer::driver::{Driver, RunReport};
pub use renderer::terminal::TerminalRenderer;
