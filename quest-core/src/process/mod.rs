//! The seam between the sequencer and per-scene puzzle logic.
//!
//! A scene names a process by key; the game registers a factory for that key. When the
//! scene's lines run out the sequencer builds the process, routes puzzle input and
//! process timers to it, and applies the [`Outcome`] it returns.

pub(crate) mod cx;

pub use cx::ProcessCx;

use std::sync::Arc;
use std::time::Duration;
use rustc_hash::FxHashMap;

use crate::config::SequencerConfig;
use crate::executor::Sequencer;
use crate::runtime::Session;
use crate::scene::{Scene, SceneGraph, SceneId};

/// Player input aimed at the active puzzle panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PuzzleInput {
    Pick(String),
    Toggle(String),
    Value(i32),
    Text(String),
    Confirm,
    Next,
    Hover(u8),
    Leave,
    Dismiss,
}

/// What the sequencer does after a process call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Keep the process active and wait.
    Stay,
    Goto(SceneId),
    /// Show a transient scene, typically a reward dialogue ending in a `next` id.
    Splice(Scene),
    /// The game is over.
    End,
}

pub trait Process {
    fn start(&mut self, cx: &mut ProcessCx<'_>) -> Outcome;

    fn on_input(&mut self, cx: &mut ProcessCx<'_>, input: PuzzleInput) -> Outcome;

    /// A timer scheduled through [`ProcessCx::schedule`] came due.
    fn on_timer(&mut self, _cx: &mut ProcessCx<'_>, _tag: u32) -> Outcome {
        Outcome::Stay
    }
}

pub type ProcessFactory = Box<dyn Fn() -> Box<dyn Process> + Send + Sync>;
pub type Hook = fn(&mut Session);
pub type BackgroundResolver = fn(&Scene, &Session) -> Option<String>;

/// Process factories, choice hooks and the optional background override of one game.
#[derive(Default)]
pub struct ProcessRegistry {
    factories: FxHashMap<String, ProcessFactory>,
    hooks: FxHashMap<String, Hook>,
    background: Option<BackgroundResolver>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P, F>(&mut self, key: &str, factory: F) -> &mut Self
    where
        P: Process + 'static,
        F: Fn() -> P + Send + Sync + 'static,
    {
        self.factories.insert(key.to_string(), Box::new(move || Box::new(factory()) as Box<dyn Process>));
        self
    }

    pub fn hook(&mut self, name: &str, hook: Hook) -> &mut Self {
        self.hooks.insert(name.to_string(), hook);
        self
    }

    pub fn background(&mut self, resolver: BackgroundResolver) -> &mut Self {
        self.background = Some(resolver);
        self
    }

    pub fn create(&self, key: &str) -> Option<Box<dyn Process>> {
        self.factories.get(key).map(|f| f())
    }

    pub fn has_process(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub fn get_hook(&self, name: &str) -> Option<Hook> {
        self.hooks.get(name).copied()
    }

    /// The game's override first, then the scene's own background.
    pub fn resolve_background(&self, scene: &Scene, session: &Session) -> Option<String> {
        self.background
            .and_then(|f| f(scene, session))
            .or_else(|| scene.background.clone())
    }
}

/// A scene graph together with the code its scenes refer to.
#[derive(Clone)]
pub struct Game {
    pub graph: Arc<SceneGraph>,
    pub processes: Arc<ProcessRegistry>,
    pub defaults: SequencerConfig,
}

impl Game {
    /// Fails when a scene names a process or hook the registry does not know.
    pub fn new(graph: SceneGraph, processes: ProcessRegistry, defaults: SequencerConfig) -> anyhow::Result<Self> {
        let missing: Vec<&str> = graph.process_keys()
            .into_iter()
            .filter(|k| !processes.has_process(k))
            .collect();
        if !missing.is_empty() {
            anyhow::bail!("Game '{}' references unregistered processes: {}", graph.meta.id, missing.join(", "));
        }
        let missing: Vec<&str> = graph.hook_names()
            .into_iter()
            .filter(|h| processes.get_hook(h).is_none())
            .collect();
        if !missing.is_empty() {
            anyhow::bail!("Game '{}' references unregistered hooks: {}", graph.meta.id, missing.join(", "));
        }
        Ok(Self {
            graph: Arc::new(graph),
            processes: Arc::new(processes),
            defaults,
        })
    }

    pub fn id(&self) -> &str {
        &self.graph.meta.id
    }

    /// A fresh session with the script's initial flags applied.
    pub fn session(&self) -> Session {
        let mut session = Session::new(&self.graph.missions);
        for (key, value) in &self.graph.meta.flags {
            session.set_flag(key.clone(), *value);
        }
        session
    }

    pub fn sequencer(&self, config: SequencerConfig) -> Sequencer {
        Sequencer::new(self.graph.clone(), self.processes.clone(), config)
    }

    /// Sequencer with the game's own timing.
    pub fn default_sequencer(&self) -> Sequencer {
        self.sequencer(self.defaults.clone())
    }
}

/// Milliseconds, the unit every script and handler speaks.
pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}
