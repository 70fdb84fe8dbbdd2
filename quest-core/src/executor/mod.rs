pub mod cursor;
pub mod timer;
pub mod typewriter;

use std::sync::Arc;
use std::time::Duration;
use log::{debug, info, trace, warn};

use crate::config::SequencerConfig;
use crate::error::{Result, SequencerError};
use crate::event::{InputEvent, OutputEvent};
use crate::process::{Outcome, Process, ProcessCx, ProcessRegistry, PuzzleInput};
use crate::runtime::{DialogueRecord, Session};
use crate::scene::{Effect, Scene, SceneGraph, SceneId};
use cursor::{Cursor, Phase};
use timer::{Scope, TimerHandle, TimerTask, Timers};
use typewriter::{Reveal, Typewriter};

/// What a single input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A tap finished the line being typed.
    Skipped,
    /// The game moved on.
    Advanced,
    /// Nothing follows; the input changed nothing.
    Terminal,
    /// The input does not apply to the current phase.
    Ignored,
}

/// Walks a player through a scene graph.
///
/// All state that outlives one call lives either here (cursor, typewriter, timers, the
/// active process) or in the [`Session`] passed in, never in globals.
pub struct Sequencer {
    graph: Arc<SceneGraph>,
    processes: Arc<ProcessRegistry>,
    config: SequencerConfig,

    cursor: Cursor,
    typewriter: Typewriter,
    timers: Timers,
    type_timer: Option<TimerHandle>,
    active: Option<Box<dyn Process>>,
    transitions: u64,
}

impl Sequencer {
    pub fn new(graph: Arc<SceneGraph>, processes: Arc<ProcessRegistry>, config: SequencerConfig) -> Self {
        let typewriter = Typewriter::new(config.line_break.clone());
        Self {
            graph,
            processes,
            config,
            cursor: Cursor::new(),
            typewriter,
            timers: Timers::new(),
            type_timer: None,
            active: None,
            transitions: 0,
        }
    }

    pub fn start(&mut self, session: &mut Session) -> Result<()> {
        let start = self.graph.start();
        info!("Starting '{}' at scene {}", self.graph.meta.id, start);
        self.show_scene(session, start)
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.cursor.phase
    }

    pub fn current_id(&self) -> Option<SceneId> {
        self.cursor.scene.as_ref().and_then(|s| s.id)
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn display_text(&self) -> &str {
        self.typewriter.display_text()
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// How long a host may sleep before [`tick`](Self::tick) has work.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Number of scenes entered so far, transient ones included.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn has_process(&self) -> bool {
        self.active.is_some()
    }

    /// True when no input can move the game any further.
    pub fn is_finished(&self) -> bool {
        let Some(scene) = &self.cursor.scene else {
            return false;
        };
        if scene.has_continuation() {
            return false;
        }
        match self.cursor.phase {
            Phase::WaitingForTap => self.cursor.on_last_line(),
            Phase::Idle => scene.lines.is_empty(),
            _ => false,
        }
    }

    pub fn show_scene(&mut self, session: &mut Session, id: SceneId) -> Result<()> {
        let scene = self.graph.get(id).ok_or(SequencerError::UnknownScene(id))?;
        info!("Scene {}", id);
        self.enter(session, scene)
    }

    /// Enters a scene that is not part of the graph, e.g. from [`Scene::transient`].
    pub fn splice(&mut self, session: &mut Session, scene: Scene) -> Result<()> {
        debug!("Splicing transient scene ({} lines, next {:?})", scene.lines.len(), scene.next);
        self.enter(session, Arc::new(scene))
    }

    pub fn feed(&mut self, session: &mut Session, ev: InputEvent) -> Result<Advance> {
        debug!("input: {:?} in {:?}", ev, self.cursor.phase);
        match ev {
            InputEvent::Tap => self.advance(session),
            InputEvent::ChoiceMade { index } => {
                self.select_choice(session, index)?;
                Ok(Advance::Advanced)
            }
            InputEvent::Puzzle(input) => self.puzzle(session, input),
            InputEvent::Exit => Ok(Advance::Ignored),
        }
    }

    /// A tap on the dialogue box.
    pub fn advance(&mut self, session: &mut Session) -> Result<Advance> {
        match self.cursor.phase {
            Phase::Typing => {
                self.typewriter.request_skip();
                if let Some(h) = self.type_timer.take() {
                    self.timers.cancel(h);
                }
                self.type_step(session);
                Ok(Advance::Skipped)
            }
            Phase::WaitingForTap => {
                let Some(scene) = self.cursor.scene.clone() else {
                    return Ok(Advance::Ignored);
                };
                let next = self.cursor.line_index + 1;
                if next < scene.lines.len() {
                    self.begin_line(session, &scene, next);
                    Ok(Advance::Advanced)
                } else {
                    self.finish_lines(session, &scene)
                }
            }
            _ => Ok(Advance::Ignored),
        }
    }

    pub fn select_choice(&mut self, session: &mut Session, index: usize) -> Result<()> {
        if self.cursor.phase != Phase::ShowingChoices {
            return Err(SequencerError::NotShowingChoices);
        }
        let Some(scene) = self.cursor.scene.clone() else {
            return Err(SequencerError::NotShowingChoices);
        };
        let choice = scene.choices.get(index).ok_or(SequencerError::NoSuchChoice {
            index,
            available: scene.choices.len(),
        })?;
        debug!("choice {}: {}", index, choice.label);

        session.push(OutputEvent::ClearChoices);
        self.cursor.phase = Phase::Idle;
        if let Some(effect) = &choice.effect {
            self.apply_effect(session, effect)?;
        }
        match choice.next {
            Some(next) => self.show_scene(session, next),
            None => {
                warn!("Choice '{}' leads nowhere", choice.label);
                Ok(())
            }
        }
    }

    /// Input for the active puzzle panel.
    pub fn puzzle(&mut self, session: &mut Session, input: PuzzleInput) -> Result<Advance> {
        let Some(mut process) = self.active.take() else {
            debug!("puzzle input {:?} without an active process", input);
            return Ok(Advance::Ignored);
        };
        let (outcome, refresh) = {
            let mut cx = ProcessCx::new(session, &mut self.timers, self.config.toast());
            let outcome = process.on_input(&mut cx, input);
            (outcome, cx.wants_background())
        };
        self.settle(session, process, outcome, refresh)?;
        Ok(Advance::Advanced)
    }

    /// Moves the clock forward by `dt`, firing every timer that falls due.
    pub fn tick(&mut self, session: &mut Session, dt: Duration) -> Result<()> {
        let until = self.timers.now() + dt;
        while let Some((_, task)) = self.timers.pop_due(until) {
            match task {
                TimerTask::TypeStep => {
                    self.type_timer = None;
                    self.type_step(session);
                }
                TimerTask::DismissToast => {
                    session.toast_timer = None;
                    session.set_toast(None);
                    session.push(OutputEvent::HideToast);
                }
                TimerTask::Process(tag) => {
                    let Some(mut process) = self.active.take() else {
                        continue;
                    };
                    let (outcome, refresh) = {
                        let mut cx = ProcessCx::new(session, &mut self.timers, self.config.toast());
                        let outcome = process.on_timer(&mut cx, tag);
                        (outcome, cx.wants_background())
                    };
                    self.settle(session, process, outcome, refresh)?;
                }
            }
        }
        self.timers.advance_to(until);
        Ok(())
    }

    /// Fires timers until nothing is pending or `limit` has elapsed.
    pub fn run_timers(&mut self, session: &mut Session, limit: Duration) -> Result<()> {
        let stop = self.timers.now() + limit;
        while let Some(wait) = self.timers.next_deadline() {
            if self.timers.now() + wait > stop {
                break;
            }
            self.tick(session, wait)?;
        }
        Ok(())
    }

    /// Shows a toast owned by the session rather than a scene.
    pub fn toast(&mut self, session: &mut Session, text: impl Into<String>) {
        crate::process::cx::show_toast(session, &mut self.timers, self.config.toast(), text.into());
    }

    fn enter(&mut self, session: &mut Session, scene: Arc<Scene>) -> Result<()> {
        let swept = self.timers.sweep(Scope::Scene);
        if swept > 0 {
            trace!("swept {} scene timers", swept);
        }
        self.type_timer = None;
        self.active = None;
        self.typewriter.clear();
        self.transitions += 1;

        session.push(OutputEvent::ClearChoices);
        session.push(OutputEvent::ClosePrompt);
        session.push(OutputEvent::ClearDialogue);
        self.cursor.reset(scene.clone());

        if let Some(image) = self.processes.resolve_background(&scene, session) {
            session.push(OutputEvent::SetBackground { image });
        }

        if scene.lines.is_empty() {
            if self.finish_lines(session, &scene)? == Advance::Terminal {
                session.push(OutputEvent::End);
            }
        } else {
            self.begin_line(session, &scene, 0);
        }
        Ok(())
    }

    fn begin_line(&mut self, session: &mut Session, scene: &Scene, index: usize) {
        let line = &scene.lines[index];
        self.cursor.line_index = index;
        self.cursor.phase = Phase::Typing;

        session.push(OutputEvent::ShowLine {
            speaker: line.speaker.clone(),
            portrait: line.portrait.clone(),
        });
        session.dialogue_history.push(DialogueRecord {
            speaker: line.speaker.clone(),
            text: line.text.clone(),
        });
        self.typewriter.set_text(&line.text);
        self.type_step(session);
    }

    fn type_step(&mut self, session: &mut Session) {
        self.type_timer = None;
        match self.typewriter.step() {
            Reveal::Typing => {
                trace!("typing {}", self.typewriter.display_text().chars().count());
                session.push(OutputEvent::Reveal { text: self.typewriter.display_text().to_string() });
                self.type_timer = Some(self.timers.schedule(
                    self.config.char_delay(),
                    Scope::Scene,
                    TimerTask::TypeStep,
                ));
            }
            Reveal::Finished => {
                session.push(OutputEvent::Reveal { text: self.typewriter.display_text().to_string() });
                self.on_line_complete(session);
            }
            Reveal::Idle => {}
        }
    }

    fn on_line_complete(&mut self, session: &mut Session) {
        self.cursor.phase = Phase::WaitingForTap;
        session.push(OutputEvent::LineComplete);
        let terminal = self.cursor.scene.as_ref().is_some_and(|s| !s.has_continuation());
        if terminal && self.cursor.on_last_line() {
            info!("Reached the end of the script");
            session.push(OutputEvent::End);
        }
    }

    /// Lines exhausted: choices, then process, then successor.
    fn finish_lines(&mut self, session: &mut Session, scene: &Scene) -> Result<Advance> {
        if !scene.choices.is_empty() {
            session.push(OutputEvent::HideDialogue);
            session.push(OutputEvent::ShowChoices {
                options: scene.choices.iter().map(|c| c.label.clone()).collect(),
            });
            self.cursor.phase = Phase::ShowingChoices;
            return Ok(Advance::Advanced);
        }
        if let Some(key) = &scene.process {
            self.run_process(session, key)?;
            return Ok(Advance::Advanced);
        }
        if let Some(next) = scene.next {
            self.show_scene(session, next)?;
            return Ok(Advance::Advanced);
        }
        Ok(Advance::Terminal)
    }

    fn run_process(&mut self, session: &mut Session, key: &str) -> Result<()> {
        let mut process = self.processes
            .create(key)
            .ok_or_else(|| SequencerError::UnknownProcess(key.to_string()))?;
        info!("Process '{}'", key);
        self.cursor.phase = Phase::InProcess;
        session.push(OutputEvent::HideDialogue);

        let (outcome, refresh) = {
            let mut cx = ProcessCx::new(session, &mut self.timers, self.config.toast());
            let outcome = process.start(&mut cx);
            (outcome, cx.wants_background())
        };
        self.settle(session, process, outcome, refresh)
    }

    fn settle(
        &mut self,
        session: &mut Session,
        process: Box<dyn Process>,
        outcome: Outcome,
        refresh: bool,
    ) -> Result<()> {
        if refresh {
            self.refresh_background(session);
        }
        match outcome {
            Outcome::Stay => {
                self.active = Some(process);
                Ok(())
            }
            Outcome::Goto(id) => {
                // an unknown target keeps the player in the puzzle
                if self.graph.get(id).is_none() {
                    warn!("Process asked for unknown scene {}", id);
                    self.active = Some(process);
                    return Err(SequencerError::UnknownScene(id));
                }
                self.show_scene(session, id)
            }
            Outcome::Splice(scene) => self.splice(session, scene),
            Outcome::End => {
                info!("Process ended the game");
                session.push(OutputEvent::End);
                Ok(())
            }
        }
    }

    fn refresh_background(&mut self, session: &mut Session) {
        if let Some(scene) = &self.cursor.scene {
            if let Some(image) = self.processes.resolve_background(scene, session) {
                session.push(OutputEvent::SetBackground { image });
            }
        }
    }

    fn apply_effect(&mut self, session: &mut Session, effect: &Effect) -> Result<()> {
        match effect {
            Effect::SetFlag { key, value } => session.set_flag(key.clone(), *value),
            Effect::PlayMusic { path } => session.push(OutputEvent::PlayMusic { path: path.clone() }),
            Effect::Hook { name } => {
                let hook = self.processes
                    .get_hook(name)
                    .ok_or_else(|| SequencerError::UnknownHook(name.clone()))?;
                hook(session);
            }
        }
        Ok(())
    }
}
