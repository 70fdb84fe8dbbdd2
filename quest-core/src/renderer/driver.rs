use serde::Serialize;

use crate::error::Result;
use crate::event::{InputEvent, OutputEvent};
use crate::executor::Sequencer;
use crate::process::Game;
use crate::renderer::Renderer;
use crate::runtime::{MissionEntry, Session};

/// How a run ended, printable as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub game: String,
    pub finished: bool,
    pub percent: u32,
    pub missions: Vec<MissionEntry>,
    pub transitions: u64,
    pub lines_seen: usize,
}

/// Pumps events from a sequencer into a renderer and feeds its answers back.
pub struct Driver<R: Renderer> {
    game: String,
    session: Session,
    sequencer: Sequencer,
    renderer: R,
    realtime: bool,
}

impl<R: Renderer> Driver<R> {
    pub fn new(game: &Game, sequencer: Sequencer, renderer: R) -> Self {
        Self {
            game: game.id().to_string(),
            session: game.session(),
            sequencer,
            renderer,
            realtime: false,
        }
    }

    /// Sleep through timer deadlines instead of skipping ahead.
    pub fn realtime(mut self, on: bool) -> Self {
        self.realtime = on;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn run(&mut self) -> Result<RunReport> {
        self.sequencer.start(&mut self.session)?;
        let mut finished = false;

        'outer: loop {
            while let Some(ev) = self.session.pop() {
                if ev == OutputEvent::End {
                    finished = true;
                }
                if let Some(input) = self.renderer.render(&ev) {
                    if !self.handle(input)? {
                        break 'outer;
                    }
                }
            }
            if finished {
                break;
            }

            if let Some(wait) = self.sequencer.next_deadline() {
                if self.realtime && !wait.is_zero() {
                    std::thread::sleep(wait);
                }
                self.sequencer.tick(&mut self.session, wait)?;
                continue;
            }

            match self.renderer.poll() {
                Some(input) => {
                    if !self.handle(input)? {
                        break;
                    }
                }
                None => {
                    log::warn!("No input and nothing scheduled; stopping");
                    break;
                }
            }
        }
        Ok(self.report(finished))
    }

    /// `false` when the player asked to leave.
    fn handle(&mut self, input: InputEvent) -> Result<bool> {
        if input == InputEvent::Exit {
            log::info!("Exit requested");
            return Ok(false);
        }
        self.sequencer.feed(&mut self.session, input)?;
        Ok(true)
    }

    fn report(&self, finished: bool) -> RunReport {
        RunReport {
            game: self.game.clone(),
            finished,
            percent: self.session.missions.percent(),
            missions: self.session.missions.entries().to_vec(),
            transitions: self.sequencer.transitions(),
            lines_seen: self.session.dialogue_history.len(),
        }
    }
}
