use std::time::Duration;
use crate::event::{OutputEvent, Prompt, Tone};
use crate::executor::timer::{Scope, TimerHandle, TimerTask, Timers};
use crate::runtime::Session;

/// What a process may touch while it runs.
pub struct ProcessCx<'a> {
    pub session: &'a mut Session,
    timers: &'a mut Timers,
    toast_after: Duration,
    refresh_background: bool,
}

impl<'a> ProcessCx<'a> {
    pub(crate) fn new(session: &'a mut Session, timers: &'a mut Timers, toast_after: Duration) -> Self {
        Self { session, timers, toast_after, refresh_background: false }
    }

    pub fn emit(&mut self, event: OutputEvent) {
        self.session.push(event);
    }

    /// Shows a toast, replacing the current one.
    pub fn toast(&mut self, text: impl Into<String>) {
        show_toast(self.session, self.timers, self.toast_after, text.into());
    }

    pub fn message(&mut self, tone: Tone, text: impl Into<String>) {
        self.emit(OutputEvent::Message { tone, text: text.into() });
    }

    pub fn prompt(&mut self, prompt: Prompt) {
        self.emit(OutputEvent::Prompt(prompt));
    }

    pub fn close_prompt(&mut self) {
        self.emit(OutputEvent::ClosePrompt);
    }

    pub fn readout(&mut self, label: impl Into<String>, value: impl ToString) {
        self.emit(OutputEvent::Readout { label: label.into(), value: value.to_string() });
    }

    pub fn enable(&mut self, id: impl Into<String>, enabled: bool) {
        self.emit(OutputEvent::Enable { id: id.into(), enabled });
    }

    pub fn effect(&mut self, name: impl Into<String>) {
        self.emit(OutputEvent::Effect { name: name.into() });
    }

    pub fn pass(&mut self, key: &str) {
        self.session.record(key, true);
    }

    pub fn fail(&mut self, key: &str) {
        self.session.record(key, false);
    }

    /// Schedules `on_timer(tag)`; the timer dies with the scene.
    pub fn schedule(&mut self, delay: Duration, tag: u32) -> TimerHandle {
        self.timers.schedule(delay, Scope::Scene, TimerTask::Process(tag))
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.cancel(handle)
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.is_pending(handle)
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Asks the sequencer to re-resolve the background after this call.
    pub fn refresh_background(&mut self) {
        self.refresh_background = true;
    }

    pub(crate) fn wants_background(&self) -> bool {
        self.refresh_background
    }
}

pub(crate) fn show_toast(session: &mut Session, timers: &mut Timers, after: Duration, text: String) {
    if let Some(old) = session.toast_timer.take() {
        timers.cancel(old);
    }
    log::debug!("toast: {}", text);
    session.set_toast(Some(text.clone()));
    session.push(OutputEvent::Toast { text });
    session.toast_timer = Some(timers.schedule(after, Scope::Session, TimerTask::DismissToast));
}
