pub mod terminal;
pub mod driver;

use crate::event::{InputEvent, OutputEvent};

pub trait Renderer {
    fn render(&mut self, out: &OutputEvent) -> Option<InputEvent>;

    /// Asked for input when no event is queued and no timer is pending.
    /// `None` means the player has nothing more to say.
    fn poll(&mut self) -> Option<InputEvent> {
        None
    }
}
