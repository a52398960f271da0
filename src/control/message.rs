use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::fx::panel::ControlPanel;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    /// Full re-initialization; clears all delay lines.
    Initialize(ControlPanel),
    /// Re-initialize with the current panel.
    Reset,
    SetEnabled(bool),
    SetMute(bool),
    SetUpmix(bool),
    SetDelayEnabled(bool),
}

pub trait ControlReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl ControlReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

impl ControlReceiver for VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}
