//! Human-readable session events and the sinks that receive them.
//!
//! Nothing in the game logic depends on these; they only report what
//! happened during a tick.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    /// The snake ran into itself and starts over
    Reset,
    /// Manual restart requested by the player
    Restarted,
    FoodEaten { length: usize },
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::Started => {
                write!(f, "Game started! Steer with the arrow keys or WASD, Q or Esc to quit.")
            }
            SessionEvent::Reset => write!(f, "Ouch! Starting over."),
            SessionEvent::Restarted => write!(f, "Restarted."),
            SessionEvent::FoodEaten { length } => {
                write!(f, "Food eaten! Snake length: {}", length)
            }
        }
    }
}

/// Receives session events as they happen
pub trait Notifier {
    fn notify(&mut self, event: &SessionEvent);
}

/// Writes every event to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Reset => log::warn!("{}", event),
            _ => log::info!("{}", event),
        }
    }
}

/// Keeps only the most recent message, for a status line
#[derive(Debug, Default, Clone)]
pub struct StatusLine {
    latest: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }
}

impl Notifier for StatusLine {
    fn notify(&mut self, event: &SessionEvent) {
        self.latest = Some(event.to_string());
    }
}

impl Notifier for Vec<SessionEvent> {
    fn notify(&mut self, event: &SessionEvent) {
        self.push(*event);
    }
}
