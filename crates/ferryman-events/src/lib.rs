//! Game events and the observer bus.
//!
//! Every state change in the game core produces a [`GameEvent`]. Components
//! hand events to an [`EventSink`] as part of the mutation that caused them;
//! the [`EventBus`] sink forwards each event synchronously to its
//! subscribers, in registration order, before the mutating call returns.
//!
//! The core never depends on who is listening. A presentation layer
//! subscribes to refresh its widgets; tests usually collect events into a
//! plain `Vec<GameEvent>`, which also implements [`EventSink`].

pub mod bus;
pub mod event;

pub use bus::{EventBus, SubscriptionId};
pub use event::{EventKind, GameEvent};

/// Anything that can receive game events.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: GameEvent) {}
}
