//! Players and observers.

use super::{ActionData, ActionType, Event, PlayerError, PlayerState};

mod console;
mod robot;
#[cfg(test)]
mod scripted;

pub use console::Console;
pub use robot::Robot;
#[cfg(test)]
pub use scripted::ScriptedPlayer;

/// A trait for a player that decides immediately when asked to act.
pub trait Player {
    /// Chooses the action for the seat in `state`.
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData;

    /// A notification of an event that all players can see.
    fn notify(&self, state: PlayerState, event: &Event);

    /// Indicates that the player's action was rejected.
    ///
    /// The implementation may return true, if a retry is desired. Otherwise, the driver falls back
    /// to passing where that's legal, and fails the game where it isn't.
    fn handle_error(&self, err: PlayerError) -> bool;
}

/// A trait for rendering the game to a human.
pub trait Observer {
    /// A notification of an event, along with the state visible to the observing seat.
    fn notify(&self, state: PlayerState, event: &Event);

    /// The specified human seat is expected to act.
    fn prompt(&self, state: PlayerState);
}
