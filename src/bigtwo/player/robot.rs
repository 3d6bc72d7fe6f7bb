//! Robot player

use tracing::{debug, warn};

use super::{ActionData, ActionType, Event, Player, PlayerError, PlayerState};
use crate::bigtwo::movegen::{select_play, Difficulty};

/// A computer player, backed by the move generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Robot {
    difficulty: Difficulty,
}

impl Player for Robot {
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData {
        let data = ActionData::from_cards(select_play(self.difficulty, &state));
        debug!(seat = %state.seat, %action, ?data, "robot action");
        data
    }

    fn notify(&self, _: PlayerState, _: &Event) {}

    fn handle_error(&self, err: PlayerError) -> bool {
        warn!(%err, difficulty = %self.difficulty, "robot action rejected");
        false
    }
}

impl Robot {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn into_player(self) -> Box<dyn Player> {
        Box::new(self)
    }
}
