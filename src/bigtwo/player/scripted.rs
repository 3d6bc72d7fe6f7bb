//! A scripted player, for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ActionData, ActionType, Event, Player, PlayerError, PlayerState, Robot};
use crate::bigtwo::parse_cards;

/// Replays queued actions, then plays like a [`Robot`] once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedPlayer {
    script: Mutex<VecDeque<ActionData>>,
    robot: Robot,
}

impl Player for ScriptedPlayer {
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData {
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.robot.take_action(state, action))
    }

    fn notify(&self, _: PlayerState, _: &Event) {}

    fn handle_error(&self, _: PlayerError) -> bool {
        false
    }
}

impl ScriptedPlayer {
    pub fn into_player(self) -> Box<dyn Player> {
        Box::new(self)
    }

    pub fn plays(self, cards: &str) -> Self {
        let cards = parse_cards(cards).unwrap();
        self.script
            .lock()
            .unwrap()
            .push_back(ActionData::Play { cards });
        self
    }

    pub fn passes(self) -> Self {
        self.script.lock().unwrap().push_back(ActionData::Pass);
        self
    }
}
