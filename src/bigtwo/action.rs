//! Actions

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Card, Seat};

/// Types of actions that a player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Make the first play of the game, which must include the three of diamonds.
    Open,
    /// Play any valid combination onto an empty table.
    Lead,
    /// Beat the play on the table, or pass.
    Follow,
}
impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionType::Open => "open",
            ActionType::Lead => "lead",
            ActionType::Follow => "follow",
        })
    }
}

/// The payload for actions that a player can take during the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionData {
    /// Decline to beat the play on the table.
    Pass,

    /// Play cards from the hand.
    Play { cards: Vec<Card> },
}

impl ActionData {
    /// Converts a move generator's choice into an action. An empty choice is a pass.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        if cards.is_empty() {
            ActionData::Pass
        } else {
            ActionData::Play { cards }
        }
    }
}

/// The action that the game's state machine expects to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectAction {
    /// The player expected to take the action.
    pub seat: Seat,
    /// The type of action.
    pub action: ActionType,
}

impl ExpectAction {
    /// Create a new [`ExpectAction`].
    pub fn new(seat: Seat, action: ActionType) -> Self {
        Self { seat, action }
    }

    /// Bind in a payload to create an [`Action`].
    pub fn with_data(self, data: ActionData) -> Action {
        Action::new(self.seat, data)
    }
}

/// An action taken by a player during a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The player taking the action.
    pub seat: Seat,
    /// The action payload.
    pub data: ActionData,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.data {
            ActionData::Pass => write!(f, "{}: pass", self.seat),
            ActionData::Play { cards } => {
                write!(f, "{}: play", self.seat)?;
                for card in cards {
                    write!(f, " {card}")?;
                }
                Ok(())
            }
        }
    }
}

impl Action {
    /// Create a new [`Action`].
    pub fn new(seat: Seat, data: ActionData) -> Self {
        Self { seat, data }
    }

    pub fn play(seat: Seat, cards: Vec<Card>) -> Self {
        Self::new(seat, ActionData::Play { cards })
    }

    pub fn pass(seat: Seat) -> Self {
        Self::new(seat, ActionData::Pass)
    }
}
