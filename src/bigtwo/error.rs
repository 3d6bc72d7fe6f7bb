//! Error types

use super::{Card, Seat};

/// A recoverable error caused by a seat's submission. The game state is never modified when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// Only the acting seat may submit.
    #[error("expected {expected} to act, not {got}")]
    NotYourTurn { expected: Seat, got: Seat },

    /// The player doesn't actually hold the card they attempted to play.
    #[error("{0} does not hold {1}")]
    NotInHand(Seat, Card),

    /// The very first play of the game must include the three of diamonds.
    #[error("the first play must include {}", Card::OPENING)]
    MustOpenWithStartingCard,

    /// The play does not beat the play on the table.
    #[error("play does not beat the previous play")]
    IllegalPlay,

    /// The cards do not form a single, pair, triple or five-card hand.
    #[error("cards do not form a valid combination")]
    InvalidShape,
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("deck is missing cards")]
    IncompleteDeck,
    #[error("each seat must be dealt 13 cards")]
    InvalidHandSize,
    #[error("deck contains duplicate card")]
    DuplicateCard,
    #[error("game over")]
    GameOver,
    #[error("log has no action at index {0}")]
    InvalidLogIndex(usize),
    #[error("input channel closed")]
    Disconnected,
    #[error(transparent)]
    Player(#[from] PlayerError),
}
