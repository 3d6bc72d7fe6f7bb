//! A record of the actions taken in a game.

use serde::{Deserialize, Serialize};

use super::Deal;
use crate::bigtwo::{Action, GameError, Variant};

/// A serializable log of a game: the initial conditions, followed by every accepted action in
/// the order it was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    /// The house rules.
    variant: Variant,
    /// The initial deal.
    deal: Deal,
    /// Accepted actions.
    actions: Vec<Action>,
}

impl Log {
    /// Creates an empty [`Log`] for a game with the specified initial conditions.
    pub fn new(variant: Variant, deal: Deal) -> Self {
        Self {
            variant,
            deal,
            actions: vec![],
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Records an action at the specified position. Any actions previously recorded at or after
    /// that position belonged to a different line of play, and are discarded.
    pub fn insert(&mut self, index: usize, action: Action) -> usize {
        self.actions.truncate(index);
        self.actions.push(action);
        self.actions.len()
    }

    /// Returns the first `n` actions.
    pub fn prefix(&self, n: usize) -> Result<&[Action], GameError> {
        self.actions.get(..n).ok_or(GameError::InvalidLogIndex(n))
    }
}
