//! A game that maintains a log of actions taken.

use delegate::delegate;
use tracing::{debug, warn};

use super::{Deal, Game, GameOutcome, LastPlay, Log, PlayerState, TurnEngine};
use crate::bigtwo::{Action, Event, ExpectAction, GameError, Hand, Rules, Seat, Variant};

/// A [`Game`] implementation that maintains a [`Log`] of all actions taken.
#[derive(Debug)]
pub struct LoggingEngine {
    engine: TurnEngine,
    log: Log,
    cursor: usize,
}
impl From<Log> for LoggingEngine {
    fn from(log: Log) -> Self {
        let engine = TurnEngine::new(log.variant(), log.deal().clone());
        Self {
            engine,
            log,
            cursor: 0,
        }
    }
}
impl From<LoggingEngine> for Log {
    fn from(value: LoggingEngine) -> Self {
        value.log
    }
}

impl Game for LoggingEngine {
    delegate! {
        to self.engine {
            fn rules(&self) -> Rules;
            fn deal(&self) -> &Deal;
            fn next_action(&self) -> Option<ExpectAction>;
            fn previous(&self) -> Option<&LastPlay>;
            fn hand(&self, seat: Seat) -> &Hand;
            fn player_state(&self, seat: Seat) -> PlayerState<'_>;
            fn pop_event(&mut self) -> Option<Event>;
            fn outcome(&self) -> Option<&GameOutcome>;
        }
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        self.engine.apply_action(action.clone())?;
        self.cursor = self.log.insert(self.cursor, action);
        Ok(())
    }
}

impl LoggingEngine {
    /// Starts a new game with the specified deal.
    pub fn new(variant: Variant, deal: Deal) -> Self {
        Log::new(variant, deal).into()
    }

    /// Starts a new game with a shuffled deck.
    pub fn random(variant: Variant) -> Self {
        Self::new(variant, Deal::random())
    }

    /// The number of logged actions that have been applied.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns an immutable reference to the log.
    pub fn log(&self) -> &Log {
        &self.log
    }

    /// Rewinds the game to the initial deal. The log is retained.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.engine.start_new_game(self.log.deal().clone());
    }

    /// Replays the first `n` actions in the log. If any of them is rejected, the game is left at
    /// the initial deal.
    pub fn seek(&mut self, n: usize) -> Result<(), GameError> {
        let actions = self.log.prefix(n)?.to_vec();
        self.restart();
        for action in actions {
            if let Err(err) = self.engine.apply_action(action) {
                warn!(cursor = self.cursor, %err, "seek failed");
                self.restart();
                return Err(err);
            }
            self.cursor += 1;
        }
        debug!(cursor = self.cursor, len = self.log.len(), "seek");
        Ok(())
    }
}
