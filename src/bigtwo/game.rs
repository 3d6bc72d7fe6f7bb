//! Game management

use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    Action, Card, Deck, Event, ExpectAction, GameError, Hand, Play, Rules, Scores, Seat,
};

mod engine;
mod log;
mod logging;
pub use engine::TurnEngine;
pub use log::Log;
pub use logging::LoggingEngine;

/// A trait for implementing a game of Big Two.
///
/// ## Gameplay
///
/// The deck is dealt evenly to the four seats, and whoever holds the three of diamonds makes the
/// first play, which must include that card. Play proceeds clockwise. Each seat must either beat
/// the play on the table with a play of the same size, or pass. When three seats pass in a row,
/// the table is cleared and the seat that made the last play may lead any combination.
///
/// The game ends as soon as one seat empties their hand. Every other seat is penalized for the
/// cards they still hold, and the [`Rules`] distribute the penalties as scores.
///
/// ## State management
///
/// Exactly one seat is expected to act at any time. The identity of that seat, and the kind of
/// action expected, may be obtained via [`next_action`](`Game::next_action`). Once a player has
/// chosen an action, it is applied using [`apply_action`](`Game::apply_action`). A rejected
/// action never modifies the state of the game.
///
/// ## Events
///
/// Actions trigger events, such as a seat passing or the table being cleared. These events are
/// stored in a queue, which may be drained using [`pop_event`](`Game::pop_event`).
pub trait Game {
    /// The rules for this game.
    fn rules(&self) -> Rules;

    /// The initial deal for this game.
    fn deal(&self) -> &Deal;

    /// Returns the next action that's required to advance the state of the game, or None if
    /// the game is over.
    fn next_action(&self) -> Option<ExpectAction>;

    /// The most recent play, if the table hasn't been cleared since.
    fn previous(&self) -> Option<&LastPlay>;

    /// The cards currently held by the specified seat.
    fn hand(&self, seat: Seat) -> &Hand;

    /// Returns a bundle of state visible to the specified player.
    fn player_state(&self, seat: Seat) -> PlayerState<'_>;

    /// Applies the specified action.
    fn apply_action(&mut self, action: Action) -> Result<(), GameError>;

    /// Pops the oldest event from the queue of events.
    fn pop_event(&mut self) -> Option<Event>;

    /// The outcome of the game, if it is over.
    fn outcome(&self) -> Option<&GameOutcome>;

    /// Returns true once a seat has emptied their hand.
    fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}

/// Initial conditions for a game: each seat's hand, as dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDeal")]
pub struct Deal {
    hands: BTreeMap<Seat, Vec<Card>>,
}

/// An unvalidated [`Deal`], as read from a log.
#[derive(Deserialize)]
struct RawDeal {
    hands: BTreeMap<Seat, Vec<Card>>,
}

impl TryFrom<RawDeal> for Deal {
    type Error = GameError;

    fn try_from(raw: RawDeal) -> Result<Self, Self::Error> {
        Deal::from_hands(raw.hands)
    }
}

impl Distribution<Deal> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Deal {
        Deal::new(rng.gen()).expect("deck is valid")
    }
}

impl Deal {
    /// The number of cards dealt to each seat.
    pub const HAND_SIZE: usize = 13;

    /// Deals thirteen cards to each seat from the specified deck.
    pub fn new(mut deck: Deck) -> Result<Self, GameError> {
        let size = Self::HAND_SIZE * Seat::all_seats().len();
        if deck.len() < size {
            return Err(GameError::IncompleteDeck);
        } else if deck.len() > size {
            return Err(GameError::DuplicateCard);
        }
        let hands = Seat::all_seats()
            .iter()
            .map(|&seat| (seat, deck.take(Self::HAND_SIZE)))
            .collect();
        Self::from_hands(hands)
    }

    /// Creates a deal from pre-arranged hands.
    pub fn from_hands(hands: BTreeMap<Seat, Vec<Card>>) -> Result<Self, GameError> {
        let mut deal = Self { hands };
        deal.validate()?;
        deal.canonicalize();
        Ok(deal)
    }

    /// Deals a shuffled deck.
    pub fn random() -> Self {
        rand::random()
    }

    /// Deals a deck shuffled by the specified source of randomness.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Standard.sample(rng)
    }

    /// Validates that all 52 cards were dealt evenly to the four seats.
    pub fn validate(&self) -> Result<(), GameError> {
        let mut seen: HashSet<Card> = HashSet::with_capacity(52);
        for &seat in Seat::all_seats() {
            let hand = self.hands.get(&seat).ok_or(GameError::InvalidHandSize)?;
            if hand.len() != Self::HAND_SIZE {
                return Err(GameError::InvalidHandSize);
            }
            seen.extend(hand);
        }
        if seen.len() == Self::HAND_SIZE * 4 {
            Ok(())
        } else {
            Err(GameError::DuplicateCard)
        }
    }

    /// Sorts each hand.
    fn canonicalize(&mut self) {
        for hand in self.hands.values_mut() {
            hand.sort_unstable();
        }
    }

    /// The cards dealt to the specified seat, in ascending order.
    pub fn hand(&self, seat: Seat) -> &[Card] {
        self.hands.get(&seat).expect("seats populated")
    }

    /// The seat that was dealt the three of diamonds.
    pub fn opener(&self) -> Seat {
        self.hands
            .iter()
            .find_map(|(&seat, hand)| hand.contains(&Card::OPENING).then_some(seat))
            .expect("deal is complete")
    }
}

/// The most recent play, along with the seat that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastPlay {
    pub seat: Seat,
    pub play: Play,
}

/// The outcome of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Seat,
    pub scores: Scores,
}

impl Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wins", self.winner)?;
        for (seat, total) in &self.scores.totals {
            write!(f, ", {seat}: {total:+}")?;
        }
        Ok(())
    }
}

/// The state visible to a particular seat.
#[derive(Debug)]
pub struct PlayerState<'a> {
    /// The player who has access to this state.
    pub seat: Seat,
    /// The rules for this game.
    pub rules: Rules,
    /// The player's hand.
    pub hand: &'a Hand,
    /// The action the game expects next, from whichever seat.
    pub expect: Option<ExpectAction>,
    /// The play to beat, if any.
    pub previous: Option<&'a LastPlay>,
    /// The number of cards held by every seat.
    pub hand_sizes: BTreeMap<Seat, usize>,
}

impl<'a> PlayerState<'a> {
    /// The play to beat, if any.
    pub fn previous_play(&self) -> Option<&'a Play> {
        self.previous.map(|last| &last.play)
    }

    /// Returns true if it is this seat's turn to act.
    pub fn is_my_turn(&self) -> bool {
        self.expect.is_some_and(|e| e.seat == self.seat)
    }

    /// The fewest cards held by any opponent.
    pub fn opponent_min_cards(&self) -> Option<usize> {
        self.hand_sizes
            .iter()
            .filter(|(&seat, _)| seat != self.seat)
            .map(|(_, &n)| n)
            .min()
    }
}
