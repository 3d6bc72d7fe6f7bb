//! The turn engine.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info, warn};

use super::{Deal, Game, GameOutcome, LastPlay, PlayerState};
use crate::bigtwo::{
    Action, ActionData, ActionType, Card, Event, ExpectAction, GameError, Hand, Play, PlayerError,
    Rules, Seat, Variant,
};

/// The main state machine for the game.
///
/// A new game is initiated by a deal into the `Open` state, where the holder of the three of
/// diamonds must play it. Thereafter, each seat in clockwise order must `Follow` the play on the
/// table, either by beating it or passing. After three consecutive passes, the table is cleared
/// and the next seat must `Lead`. A pass while leading is counted like any other. The game is
/// over when a seat empties their hand.
#[derive(Debug)]
pub struct TurnEngine {
    rules: Rules,
    deal: Deal,
    hands: BTreeMap<Seat, Hand>,
    previous: Option<LastPlay>,
    passes: u8,
    next_action: Option<ExpectAction>,
    outcome: Option<GameOutcome>,
    events: VecDeque<Event>,
}

impl Game for TurnEngine {
    fn rules(&self) -> Rules {
        self.rules
    }

    fn deal(&self) -> &Deal {
        &self.deal
    }

    fn next_action(&self) -> Option<ExpectAction> {
        self.next_action
    }

    fn previous(&self) -> Option<&LastPlay> {
        self.previous.as_ref()
    }

    fn hand(&self, seat: Seat) -> &Hand {
        self.hands.get(&seat).expect("seats populated")
    }

    fn player_state(&self, seat: Seat) -> PlayerState<'_> {
        PlayerState {
            seat,
            rules: self.rules,
            hand: self.hand(seat),
            expect: self.next_action,
            previous: self.previous.as_ref(),
            hand_sizes: self
                .hands
                .iter()
                .map(|(&seat, hand)| (seat, hand.len()))
                .collect(),
        }
    }

    fn apply_action(&mut self, Action { seat, data }: Action) -> Result<(), GameError> {
        match data {
            ActionData::Play { cards } => self.submit_play(seat, cards),
            ActionData::Pass => self.submit_pass(seat),
        }
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }
}

impl TurnEngine {
    /// Starts a new game with the specified deal.
    pub fn new(variant: Variant, deal: Deal) -> Self {
        let mut engine = Self {
            rules: variant.into(),
            deal: deal.clone(),
            hands: BTreeMap::new(),
            previous: None,
            passes: 0,
            next_action: None,
            outcome: None,
            events: VecDeque::new(),
        };
        engine.start_new_game(deal);
        engine
    }

    /// Starts a new game with a shuffled deck.
    pub fn random(variant: Variant) -> Self {
        Self::new(variant, Deal::random())
    }

    /// Discards all state, and starts over with a fresh deal.
    pub fn start_new_game(&mut self, deal: Deal) {
        self.hands = Seat::all_seats()
            .iter()
            .map(|&seat| (seat, deal.hand(seat).iter().copied().collect()))
            .collect();
        let opener = self
            .rules
            .opening_seat(self.hands.iter().map(|(&seat, hand)| (seat, hand)))
            .expect("deal is complete");
        self.deal = deal;
        self.previous = None;
        self.passes = 0;
        self.outcome = None;
        self.next_action = Some(ExpectAction::new(opener, ActionType::Open));
        self.events.clear();
        self.events.push_back(Event::GameStarted {
            variant: self.rules.variant(),
            opener,
        });
        self.events.push_back(Event::PlayerTurnStarted(opener));
        info!(%opener, variant = %self.rules.variant(), "game started");
    }

    /// The seat expected to act, unless the game is over.
    pub fn acting_seat(&self) -> Option<Seat> {
        self.next_action.map(|e| e.seat)
    }

    /// The number of seats that have passed since the last play.
    pub fn consecutive_passes(&self) -> u8 {
        self.passes
    }

    /// Plays cards from the acting seat's hand.
    pub fn submit_play(&mut self, seat: Seat, cards: Vec<Card>) -> Result<(), GameError> {
        let expect = self.expect_seat(seat)?;
        let play = self
            .validate_play(expect, &cards)
            .map_err(|err| self.reject(seat, err))?;

        let hand = self.hands.get_mut(&seat).expect("seats populated");
        hand.remove(play.cards())
            .map_err(|card| PlayerError::NotInHand(seat, card))?;
        let emptied = hand.is_empty();
        debug!(%seat, %play, shape = %play.shape(), "play accepted");

        self.passes = 0;
        self.previous = Some(LastPlay {
            seat,
            play: play.clone(),
        });
        self.events.push_back(Event::CardsPlayed(seat, play));

        if emptied {
            self.finish(seat);
        } else {
            self.advance(seat.next(), ActionType::Follow);
        }
        Ok(())
    }

    /// Passes on the play on the table.
    pub fn submit_pass(&mut self, seat: Seat) -> Result<(), GameError> {
        let expect = self.expect_seat(seat)?;
        if expect.action == ActionType::Open {
            return Err(self.reject(seat, PlayerError::MustOpenWithStartingCard));
        }

        self.passes += 1;
        debug!(%seat, passes = self.passes, "pass accepted");
        self.events.push_back(Event::PlayerPassed(seat));

        if self.passes >= 3 {
            self.passes = 0;
            self.previous = None;
            self.events.push_back(Event::RoundReopened);
            info!(leader = %seat.next(), "round reopened");
            self.advance(seat.next(), ActionType::Lead);
        } else if self.previous.is_none() {
            self.advance(seat.next(), ActionType::Lead);
        } else {
            self.advance(seat.next(), ActionType::Follow);
        }
        Ok(())
    }

    /// Validates that the seat is expected to act, and returns the expected action.
    fn expect_seat(&mut self, seat: Seat) -> Result<ExpectAction, GameError> {
        match self.next_action {
            None => Err(GameError::GameOver),
            Some(expect) if expect.seat != seat => Err(self.reject(
                seat,
                PlayerError::NotYourTurn {
                    expected: expect.seat,
                    got: seat,
                },
            )),
            Some(expect) => Ok(expect),
        }
    }

    /// Validates a play without modifying the state of the game.
    fn validate_play(&self, expect: ExpectAction, cards: &[Card]) -> Result<Play, PlayerError> {
        let seat = expect.seat;
        if let Some(card) = self.hand(seat).find_missing(cards) {
            return Err(PlayerError::NotInHand(seat, card));
        }
        if expect.action == ActionType::Open && !cards.contains(&Card::OPENING) {
            return Err(PlayerError::MustOpenWithStartingCard);
        }
        let previous = self.previous.as_ref().map(|last| &last.play);
        self.rules
            .check_follow(cards, previous)
            .map_err(|_| PlayerError::IllegalPlay)?;
        Play::new(cards.to_vec())
    }

    /// Reports a rejected submission.
    fn reject(&mut self, seat: Seat, err: PlayerError) -> GameError {
        warn!(%seat, %err, "submission rejected");
        self.events.push_back(Event::InvalidPlay(seat, err.clone()));
        GameError::Player(err)
    }

    fn advance(&mut self, seat: Seat, action: ActionType) {
        self.next_action = Some(ExpectAction::new(seat, action));
        self.events.push_back(Event::PlayerTurnStarted(seat));
    }

    fn finish(&mut self, winner: Seat) {
        let scores = self
            .rules
            .score(self.hands.iter().map(|(&seat, hand)| (seat, hand)), winner);
        let outcome = GameOutcome { winner, scores };
        info!(%outcome, "game over");
        self.next_action = None;
        self.outcome = Some(outcome.clone());
        self.events.push_back(Event::GameEnded(outcome));
    }
}
