//! The driver loop.
//!
//! A [`Table`] seats a mix of human and computer players around a [`Game`], and runs it to
//! completion. Computer seats decide synchronously. Human seats submit [`Command`]s over a
//! channel, and a seat that takes too long has its turn played by the advanced move generator.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::player::{Observer, Player, Robot};
use super::{
    Action, ActionType, Card, Deal, Difficulty, ExpectAction, Game, GameError, GameOutcome, Seat,
    Variant,
};

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatKind {
    Human,
    Computer(Difficulty),
}

/// Configuration for a table, supplied once when the game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// House rules.
    pub variant: Variant,
    /// Controllers, indexed by [`Seat::index`].
    pub seats: [SeatKind; 4],
    /// How long a human seat may take before its turn is played for it.
    pub turn_timeout: Duration,
    /// Seed for the deal. A fresh random deal is used when absent.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        let robot = SeatKind::Computer(Difficulty::Advanced);
        Self {
            variant: Variant::Southern,
            seats: [robot, robot, SeatKind::Human, robot],
            turn_timeout: Duration::from_secs(15),
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn seat(&self, seat: Seat) -> SeatKind {
        self.seats[seat.index()]
    }

    /// Seats controlled by humans, in clockwise order.
    pub fn humans(&self) -> Vec<Seat> {
        Seat::all_seats()
            .iter()
            .copied()
            .filter(|&seat| self.seat(seat) == SeatKind::Human)
            .collect()
    }

    /// Deals the cards for a new game.
    pub fn deal(&self) -> Deal {
        match self.seed {
            Some(seed) => Deal::random_with(&mut StdRng::seed_from_u64(seed)),
            None => Deal::random(),
        }
    }
}

/// A command submitted on behalf of a human seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play { seat: Seat, cards: Vec<Card> },
    Pass { seat: Seat },
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Play { seat, cards } => Action::play(seat, cards),
            Command::Pass { seat } => Action::pass(seat),
        }
    }
}

impl Command {
    /// The seat submitting the command.
    pub fn seat(&self) -> Seat {
        match self {
            Command::Play { seat, .. } | Command::Pass { seat } => *seat,
        }
    }
}

/// Runs a game with a mix of human and computer seats.
pub struct Table<G> {
    game: G,
    config: TableConfig,
    players: BTreeMap<Seat, Box<dyn Player>>,
    fallback: Robot,
    observer: Option<Box<dyn Observer>>,
    viewer: Seat,
}

impl<G: Game> Table<G> {
    /// Seats a robot at each computer seat.
    pub fn new(game: G, config: TableConfig) -> Self {
        let players = Seat::all_seats()
            .iter()
            .filter_map(|&seat| match config.seat(seat) {
                SeatKind::Computer(difficulty) => {
                    Some((seat, Robot::new(difficulty).into_player()))
                }
                SeatKind::Human => None,
            })
            .collect();
        let viewer = config.humans().first().copied().unwrap_or(Seat::South);
        Self {
            game,
            config,
            players,
            fallback: Robot::new(Difficulty::Advanced),
            observer: None,
            viewer,
        }
    }

    /// Replaces the player at a computer seat.
    pub fn with_player(mut self, seat: Seat, player: Box<dyn Player>) -> Self {
        self.players.insert(seat, player);
        self
    }

    /// Attaches an observer, which sees the game from the first human seat.
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn into_game(self) -> G {
        self.game
    }

    /// Runs the game to completion.
    ///
    /// Fails if a computer player makes an action that can't be recovered by passing, or if the
    /// command channel closes while a human seat is expected to act.
    pub async fn run(
        &mut self,
        commands: &mut mpsc::Receiver<Command>,
    ) -> Result<GameOutcome, GameError> {
        loop {
            self.dispatch_events();
            let Some(expect) = self.game.next_action() else {
                break;
            };
            if self.players.contains_key(&expect.seat) {
                self.computer_turn(expect)?;
            } else {
                self.human_turn(expect, commands).await?;
            }
        }
        self.dispatch_events();
        let outcome = self.game.outcome().cloned().expect("finished game has an outcome");
        info!(%outcome, "table finished");
        Ok(outcome)
    }

    fn dispatch_events(&mut self) {
        while let Some(event) = self.game.pop_event() {
            for (&seat, player) in &self.players {
                player.notify(self.game.player_state(seat), &event);
            }
            if let Some(observer) = &self.observer {
                observer.notify(self.game.player_state(self.viewer), &event);
            }
        }
    }

    fn computer_turn(&mut self, expect: ExpectAction) -> Result<(), GameError> {
        let player = self.players.get(&expect.seat).expect("computer seat");
        let data = player.take_action(self.game.player_state(expect.seat), expect.action);
        match self.game.apply_action(expect.with_data(data)) {
            Err(GameError::Player(err)) if player.handle_error(err.clone()) => Ok(()),
            Err(GameError::Player(err)) if expect.action != ActionType::Open => {
                warn!(seat = %expect.seat, %err, "falling back to pass");
                self.game.apply_action(Action::pass(expect.seat))
            }
            result => result,
        }
    }

    async fn human_turn(
        &mut self,
        expect: ExpectAction,
        commands: &mut mpsc::Receiver<Command>,
    ) -> Result<(), GameError> {
        if let Some(observer) = &self.observer {
            observer.prompt(self.game.player_state(expect.seat));
        }
        let deadline = Instant::now() + self.config.turn_timeout;
        loop {
            tokio::select! {
                command = commands.recv() => {
                    let command = command.ok_or(GameError::Disconnected)?;
                    debug!(?command, "received command");
                    match self.game.apply_action(command.into()) {
                        Ok(()) => return Ok(()),
                        Err(GameError::Player(_)) => self.dispatch_events(),
                        Err(err) => return Err(err),
                    }
                }
                () = sleep_until(deadline) => {
                    warn!(seat = %expect.seat, timeout = ?self.config.turn_timeout, "turn timed out");
                    let data = self
                        .fallback
                        .take_action(self.game.player_state(expect.seat), expect.action);
                    return self.game.apply_action(expect.with_data(data));
                }
            }
        }
    }
}
