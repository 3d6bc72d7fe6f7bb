//! The game of Big Two.
//!
//! Four seats are dealt thirteen cards each, and race to empty their hands by playing singles,
//! pairs, triples and five-card hands that beat the play on the table. The holder of the three
//! of diamonds opens. The first seat to run out of cards wins, and everyone else is penalized
//! for what they still hold.

use std::io::IsTerminal;

use tokio::sync::mpsc;
use tracing::info;

mod action;
mod card;
mod combo;
mod error;
mod game;
mod hand;
mod movegen;
mod player;
mod rules;
mod seat;
mod table;
mod wire;
pub use self::action::{Action, ActionData, ActionType, ExpectAction};
pub use self::card::{parse_cards, Card, Deck, ParseCardError, Rank, Suit};
pub use self::combo::{classify, Category, Play, Shape};
pub use self::error::{GameError, PlayerError};
pub use self::game::{
    Deal, Game, GameOutcome, LastPlay, Log, LoggingEngine, PlayerState, TurnEngine,
};
pub use self::hand::Hand;
pub use self::movegen::{candidates, select_play, Difficulty};
pub use self::player::{Console, Observer, Player, Robot};
pub use self::rules::{Rules, Scores, Variant};
pub use self::seat::Seat;
pub use self::table::{Command, SeatKind, Table, TableConfig};
pub use self::wire::{Message, WireError};

/// An event that occurs during the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The cards were dealt, and the opener must play the three of diamonds.
    GameStarted { variant: Variant, opener: Seat },
    /// The seat is expected to act.
    PlayerTurnStarted(Seat),
    /// The seat played cards.
    CardsPlayed(Seat, Play),
    /// The seat passed.
    PlayerPassed(Seat),
    /// Three seats passed in a row, and the table was cleared.
    RoundReopened,
    /// The seat's submission was rejected.
    InvalidPlay(Seat, PlayerError),
    /// A seat emptied their hand.
    GameEnded(GameOutcome),
}

/// Runs a game in the terminal. Human seats are read from stdin.
///
/// If `record` is set, the game log is written to stderr as JSON once the game is over.
pub async fn cli_main(config: TableConfig, record: bool) -> anyhow::Result<()> {
    let humans = config.humans();
    info!(?humans, variant = %config.variant, seed = ?config.seed, "starting table");

    let (commands, mut rx) = mpsc::channel(8);
    if !humans.is_empty() {
        Console::spawn_reader(humans, commands);
    }

    let engine = LoggingEngine::new(config.variant, config.deal());
    let console = Console::new(std::io::stdout().is_terminal());
    let mut table = Table::new(engine, config).with_observer(console.into_observer());
    table.run(&mut rx).await?;

    if record {
        let log = Log::from(table.into_game());
        serde_json::to_writer(std::io::stderr(), &log)?;
    }
    Ok(())
}
