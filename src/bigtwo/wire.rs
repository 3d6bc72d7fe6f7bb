//! Line-oriented message codec for relaying a game between processes.
//!
//! Each message is a single line: a tag, optionally followed by `:` and a payload. Seats are
//! sent as their clockwise index from North, and lists of cards as JSON.
//!
//! ```text
//! DEAL_CARDS:[{"rank":"THREE","suit":"DIAMONDS"},...]
//! GAME_STARTED:0
//! PLAY_CARDS:[...]
//! PASS
//! CARD_PLAYED:2:[...]
//! UPDATE_HAND:[...]
//! TURN_CHANGED:3
//! GAME_ENDED:1
//! ```

use std::fmt::Display;
use std::str::FromStr;

use super::{Card, Command, Event, Seat};

/// An error decoding a [`Message`].
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("unknown message tag {0:?}")]
    UnknownTag(String),
    #[error("missing payload for {0}")]
    MissingPayload(&'static str),
    #[error("invalid seat {0:?}")]
    InvalidSeat(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A message exchanged with a remote seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The recipient's initial hand.
    DealCards(Vec<Card>),
    /// The game has started, and the specified seat opens.
    GameStarted(Seat),
    /// The sender plays these cards.
    PlayCards(Vec<Card>),
    /// The sender passes.
    Pass,
    /// A seat played cards.
    CardPlayed(Seat, Vec<Card>),
    /// The recipient's hand, after a change.
    UpdateHand(Vec<Card>),
    /// The specified seat is expected to act.
    TurnChanged(Seat),
    /// The game is over, and the specified seat won.
    GameEnded(Seat),
}

const DEAL_CARDS: &str = "DEAL_CARDS";
const GAME_STARTED: &str = "GAME_STARTED";
const PLAY_CARDS: &str = "PLAY_CARDS";
const PASS: &str = "PASS";
const CARD_PLAYED: &str = "CARD_PLAYED";
const UPDATE_HAND: &str = "UPDATE_HAND";
const TURN_CHANGED: &str = "TURN_CHANGED";
const GAME_ENDED: &str = "GAME_ENDED";

fn cards_json(cards: &[Card]) -> String {
    serde_json::to_string(cards).expect("cards serialize")
}

fn parse_seat(s: &str) -> Result<Seat, WireError> {
    s.trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| Seat::try_from(i).ok())
        .ok_or_else(|| WireError::InvalidSeat(s.to_string()))
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::DealCards(cards) => write!(f, "{DEAL_CARDS}:{}", cards_json(cards)),
            Message::GameStarted(seat) => write!(f, "{GAME_STARTED}:{}", seat.index()),
            Message::PlayCards(cards) => write!(f, "{PLAY_CARDS}:{}", cards_json(cards)),
            Message::Pass => f.write_str(PASS),
            Message::CardPlayed(seat, cards) => {
                write!(f, "{CARD_PLAYED}:{}:{}", seat.index(), cards_json(cards))
            }
            Message::UpdateHand(cards) => write!(f, "{UPDATE_HAND}:{}", cards_json(cards)),
            Message::TurnChanged(seat) => write!(f, "{TURN_CHANGED}:{}", seat.index()),
            Message::GameEnded(seat) => write!(f, "{GAME_ENDED}:{}", seat.index()),
        }
    }
}

impl FromStr for Message {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (tag, payload) = match s.split_once(':') {
            Some((tag, payload)) => (tag, Some(payload)),
            None => (s, None),
        };
        let payload = |tag| payload.ok_or(WireError::MissingPayload(tag));
        Ok(match tag {
            DEAL_CARDS => Message::DealCards(serde_json::from_str(payload(DEAL_CARDS)?)?),
            GAME_STARTED => Message::GameStarted(parse_seat(payload(GAME_STARTED)?)?),
            PLAY_CARDS => Message::PlayCards(serde_json::from_str(payload(PLAY_CARDS)?)?),
            PASS => Message::Pass,
            CARD_PLAYED => {
                let (seat, cards) = payload(CARD_PLAYED)?
                    .split_once(':')
                    .ok_or(WireError::MissingPayload(CARD_PLAYED))?;
                Message::CardPlayed(parse_seat(seat)?, serde_json::from_str(cards)?)
            }
            UPDATE_HAND => Message::UpdateHand(serde_json::from_str(payload(UPDATE_HAND)?)?),
            TURN_CHANGED => Message::TurnChanged(parse_seat(payload(TURN_CHANGED)?)?),
            GAME_ENDED => Message::GameEnded(parse_seat(payload(GAME_ENDED)?)?),
            _ => return Err(WireError::UnknownTag(tag.to_string())),
        })
    }
}

impl Message {
    /// Converts an engine event into the message broadcast to remote seats, if any.
    pub fn from_event(event: &Event) -> Option<Message> {
        match event {
            Event::GameStarted { opener, .. } => Some(Message::GameStarted(*opener)),
            Event::PlayerTurnStarted(seat) => Some(Message::TurnChanged(*seat)),
            Event::CardsPlayed(seat, play) => {
                Some(Message::CardPlayed(*seat, play.cards().to_vec()))
            }
            Event::GameEnded(outcome) => Some(Message::GameEnded(outcome.winner)),
            Event::PlayerPassed(_) | Event::RoundReopened | Event::InvalidPlay(..) => None,
        }
    }

    /// Converts a message received from the remote seat into a command, if it is one.
    pub fn into_command(self, seat: Seat) -> Option<Command> {
        match self {
            Message::PlayCards(cards) => Some(Command::Play { seat, cards }),
            Message::Pass => Some(Command::Pass { seat }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;
    use crate::bigtwo::{parse_cards, Play};

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn test_format() {
        assert_eq!(
            Message::PlayCards(cards("3d")).to_string(),
            r#"PLAY_CARDS:[{"rank":"THREE","suit":"DIAMONDS"}]"#
        );
        assert_eq!(
            Message::CardPlayed(Seat::South, cards("2s")).to_string(),
            r#"CARD_PLAYED:2:[{"rank":"TWO","suit":"SPADES"}]"#
        );
        assert_eq!(Message::TurnChanged(Seat::West).to_string(), "TURN_CHANGED:3");
        assert_eq!(Message::Pass.to_string(), "PASS");
    }

    #[test]
    fn test_parse() {
        for message in [
            Message::DealCards(cards("3d 4c 2s")),
            Message::GameStarted(Seat::East),
            Message::CardPlayed(Seat::North, cards("9d 9c")),
            Message::UpdateHand(vec![]),
            Message::GameEnded(Seat::South),
        ] {
            assert_eq!(message.to_string().parse::<Message>().unwrap(), message);
        }

        assert_matches!("HELLO".parse::<Message>(), Err(WireError::UnknownTag(_)));
        assert_matches!(
            "TURN_CHANGED".parse::<Message>(),
            Err(WireError::MissingPayload(TURN_CHANGED))
        );
        assert_matches!(
            "TURN_CHANGED:4".parse::<Message>(),
            Err(WireError::InvalidSeat(_))
        );
        assert_matches!("PLAY_CARDS:[1]".parse::<Message>(), Err(WireError::Json(_)));
    }

    #[test]
    fn test_events_and_commands() {
        let play = Play::new(cards("3d 3c")).unwrap();
        assert_eq!(
            Message::from_event(&Event::CardsPlayed(Seat::North, play)),
            Some(Message::CardPlayed(Seat::North, cards("3d 3c")))
        );
        assert_eq!(Message::from_event(&Event::RoundReopened), None);

        let message: Message = "PASS".parse().unwrap();
        assert_eq!(
            message.into_command(Seat::East),
            Some(Command::Pass { seat: Seat::East })
        );
        assert_eq!(Message::TurnChanged(Seat::East).into_command(Seat::East), None);
    }
}
