//! Big Two deck.

use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;

use ansi_term::ANSIString;
use serde::{Deserialize, Serialize};

use crate::deck;

/// Card suit, in ascending tiebreak order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "DIAMONDS")]
    Diamond,
    #[serde(rename = "CLUBS")]
    Club,
    #[serde(rename = "HEARTS")]
    Heart,
    #[serde(rename = "SPADES")]
    Spade,
}
impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Suit::Diamond => "♦",
            Suit::Club => "♣",
            Suit::Heart => "♥",
            Suit::Spade => "♠",
        })
    }
}
impl TryFrom<char> for Suit {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'D' | 'd' | '♦' => Suit::Diamond,
            'C' | 'c' | '♣' => Suit::Club,
            'H' | 'h' | '♥' => Suit::Heart,
            'S' | 's' | '♠' => Suit::Spade,
            _ => return Err(()),
        })
    }
}
impl Suit {
    /// All suits, in ascending order.
    pub fn all_suits() -> &'static [Suit; 4] {
        static SUITS: [Suit; 4] = [Suit::Diamond, Suit::Club, Suit::Heart, Suit::Spade];
        &SUITS
    }
}

/// Card rank. The two is the highest rank, and the three is the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
}
impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
        })
    }
}
impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            '2' => Rank::Two,
            _ => return Err(()),
        })
    }
}
impl Rank {
    /// All ranks, in ascending order.
    pub fn all_ranks() -> &'static [Rank; 13] {
        static RANKS: [Rank; 13] = [
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
            Rank::Two,
        ];
        &RANKS
    }

    /// Numeric value of the rank, from 3 through 15 (J=11, Q=12, K=13, A=14, 2=15).
    pub fn value(self) -> u8 {
        self as u8 + 3
    }

    /// The next rank up, if any. Ranks do not wrap around.
    pub fn succ(self) -> Option<Rank> {
        Rank::all_ranks().get(self as usize + 1).copied()
    }
}

/// Error returned when a card cannot be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card {0:?}")]
pub struct ParseCardError(pub String);

/// A playing card. Cards order by rank, then by suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    /// Card rank.
    pub rank: Rank,
    /// Card suit.
    pub suit: Suit,
}
impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let suit = chars.next_back().ok_or_else(err)?;
        let suit = Suit::try_from(suit).map_err(|()| err())?;
        let rank = match chars.as_str() {
            "10" => Rank::Ten,
            r => {
                let mut rc = r.chars();
                match (rc.next(), rc.next()) {
                    (Some(c), None) => Rank::try_from(c).map_err(|()| err())?,
                    _ => return Err(err()),
                }
            }
        };
        Ok(Card { rank, suit })
    }
}
impl Card {
    /// The three of diamonds, which must open the game.
    pub const OPENING: Card = Card::new(Rank::Three, Suit::Diamond);

    /// The two of spades, which doubles a losing seat's penalty.
    pub const TWO_OF_SPADES: Card = Card::new(Rank::Two, Suit::Spade);

    /// Creates a new [`Card`].
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Returns a string representation of the card, decorated with ANSI color codes.
    pub fn to_ansi_string(self) -> ANSIString<'static> {
        use ansi_term::Colour::Red;
        match self.suit {
            Suit::Club | Suit::Spade => self.to_string().into(),
            Suit::Diamond | Suit::Heart => Red.paint(self.to_string()),
        }
    }
}

/// A Big Two deck.
pub type Deck = deck::Deck<Card>;
impl Default for Deck {
    fn default() -> Self {
        itertools::iproduct!(Suit::all_suits(), Rank::all_ranks())
            .map(|(&suit, &rank)| Card { rank, suit })
            .collect()
    }
}

/// Parses a whitespace or comma separated list of cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_card_order() {
        let three_spades = Card::new(Rank::Three, Suit::Spade);
        let four_diamonds = Card::new(Rank::Four, Suit::Diamond);
        let ace = Card::new(Rank::Ace, Suit::Spade);
        let two = Card::new(Rank::Two, Suit::Diamond);
        assert!(Card::OPENING < three_spades);
        assert!(three_spades < four_diamonds);
        assert!(ace < two);
        assert!(two < Card::TWO_OF_SPADES);
    }

    #[test]
    fn test_rank_value() {
        assert_eq!(Rank::Three.value(), 3);
        assert_eq!(Rank::Jack.value(), 11);
        assert_eq!(Rank::Ace.value(), 14);
        assert_eq!(Rank::Two.value(), 15);
        assert_eq!(Rank::King.succ(), Some(Rank::Ace));
        assert_eq!(Rank::Two.succ(), None);
    }

    #[test]
    fn test_parse() {
        struct Case {
            input: &'static str,
            expect: Option<Card>,
        }
        let cases = [
            Case {
                input: "3d",
                expect: Some(Card::OPENING),
            },
            Case {
                input: "3♦",
                expect: Some(Card::OPENING),
            },
            Case {
                input: "2S",
                expect: Some(Card::TWO_OF_SPADES),
            },
            Case {
                input: "10h",
                expect: Some(Card::new(Rank::Ten, Suit::Heart)),
            },
            Case {
                input: "th",
                expect: Some(Card::new(Rank::Ten, Suit::Heart)),
            },
            Case {
                input: "qc",
                expect: Some(Card::new(Rank::Queen, Suit::Club)),
            },
            Case {
                input: "1h",
                expect: None,
            },
            Case {
                input: "3x",
                expect: None,
            },
            Case {
                input: "",
                expect: None,
            },
            Case {
                input: "33d",
                expect: None,
            },
        ];
        for case in cases {
            assert_eq!(case.input.parse::<Card>().ok(), case.expect, "{}", case.input);
        }
    }

    #[test]
    fn test_display_round_trip() {
        for card in Deck::default().take(52) {
            assert_eq!(card.to_string().parse::<Card>(), Ok(card));
        }
    }

    #[test]
    fn test_parse_cards() {
        let cards = parse_cards("3d, 4d 5d,").unwrap();
        assert_eq!(cards.len(), 3);
        assert!(parse_cards("3d zz").is_err());
    }

    #[test]
    fn test_full_deck() {
        let mut deck = Deck::default();
        assert_eq!(deck.len(), 52);
        let cards: HashSet<_> = deck.take(52).into_iter().collect();
        assert_eq!(cards.len(), 52);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Card::OPENING).unwrap();
        assert_eq!(json, r#"{"rank":"THREE","suit":"DIAMONDS"}"#);
        let card: Card = serde_json::from_str(r#"{"suit":"SPADES","rank":"TWO"}"#).unwrap();
        assert_eq!(card, Card::TWO_OF_SPADES);
    }
}
