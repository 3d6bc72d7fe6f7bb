//! Card combinations.
//!
//! Every play is a set of one, two, three or five cards which must classify into one of eight
//! [`Shape`]s. Classification is a pure function of the set of cards: the order in which they
//! are supplied never matters.

use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Card, PlayerError};

/// The combinatorial pattern of a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Single,
    Pair,
    Triple,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Shape::Single => "single",
            Shape::Pair => "pair",
            Shape::Triple => "triple",
            Shape::Straight => "straight",
            Shape::Flush => "flush",
            Shape::FullHouse => "full house",
            Shape::FourOfAKind => "four of a kind",
            Shape::StraightFlush => "straight flush",
        })
    }
}

impl Shape {
    /// The number of cards in a play of this shape.
    pub fn size(self) -> usize {
        match self {
            Shape::Single => 1,
            Shape::Pair => 2,
            Shape::Triple => 3,
            _ => 5,
        }
    }

    /// Bomb-like shapes are generally held back as finishing plays.
    pub fn is_bomb(self) -> bool {
        matches!(self, Shape::FourOfAKind | Shape::StraightFlush)
    }
}

/// The classification of a set of cards.
///
/// The key is the card that decides ties between two plays of the same shape: the highest
/// card for singles, pairs, triples, straights and flushes, or the highest card of the
/// dominant rank group for full houses and four-of-a-kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub shape: Shape,
    pub key: Card,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} high)", self.shape, self.key)
    }
}

/// Classifies a set of cards.
pub fn classify(cards: &[Card]) -> Result<Category, PlayerError> {
    let sorted: Vec<Card> = cards.iter().copied().sorted_unstable().collect();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(PlayerError::InvalidShape);
    }
    let key = *sorted.last().ok_or(PlayerError::InvalidShape)?;
    let same_rank = sorted.iter().all(|c| c.rank == key.rank);
    let category = |shape| -> Result<Category, PlayerError> { Ok(Category { shape, key }) };
    match sorted.len() {
        1 => category(Shape::Single),
        2 if same_rank => category(Shape::Pair),
        3 if same_rank => category(Shape::Triple),
        5 => classify_five(&sorted).ok_or(PlayerError::InvalidShape),
        _ => Err(PlayerError::InvalidShape),
    }
}

/// Classifies five distinct cards, sorted in ascending order.
fn classify_five(sorted: &[Card]) -> Option<Category> {
    let high = sorted[4];
    let flush = sorted.iter().all(|c| c.suit == high.suit);
    let straight = sorted
        .windows(2)
        .all(|w| w[0].rank.succ() == Some(w[1].rank));

    let groups = sorted.iter().copied().into_group_map_by(|c| c.rank);
    let largest = groups.values().max_by_key(|g| g.len())?;
    let group_key = *largest.iter().max()?;

    let (shape, key) = if flush && straight {
        (Shape::StraightFlush, high)
    } else if largest.len() == 4 {
        (Shape::FourOfAKind, group_key)
    } else if largest.len() == 3 && groups.len() == 2 {
        (Shape::FullHouse, group_key)
    } else if flush {
        (Shape::Flush, high)
    } else if straight {
        (Shape::Straight, high)
    } else {
        return None;
    };
    Some(Category { shape, key })
}

/// An immutable snapshot of the cards in a play, along with their classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Play {
    cards: Vec<Card>,
    category: Category,
}

impl Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.cards.iter().join(" "))
    }
}

impl Play {
    /// Classifies the cards into a new [`Play`]. The cards are stored in ascending order.
    pub fn new(cards: Vec<Card>) -> Result<Self, PlayerError> {
        let category = classify(&cards)?;
        let cards = cards.into_iter().sorted_unstable().collect();
        Ok(Self { cards, category })
    }

    /// The cards, in ascending order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Consumes the play, returning its cards.
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn shape(&self) -> Shape {
        self.category.shape
    }

    pub fn key(&self) -> Card {
        self.category.key
    }

    /// The number of cards in the play.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}
