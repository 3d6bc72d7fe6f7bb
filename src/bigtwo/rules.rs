//! House rules.
//!
//! Both variants agree on everything except two details: how the five-card shapes rank against
//! one another, and how penalties are computed at the end of the game.
//!
//! | Shape          | Southern | Northern |
//! |----------------|----------|----------|
//! | Straight flush | 5        | 5        |
//! | Four of a kind | 4        | 4        |
//! | Full house     | 3        | 2        |
//! | Flush          | 2        | 3        |
//! | Straight       | 1        | 1        |

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{classify, Card, Category, Hand, Play, PlayerError, Seat, Shape};

/// House rule variant, fixed when the game is created.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum Variant {
    #[default]
    Southern,
    Northern,
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Variant::Southern => "Southern",
            Variant::Northern => "Northern",
        })
    }
}

/// Penalties and final scores for each seat at the end of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Base penalty for each seat, derived from the cards left in hand.
    pub penalties: BTreeMap<Seat, u32>,
    /// Final score for each seat.
    pub totals: BTreeMap<Seat, i32>,
}

impl Scores {
    pub fn penalty(&self, seat: Seat) -> u32 {
        self.penalties.get(&seat).copied().unwrap_or_default()
    }

    pub fn total(&self, seat: Seat) -> i32 {
        self.totals.get(&seat).copied().unwrap_or_default()
    }
}

/// The rule set for a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules {
    variant: Variant,
}

impl From<Variant> for Rules {
    fn from(variant: Variant) -> Self {
        Self { variant }
    }
}

impl Rules {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Relative strength of a five-card shape. Shapes with fewer cards are never compared with
    /// other cardinalities, so they all share the lowest tier.
    pub fn shape_tier(&self, shape: Shape) -> u8 {
        match (shape, self.variant) {
            (Shape::StraightFlush, _) => 5,
            (Shape::FourOfAKind, _) => 4,
            (Shape::FullHouse, Variant::Southern) | (Shape::Flush, Variant::Northern) => 3,
            (Shape::Flush, Variant::Southern) | (Shape::FullHouse, Variant::Northern) => 2,
            (Shape::Straight, _) => 1,
            (Shape::Single | Shape::Pair | Shape::Triple, _) => 0,
        }
    }

    /// Orders two shapes. Returns `None` when the shapes have different cardinalities, since
    /// those can never be played against each other.
    pub fn category_order(&self, a: Shape, b: Shape) -> Option<Ordering> {
        if a.size() == b.size() {
            Some(self.shape_tier(a).cmp(&self.shape_tier(b)))
        } else {
            None
        }
    }

    /// Orders two classified plays: first by shape, then by key.
    pub fn compare(&self, a: &Category, b: &Category) -> Option<Ordering> {
        self.category_order(a.shape, b.shape)
            .map(|order| order.then(a.key.cmp(&b.key)))
    }

    /// Checks whether `cards` may be played on top of `previous`, returning the classification
    /// of the cards if so. When nothing is on the table, any valid combination may be played.
    pub fn check_follow(
        &self,
        cards: &[Card],
        previous: Option<&Play>,
    ) -> Result<Category, PlayerError> {
        let Some(previous) = previous else {
            return classify(cards);
        };
        let category = classify(cards).map_err(|_| PlayerError::IllegalPlay)?;
        if cards.len() != previous.len() {
            return Err(PlayerError::IllegalPlay);
        }
        match self.compare(&category, &previous.category()) {
            Some(Ordering::Greater) => Ok(category),
            _ => Err(PlayerError::IllegalPlay),
        }
    }

    /// Returns true if `cards` may be played on top of `previous`.
    pub fn is_legal_follow(&self, cards: &[Card], previous: Option<&Play>) -> bool {
        self.check_follow(cards, previous).is_ok()
    }

    /// Finds the seat holding the three of diamonds.
    pub fn opening_seat<'a, I>(&self, hands: I) -> Option<Seat>
    where
        I: IntoIterator<Item = (Seat, &'a Hand)>,
    {
        hands
            .into_iter()
            .find_map(|(seat, hand)| hand.contains(Card::OPENING).then_some(seat))
    }

    /// The base penalty for the cards remaining in a losing hand.
    pub fn base_penalty(&self, hand: &Hand) -> u32 {
        let n = u32::try_from(hand.len()).expect("at most 13 cards");
        let doubled = n >= 8 && hand.contains(Card::TWO_OF_SPADES);
        let mut penalty = match self.variant {
            Variant::Southern => match n {
                0..=7 => n,
                8..=9 => 2 * n,
                10..=12 => 3 * n,
                _ => 4 * n,
            },
            Variant::Northern => n,
        };
        if doubled {
            penalty *= 2;
        }
        if self.variant == Variant::Northern && n == 13 {
            // Never played a card.
            penalty *= 4;
        }
        penalty
    }

    /// Scores the game. Each seat gains the penalties of every other seat, and loses three times
    /// its own penalty. The winner's penalty is always zero.
    pub fn score<'a, I>(&self, hands: I, winner: Seat) -> Scores
    where
        I: IntoIterator<Item = (Seat, &'a Hand)>,
    {
        let penalties: BTreeMap<Seat, u32> = hands
            .into_iter()
            .map(|(seat, hand)| {
                let penalty = if seat == winner {
                    0
                } else {
                    self.base_penalty(hand)
                };
                (seat, penalty)
            })
            .collect();
        let sum: i64 = penalties.values().map(|&p| i64::from(p)).sum();
        let totals = penalties
            .iter()
            .map(|(&seat, &p)| {
                let own = i64::from(p);
                let total = (sum - own) - 3 * own;
                (seat, i32::try_from(total).expect("scores are small"))
            })
            .collect();
        Scores { penalties, totals }
    }
}
