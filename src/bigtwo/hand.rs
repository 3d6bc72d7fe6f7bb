//! A seat's hand.

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;

use super::Card;

/// The cards currently held by a seat, kept in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: BTreeSet<Card>,
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cards.iter().join(" "))
    }
}

impl Hand {
    /// Adds cards to the hand.
    pub fn add<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    /// Returns the first of `cards` that is missing from the hand, if any.
    pub fn find_missing(&self, cards: &[Card]) -> Option<Card> {
        cards.iter().find(|c| !self.cards.contains(c)).copied()
    }

    /// Removes all of `cards` from the hand. Nothing is removed if any card is missing, in
    /// which case the missing card is returned.
    pub fn remove(&mut self, cards: &[Card]) -> Result<(), Card> {
        if let Some(card) = self.find_missing(cards) {
            return Err(card);
        }
        for card in cards {
            self.cards.remove(card);
        }
        Ok(())
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates over the cards in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// Returns the cards in ascending order.
    pub fn to_vec(&self) -> Vec<Card> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bigtwo::parse_cards;

    #[test]
    fn test_remove_is_atomic() {
        let mut hand: Hand = parse_cards("3d 4c 5h").unwrap().into_iter().collect();
        let missing = parse_cards("3d 6s").unwrap();
        assert_eq!(hand.remove(&missing), Err(missing[1]));
        assert_eq!(hand.len(), 3);

        hand.remove(&parse_cards("3d 5h").unwrap()).unwrap();
        assert_eq!(hand.to_vec(), parse_cards("4c").unwrap());
        assert!(!hand.contains(Card::OPENING));
    }

    #[test]
    fn test_sorted() {
        let mut hand = Hand::default();
        hand.add(parse_cards("2s 3d ac").unwrap());
        assert_eq!(hand.to_string(), "3♦ A♣ 2♠");
        hand.clear();
        assert!(hand.is_empty());
    }
}
