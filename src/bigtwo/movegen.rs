//! Move generation for computer players.
//!
//! Candidates are generated structurally from same-rank groups, runs of consecutive ranks, and
//! same-suit groups, rather than by enumerating every subset of the hand. The result is small
//! enough to scan exhaustively, and deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Card, Hand, Play, PlayerState, Rank, Rules, Suit};

/// The strength of a computer player.
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
pub enum Difficulty {
    /// Only considers singles and pairs, and always plays the smallest option.
    Simple,
    /// Considers every shape, and holds back bombs.
    #[default]
    Advanced,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Difficulty::Simple => "simple",
            Difficulty::Advanced => "advanced",
        })
    }
}

/// Enumerates every valid combination that can be formed from the hand, ordered by size and
/// then by key.
pub fn candidates(hand: &Hand) -> Vec<Play> {
    let cards = hand.to_vec();
    let by_rank: BTreeMap<Rank, Vec<Card>> = cards
        .iter()
        .copied()
        .into_group_map_by(|c| c.rank)
        .into_iter()
        .collect();
    let by_suit: BTreeMap<Suit, Vec<Card>> = cards
        .iter()
        .copied()
        .into_group_map_by(|c| c.suit)
        .into_iter()
        .collect();

    let mut sets: BTreeSet<Vec<Card>> = cards.iter().map(|&c| vec![c]).collect();

    // Pairs and triples.
    for group in by_rank.values() {
        for k in 2..=3 {
            sets.extend(group.iter().copied().combinations(k));
        }
    }

    // Straights, including straight flushes.
    for window in Rank::all_ranks().windows(5) {
        let groups: Option<Vec<&Vec<Card>>> = window.iter().map(|r| by_rank.get(r)).collect();
        if let Some(groups) = groups {
            sets.extend(
                groups
                    .into_iter()
                    .map(|g| g.iter().copied())
                    .multi_cartesian_product(),
            );
        }
    }

    // Flushes.
    for group in by_suit.values() {
        sets.extend(group.iter().copied().combinations(5));
    }

    // Full houses.
    for (rank, group) in &by_rank {
        for triple in group.iter().copied().combinations(3) {
            for pair_group in by_rank
                .iter()
                .filter(|(other, _)| *other != rank)
                .map(|(_, g)| g)
            {
                for pair in pair_group.iter().copied().combinations(2) {
                    sets.insert(triple.iter().chain(&pair).copied().collect());
                }
            }
        }
    }

    // Four of a kind, with each possible kicker.
    for group in by_rank.values().filter(|g| g.len() == 4) {
        for &kicker in cards.iter().filter(|c| c.rank != group[0].rank) {
            sets.insert(group.iter().copied().chain([kicker]).collect());
        }
    }

    sets.into_iter()
        .filter_map(|set| Play::new(set).ok())
        .sorted_by_key(|p| (p.len(), p.key()))
        .collect()
}

/// Chooses the cards to play for the seat in `state`. An empty result is a pass.
///
/// The result is always a legal follow to the play on the table. No other state is consulted,
/// and there is no randomness.
pub fn select_play(difficulty: Difficulty, state: &PlayerState) -> Vec<Card> {
    let previous = state.previous_play();
    let choice = match (difficulty, previous) {
        (Difficulty::Simple, _) => simple(state.rules, state.hand, previous),
        (Difficulty::Advanced, None) => opening(state.hand),
        (Difficulty::Advanced, Some(previous)) => {
            counter(state.rules, state.hand, previous, state.opponent_min_cards())
        }
    };
    match &choice {
        Some(play) => debug!(seat = %state.seat, %difficulty, %play, "selected play"),
        None => debug!(seat = %state.seat, %difficulty, "selected pass"),
    }
    choice.map(Play::into_cards).unwrap_or_default()
}

/// Plays the smallest single or pair that beats the previous play.
fn simple(rules: Rules, hand: &Hand, previous: Option<&Play>) -> Option<Play> {
    let singles = hand.iter().map(|c| vec![c]);
    let pairs = hand
        .iter()
        .tuple_windows()
        .filter(|(a, b)| a.rank == b.rank)
        .map(|(a, b)| vec![a, b]);
    singles
        .chain(pairs)
        .filter(|cards| rules.is_legal_follow(cards, previous))
        .filter_map(|cards| Play::new(cards).ok())
        .min_by_key(|p| (p.key(), p.len()))
}

/// Chooses a play when there's nothing on the table.
fn opening(hand: &Hand) -> Option<Play> {
    let mut plays = candidates(hand);
    if hand.contains(Card::OPENING) {
        plays.retain(|p| p.contains(Card::OPENING));
        if plays.is_empty() {
            return Play::new(vec![Card::OPENING]).ok();
        }
    }
    debug!(candidates = plays.len(), "opening");

    // Bombs are held back, unless the hand is nearly empty, in which case they go first.
    let priority = |p: &Play| {
        if !p.shape().is_bomb() {
            1
        } else if hand.len() <= 5 || p.len() == hand.len() {
            0
        } else {
            2
        }
    };
    plays
        .into_iter()
        .min_by_key(|p| (p.len() != hand.len(), priority(p), p.key(), p.len()))
}

/// Chooses a play that beats `previous`, or `None` to pass.
fn counter(
    rules: Rules,
    hand: &Hand,
    previous: &Play,
    opponent_min_cards: Option<usize>,
) -> Option<Play> {
    let (bombs, regular): (Vec<Play>, Vec<Play>) = candidates(hand)
        .into_iter()
        .filter(|p| rules.is_legal_follow(p.cards(), Some(previous)))
        .partition(|p| p.shape().is_bomb());
    debug!(regular = regular.len(), bombs = bombs.len(), "counter");

    if let Some(play) = regular.iter().chain(&bombs).find(|p| p.len() == hand.len()) {
        return Some(play.clone());
    }

    let cheapest = |plays: Vec<Play>| {
        plays
            .into_iter()
            .min_by_key(|p| (rules.shape_tier(p.shape()), p.key()))
    };
    if let Some(play) = cheapest(regular) {
        return Some(play);
    }

    let bomb = cheapest(bombs)?;
    let endgame = hand.len() <= 5 || opponent_min_cards.is_some_and(|n| n <= 2);
    if previous.shape().is_bomb() || endgame {
        Some(bomb)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use proptest::sample::Index;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::bigtwo::game::fixture;
    use crate::bigtwo::{parse_cards, Deal, LastPlay, Seat, Shape, Variant};

    fn to_hand(s: &str) -> Hand {
        parse_cards(s).unwrap().into_iter().collect()
    }

    fn play(s: &str) -> Play {
        Play::new(parse_cards(s).unwrap()).unwrap()
    }

    fn last(s: &str) -> LastPlay {
        LastPlay {
            seat: Seat::West,
            play: play(s),
        }
    }

    /// The state for South, with every opponent holding `opponent_cards`.
    fn south_state<'a>(
        hand: &'a Hand,
        previous: Option<&'a LastPlay>,
        opponent_cards: usize,
    ) -> PlayerState<'a> {
        let mut hand_sizes: BTreeMap<Seat, usize> = Seat::South
            .others()
            .into_iter()
            .map(|seat| (seat, opponent_cards))
            .collect();
        hand_sizes.insert(Seat::South, hand.len());
        PlayerState {
            seat: Seat::South,
            rules: Variant::Southern.into(),
            hand,
            expect: None,
            previous,
            hand_sizes,
        }
    }

    #[test]
    fn test_candidates() {
        let deal = fixture::deal();
        let north: Hand = deal.hand(Seat::North).iter().copied().collect();
        let plays = candidates(&north);

        let count = |shape: Shape| plays.iter().filter(|p| p.shape() == shape).count();
        assert_eq!(count(Shape::Single), 13);
        assert_eq!(count(Shape::Pair), 5);
        assert_eq!(count(Shape::Triple), 1);
        assert_eq!(count(Shape::Straight), 2);
        assert_eq!(count(Shape::Flush), 1);
        assert_eq!(count(Shape::FullHouse), 2);
        assert_eq!(plays.len(), 24);
        assert!(plays.iter().map(Play::cards).all_unique());
        assert!(plays.windows(2).all(|w| w[0].len() <= w[1].len()));
    }

    #[test]
    fn test_candidates_bombs() {
        let deal = fixture::deal();
        let east: Hand = deal.hand(Seat::East).iter().copied().collect();
        let plays = candidates(&east);
        let count = |shape: Shape| plays.iter().filter(|p| p.shape() == shape).count();
        assert_eq!(count(Shape::FourOfAKind), 18);
        assert_eq!(count(Shape::Straight), 20);

        let plays = candidates(&to_hand("3h 4h 5h 6h 7h 8h"));
        assert_eq!(count_shape(&plays, Shape::StraightFlush), 2);
        assert_eq!(count_shape(&plays, Shape::Flush), 4);
        assert_eq!(count_shape(&plays, Shape::Straight), 0);
    }

    fn count_shape(plays: &[Play], shape: Shape) -> usize {
        plays.iter().filter(|p| p.shape() == shape).count()
    }

    #[test]
    fn test_simple() {
        struct Case {
            hand: &'static str,
            previous: Option<&'static str>,
            expect: &'static str,
        }
        for case in [
            Case {
                hand: "3d 5c 5h 9s",
                previous: None,
                expect: "3d",
            },
            Case {
                hand: "4d 9c kh 2s",
                previous: Some("tc"),
                expect: "kh",
            },
            Case {
                hand: "4d 4c kh ks 2s",
                previous: Some("tc td"),
                expect: "kh ks",
            },
            Case {
                hand: "4d 4c kh ks 2s",
                previous: Some("ac ad"),
                expect: "",
            },
            Case {
                hand: "4d 4c 4h 5s 6d 7c 8h",
                previous: Some("3c 3h 3s"),
                expect: "",
            },
        ] {
            let hand = to_hand(case.hand);
            let previous = case.previous.map(last);
            let state = south_state(&hand, previous.as_ref(), 13);
            assert_eq!(
                select_play(Difficulty::Simple, &state),
                parse_cards(case.expect).unwrap(),
                "{} over {:?}",
                case.hand,
                case.previous
            );
        }
    }

    #[test]
    fn test_advanced_opening() {
        let deal = fixture::deal();
        let north: Hand = deal.hand(Seat::North).iter().copied().collect();
        let state = south_state(&north, None, 13);
        let cards = select_play(Difficulty::Advanced, &state);
        assert!(cards.contains(&Card::OPENING));
        assert_eq!(cards, parse_cards("3d").unwrap());

        // Bombs are held back while the hand is large.
        let hand = to_hand("5d 5c 5h 5s 6d 9c jd");
        let state = south_state(&hand, None, 13);
        assert_eq!(
            select_play(Difficulty::Advanced, &state),
            parse_cards("5d").unwrap()
        );

        // Clearing the hand with a bomb is preferred.
        let hand = to_hand("5d 5c 5h 5s 6d");
        let state = south_state(&hand, None, 13);
        assert_eq!(select_play(Difficulty::Advanced, &state).len(), 5);
    }

    #[test]
    fn test_advanced_counter() {
        struct Case {
            hand: &'static str,
            previous: &'static str,
            opponent_cards: usize,
            expect: Option<Shape>,
        }
        for case in [
            // Cheapest regular play.
            Case {
                hand: "4d 9c kh 2s",
                previous: "tc",
                opponent_cards: 13,
                expect: Some(Shape::Single),
            },
            // Nothing beats it.
            Case {
                hand: "4d 9c kh",
                previous: "2s",
                opponent_cards: 13,
                expect: None,
            },
            // Only a bomb beats it, and it's too early to spend one.
            Case {
                hand: "5d 5c 5h 5s 9c td jd qh",
                previous: "6d 7c 8h 9s ts",
                opponent_cards: 10,
                expect: None,
            },
            // An opponent is about to go out.
            Case {
                hand: "5d 5c 5h 5s 9c td jd qh",
                previous: "6d 7c 8h 9s ts",
                opponent_cards: 2,
                expect: Some(Shape::FourOfAKind),
            },
            // Bombs must be answered with bombs.
            Case {
                hand: "5d 5c 5h 5s 9c td jd qh",
                previous: "3d 3c 3h 3s 4d",
                opponent_cards: 10,
                expect: Some(Shape::FourOfAKind),
            },
            // A flush is cheaper than a full house.
            Case {
                hand: "6d 6c 6h 8h 8s 9h jh qh 3s",
                previous: "3c 4d 5h 6s 7c",
                opponent_cards: 13,
                expect: Some(Shape::Flush),
            },
        ] {
            let hand = to_hand(case.hand);
            let previous = last(case.previous);
            let state = south_state(&hand, Some(&previous), case.opponent_cards);
            let cards = select_play(Difficulty::Advanced, &state);
            let shape = (!cards.is_empty()).then(|| play_shape(&cards));
            assert_eq!(shape, case.expect, "{} over {}", case.hand, case.previous);
        }
    }

    fn play_shape(cards: &[Card]) -> Shape {
        Play::new(cards.to_vec()).unwrap().shape()
    }

    #[test]
    fn test_advanced_counter_picks_lowest() {
        let hand = to_hand("4d 9c kh 2s");
        let previous = last("tc");
        let state = south_state(&hand, Some(&previous), 13);
        assert_eq!(
            select_play(Difficulty::Advanced, &state),
            parse_cards("kh").unwrap()
        );

        // Going out wins over anything cheaper.
        let hand = to_hand("9c 9h");
        let previous = last("3d 3c");
        let state = south_state(&hand, Some(&previous), 13);
        assert_eq!(
            select_play(Difficulty::Advanced, &state),
            parse_cards("9c 9h").unwrap()
        );
    }

    proptest! {
        #[test]
        fn test_selected_plays_are_legal(
            seed: u64,
            index: Index,
            advanced: bool,
            northern: bool,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let deal = Deal::random_with(&mut rng);
            let hand: Hand = deal.hand(Seat::South).iter().copied().collect();
            let opponent: Hand = deal.hand(Seat::West).iter().copied().collect();
            let previous = index
                .get(&candidates(&opponent))
                .clone();
            let previous = LastPlay { seat: Seat::West, play: previous };
            let difficulty = if advanced { Difficulty::Advanced } else { Difficulty::Simple };
            let variant = if northern { Variant::Northern } else { Variant::Southern };

            let mut state = south_state(&hand, Some(&previous), 13);
            state.rules = variant.into();
            let cards = select_play(difficulty, &state);
            if !cards.is_empty() {
                prop_assert!(state.rules.is_legal_follow(&cards, Some(&previous.play)));
                prop_assert!(hand.find_missing(&cards).is_none());
            }

            let state = PlayerState { previous: None, ..state };
            let cards = select_play(difficulty, &state);
            prop_assert!(!cards.is_empty());
            prop_assert!(state.rules.is_legal_follow(&cards, None));
        }
    }
}
