//! Hand evaluation: ranking five-card hands and picking winners.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use super::entities::{Card, Value, validate_hand};
use super::errors::GameResult;

/// Hand strength categories, weakest first so the derived `Ord` gives
/// category comparison directly.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "High Card",
            Self::OnePair => "Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
        };
        write!(f, "{repr}")
    }
}

/// A ranked hand: its category plus the ordered kicker sequence used
/// to break ties within the category, most significant value first.
///
/// The derived `Ord` compares category first, then kickers
/// lexicographically. Two hands comparing equal is a legitimate
/// outcome: suits never break ties.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct HandRank {
    pub category: HandCategory,
    pub values: Vec<Value>,
}

/// Rank a 5-card hand. Total and deterministic: the same cards always
/// produce the same rank, independent of input order.
pub fn eval(cards: &[Card]) -> GameResult<HandRank> {
    validate_hand(cards)?;

    let mut values: Vec<Value> = cards.iter().map(|card| card.0).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.windows(2).all(|w| w[0].1 == w[1].1);
    let is_wheel = values == [14, 5, 4, 3, 2];
    let is_straight = is_wheel || values.windows(2).all(|w| w[0] == w[1] + 1);

    if is_straight {
        // The wheel is the lowest straight: its ace counts as 1 in the
        // kicker sequence so A-2-3-4-5 sorts under 2-3-4-5-6.
        let values = if is_wheel { vec![5, 4, 3, 2, 1] } else { values };
        let category = if is_flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        return Ok(HandRank { category, values });
    }
    if is_flush {
        return Ok(HandRank {
            category: HandCategory::Flush,
            values,
        });
    }

    // Group values by multiplicity: most frequent first, highest value
    // breaking ties, which is exactly kicker-sequence order.
    let mut counts: BTreeMap<Value, u8> = BTreeMap::new();
    for &value in &values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut groups: Vec<(u8, Value)> = counts
        .into_iter()
        .map(|(value, count)| (count, value))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let category = match (groups[0].0, groups.get(1).map_or(0, |group| group.0)) {
        (4, _) => HandCategory::FourOfAKind,
        (3, 2) => HandCategory::FullHouse,
        (3, _) => HandCategory::ThreeOfAKind,
        (2, 2) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    let values = groups
        .into_iter()
        .flat_map(|(count, value)| std::iter::repeat_n(value, count as usize))
        .collect();
    Ok(HandRank { category, values })
}

/// Indices of all maximal ranks, ascending, so ties come back in the
/// order the hands were given.
#[must_use]
pub fn argmax(ranks: &[HandRank]) -> Vec<usize> {
    let Some(best) = ranks.iter().max() else {
        return Vec::new();
    };
    ranks
        .iter()
        .enumerate()
        .filter(|(_, rank)| *rank == best)
        .map(|(i, _)| i)
        .collect()
}

fn value_name(value: Value) -> &'static str {
    match value {
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Jack",
        12 => "Queen",
        13 => "King",
        _ => "Ace",
    }
}

fn plural_name(value: Value) -> &'static str {
    match value {
        2 => "Twos",
        3 => "Threes",
        4 => "Fours",
        5 => "Fives",
        6 => "Sixes",
        7 => "Sevens",
        8 => "Eights",
        9 => "Nines",
        10 => "Tens",
        11 => "Jacks",
        12 => "Queens",
        13 => "Kings",
        _ => "Aces",
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self.category {
            HandCategory::HighCard => format!("{} High", value_name(self.values[0])),
            HandCategory::OnePair => format!("Pair of {}", plural_name(self.values[0])),
            HandCategory::TwoPair => format!(
                "Two Pair, {} and {}",
                plural_name(self.values[0]),
                plural_name(self.values[2]),
            ),
            HandCategory::ThreeOfAKind => {
                format!("Three of a Kind, {}", plural_name(self.values[0]))
            }
            HandCategory::Straight => format!("Straight, {} High", value_name(self.values[0])),
            HandCategory::Flush => format!("Flush, {} High", value_name(self.values[0])),
            HandCategory::FullHouse => format!(
                "Full House, {} over {}",
                plural_name(self.values[0]),
                plural_name(self.values[3]),
            ),
            HandCategory::FourOfAKind => {
                format!("Four of a Kind, {}", plural_name(self.values[0]))
            }
            HandCategory::StraightFlush => {
                format!("Straight Flush, {} High", value_name(self.values[0]))
            }
        };
        write!(f, "{repr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit::{self, *};
    use crate::game::errors::GameError;

    fn card(value: Value, suit: Suit) -> Card {
        Card(value, suit)
    }

    fn rank(cards: [Card; 5]) -> HandRank {
        eval(&cards).unwrap()
    }

    // === Category Tests ===

    #[test]
    fn test_straight_flush() {
        let hand = rank([
            card(9, Heart),
            card(10, Heart),
            card(8, Heart),
            card(11, Heart),
            card(7, Heart),
        ]);
        assert_eq!(hand.category, HandCategory::StraightFlush);
        assert_eq!(hand.values, vec![11, 10, 9, 8, 7]);
    }

    #[test]
    fn test_ace_high_straight_flush() {
        let hand = rank([
            card(10, Spade),
            card(14, Spade),
            card(12, Spade),
            card(13, Spade),
            card(11, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::StraightFlush);
        assert_eq!(hand.values, vec![14, 13, 12, 11, 10]);
    }

    #[test]
    fn test_wheel_straight_flush_ranks_lowest() {
        let wheel = rank([
            card(14, Club),
            card(2, Club),
            card(3, Club),
            card(4, Club),
            card(5, Club),
        ]);
        assert_eq!(wheel.category, HandCategory::StraightFlush);
        assert_eq!(wheel.values, vec![5, 4, 3, 2, 1]);
        let six_high = rank([
            card(2, Heart),
            card(3, Heart),
            card(4, Heart),
            card(5, Heart),
            card(6, Heart),
        ]);
        assert!(wheel < six_high);
    }

    #[test]
    fn test_four_of_a_kind() {
        let hand = rank([
            card(14, Spade),
            card(14, Heart),
            card(14, Diamond),
            card(14, Club),
            card(13, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::FourOfAKind);
        assert_eq!(hand.values, vec![14, 14, 14, 14, 13]);
    }

    #[test]
    fn test_full_house() {
        let hand = rank([
            card(13, Spade),
            card(13, Heart),
            card(13, Diamond),
            card(12, Club),
            card(12, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::FullHouse);
        assert_eq!(hand.values, vec![13, 13, 13, 12, 12]);
    }

    #[test]
    fn test_flush() {
        let hand = rank([
            card(2, Diamond),
            card(5, Diamond),
            card(8, Diamond),
            card(11, Diamond),
            card(14, Diamond),
        ]);
        assert_eq!(hand.category, HandCategory::Flush);
        assert_eq!(hand.values, vec![14, 11, 8, 5, 2]);
    }

    #[test]
    fn test_straight() {
        let hand = rank([
            card(10, Spade),
            card(9, Heart),
            card(8, Diamond),
            card(7, Club),
            card(6, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::Straight);
        assert_eq!(hand.values, vec![10, 9, 8, 7, 6]);
    }

    #[test]
    fn test_wheel_straight() {
        let hand = rank([
            card(14, Spade),
            card(2, Heart),
            card(3, Diamond),
            card(4, Club),
            card(5, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::Straight);
        assert_eq!(hand.values, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_three_of_a_kind() {
        let hand = rank([
            card(10, Spade),
            card(10, Heart),
            card(10, Diamond),
            card(11, Club),
            card(2, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::ThreeOfAKind);
        assert_eq!(hand.values, vec![10, 10, 10, 11, 2]);
    }

    #[test]
    fn test_two_pair() {
        let hand = rank([
            card(11, Spade),
            card(11, Heart),
            card(9, Diamond),
            card(9, Club),
            card(10, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::TwoPair);
        assert_eq!(hand.values, vec![11, 11, 9, 9, 10]);
    }

    #[test]
    fn test_one_pair() {
        let hand = rank([
            card(14, Spade),
            card(14, Heart),
            card(13, Diamond),
            card(12, Club),
            card(11, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::OnePair);
        assert_eq!(hand.values, vec![14, 14, 13, 12, 11]);
    }

    #[test]
    fn test_high_card() {
        let hand = rank([
            card(13, Spade),
            card(12, Heart),
            card(11, Diamond),
            card(9, Club),
            card(7, Spade),
        ]);
        assert_eq!(hand.category, HandCategory::HighCard);
        assert_eq!(hand.values, vec![13, 12, 11, 9, 7]);
    }

    // === Validation Tests ===

    #[test]
    fn test_eval_rejects_short_hand() {
        let cards = [card(2, Club), card(3, Club), card(4, Club)];
        assert_eq!(eval(&cards), Err(GameError::InvalidHand));
    }

    #[test]
    fn test_eval_rejects_duplicate_card() {
        let cards = [
            card(4, Heart),
            card(4, Heart),
            card(14, Spade),
            card(9, Diamond),
            card(8, Heart),
        ];
        assert_eq!(eval(&cards), Err(GameError::InvalidHand));
    }

    #[test]
    fn test_eval_is_order_independent() {
        let a = rank([
            card(11, Spade),
            card(9, Club),
            card(11, Heart),
            card(10, Spade),
            card(9, Diamond),
        ]);
        let b = rank([
            card(9, Diamond),
            card(10, Spade),
            card(11, Heart),
            card(11, Spade),
            card(9, Club),
        ]);
        assert_eq!(a, b);
    }

    // === Comparison Tests ===

    #[test]
    fn test_category_ordering_chain() {
        assert!(HandCategory::HighCard < HandCategory::OnePair);
        assert!(HandCategory::OnePair < HandCategory::TwoPair);
        assert!(HandCategory::TwoPair < HandCategory::ThreeOfAKind);
        assert!(HandCategory::ThreeOfAKind < HandCategory::Straight);
        assert!(HandCategory::Straight < HandCategory::Flush);
        assert!(HandCategory::Flush < HandCategory::FullHouse);
        assert!(HandCategory::FullHouse < HandCategory::FourOfAKind);
        assert!(HandCategory::FourOfAKind < HandCategory::StraightFlush);
    }

    #[test]
    fn test_royal_beats_deuces_full() {
        let royal = rank([
            card(14, Spade),
            card(13, Spade),
            card(12, Spade),
            card(11, Spade),
            card(10, Spade),
        ]);
        let full_house = rank([
            card(2, Heart),
            card(2, Diamond),
            card(2, Club),
            card(5, Spade),
            card(5, Heart),
        ]);
        assert_eq!(royal.category, HandCategory::StraightFlush);
        assert_eq!(full_house.category, HandCategory::FullHouse);
        assert_eq!(full_house.values, vec![2, 2, 2, 5, 5]);
        assert!(royal > full_house);
    }

    #[test]
    fn test_kickers_break_ties_within_category() {
        let kings_full = rank([
            card(13, Spade),
            card(13, Heart),
            card(13, Diamond),
            card(2, Club),
            card(2, Spade),
        ]);
        let queens_full = rank([
            card(12, Spade),
            card(12, Heart),
            card(12, Diamond),
            card(14, Club),
            card(14, Spade),
        ]);
        assert!(kings_full > queens_full);

        let ace_high_flush = rank([
            card(14, Heart),
            card(11, Heart),
            card(9, Heart),
            card(5, Heart),
            card(3, Heart),
        ]);
        let king_high_flush = rank([
            card(13, Club),
            card(11, Club),
            card(9, Club),
            card(5, Club),
            card(3, Club),
        ]);
        assert!(ace_high_flush > king_high_flush);
    }

    #[test]
    fn test_wheel_beats_ace_high_card() {
        let wheel = rank([
            card(14, Spade),
            card(2, Heart),
            card(3, Diamond),
            card(4, Club),
            card(5, Spade),
        ]);
        let ace_high = rank([
            card(14, Heart),
            card(13, Diamond),
            card(11, Club),
            card(9, Spade),
            card(7, Heart),
        ]);
        assert!(wheel > ace_high);
    }

    #[test]
    fn test_equal_hands_across_suits_tie_exactly() {
        let a = rank([
            card(14, Heart),
            card(14, Diamond),
            card(2, Club),
            card(3, Spade),
            card(4, Heart),
        ]);
        let b = rank([
            card(14, Spade),
            card(14, Club),
            card(2, Diamond),
            card(3, Heart),
            card(4, Club),
        ]);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    }

    // === Winner Selection Tests ===

    #[test]
    fn test_argmax_single_winner() {
        let pair = rank([
            card(14, Spade),
            card(14, Heart),
            card(13, Diamond),
            card(12, Club),
            card(11, Spade),
        ]);
        let high = rank([
            card(13, Spade),
            card(12, Heart),
            card(11, Diamond),
            card(9, Club),
            card(7, Spade),
        ]);
        assert_eq!(argmax(&[high.clone(), pair.clone()]), vec![1]);
        assert_eq!(argmax(&[pair, high]), vec![0]);
    }

    #[test]
    fn test_argmax_preserves_input_order_on_ties() {
        let a = rank([
            card(14, Heart),
            card(14, Diamond),
            card(2, Club),
            card(3, Spade),
            card(4, Heart),
        ]);
        let b = rank([
            card(14, Spade),
            card(14, Club),
            card(2, Diamond),
            card(3, Heart),
            card(4, Club),
        ]);
        let weaker = rank([
            card(13, Spade),
            card(12, Heart),
            card(11, Diamond),
            card(9, Club),
            card(7, Spade),
        ]);
        assert_eq!(argmax(&[a.clone(), weaker.clone(), b.clone()]), vec![0, 2]);
        assert_eq!(argmax(&[b, weaker, a]), vec![0, 2]);
    }

    #[test]
    fn test_argmax_of_nothing_is_empty() {
        assert!(argmax(&[]).is_empty());
    }

    // === Description Tests ===

    #[test]
    fn test_descriptions() {
        let cases: [([Card; 5], &str); 6] = [
            (
                [
                    card(10, Spade),
                    card(10, Heart),
                    card(5, Diamond),
                    card(3, Club),
                    card(2, Spade),
                ],
                "Pair of Tens",
            ),
            (
                [
                    card(13, Spade),
                    card(13, Heart),
                    card(9, Diamond),
                    card(9, Club),
                    card(2, Spade),
                ],
                "Two Pair, Kings and Nines",
            ),
            (
                [
                    card(13, Spade),
                    card(13, Heart),
                    card(13, Diamond),
                    card(9, Club),
                    card(9, Spade),
                ],
                "Full House, Kings over Nines",
            ),
            (
                [
                    card(14, Spade),
                    card(2, Heart),
                    card(3, Diamond),
                    card(4, Club),
                    card(5, Spade),
                ],
                "Straight, Five High",
            ),
            (
                [
                    card(6, Spade),
                    card(6, Heart),
                    card(6, Diamond),
                    card(9, Club),
                    card(2, Spade),
                ],
                "Three of a Kind, Sixes",
            ),
            (
                [
                    card(14, Heart),
                    card(12, Heart),
                    card(9, Heart),
                    card(5, Heart),
                    card(3, Heart),
                ],
                "Flush, Ace High",
            ),
        ];
        for (cards, expected) in cases {
            assert_eq!(rank(cards).to_string(), expected);
        }
    }
}
