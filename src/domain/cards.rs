//! Core card types: Suit, Rank, Card, level promotion and descending order.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::DomainError;

/// Suits in ascending tie-break order: Diamonds < Clubs < Hearts < Spades < Joker.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Diamonds,
    Clubs,
    Hearts,
    Spades,
    Joker,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
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
    SmallJoker,
    BigJoker,
}

pub const NATURAL_RANKS: [Rank; 13] = [
    Rank::Two,
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
];

impl Rank {
    /// Face scale: 2..=14 for natural ranks, 20/21 for the jokers.
    pub fn face_value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
            Rank::SmallJoker => 20,
            Rank::BigJoker => 21,
        }
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    /// Natural rank for a face value 2..=14.
    pub fn from_face_value(v: u8) -> Option<Rank> {
        NATURAL_RANKS.iter().copied().find(|r| r.face_value() == v)
    }

    fn token(self) -> &'static str {
        match self {
            Rank::Two => "2",
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
            Rank::SmallJoker => "SJ",
            Rank::BigJoker => "BJ",
        }
    }

    fn from_token(s: &str) -> Option<Rank> {
        Some(match s {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            "SJ" => Rank::SmallJoker,
            "BJ" => Rank::BigJoker,
            _ => return None,
        })
    }
}

impl Suit {
    fn token(self) -> &'static str {
        match self {
            Suit::Diamonds => "D",
            Suit::Clubs => "C",
            Suit::Hearts => "H",
            Suit::Spades => "S",
            Suit::Joker => "J",
        }
    }

    fn from_token(s: &str) -> Option<Suit> {
        Some(match s {
            "D" => Suit::Diamonds,
            "C" => Suit::Clubs,
            "H" => Suit::Hearts,
            "S" => Suit::Spades,
            "J" => Suit::Joker,
            _ => return None,
        })
    }
}

/// A single card of the two-deck stack.
///
/// Identity is the `(suit, rank, copy)` triple and nothing else; the
/// promotion flags are derived per deal and excluded from equality and
/// hashing so a card keeps its identity across levels.
#[derive(Debug, Copy, Clone)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    /// 0 or 1: which of the two decks this card came from.
    pub copy: u8,
    pub level_card: bool,
    pub wild: bool,
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank && self.copy == other.copy
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
        self.copy.hash(state);
    }
}

impl Card {
    pub fn new(suit: Suit, rank: Rank, copy: u8) -> Self {
        Self {
            suit,
            rank,
            copy,
            level_card: false,
            wild: false,
        }
    }

    pub fn is_level(&self, level: Rank) -> bool {
        self.rank == level
    }

    pub fn is_wild(&self, level: Rank) -> bool {
        self.rank == level && self.suit == Suit::Hearts
    }

    /// Logic value under the given level: 2..=14 natural, 19 level rank,
    /// 20 SmallJoker, 21 BigJoker.
    pub fn logic_value(&self, level: Rank) -> u8 {
        if self.rank == level {
            19
        } else {
            self.rank.face_value()
        }
    }
}

// Wire identity tag: "{suit}-{rank}-{copy}", e.g. "H-7-0", "J-BJ-1".
impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}-{}",
            self.suit.token(),
            self.rank.token(),
            self.copy
        )
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DomainError::ParseCard(s.to_string());
        let mut parts = s.split('-');
        let suit = parts.next().and_then(Suit::from_token).ok_or_else(bad)?;
        let rank = parts.next().and_then(Rank::from_token).ok_or_else(bad)?;
        let copy: u8 = parts
            .next()
            .and_then(|c| c.parse().ok())
            .ok_or_else(bad)?;
        if parts.next().is_some() || copy > 1 {
            return Err(bad());
        }
        // Jokers live in the Joker suit and vice versa.
        if rank.is_joker() != (suit == Suit::Joker) {
            return Err(bad());
        }
        Ok(Card::new(suit, rank, copy))
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Card>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// Recompute the per-deal `level_card`/`wild` flags. Purely functional and
/// idempotent; identity (suit, rank, copy) is untouched.
pub fn promote_for_level(cards: &[Card], level: Rank) -> Vec<Card> {
    cards
        .iter()
        .map(|c| Card {
            level_card: c.is_level(level),
            wild: c.is_wild(level),
            ..*c
        })
        .collect()
}

/// Stable sort by logic value descending, suit descending as tie-break.
pub fn sort_descending(mut cards: Vec<Card>, level: Rank) -> Vec<Card> {
    cards.sort_by(|a, b| {
        b.logic_value(level)
            .cmp(&a.logic_value(level))
            .then(b.suit.cmp(&a.suit))
    });
    cards
}

/// Non-panicking helper to parse identity tags into cards.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

/// Panicking tag parser; intended for test/fixture use only.
pub fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|s| s.parse::<Card>().expect("valid card token"))
        .collect()
}
