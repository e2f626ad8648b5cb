//! Tribute bookkeeping between deals: who pays whom, resistance, and the
//! next-start seat.

use crate::domain::cards::{Card, Rank};
use crate::domain::state::{same_team, Seat, SEATS};

/// One pending tribute payment (loser → winner).
#[derive(Debug, Clone, PartialEq)]
pub struct TributeDebt {
    pub payer: Seat,
    pub recipient: Seat,
    /// Set once the payer has handed over a card.
    pub card: Option<Card>,
}

/// One pending return (tribute recipient → original payer).
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnDebt {
    pub payer: Seat,
    pub recipient: Seat,
    pub card: Option<Card>,
}

/// Mutable tribute record for one deal.
#[derive(Debug, Clone, PartialEq)]
pub struct TributeState {
    pub debts: Vec<TributeDebt>,
    pub returns: Vec<ReturnDebt>,
    /// Resolved once all tributes are collected; used after return-tribute.
    pub next_lead: Option<Seat>,
    /// Previous deal's last place; wins the equal-tribute tie.
    pub last_payer: Seat,
}

impl TributeState {
    pub fn new(debts: Vec<TributeDebt>, last_payer: Seat) -> Self {
        Self {
            debts,
            returns: Vec::new(),
            next_lead: None,
            last_payer,
        }
    }

    pub fn all_paid(&self) -> bool {
        self.debts.iter().all(|d| d.card.is_some())
    }

    pub fn all_returned(&self) -> bool {
        self.returns.iter().all(|r| r.card.is_some())
    }

    /// Seat of the payer whose tribute carries the largest logic value;
    /// the last-place payer wins ties.
    pub fn compute_next_lead(&self, level: Rank) -> Option<Seat> {
        let mut best: Option<(Seat, u8)> = None;
        for debt in &self.debts {
            let card = debt.card?;
            let v = card.logic_value(level);
            best = match best {
                None => Some((debt.payer, v)),
                Some((_, bv)) if v > bv => Some((debt.payer, v)),
                Some((_, bv)) if v == bv && debt.payer == self.last_payer => {
                    Some((debt.payer, v))
                }
                keep => keep,
            };
        }
        best.map(|(seat, _)| seat)
    }
}

/// Tribute edges for a finishing order [p1, p2, p3, p4]:
/// double win → p4→p1 and p3→p2; single win → p4→p1; tie → none.
pub fn tribute_debts(order: [Seat; 4]) -> Vec<TributeDebt> {
    let [p1, p2, p3, p4] = order;
    if same_team(p1, p4) {
        return Vec::new();
    }
    let mut debts = vec![TributeDebt {
        payer: p4,
        recipient: p1,
        card: None,
    }];
    if same_team(p1, p2) {
        debts.push(TributeDebt {
            payer: p3,
            recipient: p2,
            card: None,
        });
    }
    debts
}

/// Anti-tribute: the payers collectively hold both big jokers.
pub fn resistance(hands: &[Vec<Card>; SEATS], debts: &[TributeDebt]) -> bool {
    let big_jokers: usize = debts
        .iter()
        .map(|d| {
            hands[d.payer as usize]
                .iter()
                .filter(|c| c.rank == Rank::BigJoker)
                .count()
        })
        .sum();
    big_jokers >= 2
}
