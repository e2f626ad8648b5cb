//! Per-deal state machine: dealing, tribute, trick play and scoring.

use serde::Serialize;
use tracing::debug;

use crate::domain::cards::{promote_for_level, sort_descending, Card, Rank};
use crate::domain::compare::compare_hands;
use crate::domain::deck::{deal_round_robin, make_deck, shuffle_with_seed, DECK_SIZE};
use crate::domain::hands::{classify, largest_card, smallest_card, HandClass};
use crate::domain::state::{partner_of, seat_offset, team_of, Seat, Team, SEATS};
use crate::domain::tribute::{resistance, tribute_debts, ReturnDebt, TributeState};
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DealPhase {
    /// Constructed but not yet dealt.
    Waiting,
    /// Shuffle and distribution in progress (transient).
    Dealing,
    /// Losers owe cards to the previous winners.
    Tribute,
    /// Recipients return one card each.
    ReturnTribute,
    /// Trick play.
    Playing,
    /// Finishing order settled.
    Score,
}

/// The play currently holding the trick.
#[derive(Debug, Clone, PartialEq)]
pub struct LastPlay {
    pub seat: Seat,
    pub hand: HandClass,
}

/// What each seat did in the current trick.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundAction {
    Played(HandClass),
    Passed,
}

/// Authoritative state for a single deal.
///
/// The engine is a pure state machine: no I/O, no timers. The owning room
/// actor drives it and inspects `phase`/`turn`/`winners` after every
/// mutation.
#[derive(Debug, Clone)]
pub struct DealEngine {
    pub level: Rank,
    pub active_team: Team,
    pub phase: DealPhase,
    pub hands: [Vec<Card>; SEATS],
    /// Cards removed from hands by accepted plays; together with the hands
    /// this always accounts for the full 108-card stack.
    pub played: Vec<Card>,
    pub turn: Option<Seat>,
    pub last_play: Option<LastPlay>,
    pub round_actions: [Option<RoundAction>; SEATS],
    /// Seats in finishing order; completed to all four at deal end.
    pub winners: Vec<Seat>,
    pub tribute: Option<TributeState>,
    prev_order: Option<[Seat; 4]>,
}

impl DealEngine {
    pub fn new(level: Rank, active_team: Team, prev_order: Option<[Seat; 4]>) -> Self {
        Self {
            level,
            active_team,
            phase: DealPhase::Waiting,
            hands: Default::default(),
            played: Vec::with_capacity(DECK_SIZE),
            turn: None,
            last_play: None,
            round_actions: Default::default(),
            winners: Vec::with_capacity(SEATS),
            tribute: None,
            prev_order,
        }
    }

    /// Shuffle a fresh two-deck stack with the given seed and deal it out.
    pub fn start(&mut self, seed: u64) -> Result<(), DomainError> {
        if self.phase != DealPhase::Waiting {
            return Err(DomainError::PhaseMismatch);
        }
        self.phase = DealPhase::Dealing;
        let mut deck = make_deck();
        shuffle_with_seed(&mut deck, seed);
        self.begin(deal_round_robin(&deck));
        Ok(())
    }

    /// Start from explicit hands. Used by fixtures and simulations; the
    /// hands must partition the 108-card stack for the invariants to hold.
    pub fn start_with_hands(&mut self, hands: [Vec<Card>; SEATS]) -> Result<(), DomainError> {
        if self.phase != DealPhase::Waiting {
            return Err(DomainError::PhaseMismatch);
        }
        self.phase = DealPhase::Dealing;
        self.begin(hands);
        Ok(())
    }

    fn begin(&mut self, hands: [Vec<Card>; SEATS]) {
        for (slot, hand) in self.hands.iter_mut().zip(hands.into_iter()) {
            *slot = sort_descending(promote_for_level(&hand, self.level), self.level);
        }
        match self.prev_order {
            None => {
                // Fresh match: seat 0 of the banker team leads.
                self.enter_playing(self.active_team as Seat);
            }
            Some(order) => {
                let debts = tribute_debts(order);
                if debts.is_empty() {
                    // Tie: previous winner leads, no cards move.
                    self.enter_playing(order[0]);
                } else if resistance(&self.hands, &debts) {
                    debug!(winner = order[0], "anti-tribute: payers hold both big jokers");
                    self.enter_playing(order[0]);
                } else {
                    self.tribute = Some(TributeState::new(debts, order[3]));
                    self.phase = DealPhase::Tribute;
                    self.turn = None;
                }
            }
        }
    }

    fn enter_playing(&mut self, lead: Seat) {
        self.phase = DealPhase::Playing;
        self.turn = Some(lead);
        self.last_play = None;
        self.round_actions = Default::default();
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat as usize]
    }

    /// Largest card by logic value in a seat's hand.
    pub fn largest_in_hand(&self, seat: Seat) -> Option<Card> {
        largest_card(self.hand(seat), self.level)
    }

    /// Smallest card by logic value in a seat's hand.
    pub fn smallest_in_hand(&self, seat: Seat) -> Option<Card> {
        smallest_card(self.hand(seat), self.level)
    }

    /// The classification a play from `seat` has to beat, if any.
    pub fn current_target(&self, seat: Seat) -> Option<&HandClass> {
        match &self.last_play {
            Some(lp) if lp.seat != seat => Some(&lp.hand),
            _ => None,
        }
    }

    /// Payers who still owe a tribute card.
    pub fn pending_tribute_payers(&self) -> Vec<Seat> {
        match (&self.phase, &self.tribute) {
            (DealPhase::Tribute, Some(ts)) => ts
                .debts
                .iter()
                .filter(|d| d.card.is_none())
                .map(|d| d.payer)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Recipients who still owe a return card.
    pub fn pending_return_payers(&self) -> Vec<Seat> {
        match (&self.phase, &self.tribute) {
            (DealPhase::ReturnTribute, Some(ts)) => ts
                .returns
                .iter()
                .filter(|r| r.card.is_none())
                .map(|r| r.payer)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Collect a tribute payment. The card must be the strictly largest
    /// logic value in the payer's hand (any copy of it qualifies).
    pub fn pay_tribute(&mut self, seat: Seat, card: Card) -> Result<(), DomainError> {
        if self.phase != DealPhase::Tribute {
            return Err(DomainError::PhaseMismatch);
        }
        let Some(ts) = self.tribute.as_ref() else {
            return Err(DomainError::Other("tribute phase without tribute state".into()));
        };
        let Some(idx) = ts
            .debts
            .iter()
            .position(|d| d.payer == seat && d.card.is_none())
        else {
            return Err(DomainError::OutOfTurn);
        };
        let recipient = ts.debts[idx].recipient;

        let hand = self.hand(seat);
        let Some(pos) = hand.iter().position(|c| *c == card) else {
            return Err(DomainError::CardNotInHand);
        };
        let max_value = hand
            .iter()
            .map(|c| c.logic_value(self.level))
            .max()
            .unwrap_or(0);
        if card.logic_value(self.level) != max_value {
            return Err(DomainError::WrongTributeCard);
        }

        let paid = self.hands[seat as usize].remove(pos);
        self.hands[recipient as usize].push(paid);
        self.resort(recipient);

        let level = self.level;
        let mut start_returns = false;
        if let Some(ts) = self.tribute.as_mut() {
            ts.debts[idx].card = Some(paid);
            if ts.all_paid() {
                ts.next_lead = ts.compute_next_lead(level);
                ts.returns = ts
                    .debts
                    .iter()
                    .map(|d| ReturnDebt {
                        payer: d.recipient,
                        recipient: d.payer,
                        card: None,
                    })
                    .collect();
                start_returns = true;
            }
        }
        if start_returns {
            self.phase = DealPhase::ReturnTribute;
        }
        Ok(())
    }

    /// Collect a return-tribute card (any card from the recipient's hand).
    pub fn return_tribute(&mut self, seat: Seat, card: Card) -> Result<(), DomainError> {
        if self.phase != DealPhase::ReturnTribute {
            return Err(DomainError::PhaseMismatch);
        }
        let Some(ts) = self.tribute.as_ref() else {
            return Err(DomainError::Other("return phase without tribute state".into()));
        };
        let Some(idx) = ts
            .returns
            .iter()
            .position(|r| r.payer == seat && r.card.is_none())
        else {
            return Err(DomainError::OutOfTurn);
        };
        let recipient = ts.returns[idx].recipient;

        let Some(pos) = self.hand(seat).iter().position(|c| *c == card) else {
            return Err(DomainError::CardNotInHand);
        };

        let returned = self.hands[seat as usize].remove(pos);
        self.hands[recipient as usize].push(returned);
        self.resort(recipient);

        let mut lead = None;
        if let Some(ts) = self.tribute.as_mut() {
            ts.returns[idx].card = Some(returned);
            if ts.all_returned() {
                lead = Some(ts.next_lead.unwrap_or(ts.last_payer));
            }
        }
        if let Some(lead) = lead {
            self.enter_playing(lead);
        }
        Ok(())
    }

    /// Accept a play: classify, compare against the trick, verify card
    /// ownership, then mutate and advance.
    pub fn play_hand(&mut self, seat: Seat, cards: &[Card]) -> Result<(), DomainError> {
        if self.phase != DealPhase::Playing {
            return Err(DomainError::PhaseMismatch);
        }
        if self.turn != Some(seat) {
            return Err(DomainError::OutOfTurn);
        }

        let class = classify(cards, self.level)?;

        if let Some(lp) = &self.last_play {
            if lp.seat != seat && compare_hands(&class, &lp.hand) <= 0 {
                return Err(DomainError::NotBigEnough);
            }
        }

        // Every requested card must match a distinct card in the hand.
        let hand = self.hand(seat);
        let mut used = vec![false; hand.len()];
        for card in cards {
            let Some(i) = hand
                .iter()
                .enumerate()
                .position(|(i, c)| !used[i] && c == card)
            else {
                return Err(DomainError::CardNotInHand);
            };
            used[i] = true;
        }

        let mut remaining = Vec::with_capacity(hand.len() - cards.len());
        for (i, card) in self.hands[seat as usize].iter().enumerate() {
            if used[i] {
                self.played.push(*card);
            } else {
                remaining.push(*card);
            }
        }
        self.hands[seat as usize] = remaining;

        self.last_play = Some(LastPlay {
            seat,
            hand: class.clone(),
        });
        self.round_actions = Default::default();
        self.round_actions[seat as usize] = Some(RoundAction::Played(class));

        if self.hands[seat as usize].is_empty() {
            self.winners.push(seat);
            if self.deal_finished() {
                self.finish();
                return Ok(());
            }
        }

        self.advance_turn();
        Ok(())
    }

    /// Accept a pass. Passing is illegal on a free lead.
    pub fn pass(&mut self, seat: Seat) -> Result<(), DomainError> {
        if self.phase != DealPhase::Playing {
            return Err(DomainError::PhaseMismatch);
        }
        if self.turn != Some(seat) {
            return Err(DomainError::OutOfTurn);
        }
        if self.last_play.as_ref().map_or(true, |lp| lp.seat == seat) {
            return Err(DomainError::CannotPassFreeLead);
        }
        self.round_actions[seat as usize] = Some(RoundAction::Passed);
        self.advance_turn();
        Ok(())
    }

    /// Clockwise scan from the current seat. Reaching the trick's
    /// aggressor closes the trick (checked before the empty-hand skip so
    /// an emptied aggressor still closes it); otherwise the first seat
    /// with cards takes the turn.
    fn advance_turn(&mut self) {
        let Some(cur) = self.turn else {
            return;
        };
        let aggressor = self.last_play.as_ref().map(|lp| lp.seat);
        for step in 1..=SEATS as i8 {
            let t = seat_offset(cur, step);
            if Some(t) == aggressor {
                self.end_trick(t);
                return;
            }
            if self.hands[t as usize].is_empty() {
                continue;
            }
            self.turn = Some(t);
            return;
        }
        debug!(seat = cur, "turn advance found no candidate seat");
    }

    /// Trick closed: the aggressor leads the next one. If they emptied
    /// their hand, leadership carries the wind to their partner, then to
    /// the next opponent with cards in clockwise order.
    fn end_trick(&mut self, aggressor: Seat) {
        let leader = if !self.hands[aggressor as usize].is_empty() {
            aggressor
        } else if !self.hands[partner_of(aggressor) as usize].is_empty() {
            partner_of(aggressor)
        } else {
            let mut lead = aggressor;
            for step in [1i8, 3] {
                let t = seat_offset(aggressor, step);
                if !self.hands[t as usize].is_empty() {
                    lead = t;
                    break;
                }
            }
            lead
        };
        self.enter_playing(leader);
    }

    /// A deal ends when both members of one team have emptied their hands
    /// or three seats have finished.
    fn deal_finished(&self) -> bool {
        let mut per_team = [0u8; 2];
        for &w in &self.winners {
            per_team[team_of(w) as usize] += 1;
        }
        per_team.iter().any(|&c| c >= 2) || self.winners.len() >= 3
    }

    fn finish(&mut self) {
        for seat in 0..SEATS as Seat {
            if !self.winners.contains(&seat) {
                self.winners.push(seat);
            }
        }
        self.phase = DealPhase::Score;
        self.turn = None;
    }

    /// Final finishing order; only meaningful once the phase is Score.
    pub fn finishing_order(&self) -> Option<[Seat; 4]> {
        if self.phase != DealPhase::Score || self.winners.len() != SEATS {
            return None;
        }
        Some([
            self.winners[0],
            self.winners[1],
            self.winners[2],
            self.winners[3],
        ])
    }

    /// Cards accounted for across hands and plays; 108 for any live deal.
    pub fn card_count(&self) -> usize {
        self.hands.iter().map(Vec::len).sum::<usize>() + self.played.len()
    }

    fn resort(&mut self, seat: Seat) {
        let hand = std::mem::take(&mut self.hands[seat as usize]);
        self.hands[seat as usize] = sort_descending(hand, self.level);
    }
}
