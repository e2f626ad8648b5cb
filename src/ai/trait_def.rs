//! Bot strategy trait.
//!
//! A strategy is a pure decision function: given the bot's hand, the
//! deal's level and the classification to beat (if any), produce a play
//! or `None` for a pass. The engine validates a bot's play exactly like a
//! human's, so a strategy never has to be perfect — only well-behaved.

use crate::domain::cards::{Card, Rank};
use crate::domain::hands::HandClass;

pub trait BotStrategy: Send {
    /// Decide on a play.
    ///
    /// * `hand` - the bot's current hand, sorted descending
    /// * `level` - the active level rank
    /// * `target` - classification currently holding the trick, or `None`
    ///   on a free lead
    ///
    /// Returns the multiset of cards to play, or `None` to pass.
    /// Implementations must not panic; an invalid play is treated as a
    /// pass by the caller.
    fn decide(&self, hand: &[Card], level: Rank, target: Option<&HandClass>) -> Option<Vec<Card>>;
}
