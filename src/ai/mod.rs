//! Bot players: strategy trait and the greedy reference implementation.

pub mod greedy;
pub mod trait_def;

pub use greedy::GreedyBot;
pub use trait_def::BotStrategy;

/// Construct the default bot strategy for a filled seat.
pub fn create_bot(seed: Option<u64>) -> Box<dyn BotStrategy> {
    Box::new(GreedyBot::new(seed))
}
