//! Betting ticket (買い目) generation

pub mod format;
pub mod generator;
pub mod sampling;

pub use format::{BetType, BoxSize, PairMethod, TicketError, TripleMethod, WagerFormat};
pub use generator::{reference_picks, TicketGenerator, REFERENCE_PICKS};
pub use sampling::Sampling;
