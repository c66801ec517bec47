//! Boatrace Kaime - entry scoring and betting ticket generation
//!
//! This library provides:
//! - Feature scoring of race entries (pre-race and near-start variants)
//! - Venue, race class, distance and weather adjustments
//! - Ticket (買い目) generation for 単勝 / 複勝 / 2連単 / 2連複 / 3連単 / 3連複
//! - Saving assembled predictions as JSON
//!
//! # Example
//!
//! ```no_run
//! use kaime::core::FeatureScorer;
//! use kaime::models::{Entry, RaceContext};
//! use kaime::tickets::{TicketGenerator, WagerFormat};
//!
//! let entries: Vec<Entry> = (1..=6).map(Entry::new).collect();
//! let context = RaceContext {
//!     place: Some("住之江".to_string()),
//!     ..Default::default()
//! };
//!
//! let scored = FeatureScorer::pre_race().score(entries, &context);
//! let format = WagerFormat::parse("3連単", "通常").unwrap();
//! let result = TicketGenerator::ranked().generate(&scored, 5, format);
//! println!("{}: {:?}", result.formation, result.tickets);
//! ```

pub mod core;
pub mod models;
pub mod persist;
pub mod pipeline;
pub mod tickets;

// API-specific modules (only available with api feature)
#[cfg(feature = "api")]
pub mod error;

// Re-export commonly used types
pub use crate::core::{FeatureScorer, ScorerConfig, ScoringVariant};
pub use models::{Entry, PredictRequest, PredictResponse, RaceContext, TicketResult, Weather};
pub use tickets::{Sampling, TicketGenerator, WagerFormat};
