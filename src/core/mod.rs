//! Core scoring logic

pub mod bias;
pub mod config;
pub mod normalize;
pub mod scorer;
pub mod weather;

// Re-export commonly used types
pub use bias::{RaceClass, VenueGroup};
pub use config::{ScorerConfig, ScoringVariant};
pub use scorer::FeatureScorer;
pub use weather::RelativeWind;
