//! Sample app wiring generated tracking functions to a tracker.

pub mod analytics;
pub mod events;
pub mod tracker;

pub use analytics::{track_interactive_analytics, track_lifecycle_analytics};
pub use tracker::LoggingTracker;
