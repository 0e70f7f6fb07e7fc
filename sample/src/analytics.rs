//! Generated tracking functions.

include!(concat!(env!("OUT_DIR"), "/auto_analytics_lifecycle_analytics.rs"));
include!(concat!(env!("OUT_DIR"), "/auto_analytics_interactive_analytics.rs"));
