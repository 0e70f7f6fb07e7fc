//! Runtime surface for auto-analytics.
//!
//! Generated tracking functions depend on exactly three things from this
//! crate: the [`AutoAnalytics`] trait they delegate to, the [`Payload`] type
//! they build, and [`to_value`] for converting field values.
//!
//! # Usage
//!
//! ```text
//! #[auto_analytics_event]
//! pub enum Interactive {
//!     ButtonClicked { label: String },
//! }
//!
//! // build.rs
//! fn main() {
//!     auto_analytics_codegen::build().ok();
//! }
//!
//! // lib.rs
//! include!(concat!(env!("OUT_DIR"), "/auto_analytics_interactive.rs"));
//!
//! track_interactive(&tracker, &Interactive::ButtonClicked { label: "ok".into() });
//! ```

use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;

pub use auto_analytics_macros::auto_analytics_event;

/// A single payload value. `Null` stands in for absent (`None`) fields.
pub type PayloadValue = serde_json::Value;

/// Ordered key-value payload handed to [`AutoAnalytics::track`].
///
/// Entry order matches the declaration order of the event's fields.
pub type Payload = indexmap::IndexMap<String, PayloadValue>;

/// The tracker capability that generated functions delegate to.
///
/// Implement this to forward events to a real analytics backend.
pub trait AutoAnalytics {
    /// Record one event.
    fn track(&self, name: &str, payload: Payload);
}

impl<T: AutoAnalytics + ?Sized> AutoAnalytics for &T {
    fn track(&self, name: &str, payload: Payload) {
        (**self).track(name, payload);
    }
}

impl<T: AutoAnalytics + ?Sized> AutoAnalytics for Box<T> {
    fn track(&self, name: &str, payload: Payload) {
        (**self).track(name, payload);
    }
}

impl<T: AutoAnalytics + ?Sized> AutoAnalytics for Rc<T> {
    fn track(&self, name: &str, payload: Payload) {
        (**self).track(name, payload);
    }
}

impl<T: AutoAnalytics + ?Sized> AutoAnalytics for Arc<T> {
    fn track(&self, name: &str, payload: Payload) {
        (**self).track(name, payload);
    }
}

/// Convert an event field into a payload value.
///
/// Values that fail to serialize (for example maps with non-string keys)
/// become `Null` and a warning is logged.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> PayloadValue {
    match serde_json::to_value(value) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, "payload value could not be serialized, recording null");
            PayloadValue::Null
        }
    }
}
