use auto_analytics::{AutoAnalytics, Payload};

/// Tracker that logs every event instead of sending it anywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingTracker;

impl AutoAnalytics for LoggingTracker {
    fn track(&self, name: &str, payload: Payload) {
        tracing::info!(event = name, fields = payload.len(), "{payload:?}");
    }
}
