//! App events.

use auto_analytics::auto_analytics_event;
use serde::Serialize;

#[auto_analytics_event]
#[derive(Clone, Debug)]
pub enum LifecycleAnalytics {
    ActivityCreated,
    ActivityDestroyed,
}

/// Field names are sent as snake-case payload keys, so `resultCount` is
/// tracked as `result_count`.
#[auto_analytics_event]
#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub enum InteractiveAnalytics {
    ButtonClicked {
        label: String,
    },
    Scrolled(Scrolled),
    SearchSubmitted {
        query: String,
        r#type: Option<SearchKind>,
        resultCount: u32,
    },
}

#[derive(Clone, Debug)]
pub struct Scrolled {
    pub screen: &'static str,
    pub offset: u32,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Text,
    Voice,
}
