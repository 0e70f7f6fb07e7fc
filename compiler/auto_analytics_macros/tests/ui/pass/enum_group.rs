use auto_analytics_macros::auto_analytics_event;

#[auto_analytics_event]
#[derive(Debug)]
pub enum Lifecycle {
    ActivityCreated,
    ActivityDestroyed,
}

fn main() {
    let event = Lifecycle::ActivityCreated;
    assert!(matches!(event, Lifecycle::ActivityCreated));
    let _ = Lifecycle::ActivityDestroyed;
}
