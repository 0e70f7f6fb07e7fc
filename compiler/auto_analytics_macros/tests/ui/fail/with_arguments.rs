use auto_analytics_macros::auto_analytics_event;

#[auto_analytics_event(name = "x")]
enum Lifecycle {
    ActivityCreated,
}

fn main() {
    let _ = Lifecycle::ActivityCreated;
}
