// The marker is inert on any item; the generator reports unsupported ones.
use auto_analytics_macros::auto_analytics_event;

#[auto_analytics_event]
pub struct NotAGroup {
    pub label: String,
}

#[auto_analytics_event]
fn helper() -> u32 {
    7
}

fn main() {
    let group = NotAGroup { label: String::from("x") };
    assert_eq!(group.label, "x");
    assert_eq!(helper(), 7);
}
