use serde::Deserialize;

#[derive(Debug, Deserialize, Default, PartialEq)]
struct Window {
    width: u32,
    title: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Strict {
    depth: u8,
}

impl Default for Strict {
    fn default() -> Self {
        Self { depth: 7 }
    }
}

// The store is process-wide, so every assertion lives in one test.
#[test]
fn sections_fall_back_to_defaults() {
    assert_eq!(quest_shared::config::get::<Window>("window"), Window::default());

    quest_shared::config::init_from_str(r#"
[window]
width = 1024
title = "quest"

[strict]
depth = "deep"
"#).unwrap();
    assert!(quest_shared::config::is_initialized());

    let window: Window = quest_shared::config::get("window");
    assert_eq!(window, Window { width: 1024, title: "quest".into() });

    // malformed section
    let strict: Strict = quest_shared::config::get("strict");
    assert_eq!(strict.depth, 7);

    // missing section
    let missing: Strict = quest_shared::config::get("nowhere");
    assert_eq!(missing.depth, 7);

    assert!(quest_shared::config::init_from_str("").is_err());
}
