// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;
use tracing_test::traced_test;

fn seeded_store() -> OptionStore {
    let store = OptionStore::in_memory();
    store.update_option("A", "persisted-a").unwrap();
    store.update_option("B", "persisted-b").unwrap();
    store
}

#[test]
fn test_new_session_is_inactive() {
    let store = OptionStore::in_memory();
    let capture = OptionCapture::new(&store);

    assert!(!capture.is_active());
    assert_eq!(capture.count(), 0);
    assert!(capture.all().is_empty());
    assert_eq!(store.interceptor_count(), 0);
}

#[test]
fn test_start_is_idempotent() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    assert!(capture.start());
    store.update_option("A", "captured").unwrap();
    assert!(!capture.start());

    // No duplicate write hook and no reset of captured values.
    assert_eq!(store.interceptor_count(), 2);
    assert_eq!(capture.count(), 1);
    assert_eq!(capture.get("A"), Some(json!("captured")));
}

#[test]
fn test_stop_when_inactive_is_noop() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    assert!(!capture.stop());
    capture.start();
    assert!(capture.stop());
    assert!(!capture.stop());
    assert!(!capture.is_active());
}

#[test]
fn test_read_during_session_returns_captured_value() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    store.update_option("A", "V").unwrap();

    assert_eq!(store.get_str("A").as_deref(), Some("V"));
    assert_eq!(store.get_str("B").as_deref(), Some("persisted-b"));
    capture.stop();
}

#[test]
fn test_nothing_persists_after_stop() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    assert!(!store.update_option("A", "V").unwrap());
    assert!(!store.update_option("C", "new").unwrap());
    capture.stop();

    assert_eq!(store.get_str("A").as_deref(), Some("persisted-a"));
    assert_eq!(store.get_option("C"), None);
    assert!(!store.contains("C"));
}

#[test]
fn test_file_backed_store_is_untouched() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("options.json");
    let store = OptionStore::open(&path).unwrap();
    store.update_option("A", "persisted-a").unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let capture = OptionCapture::new(&store);
    capture.start();
    store.update_option("A", "V").unwrap();
    store.update_option("B", "V").unwrap();
    capture.stop();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    let reopened = OptionStore::open(&path).unwrap();
    assert_eq!(reopened.get_str("A").as_deref(), Some("persisted-a"));
}

#[test]
fn test_ignored_options_persist_while_active() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    assert!(capture.is_ignored("_transient_feed"));
    assert!(store.set_transient("feed", json!([1, 2])).unwrap());
    assert_eq!(capture.count(), 0);
    assert_eq!(capture.get("_transient_feed"), None);
    capture.stop();

    assert_eq!(store.get_transient("feed"), Some(json!([1, 2])));
}

#[test]
fn test_custom_ignore_rules() {
    let store = seeded_store();
    let rules = IgnoreRules::new(["^A$"]).unwrap();
    let capture = OptionCapture::with_rules(&store, rules);

    capture.start();
    store.update_option("A", "written").unwrap();
    store.set_transient("feed", 1).unwrap();
    capture.stop();

    assert_eq!(store.get_str("A").as_deref(), Some("written"));
    assert_eq!(store.get_transient("feed"), None);
}

#[test]
fn test_from_config() {
    let store = seeded_store();
    let config = CaptureConfig {
        ignore_patterns: vec!["^B$".to_string()],
    };
    let capture = OptionCapture::from_config(&store, &config).unwrap();

    assert!(capture.is_ignored("B"));
    assert!(!capture.is_ignored("_transient_feed"));
}

#[test]
fn test_last_write_wins() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    store.update_option("A", "V1").unwrap();
    store.update_option("A", "V2").unwrap();

    assert_eq!(capture.get("A"), Some(json!("V2")));
    assert_eq!(capture.count(), 1);
    assert_eq!(store.read_interceptor_count("A"), 1);
    capture.stop();
}

#[test]
fn test_multiple_options_in_first_capture_order() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    store.update_option("B", "V2").unwrap();
    store.update_option("A", "V1").unwrap();
    store.update_option("B", "V3").unwrap();

    assert_eq!(capture.count(), 2);
    let all = capture.all();
    let names: Vec<_> = all.names().collect();
    assert_eq!(names, vec!["B", "A"]);
    assert_eq!(all.get("A"), Some(&json!("V1")));
    assert_eq!(all.get("B"), Some(&json!("V3")));
    capture.stop();
}

#[test]
fn test_get_or_default() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    store.update_option("A", 1).unwrap();
    assert_eq!(capture.get_or("A", 0), json!(1));
    assert_eq!(capture.get_or("missing", "fallback"), json!("fallback"));
    capture.stop();
}

#[test]
fn test_stop_removes_every_interceptor() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    store.update_option("A", "V1").unwrap();
    store.update_option("B", "V2").unwrap();
    store.update_option("C", "V3").unwrap();
    assert_eq!(store.interceptor_count(), 4);

    capture.stop();
    assert_eq!(store.interceptor_count(), 0);
    assert!(!store.has_write_interceptors());
    for name in ["A", "B", "C"] {
        assert_eq!(store.read_interceptor_count(name), 0);
    }
    assert_eq!(capture.count(), 0);

    // Normal writes resume.
    assert!(store.update_option("A", "after").unwrap());
    assert_eq!(store.get_str("A").as_deref(), Some("after"));
}

#[test]
fn test_restart_begins_with_empty_capture() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    store.update_option("A", "first-session").unwrap();
    capture.stop();

    capture.start();
    assert_eq!(capture.count(), 0);
    assert_eq!(store.get_str("A").as_deref(), Some("persisted-a"));
    store.update_option("B", "second-session").unwrap();
    let all = capture.all();
    assert_eq!(all.names().collect::<Vec<_>>(), vec!["B"]);
    capture.stop();
}

#[test]
fn test_captured_read_runs_read_filters() {
    let store = seeded_store();
    store.add_read_filter("A", |_, v| json!(format!("<{}>", v.as_str().unwrap_or(""))));
    let capture = OptionCapture::new(&store);

    assert_eq!(store.get_str("A").as_deref(), Some("<persisted-a>"));

    capture.start();
    store.update_option("A", "V").unwrap();
    assert_eq!(store.get_str("A").as_deref(), Some("<V>"));
    // The raw value is what was captured.
    assert_eq!(capture.get("A"), Some(json!("V")));
    capture.stop();
}

#[test]
fn test_captures_write_equal_to_persisted_value() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    store.update_option("A", "persisted-a").unwrap();
    assert_eq!(capture.count(), 1);
    capture.stop();
}

#[test]
fn test_drop_stops_active_session() {
    let store = seeded_store();
    {
        let capture = OptionCapture::new(&store);
        capture.start();
        store.update_option("A", "V").unwrap();
    }

    assert_eq!(store.interceptor_count(), 0);
    assert_eq!(store.get_str("A").as_deref(), Some("persisted-a"));
}

#[test]
fn test_independent_sessions_on_separate_stores() {
    let first = seeded_store();
    let second = seeded_store();
    let a = OptionCapture::new(&first);
    let b = OptionCapture::new(&second);

    a.start();
    first.update_option("A", "only-first").unwrap();
    second.update_option("A", "persisted-second").unwrap();

    assert_eq!(a.count(), 1);
    assert_eq!(b.count(), 0);
    assert_eq!(second.get_str("A").as_deref(), Some("persisted-second"));
    a.stop();
}

#[traced_test]
#[test]
fn test_session_logs_lifecycle() {
    let store = seeded_store();
    let capture = OptionCapture::new(&store);

    capture.start();
    store.update_option("A", "V").unwrap();
    capture.stop();

    assert!(logs_contain("option capture started"));
    assert!(logs_contain("option capture stopped"));
}

proptest! {
    #[test]
    fn captured_values_never_persist(
        writes in proptest::collection::vec(("[a-d]", any::<u8>()), 0..30),
    ) {
        let store = seeded_store();
        let snapshot = |store: &OptionStore| -> Vec<(String, Option<Value>)> {
            store
                .names()
                .into_iter()
                .map(|n| {
                    let value = store.get_option(&n);
                    (n, value)
                })
                .collect()
        };
        let before = snapshot(&store);
        let capture = OptionCapture::with_rules(&store, IgnoreRules::none());

        capture.start();
        for (name, value) in &writes {
            store.update_option(name, *value).unwrap();
        }

        let mut distinct: Vec<&str> = Vec::new();
        for (name, _) in &writes {
            if !distinct.contains(&name.as_str()) {
                distinct.push(name);
            }
        }
        let all = capture.all();
        prop_assert_eq!(capture.count(), distinct.len());
        prop_assert_eq!(all.names().collect::<Vec<_>>(), distinct);
        capture.stop();

        prop_assert_eq!(before, snapshot(&store));
        prop_assert_eq!(store.interceptor_count(), 0);
    }
}
