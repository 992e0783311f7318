// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn test_update_creates_option() {
    let store = OptionStore::in_memory();
    let widget = MultiWidget::new("text");

    widget.update(&store, Some(2), &json!({"title": "Hello"})).unwrap();

    assert_eq!(
        store.get_option("widget_text"),
        Some(json!({"2": {"title": "Hello"}, "_multiwidget": 1}))
    );
}

#[test]
fn test_update_keeps_other_instances() {
    let store = OptionStore::in_memory();
    store
        .update_option("widget_text", json!({"2": {"title": "Two"}, "_multiwidget": 1}))
        .unwrap();
    let widget = MultiWidget::new("text");

    widget.update(&store, Some(3), &json!({"title": "Three"})).unwrap();

    let option = store.get_option("widget_text").unwrap();
    assert_eq!(option["2"], json!({"title": "Two"}));
    assert_eq!(option["3"], json!({"title": "Three"}));
}

#[test]
fn test_sanitize_sees_old_instance() {
    let store = OptionStore::in_memory();
    store
        .update_option("widget_text", json!({"2": {"title": "Old", "views": 4}}))
        .unwrap();
    let widget = MultiWidget::with_sanitize("text", |new, old| {
        let views = old.and_then(|o| o["views"].as_i64()).unwrap_or(0);
        let title = new["title"].as_str().unwrap_or("").trim().to_string();
        Ok(json!({"title": title, "views": views}))
    });

    widget.update(&store, Some(2), &json!({"title": "  New  "})).unwrap();

    let option = store.get_option("widget_text").unwrap();
    assert_eq!(option["2"], json!({"title": "New", "views": 4}));
}

#[test]
fn test_sanitize_error_aborts_write() {
    let store = OptionStore::in_memory();
    let widget = MultiWidget::with_sanitize("text", |_, _| {
        Err(WidgetControlError::InvalidInstance("title required".to_string()))
    });

    let err = widget.update(&store, Some(2), &json!({})).unwrap_err();
    assert!(err.to_string().contains("title required"));
    assert!(store.is_empty());
}

#[test]
fn test_rejects_unnumbered_or_non_object() {
    let store = OptionStore::in_memory();
    let widget = MultiWidget::new("text");

    assert!(matches!(
        widget.update(&store, None, &json!({})),
        Err(WidgetControlError::InvalidInstance(_))
    ));
    assert!(matches!(
        widget.update(&store, Some(1), &json!("text")),
        Err(WidgetControlError::InvalidInstance(_))
    ));
    assert!(store.is_empty());
}

#[test]
fn test_replaces_non_object_option() {
    let store = OptionStore::in_memory();
    store.update_option("widget_text", "garbage").unwrap();
    let widget = MultiWidget::new("text");

    widget.update(&store, Some(1), &json!({"a": 1})).unwrap();
    assert_eq!(
        store.get_option("widget_text"),
        Some(json!({"1": {"a": 1}, "_multiwidget": 1}))
    );
}
