// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Preview widget updates without saving them.

use crate::id::{WidgetId, WidgetIdError};
use crate::registry::WidgetRegistry;
use optcap_capture::{
    capture_single_option, CaptureConfig, CaptureError, ConfigError, OptionCapture,
};
use optcap_store::{OptionStore, StoreError};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a widget's own update logic
#[derive(Debug, Error)]
pub enum WidgetControlError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid widget instance: {0}")]
    InvalidInstance(String),
}

/// A widget's save logic, as supplied by whoever implements the widget.
///
/// `update` is expected to persist through `store`, normally by rewriting the
/// option `widget_{id_base}`. It is treated as untrusted: the updater checks
/// afterwards which options it actually wrote.
pub trait WidgetControl: Send + Sync {
    fn id_base(&self) -> &str;

    fn update(
        &self,
        store: &OptionStore,
        number: Option<u64>,
        new_instance: &Value,
    ) -> Result<(), WidgetControlError>;
}

/// Errors from [`WidgetUpdater::update_widget`]
#[derive(Debug, Error)]
pub enum WidgetUpdateError {
    #[error(transparent)]
    InvalidId(#[from] WidgetIdError),

    #[error("No widget registered for id base '{0}'")]
    UnknownWidget(String),

    #[error(transparent)]
    Capture(#[from] CaptureError<WidgetControlError>),

    #[error("Option '{option}' holds no instance for widget '{widget_id}'")]
    MalformedOption { option: String, widget_id: String },
}

/// Runs widget updates inside a capture session.
#[derive(Debug)]
pub struct WidgetUpdater<'a> {
    registry: &'a WidgetRegistry,
    capture: OptionCapture<'a>,
}

impl<'a> WidgetUpdater<'a> {
    pub fn new(store: &'a OptionStore, registry: &'a WidgetRegistry) -> Self {
        Self {
            registry,
            capture: OptionCapture::new(store),
        }
    }

    pub fn with_config(
        store: &'a OptionStore,
        registry: &'a WidgetRegistry,
        config: &CaptureConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            registry,
            capture: OptionCapture::from_config(store, config)?,
        })
    }

    /// Run the widget's update for `widget_id` and return the instance it
    /// would have saved. The store is left unchanged.
    pub fn update_widget(
        &self,
        widget_id: &str,
        new_instance: &Value,
    ) -> Result<Value, WidgetUpdateError> {
        let id = WidgetId::parse(widget_id)?;
        let control = self
            .registry
            .get(id.id_base())
            .ok_or_else(|| WidgetUpdateError::UnknownWidget(id.id_base().to_string()))?;

        let option = id.option_name();
        let captured = capture_single_option(&self.capture, &option, |store| {
            control.update(store, id.number(), new_instance)
        })
        .inspect_err(|e| tracing::debug!(widget = %id, error = %e, "widget update rejected"))?;

        let instance = match id.number() {
            Some(number) => captured
                .as_object()
                .and_then(|instances| instances.get(&number.to_string()))
                .cloned(),
            None => Some(captured),
        };

        instance.ok_or_else(|| WidgetUpdateError::MalformedOption {
            option,
            widget_id: id.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
