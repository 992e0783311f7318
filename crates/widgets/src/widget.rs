// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stock multi-widget save logic.

use crate::update::{WidgetControl, WidgetControlError};
use optcap_store::OptionStore;
use serde_json::{Map, Value};

/// Key marking an option as holding numbered multi-widget instances.
pub const MULTIWIDGET_MARKER: &str = "_multiwidget";

type Sanitize = dyn Fn(&Value, Option<&Value>) -> Result<Value, WidgetControlError> + Send + Sync;

/// Widget that keeps numbered instances in `widget_{id_base}`.
///
/// On update, the submitted instance is passed with the previously saved one
/// to a sanitize function; its result replaces the instance in the option,
/// which is then written back in full.
pub struct MultiWidget {
    id_base: String,
    sanitize: Box<Sanitize>,
}

impl MultiWidget {
    /// Widget that saves submitted instances unchanged
    pub fn new(id_base: impl Into<String>) -> Self {
        Self::with_sanitize(id_base, |new, _old| Ok(new.clone()))
    }

    /// Widget with custom sanitizing of `(new_instance, old_instance)`
    pub fn with_sanitize<F>(id_base: impl Into<String>, sanitize: F) -> Self
    where
        F: Fn(&Value, Option<&Value>) -> Result<Value, WidgetControlError> + Send + Sync + 'static,
    {
        Self {
            id_base: id_base.into(),
            sanitize: Box::new(sanitize),
        }
    }

    fn option_name(&self) -> String {
        format!("widget_{}", self.id_base)
    }
}

impl WidgetControl for MultiWidget {
    fn id_base(&self) -> &str {
        &self.id_base
    }

    fn update(
        &self,
        store: &OptionStore,
        number: Option<u64>,
        new_instance: &Value,
    ) -> Result<(), WidgetControlError> {
        let Some(number) = number else {
            return Err(WidgetControlError::InvalidInstance(format!(
                "{} instances must be numbered",
                self.id_base
            )));
        };
        if !new_instance.is_object() {
            return Err(WidgetControlError::InvalidInstance(
                "instance must be an object".to_string(),
            ));
        }

        let option = self.option_name();
        let mut instances = match store.get_option(&option) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let key = number.to_string();
        let sanitized = (self.sanitize)(new_instance, instances.get(&key))?;
        instances.insert(key, sanitized);
        instances.insert(MULTIWIDGET_MARKER.to_string(), Value::from(1));

        store.update_option(&option, Value::Object(instances))?;
        Ok(())
    }
}

impl std::fmt::Debug for MultiWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiWidget")
            .field("id_base", &self.id_base)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod tests;
