// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Widget and setting identifiers.
//!
//! A widget ID such as `archives-3` names instance 3 of the `archives` multi
//! widget; an ID without a numeric suffix names a single widget. Its setting
//! ID is `widget_archives[3]` (or `widget_archives`), and its instances live
//! in the option `widget_archives`.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// `{id_base}-{number}`
static WIDGET_ID_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(.+)-(\d+)$").ok());

/// `widget_{id_base}` optionally followed by `[{number}]`
static SETTING_ID_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(widget_(.+?))(?:\[(\d+)\])?$").ok());

const OPTION_PREFIX: &str = "widget_";

/// Errors from parsing widget identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetIdError {
    #[error("Widget ID is empty")]
    Empty,

    #[error("Invalid widget setting ID: {0}")]
    InvalidSettingId(String),

    #[error("Widget number out of range in '{0}'")]
    NumberOutOfRange(String),
}

/// Parsed widget ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId {
    id_base: String,
    number: Option<u64>,
}

impl WidgetId {
    /// Build from parts
    pub fn new(id_base: impl Into<String>, number: Option<u64>) -> Self {
        Self {
            id_base: id_base.into(),
            number,
        }
    }

    /// Parse `archives-3` into (`archives`, `Some(3)`); IDs without a numeric
    /// suffix are single widgets.
    pub fn parse(widget_id: &str) -> Result<Self, WidgetIdError> {
        if widget_id.is_empty() {
            return Err(WidgetIdError::Empty);
        }

        let captures = WIDGET_ID_REGEX
            .as_ref()
            .and_then(|re| re.captures(widget_id));
        let Some(captures) = captures else {
            return Ok(Self::new(widget_id, None));
        };

        let number = parse_number(&captures[2], widget_id)?;
        Ok(Self::new(&captures[1], Some(number)))
    }

    pub fn id_base(&self) -> &str {
        &self.id_base
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    pub fn is_multi(&self) -> bool {
        self.number.is_some()
    }

    /// Option holding this widget's instances: `widget_{id_base}`
    pub fn option_name(&self) -> String {
        format!("{OPTION_PREFIX}{}", self.id_base)
    }

    /// Setting ID: `widget_{id_base}[{number}]` or `widget_{id_base}`
    pub fn setting_id(&self) -> WidgetSettingId {
        WidgetSettingId {
            id_base: self.id_base.clone(),
            number: self.number,
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{}-{}", self.id_base, n),
            None => f.write_str(&self.id_base),
        }
    }
}

impl FromStr for WidgetId {
    type Err = WidgetIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parsed widget setting ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidgetSettingId {
    id_base: String,
    number: Option<u64>,
}

impl WidgetSettingId {
    /// Parse `widget_archives[3]` or `widget_search`.
    pub fn parse(setting_id: &str) -> Result<Self, WidgetIdError> {
        let captures = SETTING_ID_REGEX
            .as_ref()
            .and_then(|re| re.captures(setting_id))
            .ok_or_else(|| WidgetIdError::InvalidSettingId(setting_id.to_string()))?;

        let number = captures
            .get(3)
            .map(|m| parse_number(m.as_str(), setting_id))
            .transpose()?;

        Ok(Self {
            id_base: captures[2].to_string(),
            number,
        })
    }

    pub fn id_base(&self) -> &str {
        &self.id_base
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    /// Option holding the instances: `widget_{id_base}`
    pub fn option_name(&self) -> String {
        format!("{OPTION_PREFIX}{}", self.id_base)
    }

    /// The widget ID this setting belongs to
    pub fn widget_id(&self) -> WidgetId {
        WidgetId::new(self.id_base.clone(), self.number)
    }
}

impl fmt::Display for WidgetSettingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{OPTION_PREFIX}{}[{}]", self.id_base, n),
            None => write!(f, "{OPTION_PREFIX}{}", self.id_base),
        }
    }
}

impl FromStr for WidgetSettingId {
    type Err = WidgetIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Setting ID for a sidebar's widget list: `sidebars_widgets[{sidebar_id}]`
pub fn sidebar_setting_id(sidebar_id: &str) -> String {
    format!("sidebars_widgets[{sidebar_id}]")
}

fn parse_number(digits: &str, source: &str) -> Result<u64, WidgetIdError> {
    digits
        .parse()
        .map_err(|_| WidgetIdError::NumberOutOfRange(source.to_string()))
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
