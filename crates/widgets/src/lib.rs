// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Widget settings on top of option capture.
//!
//! Widget instances live in options named `widget_{id_base}`; multi widgets
//! keep one instance per number inside that option. [`WidgetUpdater`] runs a
//! widget's own update logic inside a capture session and hands back the
//! instance it would have saved, without saving it.

pub mod id;
mod registry;
mod update;
mod widget;

pub use id::{sidebar_setting_id, WidgetId, WidgetIdError, WidgetSettingId};
pub use registry::WidgetRegistry;
pub use update::{WidgetControl, WidgetControlError, WidgetUpdateError, WidgetUpdater};
pub use widget::{MultiWidget, MULTIWIDGET_MARKER};
