// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Option-update capture.
//!
//! Runs an update callback against an [`OptionStore`] while intercepting its
//! writes: the values it tries to save are recorded in memory, reads of those
//! options during the session observe the recorded values, and nothing
//! reaches persistent storage.
//!
//! ```
//! use optcap_capture::OptionCapture;
//! use optcap_store::OptionStore;
//!
//! let store = OptionStore::in_memory();
//! store.update_option("blogname", "Before").unwrap();
//!
//! let capture = OptionCapture::new(&store);
//! {
//!     let session = capture.scope();
//!     session.store().update_option("blogname", "After").unwrap();
//!     assert_eq!(store.get_str("blogname").as_deref(), Some("After"));
//!     assert_eq!(session.count(), 1);
//! }
//! assert_eq!(store.get_str("blogname").as_deref(), Some("Before"));
//! ```

mod captured;
mod config;
mod guard;
mod session;
mod single;

pub use captured::CapturedOptions;
pub use config::{CaptureConfig, ConfigError, IgnoreRules};
pub use guard::CaptureGuard;
pub use optcap_store::OptionStore;
pub use session::OptionCapture;
pub use single::{capture_single_option, CaptureError};
