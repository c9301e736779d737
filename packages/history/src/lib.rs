//! # Navtrail History
//!
//! Bounded back/forward navigation history for a text editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ NavigationHistory                           │
//! │  - record_position: dedup, branch, bound    │
//! │  - navigate_back / navigate_forward         │
//! │  - remove_document, goto_line, shutdown     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ AnchorStore: newest-first anchors + cursor  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Resolver: marker fast path → range scan     │
//! │           → permanent invalidation          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ EditorHost (documents, markers, view)       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Recorded offsets go stale as soon as the text changes. Each anchor
//! therefore tags its position with a one-character marker in a dedicated
//! marker layer; the editor keeps that marker on the same character through
//! edits, and the resolver reads the position back from it.

mod anchor;
mod config;
mod errors;
mod history;
mod resolver;
mod store;

pub use anchor::Anchor;
pub use config::{CursorClamp, HistoryConfig, DEFAULT_CONFIG_NAME, DEFAULT_MAX_LENGTH};
pub use errors::{ConfigError, HistoryError};
pub use history::{NavigationHistory, RecordOutcome};
pub use resolver::Resolution;
pub use store::AnchorStore;
