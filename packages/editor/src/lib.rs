//! # Navtrail Editor
//!
//! In-memory editor host for the navigation history core.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ EditSession: slots of open documents        │
//! │  - generation-checked handles               │
//! │  - current document + caret (view control)  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ TextDocument: text + caret + marker layers  │
//! │  - insert/delete keep markers on their text │
//! │  - reload drops every marker                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! `EditSession` implements `DocumentService`, `MarkerService` and
//! `ViewControl`, so it can be handed to a `NavigationHistory` directly.
//!
//! ## Usage
//!
//! ```rust
//! use navtrail_editor::EditSession;
//! use navtrail_common::{MarkerId, MarkerService, NAVIGATION_LAYER};
//!
//! let mut session = EditSession::new();
//! let doc = session.open("main.rs", "fn main() {}\n").unwrap();
//! let tag = MarkerId::new(1).unwrap();
//!
//! session.fill_marker(doc, NAVIGATION_LAYER, 3, 1, tag);
//! session.get_mut(doc).unwrap().insert(0, "// hi\n").unwrap();
//!
//! assert_eq!(session.marker_at(doc, NAVIGATION_LAYER, 9), Some(tag));
//! ```

mod document;
mod errors;
mod lines;
mod markers;
mod session;

pub use document::TextDocument;
pub use errors::EditorError;
pub use markers::MarkerLayer;
pub use session::EditSession;
