#![forbid(unsafe_code)]

//! Stateful editing component for Quillbox.
//!
//! [`EditBox`] wraps the pure text layer with the state a live form input
//! needs: an undo/redo [`History`], an [`InputCoalescer`] that groups free
//! typing into single undo steps, a selection tracker, and the keystroke
//! command set (list continuation, list indentation, bold wrap, undo/redo
//! chords).
//!
//! # Example
//! ```
//! use qbx_core::{KeyCode, KeyEvent, Modifiers};
//! use qbx_text::SelectionRange;
//! use qbx_widgets::{EditBox, InputState};
//!
//! let mut editor = EditBox::new();
//! let outcome = editor.handle_key(
//!     KeyEvent::new(KeyCode::Enter),
//!     InputState::new("1. foo", SelectionRange::caret(6)),
//! );
//! assert_eq!(outcome.publish.as_deref(), Some("1. foo\n2. "));
//! ```

pub mod coalescer;
pub mod editbox;
pub mod history;

pub use coalescer::InputCoalescer;
pub use editbox::{EditBox, InputState, Outcome};
pub use history::{EditRecord, History, Snapshot};
