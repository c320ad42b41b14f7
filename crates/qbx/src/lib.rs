#![forbid(unsafe_code)]

//! Quillbox public facade crate.
//!
//! Quillbox is a text-editing engine for a host-owned form input:
//! structured transactions with consistent cursor remapping, undo/redo
//! with idle-window coalescing of free typing, and a keystroke command set
//! (list continuation on Enter, list indentation on Tab/Shift+Tab, bold
//! wrap, undo/redo chords). The host owns the buffer and the input
//! element; the engine is handed the current state per event and answers
//! with values to publish.
//!
//! This crate re-exports the common types from the internal crates and
//! offers a lightweight prelude for day-to-day usage.
//!
//! # Example
//! ```
//! use qbx::prelude::*;
//!
//! let mut editor = EditBox::new();
//! let outcome = editor.handle_key(
//!     KeyEvent::new(KeyCode::Enter),
//!     InputState::new("- milk", SelectionRange::caret(6)),
//! );
//! assert_eq!(outcome.publish.as_deref(), Some("- milk\n- "));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use qbx_core::defer::Deferred;
pub use qbx_core::event::{KeyCode, KeyEvent, Modifiers};
pub use qbx_core::timer::IdleTimer;

// --- Text re-exports -------------------------------------------------------

pub use qbx_text::marker::{self, NumberedMarker};
pub use qbx_text::transaction::{EditOp, SelectionRange, Transaction};

// --- Widget re-exports -----------------------------------------------------

pub use qbx_widgets::coalescer::InputCoalescer;
pub use qbx_widgets::editbox::{EditBox, InputState, Outcome};
pub use qbx_widgets::history::{EditRecord, History, Snapshot};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        EditBox, InputState, KeyCode, KeyEvent, Modifiers, Outcome, SelectionRange, Transaction,
    };

    pub use crate::{core, text, widgets};
}

pub use qbx_core as core;
pub use qbx_text as text;
pub use qbx_widgets as widgets;
