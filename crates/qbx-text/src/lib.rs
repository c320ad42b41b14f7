#![forbid(unsafe_code)]

//! Pure text layer for Quillbox.
//!
//! This crate owns the stateless parts of the editing engine:
//! - [`Transaction`] - an ordered batch of insert/delete operations applied
//!   atomically to a buffer, remapping a [`SelectionRange`] through every
//!   operation
//! - [`marker`] - line scanning and list-marker predicates used by the
//!   Enter/Tab behaviors
//!
//! # Example
//! ```
//! use qbx_text::{SelectionRange, Transaction};
//!
//! // Wrap "hello" in bold markers.
//! let mut tx = Transaction::new();
//! tx.insert(0, "**").insert(7, "**");
//! let (value, cursors) = tx.apply("hello world", SelectionRange::new(0, 5));
//! assert_eq!(value, "**hello** world");
//! assert_eq!(cursors, SelectionRange::new(0, 7));
//! ```

pub mod marker;
pub mod transaction;

pub use transaction::{EditOp, SelectionRange, Transaction, byte_offset};
