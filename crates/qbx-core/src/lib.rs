#![forbid(unsafe_code)]

//! Input and scheduling primitives for Quillbox.
//!
//! This crate defines the types the host uses to drive the editing engine:
//! - [`KeyEvent`], [`KeyCode`], [`Modifiers`] - canonical key input
//! - [`IdleTimer`] - an arm/cancel/tick deadline for input coalescing
//! - [`Deferred`] - a one-slot "after the next render" queue
//!
//! Nothing here touches the text buffer; editing lives in `qbx-text` and
//! `qbx-widgets`.

pub mod defer;
pub mod event;
pub mod timer;

pub use defer::Deferred;
pub use event::{KeyCode, KeyEvent, Modifiers};
pub use timer::IdleTimer;
