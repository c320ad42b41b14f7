#![forbid(unsafe_code)]

//! The edit box: command dispatch over a host-owned buffer.
//!
//! [`EditBox`] owns no buffer. The host hands it the input's current value
//! and selection with every event; the edit box answers with an
//! [`Outcome`] naming the value to publish (if any) and whether the
//! input's native handling must be suppressed. Selection restoration is
//! deferred: the host drains [`EditBox::take_selection_restore`] after it
//! has re-rendered the published value, so the programmatic caret always
//! lands after the content update.
//!
//! Exactly one behavior fires per keystroke, in priority order: the undo
//! chord, the redo chord, Enter list handling, Tab/Shift+Tab list
//! indentation, the bold chord. Everything else is left to the input's
//! native handling and reaches the engine again through
//! [`EditBox::handle_change`], which feeds the typing coalescer.

use std::time::Duration;

use tracing::trace;

use qbx_core::{Deferred, KeyCode, KeyEvent};
use qbx_text::transaction::byte_offset;
use qbx_text::{SelectionRange, Transaction, marker};

use crate::coalescer::InputCoalescer;
use crate::history::{EditRecord, History, Snapshot};

/// The host input's state at the moment of an event.
#[derive(Debug, Clone, Copy)]
pub struct InputState<'a> {
    /// Current buffer content.
    pub value: &'a str,
    /// Current selection (a caret when collapsed).
    pub selection: SelectionRange,
}

impl<'a> InputState<'a> {
    /// Bundle a value and selection.
    #[must_use]
    pub const fn new(value: &'a str, selection: SelectionRange) -> Self {
        Self { value, selection }
    }
}

/// What the host must do after an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// New buffer value to store and render, when the edit produced one.
    pub publish: Option<String>,
    /// Whether the input's native handling of the key must be suppressed.
    pub prevent_default: bool,
}

impl Outcome {
    /// Nothing happened; native handling proceeds untouched.
    #[must_use]
    pub fn ignored() -> Self {
        Self::default()
    }

    /// A transaction ran: publish the new value, suppress the native key.
    #[must_use]
    pub fn published(value: String) -> Self {
        Self {
            publish: Some(value),
            prevent_default: true,
        }
    }

    /// The key was consumed but produced no new value.
    #[must_use]
    pub fn consumed() -> Self {
        Self {
            publish: None,
            prevent_default: true,
        }
    }
}

/// Editing engine for a single host input.
#[derive(Debug, Clone)]
pub struct EditBox {
    history: History,
    coalescer: InputCoalescer,
    /// Last selection reported by the host; the "before" cursors when a
    /// typing group opens.
    tracker: SelectionRange,
    /// Selection restore waiting for the next render.
    restore: Deferred<SelectionRange>,
}

impl Default for EditBox {
    fn default() -> Self {
        Self::new()
    }
}

impl EditBox {
    /// Create an edit box with the default idle window and history depth.
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: History::new(),
            coalescer: InputCoalescer::default(),
            tracker: SelectionRange::caret(0),
            restore: Deferred::new(),
        }
    }

    /// Set the typing-coalescer idle window (builder).
    #[must_use]
    pub fn with_idle_window(mut self, window: Duration) -> Self {
        self.coalescer = InputCoalescer::new(window);
        self
    }

    /// Set the maximum undo depth (builder).
    #[must_use]
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.history.set_max_depth(max);
        self
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether a typing group is currently open.
    #[must_use]
    pub fn is_coalescing(&self) -> bool {
        self.coalescer.is_open()
    }

    /// The last selection reported by the host.
    #[must_use]
    pub fn tracked_selection(&self) -> SelectionRange {
        self.tracker
    }

    // ── Host event entry points ────────────────────────────────────

    /// Selection-change notification from the host input.
    pub fn handle_select(&mut self, selection: SelectionRange) {
        self.tracker = selection;
    }

    /// A raw native edit: `previous_value` is the buffer the host still
    /// holds, `input` the post-edit value and selection.
    ///
    /// The new value is always republished immediately; only its undo
    /// grouping waits for the idle window.
    pub fn handle_change(&mut self, previous_value: &str, input: InputState<'_>) -> Outcome {
        self.coalescer.observe(
            Snapshot::new(previous_value, self.tracker),
            Snapshot::new(input.value, input.selection),
        );
        self.tracker = input.selection;
        Outcome {
            publish: Some(input.value.to_string()),
            prevent_default: false,
        }
    }

    /// Keydown notification from the host input.
    pub fn handle_key(&mut self, key: KeyEvent, input: InputState<'_>) -> Outcome {
        trace!(code = ?key.code, modifiers = ?key.modifiers, "dispatch key");
        match key.code {
            KeyCode::Char('z' | 'Z') if key.primary() && key.shift() => self.redo(),
            KeyCode::Char('z') if key.primary() => self.undo(),
            KeyCode::Enter => self.handle_enter(&input),
            KeyCode::BackTab => self.handle_tab(true, &input),
            KeyCode::Tab => self.handle_tab(key.shift(), &input),
            KeyCode::Char('b') if key.primary() => self.handle_bold(&input),
            _ => Outcome::ignored(),
        }
    }

    /// Advance the coalescer's idle timer by `dt`, closing the open typing
    /// group into a history record when the window elapses.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(record) = self.coalescer.tick(dt) {
            self.history.record(record);
        }
    }

    /// Drain the deferred selection restore.
    ///
    /// The host calls this once after rendering a published value and
    /// applies the range to the input, overwriting whatever caret position
    /// the native content update produced.
    #[must_use]
    pub fn take_selection_restore(&mut self) -> Option<SelectionRange> {
        self.restore.take()
    }

    // ── Commands ───────────────────────────────────────────────────

    fn undo(&mut self) -> Outcome {
        self.close_typing_group();
        match self.history.undo() {
            Some(snapshot) => self.restore_snapshot(snapshot),
            None => Outcome::consumed(),
        }
    }

    fn redo(&mut self) -> Outcome {
        self.close_typing_group();
        match self.history.redo() {
            Some(snapshot) => self.restore_snapshot(snapshot),
            None => Outcome::consumed(),
        }
    }

    fn handle_enter(&mut self, input: &InputState<'_>) -> Outcome {
        let caret = input.selection.start;
        let start = marker::line_start(input.value, caret);
        let line = marker::line_up_to(input.value, caret);
        if line.is_empty() {
            return Outcome::ignored();
        }

        if marker::is_empty_marker(line) {
            // Break out of the empty item: drop the marker line instead of
            // continuing the list.
            let mut tx = Transaction::new();
            tx.delete(start, caret - start);
            return self.transact(input, SelectionRange::caret(caret), &tx, (0, 0));
        }

        if let Some(numbered) = marker::numbered_marker(line) {
            let Some(next) = numbered.number.checked_add(1) else {
                return Outcome::ignored();
            };
            let indent = &line[..byte_offset(line, numbered.indent)];
            let inserted = format!("\n{indent}{next}. ");
            let advance = inserted.chars().count();
            let mut tx = Transaction::new();
            tx.insert(caret, inserted);
            return self.transact(input, SelectionRange::caret(caret), &tx, (advance, advance));
        }

        if let Some(indent) = marker::bullet_marker(line) {
            let ws = &line[..byte_offset(line, indent)];
            let inserted = format!("\n{ws}- ");
            let advance = inserted.chars().count();
            let mut tx = Transaction::new();
            tx.insert(caret, inserted);
            return self.transact(input, SelectionRange::caret(caret), &tx, (advance, advance));
        }

        Outcome::ignored()
    }

    fn handle_tab(&mut self, outdent: bool, input: &InputState<'_>) -> Outcome {
        let caret = input.selection.start;
        let start = marker::line_start(input.value, caret);
        let line = marker::line_up_to(input.value, caret);
        if line.is_empty() {
            return Outcome::ignored();
        }
        let Some(indent) = marker::bullet_marker(line) else {
            return Outcome::ignored();
        };

        if outdent {
            let depth = indent.min(2);
            if depth == 0 {
                return Outcome::ignored();
            }
            let mut tx = Transaction::new();
            tx.delete(start, depth);
            return self.transact(input, input.selection, &tx, (0, 0));
        }

        // Indenting deeper than the parent line is not allowed; the first
        // line has no parent at all.
        let parent_ok = marker::previous_line(input.value, start)
            .is_some_and(|prev| marker::leading_whitespace(prev) >= indent);
        if !parent_ok {
            return Outcome::ignored();
        }
        let mut tx = Transaction::new();
        tx.insert(start, "  ");
        self.transact(input, input.selection, &tx, (0, 0))
    }

    fn handle_bold(&mut self, input: &InputState<'_>) -> Outcome {
        if input.selection.is_caret() {
            return Outcome::ignored();
        }
        let SelectionRange { start, end } = input.selection;
        let mut tx = Transaction::new();
        // The second offset accounts for the first insertion: ops address
        // the running buffer.
        tx.insert(start, "**").insert(end + 2, "**");
        self.transact(input, input.selection, &tx, (2, 0))
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Run a transaction against the host state and record it.
    ///
    /// `remap` is the cursor pair fed through the transaction engine
    /// (commands that collapse the selection pass a caret); `advance` is
    /// the command's fixed post-edit offset, added per end after
    /// remapping.
    fn transact(
        &mut self,
        input: &InputState<'_>,
        remap: SelectionRange,
        tx: &Transaction,
        advance: (usize, usize),
    ) -> Outcome {
        self.close_typing_group();
        let (value, cursors) = tx.apply(input.value, remap);
        let cursors = cursors.advanced(advance.0, advance.1);
        self.history.record(EditRecord {
            before: Snapshot::new(input.value, input.selection),
            after: Snapshot::new(value.as_str(), cursors),
        });
        self.restore.schedule(cursors);
        self.tracker = cursors;
        Outcome::published(value)
    }

    fn restore_snapshot(&mut self, snapshot: Snapshot) -> Outcome {
        self.restore.schedule(snapshot.cursors);
        self.tracker = snapshot.cursors;
        Outcome::published(snapshot.value)
    }

    /// Flush the open typing group, if any, ahead of a structured command
    /// or undo/redo, so free typing undoes as its own discrete step.
    fn close_typing_group(&mut self) {
        if let Some(record) = self.coalescer.flush() {
            self.history.record(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbx_core::Modifiers;

    const WINDOW: Duration = InputCoalescer::DEFAULT_IDLE_WINDOW;

    fn undo_chord() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('z')).with_modifiers(Modifiers::CTRL)
    }

    fn redo_chord() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('Z')).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT)
    }

    fn bold_chord() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('b')).with_modifiers(Modifiers::SUPER)
    }

    #[test]
    fn enter_on_empty_bullet_breaks_out() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("- ", SelectionRange::caret(2)),
        );
        assert_eq!(outcome.publish.as_deref(), Some(""));
        assert!(outcome.prevent_default);
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(0))
        );
    }

    #[test]
    fn enter_on_empty_numbered_item_breaks_out() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("1. a\n2. ", SelectionRange::caret(8)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("1. a\n"));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(5))
        );
    }

    #[test]
    fn enter_continues_numbered_list() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("1. foo", SelectionRange::caret(6)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("1. foo\n2. "));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(10))
        );
    }

    #[test]
    fn enter_continues_bulleted_list() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("- a", SelectionRange::caret(3)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("- a\n- "));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(6))
        );
    }

    #[test]
    fn enter_preserves_indentation_text() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("  - a", SelectionRange::caret(5)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("  - a\n  - "));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(10))
        );
    }

    #[test]
    fn enter_numbered_wins_over_bullet_check() {
        // "10." continues with 11, not with a dash.
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("10. x", SelectionRange::caret(5)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("10. x\n11. "));
    }

    #[test]
    fn enter_mid_line_continues_from_caret() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("- abcd", SelectionRange::caret(4)),
        );
        // Text after the caret stays on the new line's tail.
        assert_eq!(outcome.publish.as_deref(), Some("- ab\n- cd"));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(7))
        );
    }

    #[test]
    fn enter_without_marker_falls_through() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("hello", SelectionRange::caret(5)),
        );
        assert_eq!(outcome, Outcome::ignored());
        assert!(!editor.can_undo());
    }

    #[test]
    fn enter_at_line_start_falls_through() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("- a", SelectionRange::caret(0)),
        );
        assert_eq!(outcome, Outcome::ignored());
    }

    #[test]
    fn tab_indents_bullet_under_parent() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Tab),
            InputState::new("- a\n- b", SelectionRange::caret(7)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("- a\n  - b"));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(9))
        );
    }

    #[test]
    fn tab_cannot_indent_past_parent() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Tab),
            InputState::new("- a\n  - b", SelectionRange::caret(9)),
        );
        assert_eq!(outcome, Outcome::ignored());
    }

    #[test]
    fn tab_on_first_line_has_no_parent() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Tab),
            InputState::new("- a", SelectionRange::caret(3)),
        );
        assert_eq!(outcome, Outcome::ignored());
    }

    #[test]
    fn tab_without_marker_falls_through() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Tab),
            InputState::new("a\nplain", SelectionRange::caret(7)),
        );
        assert_eq!(outcome, Outcome::ignored());
    }

    #[test]
    fn shift_tab_outdents_by_two() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT),
            InputState::new("  - a", SelectionRange::caret(5)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("- a"));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(3))
        );
    }

    #[test]
    fn back_tab_outdents_like_shift_tab() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::BackTab),
            InputState::new("  - a", SelectionRange::caret(5)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("- a"));
    }

    #[test]
    fn shift_tab_at_zero_indent_is_noop() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT),
            InputState::new("- item", SelectionRange::caret(3)),
        );
        assert_eq!(outcome, Outcome::ignored());
        assert!(!editor.can_undo());
    }

    #[test]
    fn shift_tab_with_one_space_removes_only_it() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT),
            InputState::new(" - a", SelectionRange::caret(4)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("- a"));
    }

    #[test]
    fn bold_wraps_selection() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            bold_chord(),
            InputState::new("hello world", SelectionRange::new(0, 5)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("**hello** world"));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::new(2, 7))
        );
    }

    #[test]
    fn bold_mid_buffer_selection() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            bold_chord(),
            InputState::new("hello world", SelectionRange::new(6, 11)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("hello **world**"));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::new(8, 13))
        );
    }

    #[test]
    fn bold_without_selection_falls_through() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            bold_chord(),
            InputState::new("hello", SelectionRange::caret(2)),
        );
        assert_eq!(outcome, Outcome::ignored());
    }

    #[test]
    fn bold_without_primary_modifier_falls_through() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            KeyEvent::new(KeyCode::Char('b')),
            InputState::new("hello", SelectionRange::new(0, 5)),
        );
        assert_eq!(outcome, Outcome::ignored());
    }

    #[test]
    fn undo_restores_before_state() {
        let mut editor = EditBox::new();
        editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("1. foo", SelectionRange::caret(6)),
        );
        let _ = editor.take_selection_restore();

        let outcome = editor.handle_key(
            undo_chord(),
            InputState::new("1. foo\n2. ", SelectionRange::caret(10)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("1. foo"));
        assert!(outcome.prevent_default);
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(6))
        );
    }

    #[test]
    fn redo_restores_after_state() {
        let mut editor = EditBox::new();
        editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("1. foo", SelectionRange::caret(6)),
        );
        editor.handle_key(
            undo_chord(),
            InputState::new("1. foo\n2. ", SelectionRange::caret(10)),
        );

        let outcome = editor.handle_key(
            redo_chord(),
            InputState::new("1. foo", SelectionRange::caret(6)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("1. foo\n2. "));
        let _ = editor.take_selection_restore();
        assert_eq!(editor.tracked_selection(), SelectionRange::caret(10));
    }

    #[test]
    fn undo_with_empty_history_is_consumed_noop() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_key(
            undo_chord(),
            InputState::new("abc", SelectionRange::caret(3)),
        );
        assert_eq!(outcome, Outcome::consumed());
        assert_eq!(editor.take_selection_restore(), None);
    }

    #[test]
    fn redo_cleared_by_new_edit() {
        let mut editor = EditBox::new();
        editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("- a", SelectionRange::caret(3)),
        );
        editor.handle_key(
            undo_chord(),
            InputState::new("- a\n- ", SelectionRange::caret(6)),
        );
        // A new structured edit branches history; redo must die.
        editor.handle_key(
            bold_chord(),
            InputState::new("- a", SelectionRange::new(2, 3)),
        );
        let outcome = editor.handle_key(
            redo_chord(),
            InputState::new("- **a**", SelectionRange::caret(7)),
        );
        assert_eq!(outcome, Outcome::consumed());
    }

    #[test]
    fn typing_coalesces_into_one_undo_step() {
        let mut editor = EditBox::new();
        editor.handle_select(SelectionRange::caret(0));
        editor.handle_change("", InputState::new("a", SelectionRange::caret(1)));
        editor.tick(Duration::from_millis(100));
        editor.handle_change("a", InputState::new("ab", SelectionRange::caret(2)));
        editor.tick(Duration::from_millis(100));
        editor.handle_change("ab", InputState::new("abc", SelectionRange::caret(3)));

        let outcome = editor.handle_key(
            undo_chord(),
            InputState::new("abc", SelectionRange::caret(3)),
        );
        assert_eq!(outcome.publish.as_deref(), Some(""));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(0))
        );
    }

    #[test]
    fn idle_window_splits_typing_groups() {
        let mut editor = EditBox::new();
        editor.handle_select(SelectionRange::caret(0));
        editor.handle_change("", InputState::new("a", SelectionRange::caret(1)));
        editor.tick(WINDOW);
        assert!(!editor.is_coalescing());
        editor.handle_change("a", InputState::new("ab", SelectionRange::caret(2)));
        editor.tick(WINDOW);

        // Two groups, two undo steps.
        let outcome = editor.handle_key(
            undo_chord(),
            InputState::new("ab", SelectionRange::caret(2)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("a"));
        let outcome = editor.handle_key(
            undo_chord(),
            InputState::new("a", SelectionRange::caret(1)),
        );
        assert_eq!(outcome.publish.as_deref(), Some(""));
    }

    #[test]
    fn structured_command_closes_open_typing_group() {
        let mut editor = EditBox::new();
        editor.handle_select(SelectionRange::caret(2));
        editor.handle_change("- ", InputState::new("- a", SelectionRange::caret(3)));
        assert!(editor.is_coalescing());

        editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("- a", SelectionRange::caret(3)),
        );
        assert!(!editor.is_coalescing());

        // Undo peels the structured edit first, then the typing group.
        let outcome = editor.handle_key(
            undo_chord(),
            InputState::new("- a\n- ", SelectionRange::caret(6)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("- a"));
        let outcome = editor.handle_key(
            undo_chord(),
            InputState::new("- a", SelectionRange::caret(3)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("- "));
    }

    #[test]
    fn raw_change_republishes_immediately() {
        let mut editor = EditBox::new();
        let outcome = editor.handle_change("", InputState::new("x", SelectionRange::caret(1)));
        assert_eq!(outcome.publish.as_deref(), Some("x"));
        assert!(!outcome.prevent_default);
    }

    #[test]
    fn typing_group_undo_restores_tracked_selection() {
        let mut editor = EditBox::new();
        editor.handle_select(SelectionRange::caret(5));
        editor.handle_change("hello", InputState::new("hello!", SelectionRange::caret(6)));
        editor.tick(WINDOW);

        let outcome = editor.handle_key(
            undo_chord(),
            InputState::new("hello!", SelectionRange::caret(6)),
        );
        assert_eq!(outcome.publish.as_deref(), Some("hello"));
        assert_eq!(
            editor.take_selection_restore(),
            Some(SelectionRange::caret(5))
        );
    }

    #[test]
    fn selection_restore_is_drained_once() {
        let mut editor = EditBox::new();
        editor.handle_key(
            KeyEvent::new(KeyCode::Enter),
            InputState::new("- a", SelectionRange::caret(3)),
        );
        assert!(editor.take_selection_restore().is_some());
        assert_eq!(editor.take_selection_restore(), None);
    }

    #[test]
    fn plain_keys_fall_through() {
        let mut editor = EditBox::new();
        for key in [
            KeyEvent::new(KeyCode::Char('x')),
            KeyEvent::new(KeyCode::Backspace),
            KeyEvent::new(KeyCode::Left),
            KeyEvent::new(KeyCode::Char('z')), // no modifier: not the chord
        ] {
            let outcome = editor.handle_key(key, InputState::new("abc", SelectionRange::caret(1)));
            assert_eq!(outcome, Outcome::ignored());
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Typing bursts with arbitrary pauses always undo back to the
            /// empty buffer and redo forward to the final one, whatever the
            /// grouping turned out to be.
            #[test]
            fn undo_all_then_redo_all_round_trips(
                chars in proptest::collection::vec(proptest::char::range('a', 'z'), 1..12),
                gaps in proptest::collection::vec(0u64..800, 1..12),
            ) {
                let mut editor = EditBox::new();
                let mut value = String::new();
                editor.handle_select(SelectionRange::caret(0));

                for (i, c) in chars.iter().enumerate() {
                    let mut next = value.clone();
                    next.push(*c);
                    let caret = SelectionRange::caret(next.chars().count());
                    let outcome = editor.handle_change(&value, InputState::new(&next, caret));
                    prop_assert_eq!(outcome.publish.as_deref(), Some(next.as_str()));
                    value = next;
                    let gap = gaps[i % gaps.len()];
                    editor.tick(Duration::from_millis(gap));
                }
                let final_value = value.clone();

                // Unwind everything.
                let mut undos = 0;
                loop {
                    let caret = SelectionRange::caret(value.chars().count());
                    let outcome =
                        editor.handle_key(undo_chord(), InputState::new(&value, caret));
                    match outcome.publish {
                        Some(v) => {
                            value = v;
                            undos += 1;
                            prop_assert!(undos <= chars.len());
                        }
                        None => break,
                    }
                }
                prop_assert_eq!(value.as_str(), "");

                // Replay everything.
                loop {
                    let caret = SelectionRange::caret(value.chars().count());
                    let outcome =
                        editor.handle_key(redo_chord(), InputState::new(&value, caret));
                    match outcome.publish {
                        Some(v) => value = v,
                        None => break,
                    }
                }
                prop_assert_eq!(value, final_value);
            }
        }
    }
}
