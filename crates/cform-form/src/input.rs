#![forbid(unsafe_code)]

//! Keyboard editing on top of [`ContactForm`].
//!
//! [`FormEditor`] owns the form plus the UI-only state (which control has
//! focus, where the text cursor sits). Every value mutation goes through
//! [`ContactForm::on_field_change`] and every submit through
//! [`ContactForm::on_submit`], so the form's invariants hold no matter how
//! the value was typed.
//!
//! Cursor positions are grapheme indices, so combining sequences and emoji
//! are inserted and deleted as one unit.

use cform_core::event::{KeyCode, KeyEvent, Modifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::field::FieldId;
use crate::form::{ContactForm, SubmitOutcome};

/// A focusable control: one of the inputs or the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// A text input.
    Field(FieldId),
    /// The submit button.
    Submit,
}

impl Focus {
    /// Tab order.
    pub const ORDER: [Focus; 5] = [
        Focus::Field(FieldId::FirstName),
        Focus::Field(FieldId::LastName),
        Focus::Field(FieldId::Email),
        Focus::Field(FieldId::Message),
        Focus::Submit,
    ];

    fn position(self) -> usize {
        match self {
            Self::Field(field) => field.index(),
            Self::Submit => Self::ORDER.len() - 1,
        }
    }

    /// Next control in tab order, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Previous control in tab order, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// The focused field, if an input has focus.
    #[must_use]
    pub fn field(self) -> Option<FieldId> {
        match self {
            Self::Field(field) => Some(field),
            Self::Submit => None,
        }
    }
}

impl Default for Focus {
    fn default() -> Self {
        Self::Field(FieldId::FirstName)
    }
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The key was not for the form.
    Ignored,
    /// Focus or cursor moved; no value changed.
    Moved,
    /// A field value changed.
    Changed(FieldId),
    /// The form was submitted.
    Submitted(SubmitOutcome),
}

/// Form plus focus and cursor.
#[derive(Debug, Default)]
pub struct FormEditor {
    form: ContactForm,
    focus: Focus,
    cursor: usize,
}

impl FormEditor {
    /// Wrap a fresh contact form, focused on the first input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing form.
    #[must_use]
    pub fn with_form(form: ContactForm) -> Self {
        let mut editor = Self {
            form,
            focus: Focus::default(),
            cursor: 0,
        };
        editor.cursor_to_end();
        editor
    }

    /// The wrapped form.
    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// The wrapped form, mutably. Values changed this way are picked up by
    /// the next edit; the cursor is clamped to the new value first.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Focused control.
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Cursor position (grapheme index) within the focused input.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.focus
            .field()
            .map_or(0, |field| self.cursor.min(grapheme_count(self.form.value(field))))
    }

    /// Move focus, placing the cursor at the end of the new input.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.cursor_to_end();
    }

    /// Focus `field` and type `text` one character at a time, the way a
    /// user would.
    pub fn type_text(&mut self, field: FieldId, text: &str) {
        self.set_focus(Focus::Field(field));
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    /// Submit the form.
    pub fn submit(&mut self) -> EditOutcome {
        EditOutcome::Submitted(self.form.on_submit())
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: &KeyEvent) -> EditOutcome {
        if !key.is_press_or_repeat() {
            return EditOutcome::Ignored;
        }
        self.cursor = self.cursor();
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.set_focus(self.focus.next());
                EditOutcome::Moved
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.set_focus(self.focus.prev());
                EditOutcome::Moved
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(' ') if self.focus == Focus::Submit => self.submit(),
            KeyCode::Char(c) if !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) => {
                self.insert_char(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_cursor(|cursor, _| cursor.saturating_sub(1)),
            KeyCode::Right => self.move_cursor(|cursor, count| (cursor + 1).min(count)),
            KeyCode::Home => self.move_cursor(|_, _| 0),
            KeyCode::End => self.move_cursor(|_, count| count),
            _ => EditOutcome::Ignored,
        }
    }

    /// Insert pasted text at the cursor. Newlines are dropped since the
    /// inputs are single-line.
    pub fn handle_paste(&mut self, text: &str) -> EditOutcome {
        let Some(field) = self.focus.field() else {
            return EditOutcome::Ignored;
        };
        let clean: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        if clean.is_empty() {
            return EditOutcome::Ignored;
        }
        self.cursor = self.cursor();
        let mut value = self.form.value(field).to_string();
        let offset = grapheme_byte_offset(&value, self.cursor);
        value.insert_str(offset, &clean);
        let prefix_graphemes = grapheme_count(&value[..offset + clean.len()]);
        self.form.on_field_change(field, value);
        self.cursor = prefix_graphemes;
        EditOutcome::Changed(field)
    }

    fn insert_char(&mut self, c: char) -> EditOutcome {
        let Some(field) = self.focus.field() else {
            return EditOutcome::Ignored;
        };
        let mut value = self.form.value(field).to_string();
        let before_count = grapheme_count(&value);
        let offset = grapheme_byte_offset(&value, self.cursor);
        value.insert(offset, c);
        let after_count = grapheme_count(&value);
        // A combining mark merges into the previous grapheme.
        if after_count > before_count {
            self.cursor += 1;
        } else {
            self.cursor = self.cursor.min(after_count);
        }
        self.form.on_field_change(field, value);
        EditOutcome::Changed(field)
    }

    fn backspace(&mut self) -> EditOutcome {
        let Some(field) = self.focus.field() else {
            return EditOutcome::Ignored;
        };
        if self.cursor == 0 {
            return EditOutcome::Ignored;
        }
        let mut value = self.form.value(field).to_string();
        let start = grapheme_byte_offset(&value, self.cursor - 1);
        let end = grapheme_byte_offset(&value, self.cursor);
        value.drain(start..end);
        self.cursor -= 1;
        self.form.on_field_change(field, value);
        EditOutcome::Changed(field)
    }

    fn delete(&mut self) -> EditOutcome {
        let Some(field) = self.focus.field() else {
            return EditOutcome::Ignored;
        };
        let mut value = self.form.value(field).to_string();
        if self.cursor >= grapheme_count(&value) {
            return EditOutcome::Ignored;
        }
        let start = grapheme_byte_offset(&value, self.cursor);
        let end = grapheme_byte_offset(&value, self.cursor + 1);
        value.drain(start..end);
        self.form.on_field_change(field, value);
        EditOutcome::Changed(field)
    }

    fn move_cursor(&mut self, to: impl FnOnce(usize, usize) -> usize) -> EditOutcome {
        let Some(field) = self.focus.field() else {
            return EditOutcome::Ignored;
        };
        let count = grapheme_count(self.form.value(field));
        self.cursor = to(self.cursor, count);
        EditOutcome::Moved
    }

    fn cursor_to_end(&mut self) {
        self.cursor = self
            .focus
            .field()
            .map_or(0, |field| grapheme_count(self.form.value(field)));
    }
}

/// Count grapheme clusters in a string.
pub(crate) fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Display width (cells) of the first `graphemes` graphemes.
pub(crate) fn grapheme_display_width(s: &str, graphemes: usize) -> usize {
    s.graphemes(true)
        .take(graphemes)
        .map(unicode_width::UnicodeWidthStr::width)
        .sum()
}

/// Byte offset of the nth grapheme cluster (or the string length).
fn grapheme_byte_offset(s: &str, grapheme_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(grapheme_idx)
        .map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FIRST_NAME_ERROR;
    use cform_core::event::KeyEventKind;

    fn press(editor: &mut FormEditor, code: KeyCode) -> EditOutcome {
        editor.handle_key(&KeyEvent::new(code))
    }

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(Focus::Submit.next(), Focus::Field(FieldId::FirstName));
        assert_eq!(Focus::Field(FieldId::FirstName).prev(), Focus::Submit);
        assert_eq!(
            Focus::Field(FieldId::Email).next(),
            Focus::Field(FieldId::Message)
        );
        assert_eq!(Focus::Submit.field(), None);
    }

    #[test]
    fn typing_goes_through_on_field_change() {
        let mut editor = FormEditor::new();
        editor.type_text(FieldId::FirstName, "abc");
        assert_eq!(editor.form().value(FieldId::FirstName), "abc");
        assert_eq!(editor.form().error(FieldId::FirstName), Some(FIRST_NAME_ERROR));
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn tab_moves_focus_and_cursor_to_end() {
        let mut editor = FormEditor::new();
        editor.type_text(FieldId::LastName, "Castillo");
        editor.set_focus(Focus::Field(FieldId::FirstName));
        assert_eq!(press(&mut editor, KeyCode::Tab), EditOutcome::Moved);
        assert_eq!(editor.focus(), Focus::Field(FieldId::LastName));
        assert_eq!(editor.cursor(), 8);
        press(&mut editor, KeyCode::BackTab);
        assert_eq!(editor.focus(), Focus::Field(FieldId::FirstName));
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn cursor_editing() {
        let mut editor = FormEditor::new();
        editor.type_text(FieldId::FirstName, "Andew");
        press(&mut editor, KeyCode::Left);
        press(&mut editor, KeyCode::Left);
        press(&mut editor, KeyCode::Char('r'));
        assert_eq!(editor.form().value(FieldId::FirstName), "Andrew");
        press(&mut editor, KeyCode::Home);
        press(&mut editor, KeyCode::Delete);
        assert_eq!(editor.form().value(FieldId::FirstName), "ndrew");
        press(&mut editor, KeyCode::End);
        press(&mut editor, KeyCode::Backspace);
        assert_eq!(editor.form().value(FieldId::FirstName), "ndre");
        assert_eq!(press(&mut editor, KeyCode::Delete), EditOutcome::Ignored);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut editor = FormEditor::new();
        editor.type_text(FieldId::Message, "hi e\u{301}");
        assert_eq!(editor.cursor(), 4);
        press(&mut editor, KeyCode::Backspace);
        assert_eq!(editor.form().value(FieldId::Message), "hi ");
    }

    #[test]
    fn enter_submits_from_any_field() {
        let mut editor = FormEditor::new();
        let outcome = press(&mut editor, KeyCode::Enter);
        let EditOutcome::Submitted(SubmitOutcome::Rejected(errors)) = outcome else {
            panic!("empty form must be rejected");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn space_on_button_submits_but_types_in_inputs() {
        let mut editor = FormEditor::new();
        editor.type_text(FieldId::Message, "a b");
        assert_eq!(editor.form().value(FieldId::Message), "a b");
        editor.set_focus(Focus::Submit);
        assert!(matches!(
            press(&mut editor, KeyCode::Char(' ')),
            EditOutcome::Submitted(_)
        ));
        assert_eq!(
            press(&mut editor, KeyCode::Char('x')),
            EditOutcome::Ignored
        );
    }

    #[test]
    fn ctrl_chars_and_releases_are_ignored() {
        let mut editor = FormEditor::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert_eq!(editor.handle_key(&ctrl_c), EditOutcome::Ignored);
        let release = KeyEvent::new(KeyCode::Char('a')).with_kind(KeyEventKind::Release);
        assert_eq!(editor.handle_key(&release), EditOutcome::Ignored);
        assert_eq!(editor.form().value(FieldId::FirstName), "");
        assert!(!editor.form().is_validated(FieldId::FirstName));
    }

    #[test]
    fn paste_inserts_at_cursor_and_strips_newlines() {
        let mut editor = FormEditor::new();
        editor.type_text(FieldId::Email, "fido@.com");
        for _ in 0..4 {
            press(&mut editor, KeyCode::Left);
        }
        assert_eq!(
            editor.handle_paste("mail\n"),
            EditOutcome::Changed(FieldId::Email)
        );
        assert_eq!(editor.form().value(FieldId::Email), "fido@mail.com");
        assert_eq!(editor.cursor(), 9);
        assert!(editor.form().error(FieldId::Email).is_none());
    }

    #[test]
    fn cursor_follows_values_changed_through_the_form() {
        let mut editor = FormEditor::new();
        editor.type_text(FieldId::FirstName, "Andrew");
        editor.form_mut().on_field_change(FieldId::FirstName, "");
        assert_eq!(editor.cursor(), 0);

        press(&mut editor, KeyCode::Char('x'));
        assert_eq!(editor.form().value(FieldId::FirstName), "x");
        assert_eq!(editor.cursor(), 1);

        assert_eq!(
            press(&mut editor, KeyCode::Backspace),
            EditOutcome::Changed(FieldId::FirstName)
        );
        assert_eq!(editor.form().value(FieldId::FirstName), "");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn reset_through_the_form_keeps_paste_in_bounds() {
        let mut editor = FormEditor::new();
        editor.type_text(FieldId::FirstName, "Andrew");
        editor.form_mut().reset();
        editor.handle_paste("Jo");
        assert_eq!(editor.form().value(FieldId::FirstName), "Jo");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn grapheme_helpers() {
        assert_eq!(grapheme_count("e\u{301}x"), 2);
        assert_eq!(grapheme_byte_offset("e\u{301}x", 1), 3);
        assert_eq!(grapheme_byte_offset("ab", 9), 2);
        assert_eq!(grapheme_display_width("日本x", 2), 4);
    }
}
