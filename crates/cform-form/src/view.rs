#![forbid(unsafe_code)]

//! Pure rendering of the form state into a [`Frame`].
//!
//! Output is a function of the fields, errors, snapshot and phase of the
//! form plus the UI focus; nothing is cached between calls.

use cform_core::frame::{Frame, Line, LineStyle};

use crate::field::FieldId;
use crate::form::{ContactForm, FormPhase};
use crate::input::{Focus, FormEditor, grapheme_display_width};

/// Form heading.
pub const HEADING: &str = "Contact Form";
/// Submit control text.
pub const SUBMIT_LABEL: &str = "[ Submit ]";
/// Heading above the submitted values.
pub const SUMMARY_HEADING: &str = "You Submitted:";
/// Shown under the summary while the inputs differ from it.
pub const STALE_NOTE: &str = "(inputs changed since this submit)";
/// Key hints.
pub const HINTS: &str = "Tab/Shift-Tab: move  Enter: submit  Esc: quit";

const INPUT_PREFIX: &str = "  ";
const FOCUSED_PREFIX: &str = "> ";

/// Render `form` with `focus` highlighted.
pub fn render(form: &ContactForm, focus: Option<Focus>, frame: &mut Frame) {
    frame.push(Line::styled(HEADING, LineStyle::Heading));
    frame.push(Line::blank());

    for field in FieldId::ALL {
        let focused = focus == Some(Focus::Field(field));
        frame.push(Line::styled(field.label(), LineStyle::Label));
        let (prefix, style) = if focused {
            (FOCUSED_PREFIX, LineStyle::FocusedInput)
        } else {
            (INPUT_PREFIX, LineStyle::Input)
        };
        frame.push(Line::styled(
            format!("{prefix}{}", form.value(field)),
            style,
        ));
        if let Some(message) = form.error(field) {
            frame.push(Line::styled(message, LineStyle::Error));
        }
    }

    frame.push(Line::blank());
    let button_style = if focus == Some(Focus::Submit) {
        LineStyle::FocusedButton
    } else {
        LineStyle::Button
    };
    frame.push(Line::styled(SUBMIT_LABEL, button_style));

    if let Some(snapshot) = form.snapshot() {
        frame.push(Line::blank());
        frame.push(Line::styled(SUMMARY_HEADING, LineStyle::Heading));
        for (field, value) in snapshot.entries() {
            frame.push(Line::styled(
                format!("{} {value}", field.summary_label()),
                LineStyle::Summary,
            ));
        }
        if form.phase() == FormPhase::Editing {
            frame.push(Line::styled(STALE_NOTE, LineStyle::Hint));
        }
    }

    frame.push(Line::blank());
    frame.push(Line::styled(HINTS, LineStyle::Hint));
}

/// Render an editor and place the terminal cursor in the focused input.
pub fn render_editor(editor: &FormEditor, frame: &mut Frame) {
    let start = frame.len();
    render(editor.form(), Some(editor.focus()), frame);

    let Some(field) = editor.focus().field() else {
        return;
    };
    let row = frame.lines()[start..]
        .iter()
        .position(|line| line.style == LineStyle::FocusedInput)
        .map(|offset| start + offset);
    if let Some(row) = row
        && let Ok(y) = u16::try_from(row)
        && y < frame.height
    {
        let width = FOCUSED_PREFIX.len()
            + grapheme_display_width(editor.form().value(field), editor.cursor());
        let x = u16::try_from(width).unwrap_or(u16::MAX).min(frame.width);
        frame.set_cursor(x, y);
    }
}
