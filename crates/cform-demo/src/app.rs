#![forbid(unsafe_code)]

//! The contact form application model.

use cform::form::view::render_editor;
use cform::{
    Cmd, EditOutcome, Event, FormEditor, Frame, KeyCode, KeyEvent, Model, SubmitOutcome,
};

/// Messages understood by [`ContactApp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A key for the form.
    Key(KeyEvent),
    /// Pasted text.
    Paste(String),
    /// Leave the application.
    Quit,
    /// Anything the form does not react to.
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if is_quit(&key) => Msg::Quit,
            Event::Key(key) => Msg::Key(key),
            Event::Paste(paste) => Msg::Paste(paste.text),
            _ => Msg::Noop,
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.is_press_or_repeat()
        && (key.code == KeyCode::Escape || (key.ctrl() && key.is_char('c')))
}

/// Hosts one contact form in the terminal.
#[derive(Debug, Default)]
pub struct ContactApp {
    editor: FormEditor,
}

impl ContactApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editor(&self) -> &FormEditor {
        &self.editor
    }

    fn after_edit(outcome: EditOutcome) -> Cmd<Msg> {
        match outcome {
            EditOutcome::Submitted(SubmitOutcome::Accepted(snapshot)) => Cmd::log(format!(
                "submit accepted: {} fields",
                snapshot.entries().count()
            )),
            EditOutcome::Submitted(SubmitOutcome::Rejected(errors)) => {
                Cmd::log(format!("submit rejected: {} errors", errors.len()))
            }
            EditOutcome::Ignored | EditOutcome::Moved | EditOutcome::Changed(_) => Cmd::none(),
        }
    }
}

impl Model for ContactApp {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::log("contact form ready")
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Key(key) => Self::after_edit(self.editor.handle_key(&key)),
            Msg::Paste(text) => Self::after_edit(self.editor.handle_paste(&text)),
            Msg::Quit => Cmd::quit(),
            Msg::Noop => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        render_editor(&self.editor, frame);
    }
}
