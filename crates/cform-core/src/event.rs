#![forbid(unsafe_code)]

//! Input events delivered to a model.
//!
//! A form only needs keys, pasted text, resizes and focus changes, so that is
//! all the runtime forwards. Mouse input is dropped at the crossterm boundary.

use bitflags::bitflags;
use crossterm::event as ct;

/// One unit of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// New terminal size in cells.
    Resize { width: u16, height: u16 },
    Paste(PasteEvent),
    /// `true` when the terminal window gains focus.
    Focus(bool),
    /// Poll timeout with no input. Only produced by tests and simulators.
    Tick,
}

impl Event {
    /// Translate a crossterm event. Returns `None` for input the form ignores
    /// (mouse events and keys without a [`KeyCode`]).
    #[must_use]
    pub fn from_crossterm(event: ct::Event) -> Option<Self> {
        Some(match event {
            ct::Event::Key(key) => Self::Key(KeyEvent::from_crossterm(key)?),
            ct::Event::Resize(width, height) => Self::Resize { width, height },
            ct::Event::Paste(text) => Self::Paste(PasteEvent::bracketed(text)),
            ct::Event::FocusGained => Self::Focus(true),
            ct::Event::FocusLost => Self::Focus(false),
            ct::Event::Mouse(_) => return None,
        })
    }

    /// A plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }
}

/// A key press, repeat or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// An unmodified press of `code`.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// `true` if this is the character key `c`, whatever the modifiers.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Editors act on presses and auto-repeats, never on releases.
    #[must_use]
    pub const fn is_press_or_repeat(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }

    fn from_crossterm(key: ct::KeyEvent) -> Option<Self> {
        let code = match key.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::F(n) => KeyCode::F(n),
            _ => return None,
        };
        let kind = match key.kind {
            ct::KeyEventKind::Press => KeyEventKind::Press,
            ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
            ct::KeyEventKind::Release => KeyEventKind::Release,
        };
        Some(Self {
            code,
            modifiers: Modifiers::from_crossterm(key.modifiers),
            kind,
        })
    }
}

/// Keys the form and the runtime distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    /// Shift+Tab.
    BackTab,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
    F(u8),
}

/// Press unless the terminal reports repeats and releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        /// Super, Hyper and Meta all fold into this bit.
        const SUPER = 1 << 3;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    fn from_crossterm(mods: ct::KeyModifiers) -> Self {
        [
            (ct::KeyModifiers::SHIFT, Self::SHIFT),
            (ct::KeyModifiers::ALT, Self::ALT),
            (ct::KeyModifiers::CONTROL, Self::CTRL),
            (ct::KeyModifiers::SUPER, Self::SUPER),
            (ct::KeyModifiers::HYPER, Self::SUPER),
            (ct::KeyModifiers::META, Self::SUPER),
        ]
        .into_iter()
        .filter(|(theirs, _)| mods.contains(*theirs))
        .fold(Self::NONE, |acc, (_, ours)| acc | ours)
    }
}

/// Text pasted into the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub text: String,
    /// Delivered as one bracketed paste rather than typed keys.
    pub bracketed: bool,
}

impl PasteEvent {
    #[must_use]
    pub fn new(text: impl Into<String>, bracketed: bool) -> Self {
        Self {
            text: text.into(),
            bracketed,
        }
    }

    #[must_use]
    pub fn bracketed(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }
}
