#![forbid(unsafe_code)]

//! Contact form facade crate.
//!
//! Re-exports the types an application needs from the internal crates and
//! offers a small prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cform_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
pub use cform_core::frame::{Frame, Line, LineStyle};

// --- Form re-exports -------------------------------------------------------

pub use cform_form::{
    ContactForm, EditOutcome, ErrorSet, FieldId, FormEditor, FormFields, FormPhase, RuleSet,
    SubmitOutcome, SubmittedSnapshot,
};
pub use cform_form::view::{render, render_editor};

// --- Validation re-exports -------------------------------------------------

pub use cform_validation::{ValidationError, ValidationResult, Validator, ValidatorBuilder};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use cform_runtime::{Cmd, Model, Program, ProgramConfig, ProgramSimulator};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for contact form apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Terminal or runtime error with message.
    Terminal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal I/O failed: {err}"),
            Self::Terminal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Terminal(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for contact form APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ContactForm, Error, Event, FieldId, FormEditor, Frame, KeyCode, KeyEvent, Modifiers,
        Result, SubmitOutcome,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{Cmd, Model, Program, ProgramConfig};

    pub use crate::{core, form, validation};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use cform_core as core;
pub use cform_form as form;
#[cfg(feature = "runtime")]
pub use cform_runtime as runtime;
pub use cform_validation as validation;
