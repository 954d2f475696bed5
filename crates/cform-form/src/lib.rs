#![forbid(unsafe_code)]

//! Contact form: field state, validation rules, keyboard editing and a pure
//! render function.
//!
//! [`ContactForm`] owns the field values, the current [`ErrorSet`] and the
//! last [`SubmittedSnapshot`]. It is updated only through
//! [`ContactForm::on_field_change`] and [`ContactForm::on_submit`].
//! [`FormEditor`] turns key events into those two calls, and
//! [`view::render`] draws any form state into a [`cform_core::frame::Frame`].
//!
//! ```rust
//! use cform_form::{ContactForm, FieldId, SubmitOutcome};
//!
//! let mut form = ContactForm::new();
//! form.on_field_change(FieldId::FirstName, "abc");
//! assert_eq!(
//!     form.error(FieldId::FirstName),
//!     Some("Error: firstName must have at least 5 characters.")
//! );
//!
//! form.on_field_change(FieldId::FirstName, "Andrew");
//! form.on_field_change(FieldId::LastName, "Castillo");
//! form.on_field_change(FieldId::Email, "fido@mail.com");
//! assert!(matches!(form.on_submit(), SubmitOutcome::Accepted(_)));
//! ```

pub mod errors;
pub mod field;
pub mod form;
pub mod input;
pub mod rules;
pub mod view;

pub use errors::ErrorSet;
pub use field::{FieldId, FormFields};
pub use form::{ContactForm, FormPhase, SubmitOutcome, SubmittedSnapshot};
pub use input::{EditOutcome, Focus, FormEditor};
pub use rules::{
    EMAIL_ERROR, FIRST_NAME_ERROR, FIRST_NAME_MIN_LEN, FieldRule, LAST_NAME_ERROR, RuleSet,
};
