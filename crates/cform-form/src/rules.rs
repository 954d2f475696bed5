#![forbid(unsafe_code)]

//! Field rules: a validator plus the fixed message shown when it fails.

use std::fmt;

use cform_validation::{Validator, ValidatorBuilder};

use crate::errors::ErrorSet;
use crate::field::{FieldId, FormFields};

/// Minimum first name length, in characters.
pub const FIRST_NAME_MIN_LEN: usize = 5;

/// Shown while the first name is missing or shorter than five characters.
pub const FIRST_NAME_ERROR: &str = "Error: firstName must have at least 5 characters.";
/// Shown while the last name is empty.
pub const LAST_NAME_ERROR: &str = "Error: lastName is a required field.";
/// Shown while the email is missing or malformed.
pub const EMAIL_ERROR: &str = "Error: email must be a valid email address.";

/// A pure predicate over one field, paired with its error message.
///
/// Whatever sub-check of the validator fails, the rule reports its one
/// fixed message.
pub struct FieldRule {
    field: FieldId,
    validator: Box<dyn Validator<str>>,
    message: &'static str,
}

impl FieldRule {
    /// Create a rule for `field`.
    pub fn new(
        field: FieldId,
        validator: impl Validator<str> + 'static,
        message: &'static str,
    ) -> Self {
        Self {
            field,
            validator: Box::new(validator),
            message,
        }
    }

    /// The field this rule checks.
    #[must_use]
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// The message reported on failure.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Check the rule against `fields`. Returns the message on failure.
    #[must_use]
    pub fn check(&self, fields: &FormFields) -> Option<&'static str> {
        self.validator
            .validate(fields.get(self.field))
            .is_invalid()
            .then_some(self.message)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// The static rule set of a form.
///
/// Each field yields at most one error: the first failing rule for that
/// field wins.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::contact()
    }
}

impl RuleSet {
    /// A rule set with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The contact form rules.
    ///
    /// | field | rule |
    /// |---|---|
    /// | firstName | required, at least [`FIRST_NAME_MIN_LEN`] characters |
    /// | lastName | non-empty |
    /// | email | required, well-formed address |
    /// | message | none |
    #[must_use]
    pub fn contact() -> Self {
        Self::empty()
            .with_rule(FieldRule::new(
                FieldId::FirstName,
                ValidatorBuilder::<str>::new()
                    .non_empty()
                    .min_length(FIRST_NAME_MIN_LEN)
                    .build(),
                FIRST_NAME_ERROR,
            ))
            .with_rule(FieldRule::new(
                FieldId::LastName,
                ValidatorBuilder::<str>::new().non_empty().build(),
                LAST_NAME_ERROR,
            ))
            .with_rule(FieldRule::new(
                FieldId::Email,
                ValidatorBuilder::<str>::new().non_empty().email().build(),
                EMAIL_ERROR,
            ))
    }

    /// Add a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns `true` if any rule checks `field`.
    #[must_use]
    pub fn has_rule(&self, field: FieldId) -> bool {
        self.rules.iter().any(|r| r.field == field)
    }

    /// Rules that check `field`, in insertion order.
    pub fn rules_for(&self, field: FieldId) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter().filter(move |r| r.field == field)
    }

    /// First failing message for `field`, if any.
    #[must_use]
    pub fn check_field(&self, fields: &FormFields, field: FieldId) -> Option<&'static str> {
        self.rules_for(field).find_map(|r| r.check(fields))
    }

    /// Build a fresh error set over the fields accepted by `in_scope`.
    #[must_use]
    pub fn evaluate(&self, fields: &FormFields, in_scope: impl Fn(FieldId) -> bool) -> ErrorSet {
        let mut errors = ErrorSet::new();
        for field in FieldId::ALL.into_iter().filter(|f| in_scope(*f)) {
            if let Some(message) = self.check_field(fields, field) {
                errors.insert(field, message);
            }
        }
        errors
    }

    /// Build a fresh error set over every field.
    #[must_use]
    pub fn evaluate_all(&self, fields: &FormFields) -> ErrorSet {
        self.evaluate(fields, |_| true)
    }
}
