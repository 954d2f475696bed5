#![forbid(unsafe_code)]

//! The contact form state machine.
//!
//! Two phases:
//!
//! - [`FormPhase::Editing`]: errors may be showing; any snapshot on display
//!   is from an earlier submit.
//! - [`FormPhase::Submitted`]: the last submit passed; the snapshot equals
//!   the current field values and the error set is empty.
//!
//! `Editing → Submitted` only through a passing [`ContactForm::on_submit`];
//! `Submitted → Editing` on any [`ContactForm::on_field_change`].
//!
//! The snapshot is retained across later edits and rejected submits, and is
//! replaced wholesale by the next passing submit.

use std::collections::BTreeSet;

use cform_core::{debug, info};

use crate::errors::ErrorSet;
use crate::field::{FieldId, FormFields};
use crate::rules::RuleSet;

/// Logical state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormPhase {
    /// Values are being edited.
    #[default]
    Editing,
    /// The current values passed validation and were submitted.
    Submitted,
}

/// Immutable copy of the fields taken at a passing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmittedSnapshot {
    fields: FormFields,
}

impl SubmittedSnapshot {
    fn capture(fields: &FormFields) -> Self {
        Self {
            fields: fields.clone(),
        }
    }

    /// The submitted values.
    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Submitted value of `field`.
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        self.fields.get(field)
    }

    /// `(field, value)` pairs to display: every required field, plus the
    /// message only when one was provided.
    pub fn entries(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.fields
            .iter()
            .filter(|(field, value)| *field != FieldId::Message || !value.is_empty())
    }
}

/// Result of [`ContactForm::on_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; carries the new snapshot.
    Accepted(SubmittedSnapshot),
    /// Validation failed; carries every failing field's message.
    Rejected(ErrorSet),
}

impl SubmitOutcome {
    /// Returns `true` for [`SubmitOutcome::Accepted`].
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Contact form session state.
///
/// `errors` is always `rules` evaluated over `fields`, restricted to the
/// fields in `validated`. A field enters `validated` when it is changed, and
/// every field enters it on the first submit attempt.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactForm {
    fields: FormFields,
    errors: ErrorSet,
    validated: BTreeSet<FieldId>,
    snapshot: Option<SubmittedSnapshot>,
    phase: FormPhase,
    submit_count: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    rules: RuleSet,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    /// A freshly mounted, empty form with the contact rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(RuleSet::contact())
    }

    /// An empty form with a custom rule set.
    #[must_use]
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            fields: FormFields::new(),
            errors: ErrorSet::new(),
            validated: BTreeSet::new(),
            snapshot: None,
            phase: FormPhase::Editing,
            submit_count: 0,
            rules,
        }
    }

    /// A form pre-filled with `fields`. No field counts as changed, so no
    /// errors show until an edit or a submit.
    #[must_use]
    pub fn with_fields(fields: FormFields) -> Self {
        Self {
            fields,
            ..Self::new()
        }
    }

    /// Return to the freshly mounted state, keeping the rule set.
    pub fn reset(&mut self) {
        let rules = std::mem::replace(&mut self.rules, RuleSet::empty());
        *self = Self::with_rules(rules);
    }

    /// Set `field` to `value` and revalidate.
    ///
    /// Only fields that have been changed (or everything, after a submit
    /// attempt) are validated, so editing one field never surfaces errors on
    /// fields the user has not reached yet. Returns the changed field's
    /// current error.
    pub fn on_field_change(&mut self, field: FieldId, value: impl Into<String>) -> Option<&str> {
        *self.fields.get_mut(field) = value.into();
        self.validated.insert(field);
        self.phase = FormPhase::Editing;
        self.revalidate();
        debug!(
            field = field.name(),
            len = self.fields.get(field).chars().count(),
            failing = self.errors.contains(field),
            "field changed"
        );
        self.errors.get(field)
    }

    /// Validate every field and, if all pass, take a snapshot.
    ///
    /// Field values are left untouched either way.
    pub fn on_submit(&mut self) -> SubmitOutcome {
        self.submit_count = self.submit_count.saturating_add(1);
        self.validated.extend(FieldId::ALL);
        self.revalidate();

        if self.errors.is_empty() {
            let snapshot = SubmittedSnapshot::capture(&self.fields);
            self.snapshot = Some(snapshot.clone());
            self.phase = FormPhase::Submitted;
            info!(attempt = self.submit_count, "submit accepted");
            SubmitOutcome::Accepted(snapshot)
        } else {
            self.phase = FormPhase::Editing;
            info!(
                attempt = self.submit_count,
                errors = self.errors.len(),
                "submit rejected"
            );
            SubmitOutcome::Rejected(self.errors.clone())
        }
    }

    fn revalidate(&mut self) {
        let validated = &self.validated;
        self.errors = self
            .rules
            .evaluate(&self.fields, |field| validated.contains(&field));
    }

    /// Current field values.
    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: FieldId) -> &str {
        self.fields.get(field)
    }

    /// Current errors.
    #[must_use]
    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Current error for `field`.
    #[must_use]
    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(field)
    }

    /// The last accepted submit, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&SubmittedSnapshot> {
        self.snapshot.as_ref()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Returns `true` in [`FormPhase::Submitted`].
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == FormPhase::Submitted
    }

    /// Returns `true` if `field` is subject to validation.
    #[must_use]
    pub fn is_validated(&self, field: FieldId) -> bool {
        self.validated.contains(&field)
    }

    /// Number of submit attempts, passing or not.
    #[must_use]
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// The rule set in use.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EMAIL_ERROR, FIRST_NAME_ERROR, LAST_NAME_ERROR};

    fn filled(form: &mut ContactForm) {
        form.on_field_change(FieldId::FirstName, "Andrew");
        form.on_field_change(FieldId::LastName, "Castillo");
        form.on_field_change(FieldId::Email, "fido@mail.com");
    }

    #[test]
    fn new_form_is_pristine() {
        let form = ContactForm::new();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.errors().is_empty());
        assert!(form.snapshot().is_none());
        assert_eq!(form.submit_count(), 0);
        assert!(!form.is_validated(FieldId::FirstName));
    }

    #[test]
    fn short_first_name_errors_immediately() {
        let mut form = ContactForm::new();
        assert_eq!(
            form.on_field_change(FieldId::FirstName, "abc"),
            Some(FIRST_NAME_ERROR)
        );
        // Untouched fields stay quiet until submit.
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn correcting_a_field_clears_its_error() {
        let mut form = ContactForm::new();
        form.on_field_change(FieldId::FirstName, "abc");
        assert_eq!(form.on_field_change(FieldId::FirstName, "abcde"), None);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn editing_one_field_keeps_other_validated_errors_fresh() {
        let mut form = ContactForm::new();
        form.on_submit();
        assert_eq!(form.errors().len(), 3);
        form.on_field_change(FieldId::LastName, "Castillo");
        assert_eq!(form.errors().messages(), vec![FIRST_NAME_ERROR, EMAIL_ERROR]);
    }

    #[test]
    fn empty_submit_reports_three_errors_in_order() {
        let mut form = ContactForm::new();
        let SubmitOutcome::Rejected(errors) = form.on_submit() else {
            panic!("empty form must be rejected");
        };
        assert_eq!(
            errors.messages(),
            vec![FIRST_NAME_ERROR, LAST_NAME_ERROR, EMAIL_ERROR]
        );
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.snapshot().is_none());
    }

    #[test]
    fn missing_email_is_the_only_error() {
        let mut form = ContactForm::new();
        form.on_field_change(FieldId::FirstName, "Andrew");
        form.on_field_change(FieldId::LastName, "Castillo");
        let outcome = form.on_submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(form.errors().clone()),
            "outcome carries the live error set"
        );
        assert_eq!(form.errors().messages(), vec![EMAIL_ERROR]);
    }

    #[test]
    fn valid_submit_takes_snapshot_and_keeps_values() {
        let mut form = ContactForm::new();
        filled(&mut form);
        let outcome = form.on_submit();
        assert!(outcome.is_accepted());
        assert!(form.is_submitted());
        let snapshot = form.snapshot().expect("snapshot");
        assert_eq!(snapshot.fields(), form.fields());
        assert_eq!(form.value(FieldId::FirstName), "Andrew");
        let shown: Vec<_> = snapshot.entries().map(|(f, _)| f).collect();
        assert_eq!(
            shown,
            vec![FieldId::FirstName, FieldId::LastName, FieldId::Email]
        );
    }

    #[test]
    fn message_is_shown_when_provided() {
        let mut form = ContactForm::new();
        filled(&mut form);
        form.on_field_change(FieldId::Message, "Monkey");
        form.on_submit();
        let snapshot = form.snapshot().expect("snapshot");
        assert_eq!(snapshot.entries().count(), 4);
        assert_eq!(snapshot.get(FieldId::Message), "Monkey");
    }

    #[test]
    fn edit_after_submit_returns_to_editing_and_keeps_snapshot() {
        let mut form = ContactForm::new();
        filled(&mut form);
        form.on_submit();
        form.on_field_change(FieldId::FirstName, "Bob");
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.error(FieldId::FirstName), Some(FIRST_NAME_ERROR));
        assert_eq!(
            form.snapshot().map(|s| s.get(FieldId::FirstName)),
            Some("Andrew")
        );
    }

    #[test]
    fn rejected_submit_keeps_previous_snapshot() {
        let mut form = ContactForm::new();
        filled(&mut form);
        form.on_submit();
        form.on_field_change(FieldId::Email, "fido");
        assert!(!form.on_submit().is_accepted());
        assert_eq!(
            form.snapshot().map(|s| s.get(FieldId::Email)),
            Some("fido@mail.com")
        );
        assert_eq!(form.submit_count(), 2);
    }

    #[test]
    fn next_passing_submit_replaces_snapshot() {
        let mut form = ContactForm::new();
        filled(&mut form);
        form.on_submit();
        form.on_field_change(FieldId::FirstName, "Andrea");
        form.on_submit();
        assert_eq!(
            form.snapshot().map(|s| s.get(FieldId::FirstName)),
            Some("Andrea")
        );
    }

    #[test]
    fn prefilled_form_shows_no_errors_until_submit() {
        let fields = FormFields::new().with(FieldId::FirstName, "abc");
        let mut form = ContactForm::with_fields(fields);
        assert!(form.errors().is_empty());
        form.on_submit();
        assert_eq!(form.errors().len(), 3);
    }

    #[test]
    fn reset_restores_mount_state() {
        let mut form = ContactForm::new();
        filled(&mut form);
        form.on_submit();
        form.reset();
        assert_eq!(form.fields(), &FormFields::new());
        assert!(form.snapshot().is_none());
        assert_eq!(form.submit_count(), 0);
        // Rules survive the reset.
        assert!(!form.on_submit().is_accepted());
    }
}
