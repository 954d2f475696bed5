//! Property tests for the contact form state machine.
//!
//! Invariants:
//!
//! 1. The error set always equals the rule set evaluated over the current
//!    values, restricted to validated fields.
//! 2. Errors iterate in field order and never mention the message field.
//! 3. A submit is accepted exactly when every rule passes, and then the
//!    snapshot equals the current values.

use cform_form::{
    ContactForm, EMAIL_ERROR, FIRST_NAME_ERROR, FieldId, FormPhase, LAST_NAME_ERROR, RuleSet,
    SubmitOutcome,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Change(FieldId, String),
    Submit,
}

fn field() -> impl Strategy<Value = FieldId> {
    prop_oneof![
        Just(FieldId::FirstName),
        Just(FieldId::LastName),
        Just(FieldId::Email),
        Just(FieldId::Message),
    ]
}

fn value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z ]{0,8}",
        "[a-z]{1,6}@[a-z]{1,6}\\.[a-z]{2,4}",
        "\\PC{0,10}",
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (field(), value()).prop_map(|(f, v)| Op::Change(f, v)),
        1 => Just(Op::Submit),
    ]
}

proptest! {
    #[test]
    fn error_set_is_pure_function_of_state(ops in proptest::collection::vec(op(), 0..30)) {
        let rules = RuleSet::contact();
        let mut form = ContactForm::new();
        for op in ops {
            match op {
                Op::Change(f, v) => {
                    form.on_field_change(f, v);
                }
                Op::Submit => {
                    let outcome = form.on_submit();
                    let all = rules.evaluate_all(form.fields());
                    prop_assert_eq!(outcome.is_accepted(), all.is_empty());
                    if let SubmitOutcome::Accepted(snapshot) = outcome {
                        prop_assert_eq!(snapshot.fields(), form.fields());
                        prop_assert_eq!(form.phase(), FormPhase::Submitted);
                    }
                }
            }
            let expected = rules.evaluate(form.fields(), |f| form.is_validated(f));
            prop_assert_eq!(form.errors(), &expected);

            let order: Vec<_> = form.errors().iter().map(|(f, _)| f).collect();
            let mut sorted = order.clone();
            sorted.sort();
            prop_assert_eq!(order, sorted);
            prop_assert!(!form.errors().contains(FieldId::Message));
        }
    }

    #[test]
    fn short_first_name_always_errors(name in "\\PC{0,4}") {
        let mut form = ContactForm::new();
        prop_assume!(name.chars().count() < 5);
        prop_assert_eq!(form.on_field_change(FieldId::FirstName, name), Some(FIRST_NAME_ERROR));
    }

    #[test]
    fn empty_last_name_errors_on_submit(first in "[A-Za-z]{5,10}") {
        let mut form = ContactForm::new();
        form.on_field_change(FieldId::FirstName, first);
        form.on_field_change(FieldId::Email, "fido@mail.com");
        prop_assert_eq!(
            form.on_submit(),
            SubmitOutcome::Rejected(form.errors().clone())
        );
        prop_assert_eq!(form.errors().messages(), vec![LAST_NAME_ERROR]);
    }

    #[test]
    fn email_without_at_errors_on_submit(email in "[a-z.]{1,12}") {
        let mut form = ContactForm::new();
        form.on_field_change(FieldId::FirstName, "Andrew");
        form.on_field_change(FieldId::LastName, "Castillo");
        form.on_field_change(FieldId::Email, email);
        prop_assert!(!form.on_submit().is_accepted());
        prop_assert_eq!(form.errors().messages(), vec![EMAIL_ERROR]);
    }
}
