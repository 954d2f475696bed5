//! Property tests: arbitrary key sequences through the app model.

use cform::form::RuleSet;
use cform::{Event, KeyCode, ProgramSimulator};
use cform_demo::app::ContactApp;
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        6 => prop::sample::select(vec!['a', 'Z', '@', '.', ' ', '3', 'é']).prop_map(KeyCode::Char),
        1 => Just(KeyCode::Tab),
        1 => Just(KeyCode::BackTab),
        1 => Just(KeyCode::Backspace),
        1 => Just(KeyCode::Delete),
        1 => Just(KeyCode::Left),
        1 => Just(KeyCode::Home),
        1 => Just(KeyCode::Enter),
    ]
}

proptest! {
    #[test]
    fn error_set_always_matches_current_values(keys in prop::collection::vec(key_strategy(), 0..60)) {
        let mut sim = ProgramSimulator::new(ContactApp::new());
        sim.init();
        let rules = RuleSet::contact();
        for code in keys {
            sim.inject_event(Event::key(code));
            let editor = sim.model().editor();
            let form = editor.form();
            let expected = rules.evaluate(form.fields(), |f| form.is_validated(f));
            prop_assert_eq!(form.errors(), &expected);
            if let Some(field) = editor.focus().field() {
                prop_assert!(editor.cursor() <= form.value(field).chars().count());
            }
        }
        prop_assert!(sim.is_running());
    }
}
