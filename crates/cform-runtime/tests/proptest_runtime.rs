//! Property tests for command execution and frame painting.

use cform_core::event::{Event, KeyCode};
use cform_core::frame::{Frame, Line, LineStyle};
use cform_runtime::{Cmd, CmdRecord, Model, ProgramSimulator, paint_frame};
use proptest::prelude::*;

struct Tally {
    total: u32,
}

enum TallyMsg {
    Add(u32),
    Fan(Vec<u32>),
    Stop,
}

impl From<Event> for TallyMsg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(k) if k.code == KeyCode::Escape => TallyMsg::Stop,
            _ => TallyMsg::Add(1),
        }
    }
}

impl Model for Tally {
    type Message = TallyMsg;

    fn update(&mut self, msg: TallyMsg) -> Cmd<TallyMsg> {
        match msg {
            TallyMsg::Add(n) => {
                self.total += n;
                Cmd::none()
            }
            TallyMsg::Fan(parts) => {
                Cmd::batch(parts.into_iter().map(|n| Cmd::msg(TallyMsg::Add(n))).collect())
            }
            TallyMsg::Stop => Cmd::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        frame.push(Line::plain(format!("total {}", self.total)));
    }
}

proptest! {
    #[test]
    fn batched_messages_all_reach_update(parts in prop::collection::vec(0u32..1000, 0..20)) {
        let mut sim = ProgramSimulator::new(Tally { total: 0 });
        let expected: u32 = parts.iter().sum();
        sim.send(TallyMsg::Fan(parts));
        prop_assert_eq!(sim.model().total, expected);
        prop_assert!(sim.is_running());
    }

    #[test]
    fn nothing_after_quit_is_applied(before in 0usize..10, after in 0usize..10) {
        let mut events = vec![Event::Tick; before];
        events.push(Event::key(KeyCode::Escape));
        events.extend(std::iter::repeat_n(Event::Tick, after));

        let mut sim = ProgramSimulator::new(Tally { total: 0 });
        sim.inject_events(&events);
        prop_assert_eq!(sim.model().total as usize, before);
        prop_assert!(!sim.is_running());
        prop_assert_eq!(sim.command_log().last(), Some(&CmdRecord::Quit));
    }

    #[test]
    fn painting_skips_rows_below_the_frame(height in 1u16..6, rows in 0usize..12) {
        let mut frame = Frame::new(40, height);
        for i in 0..rows {
            frame.push(Line::styled(format!("row-{i:02}"), LineStyle::Label));
        }
        let mut out = Vec::new();
        paint_frame(&mut out, &frame).unwrap();
        let written = String::from_utf8_lossy(&out);
        for i in 0..rows {
            let needle = format!("row-{i:02}");
            prop_assert_eq!(written.contains(&needle), i < usize::from(height));
        }
    }
}
