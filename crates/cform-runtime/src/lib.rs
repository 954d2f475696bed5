#![forbid(unsafe_code)]

//! Runtime: the update/view loop, terminal session, and a deterministic
//! simulator for tests.

pub mod program;
pub mod simulator;
pub mod terminal_session;

pub use program::{Cmd, Model, Program, ProgramConfig, paint_frame};
pub use simulator::{CmdRecord, ProgramSimulator};
pub use terminal_session::{SessionOptions, TerminalSession};
