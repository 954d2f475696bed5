#![forbid(unsafe_code)]

//! Terminal contact form demo: CLI options and the application model.

pub mod app;
pub mod cli;
