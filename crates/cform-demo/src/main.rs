#![forbid(unsafe_code)]

//! Contact form demo binary entry point.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use cform::Program;
use cform_demo::app::ContactApp;
use cform_demo::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let opts = cli::Opts::parse();

    if let Some(path) = &opts.log_file
        && let Err(e) = init_tracing(path)
    {
        eprintln!("Failed to open log file {}: {e}", path.display());
        std::process::exit(1);
    }

    match run(&opts) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(opts: &cli::Opts) -> cform::Result<()> {
    let mut program = Program::with_config(ContactApp::new(), opts.program_config())
        .map_err(|e| cform::Error::Terminal(format!("Failed to initialize: {e}")))?;
    program.run()?;
    tracing::info!(
        submits = program.model().editor().form().submit_count(),
        "session finished"
    );
    Ok(())
}

/// Send tracing output to `path`. Without a log file no subscriber is
/// installed and events are dropped, since the terminal belongs to the UI.
fn init_tracing(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}
