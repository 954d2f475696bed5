#![forbid(unsafe_code)]

//! Command-line argument parsing for the contact form demo.
//!
//! Parses args manually. Supports environment variable overrides via the
//! `CFORM_DEMO_*` prefix; explicit flags win over the environment.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use cform::ProgramConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Contact Form Demo

USAGE:
    cform-demo [OPTIONS]

OPTIONS:
    --inline             Draw in the main screen instead of the alternate screen
    --exit-after-ms=N    Auto-quit after N milliseconds (0 = never)
    --log-file=PATH      Write tracing output to PATH
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab / Down           Next input
    Shift-Tab / Up       Previous input
    Enter                Submit
    Esc / Ctrl+C         Quit

ENVIRONMENT VARIABLES:
    CFORM_DEMO_INLINE          Override --inline (1|true|yes / 0|false|no)
    CFORM_DEMO_EXIT_AFTER_MS   Override --exit-after-ms
    CFORM_DEMO_LOG_FILE        Override --log-file
    RUST_LOG                   Tracing filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Opts {
    /// Stay on the main screen.
    pub inline: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Tracing output file. Logs are discarded when unset.
    pub log_file: Option<PathBuf>,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Opts),
    Help,
    Version,
}

/// A command line that cannot be acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A flag was given a value it cannot take.
    InvalidValue { flag: &'static str, value: String },
    /// An argument no flag matches.
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version` or a bad command line.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Invocation::Run(opts)) => opts,
            Ok(Invocation::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Invocation::Version) => {
                println!("cform-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with `env` as the variable lookup.
    ///
    /// Unparseable environment values are ignored; unparseable flags are
    /// errors.
    pub fn parse_from<S, F>(args: &[S], env: F) -> Result<Invocation, CliError>
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = env("CFORM_DEMO_INLINE")
            && let Some(flag) = parse_bool(&val)
        {
            opts.inline = flag;
        }
        if let Some(val) = env("CFORM_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.trim().parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env("CFORM_DEMO_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Invocation::Help),
                "--version" | "-V" => return Ok(Invocation::Version),
                "--inline" => opts.inline = true,
                other => {
                    if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val.parse().map_err(|_| CliError::InvalidValue {
                            flag: "--exit-after-ms",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        if val.is_empty() {
                            return Err(CliError::InvalidValue {
                                flag: "--log-file",
                                value: String::new(),
                            });
                        }
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Invocation::Run(opts))
    }

    /// Runtime configuration for these options.
    pub fn program_config(&self) -> ProgramConfig {
        ProgramConfig {
            alternate_screen: !self.inline,
            exit_after: (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms)),
            ..ProgramConfig::default()
        }
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
