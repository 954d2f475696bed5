#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! A [`Model`] owns all application state. The runtime reads terminal
//! events, converts each into the model's message type, calls
//! [`Model::update`], executes the returned [`Cmd`], and redraws by calling
//! [`Model::view`] into a fresh [`Frame`]. Every event is processed to
//! completion before the next one is read.
//!
//! ```ignore
//! use cform_core::event::Event;
//! use cform_core::frame::{Frame, Line};
//! use cform_runtime::{Cmd, Model};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             _ => Msg::Increment,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Increment => {
//!                 self.count += 1;
//!                 Cmd::none()
//!             }
//!             Msg::Quit => Cmd::quit(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         frame.push(Line::plain(format!("count: {}", self.count)));
//!     }
//! }
//! ```

use std::io::{self, Write};
use std::time::{Duration, Instant};

use cform_core::event::Event;
use cform_core::frame::{Frame, LineStyle};
use cform_core::{debug, info};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use crate::terminal_session::{SessionOptions, TerminalSession};

/// Application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Messages represent actions that update the model state and must be
    /// convertible from terminal events.
    type Message: From<Event>;

    /// Called once when the program starts.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);
}

/// Side effects returned from `init` and `update`.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Quit the application.
    Quit,
    /// Execute commands in order.
    Batch(Vec<Cmd<M>>),
    /// Send a message to the model.
    Msg(M),
    /// Record a log line. The UI owns stdout, so the runtime forwards it to
    /// tracing; the simulator keeps it for inspection.
    Log(String),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a log command.
    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Create a batch of commands. Empty and single-element batches collapse.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds = cmds;
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }

    /// Stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Log(_) => "Log",
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramConfig {
    /// Use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Enable bracketed paste.
    pub bracketed_paste: bool,
    /// Input poll timeout. Bounds how late `exit_after` can fire.
    pub poll_timeout: Duration,
    /// Quit automatically after this long.
    pub exit_after: Option<Duration>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            bracketed_paste: true,
            poll_timeout: Duration::from_millis(100),
            exit_after: None,
        }
    }
}

impl ProgramConfig {
    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            alternate_screen: self.alternate_screen,
            bracketed_paste: self.bracketed_paste,
        }
    }
}

/// The terminal event loop.
pub struct Program<M: Model> {
    model: M,
    session: TerminalSession,
    config: ProgramConfig,
    width: u16,
    height: u16,
    running: bool,
    dirty: bool,
}

impl<M: Model> Program<M> {
    /// Start a program with the default configuration.
    pub fn new(model: M) -> io::Result<Self> {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Start a program, taking over the terminal.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::new(config.session_options())?;
        let (width, height) = session.size()?;
        Ok(Self {
            model,
            session,
            config,
            width,
            height,
            running: true,
            dirty: true,
        })
    }

    /// Run until the model quits or `exit_after` elapses.
    pub fn run(&mut self) -> io::Result<()> {
        let started = Instant::now();
        info!(width = self.width, height = self.height, "program started");

        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.render_frame()?;

        while self.running {
            if let Some(limit) = self.config.exit_after
                && started.elapsed() >= limit
            {
                info!("exit-after deadline reached");
                break;
            }

            if self.session.poll_event(self.config.poll_timeout)? {
                // Drain everything that is already queued before redrawing.
                loop {
                    if let Some(event) = self.session.read_event()? {
                        self.handle_event(event);
                    }
                    if !self.running || !self.session.poll_event(Duration::ZERO)? {
                        break;
                    }
                }
            }

            if self.running && self.dirty {
                self.render_frame()?;
            }
        }

        info!(
            elapsed_ms = millis_saturating(started.elapsed()),
            "program stopped"
        );
        Ok(())
    }

    /// The application model.
    pub fn model(&self) -> &M {
        &self.model
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            self.width = width;
            self.height = height;
        }
        let msg = M::Message::from(event);
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
        self.dirty = true;
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        debug!(cmd = cmd.type_name(), "execute");
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            Cmd::Log(line) => {
                info!(target: "cform::log", "{line}");
            }
        }
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let mut frame = Frame::new(self.width, self.height);
        self.model.view(&mut frame);
        let mut stdout = io::stdout().lock();
        paint_frame(&mut stdout, &frame)?;
        self.dirty = false;
        Ok(())
    }
}

/// Paint `frame` onto a terminal writer: clear, draw the visible lines,
/// then show the cursor where the frame asks for it (or hide it).
pub fn paint_frame<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    queue!(out, cursor::Hide, terminal::Clear(terminal::ClearType::All))?;
    for (row, (style, text)) in frame.visible_lines().enumerate() {
        let y = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(out, cursor::MoveTo(0, y))?;
        let (color, attribute) = style_for(style);
        if let Some(color) = color {
            queue!(out, SetForegroundColor(color))?;
        }
        if let Some(attribute) = attribute {
            queue!(out, SetAttribute(attribute))?;
        }
        queue!(
            out,
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
    }
    if let Some((x, y)) = frame.cursor() {
        queue!(out, cursor::MoveTo(x, y), cursor::Show)?;
    }
    out.flush()
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn millis_saturating(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn style_for(style: LineStyle) -> (Option<Color>, Option<Attribute>) {
    match style {
        LineStyle::Plain | LineStyle::Input => (None, None),
        LineStyle::Heading => (Some(Color::Cyan), Some(Attribute::Bold)),
        LineStyle::Label => (None, Some(Attribute::Bold)),
        LineStyle::FocusedInput => (Some(Color::Yellow), None),
        LineStyle::Error => (Some(Color::Red), None),
        LineStyle::Button => (None, None),
        LineStyle::FocusedButton => (Some(Color::Yellow), Some(Attribute::Reverse)),
        LineStyle::Summary => (Some(Color::Green), None),
        LineStyle::Hint => (Some(Color::DarkGrey), Some(Attribute::Dim)),
    }
}
