use crate::command::{Action, Command, CommandInner};
use crate::event::TerminalEvent;
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        EventStream,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Output target for the terminal UI.
///
/// By default the TUI renders to **stdout**. When stdout is piped (e.g. the
/// program prints the chosen value for a shell script), switch to
/// [`Stderr`](OutputTarget::Stderr) so the UI still reaches the terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout (default).
    #[default]
    Stdout,
    /// Write to stderr.
    Stderr,
}

impl OutputTarget {
    fn writer(self) -> Box<dyn Write + Send> {
        match self {
            OutputTarget::Stdout => Box::new(io::stdout()),
            OutputTarget::Stderr => Box::new(io::stderr()),
        }
    }
}

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, event reading, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A global logger was already installed when `log_file` asked for one.
    #[error("could not install file logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only the options you need:
///
/// ```rust,ignore
/// use taro_core::{ProgramOptions, OutputTarget};
///
/// let opts = ProgramOptions {
///     title: Some("Pick a country".into()),
///     log_file: Some("select.log".into()),
///     output: OutputTarget::Stderr,
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Target frames per second (default: 60, clamped to 1..=120).
    pub fps: u32,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Capture mouse events (default: true). Click-to-open and
    /// click-outside-to-close need it.
    pub mouse_capture: bool,
    /// Enable bracketed paste (default: true).
    pub bracketed_paste: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Whether to restore the terminal from a panic hook (default: true).
    pub catch_panics: bool,
    /// Whether ctrl-c signals end the program (default: true).
    pub handle_signals: bool,
    /// Install a file logger writing here. A TUI owns the screen, so logs
    /// cannot go to stdout.
    pub log_file: Option<PathBuf>,
    /// Maximum level written to `log_file` (default: `Debug`).
    pub log_level: log::LevelFilter,
    /// Output target: stdout (default) or stderr.
    pub output: OutputTarget,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
            log_level: log::LevelFilter::Debug,
            output: OutputTarget::default(),
        }
    }
}

/// The program runtime. Manages terminal setup, the event loop, document
/// listeners, and the full [`Model`] lifecycle.
///
/// Every terminal event is offered to the listeners the model currently
/// declares; after every update the declared set is reconciled, and on exit
/// every listener is released before the terminal is restored.
///
/// ```rust,ignore
/// use taro_core::{Program, ProgramError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let model = Program::<Picker>::new(())?.run().await?;
///     println!("{:?}", model.choice());
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Box<dyn Write + Send>>>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    listeners: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    /// Create a new program with default options.
    ///
    /// Returns an error if terminal initialization fails.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    ///
    /// Returns an error if the log file cannot be opened or the terminal
    /// cannot be initialized.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(ref path) = options.log_file {
            init_file_logger(path, options.log_level)?;
        }

        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;

        let mut program = Self {
            model,
            terminal,
            msg_tx,
            msg_rx,
            listeners: SubscriptionManager::new(),
            options,
            needs_redraw: true,
            should_quit: false,
        };
        log::info!("program initialized");

        program.execute_command(init_cmd);
        program.listeners.reconcile(program.model.subscriptions());

        Ok(program)
    }

    /// Get a sender for injecting messages from outside the event loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<M::Message> {
        self.msg_tx.clone()
    }

    /// Run the program until the model quits, returning the final model.
    ///
    /// Listeners are released and the terminal is restored on every exit
    /// path, including event-loop errors.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;

        log::info!("shutting down");
        self.listeners.shutdown();
        restore_terminal(&self.options)?;

        result?;
        Ok(self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval =
            tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle_signals = self.options.handle_signals;
        let mut events = EventStream::new();

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    log::info!("received ctrl+c signal");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.process_message(msg);

                    // Micro-batch: drain additional messages within 100μs, up to 100 messages
                    let deadline = Instant::now() + Duration::from_micros(100);
                    let mut batch_count = 0u32;
                    while Instant::now() < deadline && batch_count < 100 {
                        match self.msg_rx.try_recv() {
                            Ok(msg) => {
                                self.process_message(msg);
                                batch_count += 1;
                            }
                            Err(_) => break,
                        }
                    }
                }

                event = events.next() => match event {
                    Some(Ok(event)) => self.dispatch_event(TerminalEvent::from(event)),
                    Some(Err(err)) => return Err(err.into()),
                    None => {
                        log::warn!("terminal event stream ended");
                        return Ok(());
                    }
                },

                _ = frame_interval.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Offer `event` to the registered listeners, then apply the messages
    /// they produced in registration order.
    ///
    /// The listener set is snapshotted before any message is applied, so a
    /// listener released by an earlier message still sees this event.
    fn dispatch_event(&mut self, event: TerminalEvent) {
        if let TerminalEvent::Resize(..) = event {
            self.needs_redraw = true;
        }
        for msg in self.listeners.dispatch(&event) {
            self.process_message(msg);
        }
    }

    fn process_message(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_command(cmd);
        self.listeners.reconcile(self.model.subscriptions());
        self.needs_redraw = true;
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.should_quit = true;
            }
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = fut.await;
                    let _ = tx.send(msg);
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| {
            self.model.view(frame);
        })?;
        Ok(())
    }
}

fn init_terminal(
    options: &ProgramOptions,
) -> Result<Terminal<CrosstermBackend<Box<dyn Write + Send>>>, ProgramError> {
    // Install panic hook that restores terminal (only once to avoid stacking)
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        let output = options.output;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen, output);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = options.output.writer();

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(writer, EnableBracketedPaste)?;
    }
    if options.mouse_capture {
        execute!(writer, EnableMouseCapture)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    let backend = CrosstermBackend::new(writer);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen, options.output)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool, output: OutputTarget) -> Result<(), io::Error> {
    // Best effort: keep restoring even if individual steps fail.
    let raw = disable_raw_mode();
    let mut writer = output.writer();
    execute!(writer, DisableBracketedPaste).ok();
    execute!(writer, DisableMouseCapture).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}

/// Install a global [`simplelog::WriteLogger`] appending to `path`.
///
/// [`ProgramOptions::log_file`] calls this for you; use it directly when the
/// program needs logging before the terminal is set up.
///
/// ```no_run
/// use taro_core::runtime::init_file_logger;
///
/// init_file_logger("select.log", log::LevelFilter::Trace).unwrap();
/// log::debug!("logging to file");
/// ```
pub fn init_file_logger(
    path: impl AsRef<Path>,
    level: log::LevelFilter,
) -> Result<(), ProgramError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    simplelog::WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_capture_mouse() {
        let opts = ProgramOptions::default();
        assert!(opts.mouse_capture);
        assert!(opts.alt_screen);
        assert_eq!(opts.fps, 60);
        assert!(opts.log_file.is_none());
        assert_eq!(opts.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn io_errors_convert_into_program_error() {
        let err: ProgramError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, ProgramError::Io(_)));
        assert_eq!(err.to_string(), "IO error: boom");
    }

    #[test]
    fn file_logger_reports_unopenable_path() {
        let dir = std::env::temp_dir().join("taro-missing-dir-for-logger-test");
        let _ = std::fs::remove_dir_all(&dir);
        let result = init_file_logger(dir.join("nested").join("x.log"), log::LevelFilter::Info);
        assert!(matches!(result, Err(ProgramError::Io(_))));
    }
}
