use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use pdfchat_core::{update, ChatState, Msg};
use pdfchat_logging::{chat_debug, chat_info};

use super::config::ClientConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::constants::{BUSY_NOTICE, HELP_TEXT, NOTHING_TO_CLEAR_NOTICE, PROMPT};
use super::ui::input::{parse_line, Command};
use super::ui::render::{header, Renderer};

/// Everything the UI loop reacts to.
pub enum AppEvent {
    /// A line typed at the prompt.
    Line(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message produced by the engine.
    Msg(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let config = ClientConfig::load(std::env::args_os().nth(1).map(PathBuf::from))?;
    logging::initialize(
        config.log_destination,
        config.level_filter(),
        &config.log_file,
    );
    chat_info!("Starting pdfchat against {}", config.backend_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.backend_settings(), event_tx.clone())
        .with_context(|| format!("connecting to backend at {}", config.backend_url))?;
    spawn_stdin_reader(event_tx);

    let mut app = ChatApp::new(runner, io::stdout());
    app.start()?;
    while let Ok(event) = event_rx.recv() {
        let keep_running = match event {
            AppEvent::Line(line) => app.handle_line(&line)?,
            AppEvent::Msg(msg) => {
                app.dispatch_msg(msg)?;
                true
            }
            AppEvent::InputClosed => false,
        };
        if !keep_running {
            break;
        }
    }
    chat_info!("Exiting");
    Ok(())
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

/// Owns the chat state and is the only place it is mutated.
struct ChatApp<W: Write> {
    state: ChatState,
    runner: EffectRunner,
    renderer: Renderer,
    out: W,
}

impl<W: Write> ChatApp<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: ChatState::new(),
            runner,
            renderer: Renderer::new(),
            out,
        }
    }

    fn start(&mut self) -> io::Result<()> {
        let view = self.state.view();
        write!(self.out, "{}", header(&view))?;
        self.renderer.render(&view);
        self.prompt()
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let view = self.state.view();
        match parse_line(line) {
            Command::Quit => return Ok(false),
            Command::Help => writeln!(self.out, "{HELP_TEXT}")?,
            Command::Invalid(reason) => writeln!(self.out, "{reason}")?,
            Command::Upload(path) if view.upload_enabled => {
                if self.dispatch_msg(Msg::FileChosen { path })? {
                    return Ok(true);
                }
            }
            Command::Ask(text) if view.input_enabled => {
                self.dispatch_msg(Msg::InputChanged(text))?;
                if self.dispatch_msg(Msg::QuestionSubmitted)? {
                    return Ok(true);
                }
            }
            Command::Upload(_) | Command::Ask(_) => {
                writeln!(self.out, "{BUSY_NOTICE}")?
            }
            Command::Clear if view.clear_available => {
                if self.dispatch_msg(Msg::ClearClicked)? {
                    return Ok(true);
                }
            }
            Command::Clear => writeln!(self.out, "{NOTHING_TO_CLEAR_NOTICE}")?,
        }
        self.prompt()?;
        Ok(true)
    }

    /// Returns whether anything was printed (and the prompt redrawn).
    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<bool> {
        chat_debug!("Dispatching {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);

        if was_dirty {
            let output = self.renderer.render(&self.state.view());
            if !output.is_empty() {
                write!(self.out, "\n{output}")?;
                self.prompt()?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }
}
