use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use anyhow::{bail, Result};
use portal_core::{update, AppState, AppViewModel, Msg, Page, PageStatus, ServiceHealth};
use portal_logging::{portal_info, portal_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::UserCommand;

/// Everything the app loop reacts to: user lines and engine completions.
pub enum LoopEvent {
    Core(Msg),
    Help,
    Unknown(String),
    Quit,
}

/// A single request issued from the command line.
pub enum OneShot {
    Search(String),
    Upload(String),
    Health,
}

impl OneShot {
    fn messages(self) -> Vec<Msg> {
        match self {
            OneShot::Search(query) => vec![Msg::SearchInputChanged(query), Msg::SearchSubmitted],
            OneShot::Upload(location) => {
                vec![Msg::UploadInputChanged(location), Msg::UploadSubmitted]
            }
            OneShot::Health => vec![Msg::HealthCheckRequested],
        }
    }
}

pub fn run_interactive(config: &AppConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(config.portal_settings(), tx.clone())?;

    print_lines(&ui::layout::banner(config));
    spawn_input_reader(tx);

    let mut state = AppState::new();
    while let Ok(event) = rx.recv() {
        match event {
            LoopEvent::Core(msg) => state = dispatch(state, msg, &runner, true),
            LoopEvent::Help => print_lines(&ui::layout::help_lines()),
            LoopEvent::Unknown(word) => {
                println!("Unknown command {word:?}; type `help` for the list.")
            }
            LoopEvent::Quit => break,
        }
    }

    portal_info!("Interactive session ended");
    Ok(())
}

/// Runs one request to completion and prints the resulting page.
///
/// Returns whether the request succeeded.
pub fn run_once(config: &AppConfig, request: OneShot) -> Result<bool> {
    let (tx, rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(config.portal_settings(), tx)?;
    let deadline = config.response_deadline();

    let mut state = AppState::new();
    for msg in request.messages() {
        state = dispatch(state, msg, &runner, false);
    }

    while state.is_busy() {
        match rx.recv_timeout(deadline) {
            Ok(LoopEvent::Core(msg)) => state = dispatch(state, msg, &runner, false),
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => bail!("no response within {:?}", deadline),
            Err(RecvTimeoutError::Disconnected) => bail!("request engine stopped unexpectedly"),
        }
    }

    let view = state.view();
    print_lines(&ui::render::render(&view));
    Ok(succeeded(&view))
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner, echo: bool) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() && echo {
        print_lines(&ui::render::render(&state.view()));
    }
    state
}

fn succeeded(view: &AppViewModel) -> bool {
    match view.focus {
        Page::Search => view.search.status == PageStatus::Success,
        Page::Upload => view.upload.status == PageStatus::Success,
        Page::Health => view
            .health
            .iter()
            .all(|row| matches!(row.health, ServiceHealth::Up { .. })),
    }
}

fn spawn_input_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print_prompt();
            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    portal_warn!("Failed to read from stdin: {}", err);
                    break;
                }
                None => break,
            };

            let event = match ui::input::parse_line(&line) {
                UserCommand::Submit(msgs) => {
                    for msg in msgs {
                        if tx.send(LoopEvent::Core(msg)).is_err() {
                            return;
                        }
                    }
                    continue;
                }
                UserCommand::Empty => continue,
                UserCommand::Quit => break,
                UserCommand::Help => LoopEvent::Help,
                UserCommand::Unknown(word) => LoopEvent::Unknown(word),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(LoopEvent::Quit);
    });
}

fn print_prompt() {
    let mut stdout = io::stdout().lock();
    let _ = write!(stdout, "{}", ui::constants::PROMPT);
    let _ = stdout.flush();
}

fn print_lines(lines: &[String]) {
    let mut stdout = io::stdout().lock();
    for line in lines {
        let _ = writeln!(stdout, "{line}");
    }
}
