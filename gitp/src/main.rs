//! gitp: interactive terminal browser for the commit history of one branch.
//!
//! Entry point for the `gitp` binary. The whole history is walked before the
//! terminal is touched, so a missing repository or branch is reported on a
//! normal screen and no "loading" state exists.
//!
//! # Startup sequence
//!
//! 1. Parse the command line; usage errors exit with status 1.
//! 2. Initialise `tracing` (stderr at `warn`, or `--log-file`).
//! 3. Load the optional TOML config.
//! 4. Walk the branch with `gitp_core::history::HistoryWalker`.
//! 5. `install_panic_hook()`, then `sigterm_flag()`, then
//!    `TerminalSession::start()`.
//! 6. Run the event loop, then finish the session. Dropping it on an early
//!    return restores the terminal as well.

mod app;
mod cli;
mod config;
mod event;
mod logging;
mod tui;
mod ui;

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use gitp_core::browser::Transition;
use gitp_core::history::HistoryWalker;
use tracing::{error, info};

use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;
use crate::event::AppEvent;
use crate::tui::TerminalSession;

/// How often the loop wakes up to poll the SIGTERM flag when idle.
const HEARTBEAT: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures.
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("gitp: {e:#}");
        return ExitCode::FAILURE;
    }
    let record_failures = logging::records_failures(cli.log_file.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if record_failures {
                error!(error = %format!("{e:#}"), "gitp failed");
            }
            eprintln!("gitp: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref());

    let walker = HistoryWalker::open(&cli.repo)?;
    let commits = walker
        .walk(&cli.branch)
        .with_context(|| format!("cannot read history of branch '{}'", cli.branch))?;
    info!(commits = commits.len(), "history loaded");
    let mut app = App::new(commits, &config);

    tui::install_panic_hook();
    let term_flag = tui::sigterm_flag().context("cannot register SIGTERM handler")?;

    let mut session = TerminalSession::start().context("cannot initialise terminal")?;
    let outcome = event_loop(session.terminal(), &mut app, &term_flag).await;
    let restored = session.finish().context("cannot restore terminal");
    outcome?;
    restored
}

/// Drives the session until the user quits, the input stream closes, or
/// SIGTERM arrives.
///
/// Exits only by returning; the caller finishes the terminal session.
async fn event_loop(terminal: &mut tui::Tui, app: &mut App, term_flag: &AtomicBool) -> anyhow::Result<()> {
    let size = terminal.size()?;
    app.handle_event(AppEvent::Resize(size.width, size.height));
    terminal.draw(|frame| ui::render(frame, app))?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    loop {
        tokio::select! {
            _ = tokio::time::sleep(HEARTBEAT) => {
                if term_flag.load(Ordering::Relaxed) {
                    info!("SIGTERM received");
                    return Ok(());
                }
            }
            maybe_event = rx.recv() => {
                let event = maybe_event.unwrap_or(AppEvent::Quit);
                if app.handle_event(event) == Transition::Quit {
                    return Ok(());
                }
                terminal.draw(|frame| ui::render(frame, app))?;
                if term_flag.load(Ordering::Relaxed) {
                    return Ok(());
                }
            }
        }
    }
}
