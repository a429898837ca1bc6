//! Terminal session for gitp.
//!
//! [`TerminalSession`] owns the ratatui terminal while the browser is on
//! screen. Starting one enters the alternate screen in raw mode with mouse
//! capture; [`TerminalSession::finish`] or `Drop` leaves it again. The panic
//! hook leaves on its own, because the panic message must land on the normal
//! screen before unwinding reaches the session.

use std::io::{self, stdout, BufWriter, Stdout};
use std::panic;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use tracing::debug;

/// Crossterm backend over buffered stdout, so each frame is a few large writes.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// The terminal, switched into browsing mode until finished or dropped.
pub struct TerminalSession {
    terminal: Tui,
    active: bool,
}

impl TerminalSession {
    /// Enters raw mode, the alternate screen and mouse capture.
    ///
    /// A failure part-way through undoes whatever was already switched on.
    pub fn start() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = BufWriter::new(stdout());
        let terminal = execute!(out, EnterAlternateScreen, EnableMouseCapture)
            .and_then(|()| Terminal::new(CrosstermBackend::new(out)));
        match terminal {
            Ok(terminal) => {
                debug!("terminal session started");
                Ok(Self { terminal, active: true })
            }
            Err(e) => {
                let _ = leave_screen();
                Err(e)
            }
        }
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Leaves the session and reports whether the terminal was restored.
    pub fn finish(mut self) -> io::Result<()> {
        self.active = false;
        debug!("terminal session finished");
        leave_screen()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = leave_screen();
        }
    }
}

/// Undoes [`TerminalSession::start`]. Safe to call more than once.
fn leave_screen() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)
}

/// Chains a hook that restores the terminal before the previous hook prints
/// the panic. Install before [`TerminalSession::start`].
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave_screen();
        previous(info);
    }));
}

/// Returns a flag that is raised when the process receives SIGTERM.
///
/// The event loop polls it, so termination goes through the normal exit path
/// and the session is finished like on `q`.
pub fn sigterm_flag() -> io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&flag))?;
    Ok(flag)
}
