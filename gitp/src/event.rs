//! Event bus for gitp.
//!
//! Terminal input is normalised into a single `AppEvent` enum and sent over a
//! tokio unbounded MPSC channel. The main loop receives one event at a time,
//! applies it to the browser state, and redraws.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::debug;

/// All events the main loop can receive.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`]; Windows
    /// reports both press and release for every keystroke.
    Key(KeyEvent),
    /// A mouse event: wheel, click or motion.
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// The input stream ended or failed; the session cannot continue.
    Quit,
}

/// Holds the sender and receiver ends of the event channel.
pub struct EventHandler {
    /// Send half, handed to the input task.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half, owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Creates a new `EventHandler` with a fresh unbounded channel.
    ///
    /// Unbounded is fine: input arrives at human speed and the loop handles
    /// each event synchronously.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that forwards crossterm input onto the channel.
///
/// The task ends when the receiver is dropped (a send fails) or when the
/// crossterm stream ends or errors, in which case it sends `AppEvent::Quit`
/// first so the main loop does not wait forever.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut reader = EventStream::new();

        loop {
            let event = match reader.next().await {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Some(Ok(Event::Resize(w, h))) => AppEvent::Resize(w, h),
                Some(Ok(Event::Mouse(mouse))) => AppEvent::Mouse(mouse),
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    debug!(error = %e, "terminal input failed");
                    let _ = tx.send(AppEvent::Quit);
                    break;
                }
                None => {
                    let _ = tx.send(AppEvent::Quit);
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });
}
