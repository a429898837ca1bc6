//! Keybinding dispatcher for gitp.
//!
//! Translates raw crossterm key and mouse events into [`Input`]s for the
//! browser state machine. Keys that mean nothing map to `None`, which the
//! event loop treats as a no-op.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use gitp_core::browser::{Input, Mode};

/// Commits moved per mouse wheel tick.
pub const MOUSE_SCROLL_STEP: usize = 3;

/// Stateful key mapper.
///
/// The only state is the pending `g` of the two-key `gg` jump-to-top chord.
#[derive(Debug, Clone)]
pub struct KeyMapper {
    page_step: usize,
    pending_g: bool,
}

impl KeyMapper {
    pub fn new(page_step: usize) -> Self {
        Self { page_step, pending_g: false }
    }

    /// Maps a key press. `mode` decides whether `Esc` closes the help overlay.
    ///
    /// A lone `g` arms the chord and yields nothing; any other key disarms it.
    pub fn map_key(&mut self, key: KeyEvent, mode: Mode) -> Option<Input> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let chord_armed = std::mem::take(&mut self.pending_g);

        match key.code {
            KeyCode::Char('c') if ctrl => Some(Input::Quit),
            KeyCode::Char('d') if ctrl => Some(Input::PageDown(self.page_step)),
            KeyCode::Char('u') if ctrl => Some(Input::PageUp(self.page_step)),
            KeyCode::PageDown => Some(Input::PageDown(self.page_step)),
            KeyCode::PageUp => Some(Input::PageUp(self.page_step)),

            KeyCode::Char('q') => Some(Input::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Input::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Input::MoveUp),

            KeyCode::Char('g') if chord_armed => Some(Input::JumpTop),
            KeyCode::Char('g') => {
                self.pending_g = true;
                None
            }
            KeyCode::Home => Some(Input::JumpTop),
            KeyCode::Char('G') | KeyCode::End => Some(Input::JumpBottom),

            KeyCode::Char(' ') | KeyCode::Enter => Some(Input::ToggleCollapse),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Input::ToggleHelp),
            KeyCode::Esc if mode == Mode::HelpOverlay => Some(Input::ToggleHelp),

            _ => None,
        }
    }

    /// Maps a mouse event. Only the wheel does anything.
    pub fn map_mouse(&self, mouse: MouseEvent) -> Option<Input> {
        match mouse.kind {
            MouseEventKind::ScrollDown => Some(Input::PageDown(MOUSE_SCROLL_STEP)),
            MouseEventKind::ScrollUp => Some(Input::PageUp(MOUSE_SCROLL_STEP)),
            _ => None,
        }
    }
}
