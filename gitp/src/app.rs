//! Central application state for gitp.
//!
//! `App` bundles the browser state from `gitp-core` with the key mapper and the
//! render settings. The event loop feeds it one [`AppEvent`] at a time; the draw
//! closure reads it. No rendering logic lives here.

use gitp_core::browser::{BrowserState, Input, Transition};
use gitp_core::render::RenderConfig;
use gitp_core::types::CommitRecord;

use crate::config::Config;
use crate::event::AppEvent;
use crate::ui::keybindings::KeyMapper;

pub struct App {
    /// Cursor, viewport, collapse flags and mode over the walked commits.
    pub state: BrowserState,
    /// Theme and widths passed to every render call.
    pub render_config: RenderConfig,
    keys: KeyMapper,
}

impl App {
    pub fn new(commits: Vec<CommitRecord>, config: &Config) -> Self {
        Self {
            state: BrowserState::new(commits),
            render_config: config.render_config(),
            keys: KeyMapper::new(config.page_step),
        }
    }

    /// Translates `event` into an [`Input`] and applies it.
    ///
    /// Events without a mapping leave the state untouched.
    pub fn handle_event(&mut self, event: AppEvent) -> Transition {
        let input = match event {
            AppEvent::Key(key) => self.keys.map_key(key, self.state.mode()),
            AppEvent::Mouse(mouse) => self.keys.map_mouse(mouse),
            AppEvent::Resize(width, height) => Some(Input::Resize(width, height)),
            AppEvent::Quit => Some(Input::Quit),
        };
        match input {
            Some(input) => self.state.apply(input),
            None => Transition::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use gitp_core::browser::Mode;

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn key_presses_reach_the_state_machine() {
        let mut app = App::new(Vec::new(), &Config::default());
        assert_eq!(app.handle_event(AppEvent::Resize(120, 40)), Transition::Continue);
        assert_eq!(app.state.viewport_width(), 120);
        assert_eq!(app.state.viewport_height(), 40);

        app.handle_event(press(KeyCode::Char('h')));
        assert_eq!(app.state.mode(), Mode::HelpOverlay);
        app.handle_event(press(KeyCode::Esc));
        assert_eq!(app.state.mode(), Mode::Browsing);

        assert_eq!(app.handle_event(press(KeyCode::Char('x'))), Transition::Continue);
        assert_eq!(app.handle_event(press(KeyCode::Char('q'))), Transition::Quit);
    }

    #[test]
    fn closed_input_stream_quits() {
        let mut app = App::new(Vec::new(), &Config::default());
        assert_eq!(app.handle_event(AppEvent::Quit), Transition::Quit);
    }
}
