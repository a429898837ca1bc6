//! UI module for gitp.
//!
//! [`render`] is the single entry point called by the event loop's
//! `terminal.draw()` closure. The frame content itself comes from
//! `gitp_core::render`; this module only places it on screen.

pub mod keybindings;

use ratatui::{widgets::Paragraph, Frame};

use crate::app::App;

/// Draws one complete frame covering the whole terminal.
///
/// Lines wider than the terminal are clipped, never wrapped.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let text = gitp_core::render::render(&app.state, &app.render_config, area.width, area.height);
    frame.render_widget(Paragraph::new(text), area);
}
