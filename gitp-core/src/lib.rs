//! gitp-core: history walking, browsing state, and frame rendering for gitp.
//!
//! Everything here is terminal-agnostic. The `gitp` binary owns the terminal,
//! translates key presses into [`browser::Input`] values, and draws whatever
//! [`render::render`] returns.

pub mod browser;
pub mod error;
pub mod history;
pub mod render;
pub mod theme;
pub mod types;
