//! Color tables for gitp frames.
//!
//! A `Theme` holds one `ratatui::style::Color` per role the renderer paints.
//! Three built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors only, so it works on any terminal including
//!   256-color SSH sessions with no truecolor support.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.
//! - `kanagawa`: Kanagawa palette in RGB; requires truecolor.
//!
//! Themes are plain values handed to the renderer inside
//! [`crate::render::RenderConfig`]. Nothing reads a theme from global state.

use ratatui::style::Color;
use tracing::warn;

use crate::types::ChangeStatus;

/// All color values used by the frame renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Title bar
    pub title_fg: Color,
    pub title_bg: Color,

    // Commit rows
    /// Cursor marker foreground.
    pub selected_fg: Color,
    /// Cursor marker background.
    pub selected_bg: Color,
    /// Hash, message, author and date text.
    pub commit: Color,

    // File rows
    /// Path and change counts.
    pub file: Color,
    /// File status: newly added.
    pub file_added: Color,
    /// File status: deleted.
    pub file_removed: Color,
    /// File status: modified.
    pub file_modified: Color,

    /// Footer, help body and placeholders.
    pub muted: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            title_fg: Color::White,
            title_bg: Color::Magenta,

            selected_fg: Color::White,
            selected_bg: Color::DarkGray,
            commit: Color::Reset,

            file: Color::Cyan,
            file_added: Color::Green,
            file_removed: Color::Red,
            file_modified: Color::Yellow,

            muted: Color::DarkGray,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let peach = Color::Rgb(250, 179, 135); // #fab387
        let sapphire = Color::Rgb(116, 199, 236); // #74c7ec
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            title_fg: base,
            title_bg: mauve,

            selected_fg: text,
            selected_bg: surface1,
            commit: text,

            file: sapphire,
            file_added: green,
            file_removed: red,
            file_modified: peach,

            muted: overlay1,
        }
    }

    /// Returns the Kanagawa theme using RGB truecolor values.
    pub fn kanagawa() -> Self {
        Self {
            title_fg: Color::Rgb(250, 250, 250),   // #fafafa
            title_bg: Color::Rgb(125, 86, 244),    // #7d56f4
            selected_fg: Color::Rgb(250, 250, 250),
            selected_bg: Color::Rgb(98, 98, 98),   // #626262
            commit: Color::Rgb(220, 215, 186),     // #dcd7ba
            file: Color::Rgb(127, 180, 202),       // #7fb4ca
            file_added: Color::Rgb(152, 187, 108), // #98bb6c
            file_removed: Color::Rgb(228, 104, 118), // #e46876
            file_modified: Color::Rgb(255, 160, 102), // #ffa066
            muted: Color::Rgb(114, 113, 105),      // #727169
        }
    }

    /// Resolves a theme name from config to a built-in theme.
    ///
    /// Unknown names fall back to `dark()` with a warning, so a typo in config
    /// never prevents startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "kanagawa" => Self::kanagawa(),
            "dark" => Self::dark(),
            other => {
                warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// Color for a file status letter.
    pub fn status_color(&self, status: ChangeStatus) -> Color {
        match status {
            ChangeStatus::Added => self.file_added,
            ChangeStatus::Deleted => self.file_removed,
            ChangeStatus::Modified => self.file_modified,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_both_spellings() {
        assert_eq!(Theme::from_name("catppuccin_mocha"), Theme::catppuccin_mocha());
        assert_eq!(Theme::from_name("catppuccin-mocha"), Theme::catppuccin_mocha());
    }

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized-neon"), Theme::dark());
    }
}
