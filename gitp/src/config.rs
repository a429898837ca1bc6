//! Optional TOML settings.
//!
//! Every key is optional:
//!
//! ```toml
//! theme = "kanagawa"    # "dark" (default), "catppuccin-mocha", "kanagawa"
//! message_width = 50    # characters of the commit summary before "..."
//! path_width = 60       # characters of a file path before "..."
//! page_step = 10        # commits moved by Ctrl-d / Ctrl-u
//! ```
//!
//! Config errors are soft failures: they are logged and defaults are used.

use std::path::Path;

use gitp_core::browser::DEFAULT_PAGE_STEP;
use gitp_core::render::{RenderConfig, DEFAULT_MESSAGE_WIDTH, DEFAULT_PATH_WIDTH};
use gitp_core::theme::Theme;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub theme: String,
    pub message_width: usize,
    pub path_width: usize,
    pub page_step: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_owned(),
            message_width: DEFAULT_MESSAGE_WIDTH,
            path_width: DEFAULT_PATH_WIDTH,
            page_step: DEFAULT_PAGE_STEP,
        }
    }
}

impl Config {
    /// Reads `path` if given. Never fails: unreadable or invalid files fall
    /// back to defaults with a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                return Self::default();
            }
        };
        match Self::parse(&raw) {
            Ok(config) => {
                debug!(path = %path.display(), ?config, "loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config parse error, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(raw)?;
        config.page_step = config.page_step.max(1);
        Ok(config)
    }

    /// The style table and widths handed to the renderer.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            theme: Theme::from_name(&self.theme),
            message_width: self.message_width,
            path_width: self.path_width,
        }
    }
}
