//! Frame renderer for gitp.
//!
//! [`render`] turns a [`BrowserState`] and a viewport size into a complete
//! frame of styled lines. It does no I/O and reads nothing but its arguments;
//! the binary draws the result as a single `Paragraph` covering the terminal.
//!
//! # Frame layout
//!
//! ```text
//!  GITP - Branch Explorer (42 commits)     <- title
//!                                          <- blank
//! ▶ 1a2b3c4d Fix parser • Ada • 2024-...   <- body: commit rows and
//!     M src/parse.rs (+3/-1)               <-       file rows, from the
//!   9f8e7d6c Add tests • Ada • 2024-...    <-       viewport offset on
//!                                          <- blank
//!  j/k: navigate • space: toggle • ...     <- footer
//! ```
//!
//! Rows that do not fit the body are dropped without a marker.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::browser::{BrowserState, Mode};
use crate::theme::Theme;
use crate::types::{CommitRecord, FileChange};

/// Title, blank, blank and footer rows surrounding the body.
pub const CHROME_ROWS: usize = 4;

/// Default maximum characters of a commit summary before it is cut with `...`.
pub const DEFAULT_MESSAGE_WIDTH: usize = 50;

/// Default maximum characters of a file path before its head is cut with `...`.
pub const DEFAULT_PATH_WIDTH: usize = 60;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const CURSOR_MARKER: &str = "▶ ";
const BROWSE_FOOTER: &str = " j/k: navigate • space: toggle • h: help • q: quit ";
const HELP_FOOTER: &str = " Press h to return to commits view • q to quit ";

/// Immutable styling and width settings handed to every [`render`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub theme: Theme,
    pub message_width: usize,
    pub path_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            message_width: DEFAULT_MESSAGE_WIDTH,
            path_width: DEFAULT_PATH_WIDTH,
        }
    }
}

/// Renders one full frame for a `width` x `height` viewport.
///
/// A zero-sized viewport yields an empty frame. Frames are never taller than
/// `height`; horizontal overflow is left to the terminal to clip.
pub fn render(state: &BrowserState, config: &RenderConfig, width: u16, height: u16) -> Text<'static> {
    if width == 0 || height == 0 {
        return Text::default();
    }

    let lines = match state.mode() {
        Mode::HelpOverlay => help_lines(&config.theme),
        Mode::Browsing => {
            let body_rows = usize::from(height).saturating_sub(CHROME_ROWS);
            browse_lines(state, config, body_rows)
        }
    };

    Text::from(lines.into_iter().take(usize::from(height)).collect::<Vec<_>>())
}

/// Flattens a frame to plain text, one `\n`-separated row per line.
pub fn frame_to_string(frame: &Text<'_>) -> String {
    frame
        .lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_line(text: String, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.title_fg)
            .bg(theme.title_bg)
            .add_modifier(Modifier::BOLD),
    ))
}

fn footer_line(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
    ))
}

fn browse_lines(state: &BrowserState, config: &RenderConfig, body_rows: usize) -> Vec<Line<'static>> {
    let theme = &config.theme;
    let commits = state.commits();

    let mut lines = vec![
        title_line(
            format!(" GITP - Branch Explorer ({} commits) ", commits.len()),
            theme,
        ),
        Line::default(),
    ];

    let mut body: Vec<Line<'static>> = Vec::with_capacity(body_rows);
    if commits.is_empty() {
        if body_rows > 0 {
            body.push(Line::from(Span::styled("  No commits", Style::default().fg(theme.muted))));
        }
    } else {
        'commits: for (index, commit) in commits.iter().enumerate().skip(state.viewport_offset()) {
            if body.len() >= body_rows {
                break;
            }
            let collapsed = state.is_collapsed(index);
            body.push(commit_line(commit, index == state.cursor(), collapsed, config));
            if collapsed {
                continue;
            }
            for file in &commit.files {
                if body.len() >= body_rows {
                    break 'commits;
                }
                body.push(file_line(file, config));
            }
        }
    }

    lines.extend(body);
    lines.push(Line::default());
    lines.push(footer_line(BROWSE_FOOTER, theme));
    lines
}

/// `▶ 1a2b3c4d Summary • Author • 2024-01-31 09:15 [collapsed]`
fn commit_line(commit: &CommitRecord, selected: bool, collapsed: bool, config: &RenderConfig) -> Line<'static> {
    let theme = &config.theme;
    let mut text_style = Style::default().fg(theme.commit);
    let marker = if selected {
        text_style = text_style.add_modifier(Modifier::BOLD);
        Span::styled(
            CURSOR_MARKER,
            Style::default().fg(theme.selected_fg).bg(theme.selected_bg),
        )
    } else {
        Span::raw("  ")
    };

    let mut spans = vec![
        marker,
        Span::styled(format!("{} ", commit.hash), text_style),
        Span::styled(truncate(commit.summary(), config.message_width), text_style),
        Span::styled(
            format!(
                " • {} • {}",
                commit.author,
                commit.timestamp.format(DATE_FORMAT)
            ),
            text_style,
        ),
    ];
    if collapsed {
        spans.push(Span::styled(" [collapsed]", Style::default().fg(theme.muted)));
    }
    Line::from(spans)
}

/// `    M src/main.rs (+3/-1)`; counts are omitted when both are zero.
fn file_line(file: &FileChange, config: &RenderConfig) -> Line<'static> {
    let theme = &config.theme;
    let file_style = Style::default().fg(theme.file);
    let mut spans = vec![
        Span::raw("    "),
        Span::styled(
            file.status.code().to_string(),
            Style::default()
                .fg(theme.status_color(file.status))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(truncate_path(&file.path, config.path_width), file_style),
    ];
    if file.insertions > 0 || file.deletions > 0 {
        spans.push(Span::styled(
            format!(" (+{}/-{})", file.insertions, file.deletions),
            file_style,
        ));
    }
    Line::from(spans)
}

/// Builds the static help frame. Independent of the commit list.
fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let body = Style::default().fg(theme.muted);
    let text = |s: &'static str| Line::from(Span::styled(s, body));
    let legend = |code: &'static str, label: &'static str, color| {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(code, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(label, body),
        ])
    };

    vec![
        title_line(" GITP - Help ".to_owned(), theme),
        Line::default(),
        text("Navigation:"),
        text("  j / Down        Move down"),
        text("  k / Up          Move up"),
        text("  gg / Home       Go to top"),
        text("  G / End         Go to bottom"),
        text("  Ctrl-d / PgDn   Page down"),
        text("  Ctrl-u / PgUp   Page up"),
        text("  Mouse wheel     Scroll"),
        text(""),
        text("Actions:"),
        text("  Space / Enter   Toggle commit collapse"),
        text("  h / ?           Toggle this help (Esc closes it)"),
        text("  q / Ctrl-c      Quit"),
        text(""),
        text("File Status:"),
        legend("A", "               Added", theme.file_added),
        legend("M", "               Modified", theme.file_modified),
        legend("D", "               Deleted", theme.file_removed),
        Line::default(),
        footer_line(HELP_FOOTER, theme),
    ]
}

/// Cuts `s` to at most `max` characters, ending in `...` when shortened.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let kept: String = s.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Like [`truncate`] but keeps the tail, where the file name is.
fn truncate_path(path: &str, max: usize) -> String {
    let count = path.chars().count();
    if count <= max {
        return path.to_owned();
    }
    if max <= 3 {
        return path.chars().skip(count - max).collect();
    }
    let tail: String = path.chars().skip(count - (max - 3)).collect();
    format!("...{tail}")
}
