//! Browsing state for the commit list.
//!
//! `BrowserState` owns the walked commits plus everything the UI mutates: the
//! cursor, the first visible commit, the last known terminal size, the set of
//! collapsed commits, and the help-overlay mode. No rendering lives here; the
//! renderer reads this state and the key dispatcher feeds it [`Input`]s.
//!
//! [`BrowserState::apply`] is total: every input in every mode produces a valid
//! state, and inputs that make no sense in the current mode are no-ops.

use std::collections::HashSet;

use tracing::debug;

use crate::render::CHROME_ROWS;
use crate::types::{sort_newest_first, CommitRecord};

/// Default step for page-up / page-down.
pub const DEFAULT_PAGE_STEP: usize = 10;

/// Which frame is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Commit list with file rows (default).
    #[default]
    Browsing,
    /// Static keybinding help. Navigation is suspended until it is dismissed.
    HelpOverlay,
}

/// Logical inputs understood by the state machine.
///
/// The binary maps key presses, mouse wheel ticks and resize events onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    MoveDown,
    MoveUp,
    JumpTop,
    JumpBottom,
    /// Move the cursor down by this many commits, clamped to the last one.
    PageDown(usize),
    /// Move the cursor up by this many commits, clamped to the first one.
    PageUp(usize),
    /// Flip the collapse flag of the commit under the cursor.
    ToggleCollapse,
    ToggleHelp,
    /// Terminal is now (columns, rows).
    Resize(u16, u16),
}

/// Control-flow signal returned from [`BrowserState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep running and redraw.
    Continue,
    /// End the session.
    Quit,
}

/// All mutable UI state for one session.
///
/// Invariants, re-established after every [`apply`](Self::apply):
/// - `commits` is sorted newest-first (ties by ascending id);
/// - `cursor < commits.len()` when the list is non-empty, else `cursor == 0`;
/// - `viewport_offset <= cursor`, and in `Browsing` mode the cursor's commit
///   row fits inside the body area of a `viewport_height`-row frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    commits: Vec<CommitRecord>,
    /// Full ids of collapsed commits. Kept apart from the records so the walk's
    /// output stays immutable.
    collapsed: HashSet<String>,
    cursor: usize,
    viewport_offset: usize,
    viewport_width: u16,
    viewport_height: u16,
    mode: Mode,
}

impl BrowserState {
    /// Builds the initial `Browsing` state with the cursor on the newest commit.
    ///
    /// The viewport size is zero until the first [`Input::Resize`].
    pub fn new(mut commits: Vec<CommitRecord>) -> Self {
        sort_newest_first(&mut commits);
        Self {
            commits,
            collapsed: HashSet::new(),
            cursor: 0,
            viewport_offset: 0,
            viewport_width: 0,
            viewport_height: 0,
            mode: Mode::default(),
        }
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the first commit drawn in the body area.
    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    pub fn viewport_width(&self) -> u16 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn help_visible(&self) -> bool {
        self.mode == Mode::HelpOverlay
    }

    /// The commit under the cursor, if any.
    pub fn selected(&self) -> Option<&CommitRecord> {
        self.commits.get(self.cursor)
    }

    /// Whether the commit at `index` has its file rows hidden.
    /// Out-of-range indices report `false`.
    pub fn is_collapsed(&self, index: usize) -> bool {
        self.commits
            .get(index)
            .is_some_and(|c| self.collapsed.contains(&c.id))
    }

    /// Rows available for commits and files after the title and footer chrome.
    pub fn body_rows(&self) -> usize {
        usize::from(self.viewport_height).saturating_sub(CHROME_ROWS)
    }

    /// Applies one input and returns whether the session continues.
    pub fn apply(&mut self, input: Input) -> Transition {
        match (self.mode, input) {
            (_, Input::Quit) => return Transition::Quit,
            (_, Input::Resize(width, height)) => {
                self.viewport_width = width;
                self.viewport_height = height;
            }
            (Mode::Browsing, Input::ToggleHelp) => self.mode = Mode::HelpOverlay,
            (Mode::HelpOverlay, Input::ToggleHelp) => self.mode = Mode::Browsing,
            (Mode::HelpOverlay, _) => {}
            (Mode::Browsing, Input::MoveDown) => {
                if self.cursor + 1 < self.commits.len() {
                    self.cursor += 1;
                }
            }
            (Mode::Browsing, Input::MoveUp) => self.cursor = self.cursor.saturating_sub(1),
            (Mode::Browsing, Input::JumpTop) => self.cursor = 0,
            (Mode::Browsing, Input::JumpBottom) => self.cursor = self.last_index(),
            (Mode::Browsing, Input::PageDown(step)) => {
                self.cursor = self.cursor.saturating_add(step).min(self.last_index());
            }
            (Mode::Browsing, Input::PageUp(step)) => {
                self.cursor = self.cursor.saturating_sub(step);
            }
            (Mode::Browsing, Input::ToggleCollapse) => self.toggle_collapsed(),
        }

        if self.mode == Mode::Browsing {
            self.reconcile_viewport();
        }
        debug!(
            ?input,
            cursor = self.cursor,
            offset = self.viewport_offset,
            mode = ?self.mode,
            "transition"
        );
        Transition::Continue
    }

    fn last_index(&self) -> usize {
        self.commits.len().saturating_sub(1)
    }

    fn toggle_collapsed(&mut self) {
        let Some(id) = self.commits.get(self.cursor).map(|c| c.id.clone()) else {
            return;
        };
        if !self.collapsed.remove(&id) {
            self.collapsed.insert(id);
        }
    }

    fn row_height(&self, index: usize) -> usize {
        self.commits[index].row_height(self.is_collapsed(index))
    }

    /// Scrolls the viewport so the cursor's commit row is visible.
    ///
    /// Commits between the offset and the cursor contribute their full height
    /// (one row, plus one per file unless collapsed), so collapsing or
    /// expanding changes how far the offset has to move.
    fn reconcile_viewport(&mut self) {
        if self.commits.is_empty() {
            self.cursor = 0;
            self.viewport_offset = 0;
            return;
        }
        if self.cursor < self.viewport_offset {
            self.viewport_offset = self.cursor;
            return;
        }

        let available = self.body_rows();
        let mut rows_above: usize = (self.viewport_offset..self.cursor)
            .map(|i| self.row_height(i))
            .sum();
        while self.viewport_offset < self.cursor && rows_above + 1 > available {
            rows_above -= self.row_height(self.viewport_offset);
            self.viewport_offset += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeStatus, FileChange};
    use chrono::{FixedOffset, TimeZone};

    /// Builds `n` commits, newest first, each touching `files_each` files.
    fn commits(n: usize, files_each: usize) -> Vec<CommitRecord> {
        let tz = FixedOffset::east_opt(0).unwrap();
        (0..n)
            .map(|i| {
                let id = format!("{:040x}", i + 1);
                CommitRecord {
                    hash: id[..8].to_owned(),
                    id,
                    message: format!("commit {i}"),
                    author: "Grace".to_owned(),
                    timestamp: tz.timestamp_opt(1_000_000 - i as i64 * 60, 0).unwrap(),
                    files: (0..files_each)
                        .map(|f| FileChange {
                            path: format!("src/file{f}.rs"),
                            status: ChangeStatus::Modified,
                            insertions: 1,
                            deletions: 1,
                        })
                        .collect(),
                }
            })
            .collect()
    }

    fn sized(n: usize, files_each: usize, height: u16) -> BrowserState {
        let mut state = BrowserState::new(commits(n, files_each));
        state.apply(Input::Resize(80, height));
        state
    }

    #[test]
    fn initial_state_is_browsing_at_top() {
        let state = BrowserState::new(commits(3, 0));
        assert_eq!(state.mode(), Mode::Browsing);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.viewport_offset(), 0);
        assert!(!state.help_visible());
    }

    #[test]
    fn new_sorts_newest_first() {
        let mut list = commits(3, 0);
        list.reverse();
        let state = BrowserState::new(list);
        assert_eq!(state.commits()[0].message, "commit 0");
        assert_eq!(state.commits()[2].message, "commit 2");
    }

    #[test]
    fn three_linear_commits_bottom_then_up() {
        let mut state = sized(3, 0, 40);
        state.apply(Input::JumpBottom);
        assert_eq!(state.cursor(), 2);
        state.apply(Input::MoveUp);
        assert_eq!(state.cursor(), 1);
        state.apply(Input::MoveUp);
        assert_eq!(state.cursor(), 0);
        state.apply(Input::MoveUp);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn move_down_stops_at_last_commit() {
        let mut state = sized(2, 0, 40);
        state.apply(Input::MoveDown);
        state.apply(Input::MoveDown);
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn page_down_clamps_to_last_commit() {
        let mut state = sized(5, 0, 40);
        state.apply(Input::PageDown(DEFAULT_PAGE_STEP));
        assert_eq!(state.cursor(), 4);
    }

    #[test]
    fn page_up_clamps_to_first_commit() {
        let mut state = sized(30, 0, 40);
        state.apply(Input::PageDown(DEFAULT_PAGE_STEP));
        state.apply(Input::PageDown(DEFAULT_PAGE_STEP));
        assert_eq!(state.cursor(), 20);
        state.apply(Input::PageUp(DEFAULT_PAGE_STEP));
        assert_eq!(state.cursor(), 10);
        state.apply(Input::PageUp(DEFAULT_PAGE_STEP));
        state.apply(Input::PageUp(DEFAULT_PAGE_STEP));
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn quit_is_reported_in_every_mode() {
        let mut state = sized(1, 0, 10);
        assert_eq!(state.apply(Input::Quit), Transition::Quit);
        state.apply(Input::ToggleHelp);
        assert_eq!(state.apply(Input::Quit), Transition::Quit);
    }

    #[test]
    fn toggle_collapse_twice_restores_flag() {
        let mut state = sized(3, 2, 40);
        state.apply(Input::MoveDown);
        assert!(!state.is_collapsed(1));
        state.apply(Input::ToggleCollapse);
        assert!(state.is_collapsed(1));
        assert!(!state.is_collapsed(0));
        state.apply(Input::ToggleCollapse);
        assert!(!state.is_collapsed(1));
    }

    #[test]
    fn toggle_help_twice_leaves_everything_else_unchanged() {
        let mut state = sized(20, 3, 24);
        state.apply(Input::PageDown(7));
        state.apply(Input::ToggleCollapse);
        let before = state.clone();

        state.apply(Input::ToggleHelp);
        assert!(state.help_visible());
        assert_eq!(state.mode(), Mode::HelpOverlay);
        state.apply(Input::ToggleHelp);

        assert_eq!(state.mode(), Mode::Browsing);
        assert_eq!(state, before);
    }

    #[test]
    fn help_overlay_ignores_navigation() {
        let mut state = sized(5, 0, 40);
        state.apply(Input::ToggleHelp);
        state.apply(Input::MoveDown);
        state.apply(Input::JumpBottom);
        state.apply(Input::ToggleCollapse);
        assert_eq!(state.cursor(), 0);
        assert!(!state.is_collapsed(0));
    }

    #[test]
    fn empty_list_accepts_every_input() {
        let mut state = sized(0, 0, 20);
        for input in [
            Input::MoveDown,
            Input::MoveUp,
            Input::JumpBottom,
            Input::JumpTop,
            Input::PageDown(10),
            Input::PageUp(10),
            Input::ToggleCollapse,
        ] {
            assert_eq!(state.apply(input), Transition::Continue);
            assert_eq!(state.cursor(), 0);
            assert_eq!(state.viewport_offset(), 0);
        }
        assert!(state.selected().is_none());
    }

    #[test]
    fn viewport_follows_cursor_down_with_file_rows() {
        // 10 body rows; every commit is 3 rows tall.
        let mut state = sized(10, 2, 14);
        assert_eq!(state.body_rows(), 10);
        for _ in 0..3 {
            state.apply(Input::MoveDown);
        }
        // Rows above commit 3 from offset 0 = 9, header lands on row 10: fits.
        assert_eq!(state.viewport_offset(), 0);
        state.apply(Input::MoveDown);
        // Commit 4 would start on row 12; dropping commit 0 moves it to row 9.
        assert_eq!(state.cursor(), 4);
        assert_eq!(state.viewport_offset(), 1);
    }

    #[test]
    fn collapsing_lets_more_commits_fit() {
        let mut state = sized(10, 2, 14);
        for _ in 0..4 {
            state.apply(Input::ToggleCollapse);
            state.apply(Input::MoveDown);
        }
        // Commits 0 to 3 are collapsed to one row each.
        assert_eq!(state.cursor(), 4);
        assert_eq!(state.viewport_offset(), 0);
    }

    #[test]
    fn viewport_follows_cursor_up() {
        let mut state = sized(50, 0, 14);
        state.apply(Input::JumpBottom);
        assert_eq!(state.viewport_offset(), 40);
        state.apply(Input::JumpTop);
        assert_eq!(state.viewport_offset(), 0);
    }

    #[test]
    fn shrinking_resize_keeps_cursor_visible() {
        let mut state = sized(20, 0, 40);
        state.apply(Input::PageDown(15));
        assert_eq!(state.viewport_offset(), 0);

        state.apply(Input::Resize(80, 10));
        assert_eq!(state.cursor(), 15);
        assert_eq!(state.viewport_offset(), 10);
        assert_eq!(state.viewport_width(), 80);
        assert_eq!(state.viewport_height(), 10);
    }

    #[test]
    fn zero_height_pins_offset_to_cursor() {
        let mut state = sized(5, 1, 0);
        state.apply(Input::JumpBottom);
        assert_eq!(state.viewport_offset(), 4);
    }

    #[test]
    fn random_input_sequences_keep_invariants() {
        // Every third commit gets file rows so heights vary.
        let mut list = commits(37, 0);
        for (i, c) in list.iter_mut().enumerate() {
            if i % 3 == 0 {
                c.files = commits(1, i % 5)[0].files.clone();
            }
        }
        let mut state = BrowserState::new(list);
        state.apply(Input::Resize(80, 20));

        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        for _ in 0..2_000 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let input = match (seed >> 33) % 10 {
                0 => Input::MoveDown,
                1 => Input::MoveUp,
                2 => Input::JumpTop,
                3 => Input::JumpBottom,
                4 => Input::PageDown(((seed >> 8) % 15) as usize),
                5 => Input::PageUp(((seed >> 8) % 15) as usize),
                6 => Input::ToggleCollapse,
                7 => Input::ToggleHelp,
                8 => Input::Resize(80, ((seed >> 12) % 30) as u16),
                _ => Input::MoveDown,
            };
            state.apply(input);

            assert!(state.cursor() < state.commits().len());
            assert!(state.viewport_offset() <= state.cursor());
            if state.mode() == Mode::Browsing && state.viewport_offset() < state.cursor() {
                let rows_above: usize = (state.viewport_offset()..state.cursor())
                    .map(|i| state.commits()[i].row_height(state.is_collapsed(i)))
                    .sum();
                assert!(rows_above < state.body_rows());
            }
        }
    }
}
