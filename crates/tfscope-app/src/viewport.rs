//! Viewport state - cursor, scroll offset and visible window over the
//! projected lines.
//!
//! Invariants after every public operation:
//! - `cursor < total_lines`, or `cursor == 0` when there are no lines
//! - `offset <= total_lines.saturating_sub(visible_lines)`
//! - after [`ViewportState::ensure_cursor_visible`], the cursor is inside
//!   `offset..offset + visible_lines`

/// Rows taken by the header, footer and their margins
pub const HEADER_FOOTER_HEIGHT: usize = 6;

/// Rows reserved for a pinned prompt
pub const PROMPT_HEIGHT: usize = 2;

/// The content area never shrinks below this
pub const MIN_VISIBLE_HEIGHT: usize = 5;

/// Screen row of the first content line: header, then a blank row
pub const CONTENT_TOP_ROW: usize = 2;

/// Content rows available for a terminal of `terminal_height` rows
pub fn visible_height(terminal_height: usize, has_prompt: bool) -> usize {
    let mut h = terminal_height.saturating_sub(HEADER_FOOTER_HEIGHT);
    if has_prompt {
        h = h.saturating_sub(PROMPT_HEIGHT);
    }
    h.max(MIN_VISIBLE_HEIGHT)
}

/// Cursor and scroll position over a list of `total_lines` lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportState {
    /// Selected line
    pub cursor: usize,
    /// First visible line
    pub offset: usize,
    /// Number of projected lines
    pub total_lines: usize,
    /// Rows available for content
    pub visible_lines: usize,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            total_lines: 0,
            visible_lines: MIN_VISIBLE_HEIGHT,
        }
    }

    /// Update the line count after a re-projection, keeping the invariants
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.clamp_cursor();
        self.clamp_offset();
    }

    /// Update the content height after a resize or prompt change
    pub fn set_visible_lines(&mut self, visible: usize) {
        self.visible_lines = visible.max(1);
        self.clamp_offset();
    }

    fn last_line(&self) -> usize {
        self.total_lines.saturating_sub(1)
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.last_line());
    }

    pub fn clamp_offset(&mut self) {
        let max_offset = self.total_lines.saturating_sub(self.visible_lines);
        self.offset = self.offset.min(max_offset);
    }

    /// Scroll so the cursor is on screen
    pub fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.visible_lines {
            self.offset = self.cursor + 1 - self.visible_lines;
        }
        self.clamp_offset();
    }

    pub fn move_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
        self.clamp_cursor();
        self.ensure_cursor_visible();
    }

    pub fn move_down(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_add(n);
        self.clamp_cursor();
        self.ensure_cursor_visible();
    }

    /// Half a screen, at least one line
    pub fn page_size(&self) -> usize {
        (self.visible_lines / 2).max(1)
    }

    pub fn page_up(&mut self) {
        self.move_up(self.page_size());
    }

    pub fn page_down(&mut self) {
        self.move_down(self.page_size());
    }

    pub fn to_top(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.cursor = self.last_line();
        self.ensure_cursor_visible();
    }

    /// Range of line indices on screen, end exclusive
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.min(self.total_lines);
        let end = (start + self.visible_lines).min(self.total_lines);
        (start, end)
    }

    /// Lines hidden above the window
    pub fn lines_above(&self) -> usize {
        self.visible_range().0
    }

    /// Lines hidden below the window
    pub fn lines_below(&self) -> usize {
        self.total_lines - self.visible_range().1
    }

    /// Line displayed at screen `row`, if any.
    ///
    /// Content starts at [`CONTENT_TOP_ROW`], one row lower while the
    /// "more lines above" indicator is shown.
    pub fn line_at_row(&self, row: usize) -> Option<usize> {
        let mut top = CONTENT_TOP_ROW;
        if self.lines_above() > 0 {
            top += 1;
        }
        let line = self.offset + row.checked_sub(top)?;
        (line < self.visible_range().1).then_some(line)
    }
}
