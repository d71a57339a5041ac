//! Emoji picker panel opened from the chat message input.
//!
//! The panel lays every category out in one fixed-width grid: a header row
//! per category followed by its emoji rows, scrolled through a fixed-height
//! viewport. Category jump keys (`1`-`8`) position the chosen category's
//! header at the top of the viewport via exact row arithmetic; jumping to
//! the category already at the top is a no-op.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::provider::{EmojiCategory, CATEGORIES};
use crate::tui::theme::Theme;

/// Emoji per grid row.
pub const GRID_COLUMNS: usize = 8;

/// Grid rows visible at once.
pub const VIEW_ROWS: usize = 8;

/// Panel width in terminal columns (grid plus borders).
pub const PANEL_WIDTH: u16 = 36;

/// Panel height in terminal rows (viewport, category bar, borders).
pub const PANEL_HEIGHT: u16 = VIEW_ROWS as u16 + 3;

/// Event emitted by the picker toward the chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiEvent {
    /// An emoji was chosen.
    Selected(&'static str),
    /// The panel was closed without a choice.
    Closed,
}

/// Rows occupied by one category: one header plus its grid rows.
fn category_rows(category: &EmojiCategory) -> usize {
    1 + category.emoji.len().div_ceil(GRID_COLUMNS)
}

/// Row index of category `index`'s header within the full grid.
#[must_use]
pub fn row_offset(index: usize) -> usize {
    CATEGORIES[..index].iter().map(category_rows).sum()
}

/// Total rows of the full grid.
#[must_use]
pub fn total_rows() -> usize {
    row_offset(CATEGORIES.len())
}

/// What a grid row displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowContent {
    Header(usize),
    Emoji { category: usize, grid_row: usize },
}

fn row_content(row: usize) -> Option<RowContent> {
    let mut offset = 0;
    for (index, category) in CATEGORIES.iter().enumerate() {
        let rows = category_rows(category);
        if row < offset + rows {
            let local = row - offset;
            return Some(if local == 0 {
                RowContent::Header(index)
            } else {
                RowContent::Emoji {
                    category: index,
                    grid_row: local - 1,
                }
            });
        }
        offset += rows;
    }
    None
}

/// State of the open picker panel.
#[derive(Debug, Clone)]
pub struct EmojiPicker {
    scroll: usize,
    selected_category: usize,
    selected_index: usize,
}

impl Default for EmojiPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl EmojiPicker {
    /// Opens the picker at the top with the first emoji selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scroll: 0,
            selected_category: 0,
            selected_index: 0,
        }
    }

    /// Current viewport offset in grid rows.
    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Currently selected `(category, emoji)` indices.
    #[must_use]
    pub fn selected(&self) -> (usize, usize) {
        (self.selected_category, self.selected_index)
    }

    fn max_scroll() -> usize {
        total_rows().saturating_sub(VIEW_ROWS)
    }

    /// Positions `category`'s header at the top of the viewport.
    ///
    /// The target offset is the exact sum of the rows of all preceding
    /// categories; when the viewport is already there nothing changes. Near
    /// the end of the grid the offset clamps to the last full viewport.
    pub fn scroll_to_category(&mut self, category: usize) {
        if category >= CATEGORIES.len() {
            return;
        }
        let target = row_offset(category).min(Self::max_scroll());
        if self.scroll == target {
            return;
        }
        self.scroll = target;
        self.selected_category = category;
        self.selected_index = 0;
    }

    fn selection_row(&self) -> usize {
        row_offset(self.selected_category) + 1 + self.selected_index / GRID_COLUMNS
    }

    fn keep_selection_visible(&mut self) {
        let row = self.selection_row();
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + VIEW_ROWS {
            self.scroll = row + 1 - VIEW_ROWS;
        }
    }

    fn move_right(&mut self) {
        let len = CATEGORIES[self.selected_category].emoji.len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        } else if self.selected_category + 1 < CATEGORIES.len() {
            self.selected_category += 1;
            self.selected_index = 0;
        }
    }

    fn move_left(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else if self.selected_category > 0 {
            self.selected_category -= 1;
            self.selected_index = CATEGORIES[self.selected_category].emoji.len() - 1;
        }
    }

    fn move_down(&mut self) {
        let len = CATEGORIES[self.selected_category].emoji.len();
        if self.selected_index + GRID_COLUMNS < len {
            self.selected_index += GRID_COLUMNS;
        } else if self.selected_category + 1 < CATEGORIES.len() {
            let column = self.selected_index % GRID_COLUMNS;
            self.selected_category += 1;
            let next_len = CATEGORIES[self.selected_category].emoji.len();
            self.selected_index = column.min(next_len - 1);
        }
    }

    fn move_up(&mut self) {
        if self.selected_index >= GRID_COLUMNS {
            self.selected_index -= GRID_COLUMNS;
        } else if self.selected_category > 0 {
            let column = self.selected_index % GRID_COLUMNS;
            self.selected_category -= 1;
            let prev = CATEGORIES[self.selected_category];
            let last_row = (prev.emoji.len() - 1) / GRID_COLUMNS;
            self.selected_index = (last_row * GRID_COLUMNS + column).min(prev.emoji.len() - 1);
        }
    }

    /// Handles a key press, emitting a terminal event when the panel is done.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<EmojiEvent> {
        match key.code {
            KeyCode::Esc => return Some(EmojiEvent::Closed),
            KeyCode::Enter => {
                let emoji = CATEGORIES[self.selected_category].emoji[self.selected_index];
                return Some(EmojiEvent::Selected(emoji));
            }
            KeyCode::Char(c @ '1'..='8') => {
                let index = (c as usize) - ('1' as usize);
                self.scroll_to_category(index);
            }
            KeyCode::Right => self.move_right(),
            KeyCode::Left => self.move_left(),
            KeyCode::Down => self.move_down(),
            KeyCode::Up => self.move_up(),
            _ => {}
        }
        self.keep_selection_visible();
        None
    }

    /// Renders the panel into `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .title(" Emoji ")
            .borders(Borders::ALL)
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for row in self.scroll..(self.scroll + VIEW_ROWS).min(total_rows()) {
            match row_content(row) {
                Some(RowContent::Header(index)) => {
                    lines.push(Line::styled(CATEGORIES[index].name, theme.title));
                }
                Some(RowContent::Emoji { category, grid_row }) => {
                    let emoji = CATEGORIES[category].emoji;
                    let start = grid_row * GRID_COLUMNS;
                    let mut spans: Vec<Span> = Vec::new();
                    for (offset, glyph) in
                        emoji[start..(start + GRID_COLUMNS).min(emoji.len())].iter().enumerate()
                    {
                        let is_selected = category == self.selected_category
                            && start + offset == self.selected_index;
                        let style = if is_selected {
                            theme.room_selected
                        } else {
                            theme.text_primary
                        };
                        spans.push(Span::styled(format!("{glyph} "), style));
                    }
                    lines.push(Line::from(spans));
                }
                None => break,
            }
        }

        let grid_area = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
        Paragraph::new(lines).render(grid_area, buf);

        // Category jump hints along the bottom edge.
        let hints: Vec<Span> = CATEGORIES
            .iter()
            .enumerate()
            .map(|(index, _)| {
                let style = if index == self.selected_category {
                    theme.input_focused
                } else {
                    theme.text_muted
                };
                Span::styled(format!("{} ", index + 1), style)
            })
            .collect();
        let hint_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        Paragraph::new(Line::from(hints)).render(hint_area, buf);
    }
}
