//! Worksheet pane
//!
//! Draws the 20 sheet rows with line numbers. Unreached lines show only their
//! number; the active line gets the current-line background and the cursor.

use crate::sheet::{LineStatus, Worksheet};
use crate::ui::highlight::highlight_line;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// First row to draw so that the active line stays visible.
pub fn scroll_offset(active: Option<usize>, total_lines: usize, visible_height: usize) -> usize {
    if total_lines <= visible_height {
        return 0;
    }
    let max_scroll = total_lines - visible_height;
    active
        .map(|line| line.saturating_sub(visible_height.saturating_sub(1)))
        .unwrap_or(0)
        .min(max_scroll)
}

/// Build the styled row for line `index`.
pub fn sheet_row(sheet: &Worksheet, index: usize) -> Line<'static> {
    let line = sheet.line(index);
    let number = format!("{:3} ", index + 1);

    let num_style = match line.status {
        LineStatus::Active => Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD),
        LineStatus::Completed => Style::default().fg(DEFAULT_THEME.success),
        LineStatus::Shown | LineStatus::Hidden => Style::default().fg(DEFAULT_THEME.comment),
    };

    let mut spans = vec![Span::styled(number, num_style)];
    if line.status == LineStatus::Hidden {
        return Line::from(spans);
    }

    let mut content = highlight_line(line, sheet.cursor_blink_on);
    if line.status == LineStatus::Active {
        let background = Style::default().bg(DEFAULT_THEME.current_line_bg);
        for span in &mut content.spans {
            span.style = span.style.patch(background);
        }
        spans.extend(content.spans);
        return Line::from(spans).style(background);
    }
    spans.extend(content.spans);
    Line::from(spans)
}

/// Render the worksheet pane
pub fn render_sheet_pane(
    frame: &mut Frame,
    area: Rect,
    sheet: &Worksheet,
    title: &str,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = sheet.lines().len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders
    let offset = scroll_offset(sheet.active_line(), total_lines, visible_height);

    let rows: Vec<Line> = (offset..total_lines)
        .take(visible_height)
        .map(|index| sheet_row(sheet, index))
        .collect();

    let paragraph = Paragraph::new(rows).block(block);
    frame.render_widget(paragraph, area);
}
