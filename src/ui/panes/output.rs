//! Program output pane rendering

use crate::execution::OutputLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Clamp `scroll_offset` to the last page and return the visible range.
pub fn visible_range(
    total_items: usize,
    visible_height: usize,
    scroll_offset: &mut usize,
) -> (usize, usize) {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }
    (*scroll_offset, visible_height.min(total_items))
}

/// Render the output pane
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    output: &OutputLog,
    is_running: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_running {
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if output.is_empty() {
        let paragraph = Paragraph::new("(nothing run yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders
    let (skip, take) = visible_range(output.lines().len(), visible_height, scroll_offset);

    let items: Vec<ListItem> = output
        .lines()
        .iter()
        .skip(skip)
        .take(take)
        .map(|line| ListItem::new(line.as_str()).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
