//! Token palette pane
//!
//! Up to three rows of four palette slots, followed by one row of fixed glyph
//! controls. The rectangles of every button are returned so mouse clicks can
//! be mapped back to tokens.

use crate::sheet::{Palette, Token};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Palette slots per row.
pub const SLOTS_PER_ROW: usize = 4;

/// Clickable areas from the last draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteHitboxes {
    /// Slot rectangles, indexed by slot.
    pub slots: Vec<Rect>,
    /// Glyph control rectangles with the token each one inserts.
    pub glyphs: Vec<(Rect, Token)>,
}

/// What a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteHit {
    Slot(usize),
    Glyph(Token),
}

impl PaletteHitboxes {
    pub fn hit(&self, x: u16, y: u16) -> Option<PaletteHit> {
        if let Some(slot) = self.slots.iter().position(|r| super::point_in_rect(x, y, *r)) {
            return Some(PaletteHit::Slot(slot));
        }
        self.glyphs
            .iter()
            .find(|(r, _)| super::point_in_rect(x, y, *r))
            .map(|(_, token)| PaletteHit::Glyph(token.clone()))
    }
}

/// Height the pane needs for a palette with `rows` slot rows.
pub fn pane_height(rows: usize) -> u16 {
    // borders + slot rows + glyph row
    2 + rows as u16 + 1
}

/// Split the pane interior into slot and glyph button rectangles.
pub fn palette_layout(
    inner: Rect,
    slot_count: usize,
    rows: usize,
    glyphs: &[Token],
) -> PaletteHitboxes {
    let mut constraints = vec![Constraint::Length(1); rows];
    constraints.push(Constraint::Length(1));
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut slots = Vec::with_capacity(slot_count);
    for row in 0..rows {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, SLOTS_PER_ROW as u32); SLOTS_PER_ROW])
            .split(row_areas[row]);
        for column in columns.iter() {
            if slots.len() < slot_count {
                slots.push(*column);
            }
        }
    }

    let glyph_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, glyphs.len().max(1) as u32); glyphs.len()])
        .split(row_areas[rows]);
    let glyphs = glyph_areas
        .iter()
        .zip(glyphs)
        .map(|(area, token)| (*area, token.clone()))
        .collect();

    PaletteHitboxes { slots, glyphs }
}

fn slot_label(slot: usize, token: &Token) -> String {
    format!("F{} {}", slot + 1, token.display_text())
}

fn glyph_label(token: &Token) -> &str {
    match token.text.as_str() {
        " " => "␣",
        "\t" => "⇥",
        other => other,
    }
}

/// Render the palette pane and return its hitboxes
pub fn render_palette_pane(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    glyphs: &[Token],
    selected: usize,
    is_enabled: bool,
) -> PaletteHitboxes {
    let border_style = if is_enabled {
        Style::default().fg(DEFAULT_THEME.border_focused)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let block = Block::default()
        .title(" Tokens ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !is_enabled {
        return PaletteHitboxes::default();
    }

    let hitboxes = palette_layout(inner, palette.len(), palette.rows(), glyphs);

    for (slot, (rect, token)) in hitboxes.slots.iter().zip(palette.tokens()).enumerate() {
        let style = if slot == selected {
            Style::default()
                .bg(DEFAULT_THEME.border_focused)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(DEFAULT_THEME.slot_bg).fg(DEFAULT_THEME.fg)
        };
        let button = Paragraph::new(Span::styled(slot_label(slot, token), style)).style(style);
        // One column of gap between buttons.
        let face = Rect {
            width: rect.width.saturating_sub(1),
            ..*rect
        };
        frame.render_widget(button, face);
    }

    for (rect, token) in &hitboxes.glyphs {
        let style = Style::default()
            .bg(DEFAULT_THEME.current_line_bg)
            .fg(DEFAULT_THEME.primary);
        let face = Rect {
            width: rect.width.saturating_sub(1),
            ..*rect
        };
        let button = Paragraph::new(glyph_label(token))
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(button, face);
    }

    hitboxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::glyph_controls;

    #[test]
    fn test_layout_has_one_rect_per_slot_and_glyph() {
        let glyphs = glyph_controls();
        let inner = Rect::new(1, 1, 44, 4);
        let boxes = palette_layout(inner, 6, 2, &glyphs);

        assert_eq!(boxes.slots.len(), 6);
        assert_eq!(boxes.glyphs.len(), glyphs.len());
        assert_eq!(boxes.slots[0].y, 1);
        assert_eq!(boxes.slots[4].y, 2);
        assert!(boxes.glyphs.iter().all(|(r, _)| r.y == 3));
    }

    #[test]
    fn test_hit_maps_clicks_to_buttons() {
        let glyphs = glyph_controls();
        let inner = Rect::new(0, 0, 44, 2);
        let boxes = palette_layout(inner, 3, 1, &glyphs);

        assert_eq!(boxes.hit(0, 0), Some(PaletteHit::Slot(0)));
        assert_eq!(boxes.hit(12, 0), Some(PaletteHit::Slot(1)));
        // Fourth column of the first row has no token.
        assert_eq!(boxes.hit(40, 0), None);
        assert_eq!(boxes.hit(0, 1), Some(PaletteHit::Glyph(glyphs[0].clone())));
        assert_eq!(boxes.hit(0, 5), None);
    }

    #[test]
    fn test_pane_height_grows_with_rows() {
        assert_eq!(pane_height(1), 4);
        assert_eq!(pane_height(3), 6);
    }
}
