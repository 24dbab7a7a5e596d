use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use uni_map_core::DisplayMarker;

pub const PANEL_WIDTH: u16 = 40;

/// Docked to the right edge of the map, full height.
pub fn panel_area(map: Rect) -> Rect {
    let width = PANEL_WIDTH.min(map.width);
    Rect {
        x: map.right().saturating_sub(width),
        y: map.y,
        width,
        height: map.height,
    }
}

/// The `[X]` control drawn on the panel's top border.
pub fn close_button(panel: Rect) -> Rect {
    Rect {
        x: panel.right().saturating_sub(5).max(panel.x),
        y: panel.y,
        width: 3.min(panel.width),
        height: u16::from(panel.height > 0),
    }
}

pub fn render_panel(marker: &DisplayMarker, f: &mut Frame<'_>, map: Rect) {
    let area = panel_area(map);
    f.render_widget(Clear, area);

    let max_title = area.width.saturating_sub(8) as usize;
    let title: String = marker.panel_title().chars().take(max_title).collect();

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let label = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        TextLine::from(vec![
            Span::styled("ID: ", label),
            Span::raw(marker.id.to_string()),
        ]),
        TextLine::from(vec![
            Span::styled("Latitude: ", label),
            Span::raw(marker.position.lat.to_string()),
        ]),
        TextLine::from(vec![
            Span::styled("Longitude: ", label),
            Span::raw(marker.position.lon.to_string()),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Esc / x / click [X] to close",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);

    let close = close_button(area);
    f.buffer_mut().set_stringn(
        close.x,
        close.y,
        "[X]",
        close.width as usize,
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_docks_right() {
        let area = panel_area(Rect::new(0, 0, 100, 30));
        assert_eq!(area, Rect::new(60, 0, 40, 30));

        let narrow = panel_area(Rect::new(0, 0, 30, 10));
        assert_eq!(narrow, Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn close_button_on_top_border() {
        let close = close_button(Rect::new(60, 0, 40, 30));
        assert_eq!(close, Rect::new(95, 0, 3, 1));
    }
}
