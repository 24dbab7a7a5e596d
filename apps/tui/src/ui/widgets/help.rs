use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const HELP_WIDTH: u16 = 56;
const HELP_HEIGHT: u16 = 18;

/// A `width` x `height` box centred in `area`, shrunk to fit.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_help(f: &mut Frame<'_>) {
    let popup_area = centered_box(HELP_WIDTH, HELP_HEIGHT, f.area());
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press F1, ? or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: u16::from(popup_area.height > 2),
    };
    f.render_widget(hint, hint_area);
}

fn shortcut(keys: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {keys:<12}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(description),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    vec![
        TextLine::from(Span::styled(
            "University Map",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Numbers are clusters of nearby institutions; ◆ is one institution."),
        TextLine::from(""),
        shortcut("Tab/S-Tab", "Focus next / previous marker"),
        shortcut("Enter", "Open marker or zoom into cluster"),
        shortcut("Click", "Same as Enter on the clicked marker"),
        shortcut("Esc / x", "Close the detail panel"),
        shortcut("+ / -", "Zoom in / out (or scroll)"),
        shortcut("Arrows/hjkl", "Pan the map"),
        shortcut("0", "Reset the view"),
        shortcut("q", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_box_fits_inside_area() {
        assert_eq!(
            centered_box(56, 18, Rect::new(0, 0, 120, 40)),
            Rect::new(32, 11, 56, 18)
        );
        assert_eq!(
            centered_box(56, 18, Rect::new(0, 0, 40, 10)),
            Rect::new(0, 0, 40, 10)
        );
    }
}
