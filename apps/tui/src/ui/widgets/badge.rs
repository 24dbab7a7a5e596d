use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};
use uni_map_core::BackendHealth;

const BADGE_WIDTH: u16 = 20;

pub fn badge_text(health: BackendHealth) -> String {
    format!("Backend: {health}")
}

/// Top-left corner of the map, just inside the border.
pub fn badge_area(map: Rect) -> Rect {
    Rect {
        x: map.x.saturating_add(2),
        y: map.y.saturating_add(1),
        width: BADGE_WIDTH.min(map.width.saturating_sub(4)),
        height: u16::from(map.height > 2),
    }
}

pub fn render_badge(app: &App, f: &mut Frame<'_>, map: Rect) {
    let area = badge_area(map);
    if area.width == 0 || area.height == 0 {
        return;
    }
    f.render_widget(Clear, area);

    let health = app.view.health();
    if health == BackendHealth::Loading {
        let throbber = Throbber::default()
            .label(badge_text(health))
            .style(Style::default().fg(Color::White).bg(Color::Black))
            .throbber_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        let mut state = app.throbber.clone();
        f.render_stateful_widget(throbber, area, &mut state);
        return;
    }

    let color = if health == BackendHealth::Ok {
        Color::LightGreen
    } else {
        Color::LightRed
    };
    let badge = Paragraph::new(Span::styled(
        format!(" {} ", badge_text(health)),
        Style::default()
            .fg(color)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(badge, area);
}
