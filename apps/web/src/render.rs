use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::canvas::{Canvas, Map, MapResolution},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use uni_map_core::{BackendHealth, ClusterSize, DisplayMarker};

use crate::state::WebState;

const PANEL_WIDTH: u16 = 40;

pub fn render(state: &mut WebState, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());
    let map_area = chunks[0];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" Universities ({}) ", state.view.markers().len()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Right);
    let inner = block.inner(map_area);
    f.render_widget(block, map_area);

    state.place(inner.width, inner.height);
    render_map(state, f, inner);
    render_badge(state.view.health(), f, map_area);

    if let Some(marker) = state.view.selected() {
        render_panel(marker, f, map_area);
    }

    render_footer(&state.status, f, chunks[1]);

    if state.show_help {
        render_help(f);
    }
}

fn render_map(state: &WebState, f: &mut Frame<'_>, inner: Rect) {
    let Some(bounds) = state.bounds else {
        return;
    };

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([bounds.west, bounds.east])
            .y_bounds([bounds.south, bounds.north])
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
            }),
        inner,
    );

    let buffer = f.buffer_mut();
    for (index, placed) in state.clusters.iter().enumerate() {
        let (text, mut style) = if placed.cluster.is_single() {
            (
                "◆".to_string(),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            let color = match placed.cluster.size() {
                ClusterSize::Small => Color::LightGreen,
                ClusterSize::Medium => Color::Yellow,
                ClusterSize::Large => Color::Rgb(241, 128, 23),
            };
            (
                format!("({})", placed.cluster.label()),
                Style::default().fg(Color::Black).bg(color),
            )
        };

        let focused = state.focus == Some(index);
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let col = inner.x + placed.col;
        let row = inner.y + placed.row;
        let half = (text.chars().count() / 2) as u16;
        let x = col.saturating_sub(half).max(inner.x);
        let width = inner.right().saturating_sub(x) as usize;
        let (end, _) = buffer.set_stringn(x, row, &text, width, style);

        if focused && placed.cluster.is_single() {
            let label = state
                .view
                .markers()
                .get(placed.cluster.members()[0])
                .map(DisplayMarker::popup_title);
            let label_x = end.saturating_add(1);
            if let Some(label) = label.filter(|_| label_x < inner.right()) {
                buffer.set_stringn(
                    label_x,
                    row,
                    label,
                    (inner.right() - label_x) as usize,
                    Style::default().fg(Color::White).bg(Color::Black),
                );
            }
        }
    }
}

fn render_badge(health: BackendHealth, f: &mut Frame<'_>, map: Rect) {
    let area = Rect {
        x: map.x.saturating_add(2),
        y: map.y.saturating_add(1),
        width: 20.min(map.width.saturating_sub(4)),
        height: u16::from(map.height > 2),
    };
    let color = match health {
        BackendHealth::Loading => Color::Cyan,
        BackendHealth::Ok => Color::LightGreen,
        BackendHealth::Fail => Color::LightRed,
    };
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" Backend: {health} "),
            Style::default()
                .fg(color)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )),
        area,
    );
}

fn render_panel(marker: &DisplayMarker, f: &mut Frame<'_>, map: Rect) {
    let width = PANEL_WIDTH.min(map.width);
    let area = Rect {
        x: map.right().saturating_sub(width),
        y: map.y,
        width,
        height: map.height,
    };
    f.render_widget(Clear, area);

    let title: String = marker
        .panel_title()
        .chars()
        .take(area.width.saturating_sub(4) as usize)
        .collect();
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
            "Esc / x to close",
            Style::default().fg(Color::Gray),
        )),
    ];

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_footer(status: &str, f: &mut Frame<'_>, area: Rect) {
    let line = if status.is_empty() {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(Color::Gray);
        TextLine::from(vec![
            Span::styled("Tab", key),
            Span::styled(": Next marker | ", text),
            Span::styled("Enter", key),
            Span::styled(": Open | ", text),
            Span::styled("Esc", key),
            Span::styled(": Close | ", text),
            Span::styled("+/-", key),
            Span::styled(": Zoom | ", text),
            Span::styled("Arrows", key),
            Span::styled(": Pan | ", text),
            Span::styled("?", key),
            Span::styled(": Help", text),
        ])
    } else {
        TextLine::from(Span::styled(status, Style::default().fg(Color::Green)))
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_help(f: &mut Frame<'_>) {
    let screen = f.area();
    let width = 52.min(screen.width);
    let height = 14.min(screen.height);
    let area = Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    };
    f.render_widget(Clear, area);

    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let lines = [
        ("Tab/S-Tab", "Focus next / previous marker"),
        ("Enter", "Open marker or zoom into cluster"),
        ("Esc / x", "Close the detail panel"),
        ("+ / -", "Zoom in / out"),
        ("Arrows/hjkl", "Pan the map"),
        ("0", "Reset the view"),
        ("? / F1", "Toggle this help"),
    ]
    .into_iter()
    .map(|(keys, description)| {
        TextLine::from(vec![
            Span::styled(format!("  {keys:<12}"), key),
            Span::raw(description),
        ])
    })
    .collect::<Vec<_>>();

    let block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(key)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}
