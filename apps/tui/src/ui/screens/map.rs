use crate::app::App;
use crate::ui::split_screen;
use crate::ui::widgets::{badge, panel};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use uni_map_core::ClusterSize;

const MARKER_ICON: &str = "◆";

pub fn render_map_screen(app: &App, f: &mut Frame<'_>) {
    let areas = split_screen(f.area());

    render_map(app, f, areas.map);
    badge::render_badge(app, f, areas.map);

    if let Some(marker) = app.view.selected() {
        panel::render_panel(marker, f, areas.map);
    }

    render_footer(app, f, areas.footer);
}

fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" Universities ({}) ", app.view.markers().len()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Right);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(bounds) = app.layout.bounds else {
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
    for (index, placed) in app.layout.clusters.iter().enumerate() {
        let focused = app.focus == Some(index);

        let (text, mut style) = if placed.cluster.is_single() {
            (
                MARKER_ICON.to_string(),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                format!("({})", placed.cluster.label()),
                cluster_style(placed.cluster.size()),
            )
        };
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let half = (text.chars().count() / 2) as u16;
        let x = placed.col.saturating_sub(half).max(inner.x);
        let width = inner.right().saturating_sub(x) as usize;
        let (end, _) = buffer.set_stringn(x, placed.row, &text, width, style);

        // Focused single markers get their popup label beside the icon.
        if focused && placed.cluster.is_single() {
            let Some(marker) = app.view.markers().get(placed.cluster.members()[0]) else {
                continue;
            };
            let label_x = end.saturating_add(1);
            if label_x < inner.right() {
                let width = (inner.right() - label_x) as usize;
                buffer.set_stringn(
                    label_x,
                    placed.row,
                    marker.popup_title(),
                    width,
                    Style::default().fg(Color::White).bg(Color::Black),
                );
            }
        }
    }
}

fn cluster_style(size: ClusterSize) -> Style {
    let color = match size {
        ClusterSize::Small => Color::LightGreen,
        ClusterSize::Medium => Color::Yellow,
        ClusterSize::Large => Color::Rgb(241, 128, 23),
    };
    Style::default().fg(Color::Black).bg(color)
}

fn render_footer(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = if app.status_message.is_empty() {
        shortcuts_line()
    } else {
        TextLine::from(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Green),
        ))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn shortcuts_line() -> TextLine<'static> {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);

    TextLine::from(vec![
        Span::styled("Tab", key),
        Span::styled(": Next marker | ", text),
        Span::styled("Enter/Click", key),
        Span::styled(": Open | ", text),
        Span::styled("Esc", key),
        Span::styled(": Close | ", text),
        Span::styled("+/-", key),
        Span::styled(": Zoom | ", text),
        Span::styled("Arrows", key),
        Span::styled(": Pan | ", text),
        Span::styled("F1", key),
        Span::styled(": Help | ", text),
        Span::styled("q", key),
        Span::styled(": Quit", text),
    ])
}
