// UI module for uni_map
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub map: Rect,
    pub footer: Rect,
}

pub fn split_screen(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    ScreenAreas {
        map: chunks[0],
        footer: chunks[1],
    }
}

/// Area inside the map block's border.
pub fn map_inner(map: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(map)
}

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::map::render_map_screen(app, f);

    if app.show_help {
        widgets::help::render_help(f);
    }
}
