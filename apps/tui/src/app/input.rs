use crate::app::state::App;
use crate::ui::widgets::panel;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if handle_help_toggle(app, key.code) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Esc | KeyCode::Char('x') => {
            if app.view.selected().is_some() {
                app.close_panel();
            } else {
                app.focus = None;
            }
        }
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Enter => app.activate_focused(),
        KeyCode::Char('+' | '=') => app.zoom_in(),
        KeyCode::Char('-' | '_') => app.zoom_out(),
        KeyCode::Char('0') => app.reset_view(),
        KeyCode::Left | KeyCode::Char('h') => app.pan(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.pan(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.pan(0, 1),
        KeyCode::Down | KeyCode::Char('j') => app.pan(0, -1),
        _ => {}
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) || (key == KeyCode::Char('?') && !app.show_help) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if matches!(key, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return true;
    }

    false
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.show_help {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => click(app, mouse.column, mouse.row),
        MouseEventKind::ScrollUp => app.zoom_in(),
        MouseEventKind::ScrollDown => app.zoom_out(),
        _ => {}
    }
}

fn click(app: &mut App, column: u16, row: u16) {
    if app.view.selected().is_some() {
        let panel_area = panel::panel_area(app.layout.frame);
        if panel::close_button(panel_area).contains((column, row).into()) {
            app.close_panel();
            return;
        }
        if panel_area.contains((column, row).into()) {
            return;
        }
    }

    if let Some(index) = app.layout.hit(column, row) {
        app.activate(index);
    }
}
