mod fetch;
mod render;
mod state;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use uni_map_core::MarkerUpdate;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, AbortController};

use crate::state::WebState;

fn main() -> io::Result<()> {
    let state = Rc::new(RefCell::new(WebState::default()));

    if let Some(window) = web_sys::window() {
        mount(&window, &state);
    } else {
        console::error_1(&"No window, running with sample markers".into());
    }

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| state.borrow_mut().handle_key(&event)
    });

    terminal.draw_web(move |f| render::render(&mut state.borrow_mut(), f));

    Ok(())
}

/// Starts the health check and the marker fetch. The marker fetch is
/// cancelled when the page goes away.
fn mount(window: &web_sys::Window, state: &Rc<RefCell<WebState>>) {
    let base = fetch::api_base(window);

    spawn_local({
        let window = window.clone();
        let base = base.clone();
        let state = state.clone();
        async move {
            let outcome = fetch::fetch_health(&window, &base).await;
            if let Err(error) = &outcome {
                console::warn_1(&format!("Health check failed: {error}").into());
            }
            state.borrow_mut().view.apply_health(outcome);
        }
    });

    let controller = match AbortController::new() {
        Ok(controller) => Some(controller),
        Err(error) => {
            console::error_2(&"AbortController unavailable".into(), &error);
            None
        }
    };
    let signal = controller.as_ref().map(AbortController::signal);
    if let Some(controller) = controller {
        if let Err(error) = fetch::abort_on_pagehide(window, controller) {
            console::error_2(&"Failed to watch pagehide".into(), &error);
        }
    }

    let window = window.clone();
    let state = state.clone();
    spawn_local(async move {
        let outcome = fetch::fetch_universities(&window, &base, signal.as_ref()).await;
        match state.borrow_mut().view.apply_markers(outcome) {
            MarkerUpdate::Replaced(count) => {
                console::log_1(&format!("Loaded {count} universities").into());
            }
            MarkerUpdate::KeptEmpty | MarkerUpdate::Discarded => {}
            MarkerUpdate::Failed(error) => {
                console::error_1(&format!("Failed to fetch universities: {error}").into());
            }
        }
    });
}
