mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use std::sync::Arc;
use tracing::info;
use uni_map::config::init_app_config;
use uni_map::logging::init_logging;
use uni_map::{HttpBackend, UniversityBackend};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config();

    let headless = args.headless || !is_terminal();
    init_logging(&config, headless)?;
    info!(api_url = %config.api_url, headless, "starting uni-map");

    let backend: Arc<dyn UniversityBackend> = Arc::new(HttpBackend::new(&config.api_url));

    if headless {
        return event::run_headless(backend, args.json).await;
    }

    let mut terminal = terminal::setup_terminal()?;
    let mut app = App::new();

    let result = event::run(&mut terminal, &mut app, backend).await;

    terminal::cleanup_terminal_state(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
