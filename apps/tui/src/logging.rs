use crate::config::AppConfig;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// The terminal UI owns stdout and stderr, so interactive runs only log when
/// a log file is configured. Headless runs log to stderr.
pub fn init_logging(config: &AppConfig, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.debug)));

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| eyre!("Failed to install logger: {e}"))?;
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| eyre!("Failed to install logger: {e}"))?;
    }

    Ok(())
}

fn default_directive(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("uni_map={level},uni_map_core={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_level() {
        assert_eq!(default_directive(false), "uni_map=info,uni_map_core=info");
        assert_eq!(default_directive(true), "uni_map=debug,uni_map_core=debug");
    }
}
