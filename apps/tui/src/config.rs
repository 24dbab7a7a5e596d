use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

/// Loads `.env` and reads the application configuration from the environment.
/// CLI flags are applied to the environment before this runs.
pub fn init_app_config() -> AppConfig {
    dotenv().ok();
    config_from_env()
}

fn config_from_env() -> AppConfig {
    let api_url = env::var("UNIMAP_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    AppConfig {
        api_url,
        log_file: env::var("UNIMAP_LOG_FILE").ok().map(PathBuf::from),
        debug: env::var("DEBUG").is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment is process-wide, so every variable is checked in one test.
    #[test]
    fn reads_overrides_and_defaults() {
        env::remove_var("UNIMAP_API_URL");
        env::remove_var("UNIMAP_LOG_FILE");
        env::remove_var("DEBUG");
        let config = config_from_env();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_file, None);
        assert!(!config.debug);

        env::set_var("UNIMAP_API_URL", "http://backend:9000");
        env::set_var("UNIMAP_LOG_FILE", "/tmp/uni_map.log");
        env::set_var("DEBUG", "1");
        let config = config_from_env();
        assert_eq!(config.api_url, "http://backend:9000");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/uni_map.log")));
        assert!(config.debug);

        env::set_var("UNIMAP_API_URL", "  ");
        assert_eq!(config_from_env().api_url, DEFAULT_API_URL);

        env::remove_var("UNIMAP_API_URL");
        env::remove_var("UNIMAP_LOG_FILE");
        env::remove_var("DEBUG");
    }
}
