use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "uni-map", version, about = "Terminal map of universities")]
pub struct CliArgs {
    /// Fetch once, print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Append logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Flags win over `.env` because dotenv never overwrites set variables.
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("UNIMAP_API_URL", url);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("UNIMAP_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = CliArgs::parse_from([
            "uni-map",
            "--headless",
            "--json",
            "--api-url",
            "http://backend:9000",
            "--log-file",
            "/tmp/map.log",
        ]);
        assert!(args.headless);
        assert!(args.json);
        assert!(!args.debug);
        assert_eq!(args.api_url.as_deref(), Some("http://backend:9000"));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/map.log")));
    }

    #[test]
    fn defaults_to_interactive() {
        let args = CliArgs::parse_from(["uni-map"]);
        assert!(!args.headless);
        assert!(args.api_url.is_none());
    }
}
