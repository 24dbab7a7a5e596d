use clap::Parser;

pub const DEFAULT_OPENALEX_URL: &str = "https://api.openalex.org";

/// University map API server
#[derive(Parser, Debug, Clone)]
#[command(name = "uni-map-api")]
#[command(about = "Health and university listing service for the university map")]
pub struct ApiConfig {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "UNIMAP_API_LISTEN")]
    pub listen: String,

    /// Front-end origin allowed to call the API with credentials
    #[arg(long, default_value = "http://localhost:5173", env = "UNIMAP_ALLOWED_ORIGIN")]
    pub allowed_origin: String,

    /// OpenAlex base URL
    #[arg(long, default_value = DEFAULT_OPENALEX_URL, env = "UNIMAP_OPENALEX_URL")]
    pub openalex_url: String,

    /// ISO country code to list institutions for
    #[arg(long, default_value = "CA", env = "UNIMAP_COUNTRY_CODE")]
    pub country_code: String,

    /// Institutions requested from OpenAlex
    #[arg(long, default_value_t = 200, env = "UNIMAP_PER_PAGE")]
    pub per_page: u32,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}
