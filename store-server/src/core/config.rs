/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | Runtime environment |
/// | DEFAULT_CURRENCY | ZAR | Currency assigned to orders without one |
/// | QUOTE_VALIDITY_DAYS | 30 | Quote expiry window |
/// | LOG_DIR | (none) | Directory for daily-rolling log files |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 DEFAULT_CURRENCY=ZAR cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Currency assigned to orders that do not specify one
    pub default_currency: String,
    /// Days a quote stays valid before it expires
    pub quote_validity_days: i64,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            default_currency: std::env::var("DEFAULT_CURRENCY")
                .unwrap_or_else(|_| shared::models::DEFAULT_CURRENCY.into()),
            quote_validity_days: std::env::var("QUOTE_VALIDITY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(shared::models::DEFAULT_QUOTE_VALIDITY_DAYS),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override selected values (used by tests)
    pub fn with_overrides(http_port: u16, default_currency: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.default_currency = default_currency.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
