//! Application configuration.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Page sizes for the complaint listings.
    #[serde(default)]
    pub listing: ListingConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Administrator account created at startup when missing.
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Listing page sizes.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Items per page on the public complaint list.
    #[serde(default = "default_public_per_page")]
    pub public_per_page: u64,
    /// Items per page on the administrator dashboard.
    #[serde(default = "default_admin_per_page")]
    pub admin_per_page: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            public_per_page: default_public_per_page(),
            admin_per_page: default_admin_per_page(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

/// Bootstrap administrator account.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Sign-in email.
    pub email: String,
    /// Initial password, hashed before it is stored.
    pub password: String,
    /// Display name.
    #[serde(default = "default_admin_name")]
    pub name: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

const fn default_public_per_page() -> u64 {
    10
}

const fn default_admin_per_page() -> u64 {
    15
}

fn default_admin_name() -> String {
    "Admin Desa".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, exported into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `ADUAN_ENV`)
    /// 4. Environment variables with `ADUAN_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("ADUAN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ADUAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
