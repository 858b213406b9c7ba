//! Server configuration
//!
//! Read from `REFES_*` environment variables, e.g. `REFES_PORT=9000`.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    pub address: String,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the US game archives
    pub games_us_dir: String,
    /// Directory holding the Japanese game archives
    pub games_jp_dir: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("address", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("games_us_dir", "games_us")?
            .set_default("games_jp_dir", "games_jp")?
            .add_source(config::Environment::with_prefix("REFES").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
