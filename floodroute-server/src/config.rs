use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use floodroute_core::RoadGraphConfig;
use serde::Deserialize;

/// Server configuration, read from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Overpass JSON document with the road network
    pub network_path: PathBuf,
    /// KML document with flood hazard points
    pub hazards_path: PathBuf,
    #[serde(default)]
    pub routing: RoadGraphConfig,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_concurrency_limit() -> usize {
    64
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {e}", path.display()))?;
        let config: ServerConfig = toml::from_str(&text)?;
        config.routing.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
