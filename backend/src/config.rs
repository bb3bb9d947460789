//! Server configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

fn default_data_file() -> PathBuf {
    PathBuf::from("db.json")
}

/// Configuration values for the HTTP server and its data file.
///
/// Values come from CLI flags, `STOCKROOM_*` environment variables, or a
/// config file, in OrthoConfig's usual precedence order.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOCKROOM")]
pub struct ServerSettings {
    /// TCP port the server listens on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Bind address override.
    pub bind_address: Option<String>,
    /// Path of the JSON data file override.
    pub data_file: Option<PathBuf>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to all interfaces.
    pub fn bind_address(&self) -> &str {
        self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    /// Return the configured data file path, falling back to `db.json` in
    /// the working directory.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }
}
