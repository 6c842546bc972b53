//! Server configuration.
//!
//! # Environment Variables
//!
//! - `HOMESTEAD_HOST` - Bind address (default: 127.0.0.1)
//! - `HOMESTEAD_PORT` - Listen port (default: 8000)
//! - `HOMESTEAD_LOG` - Log filter used when `RUST_LOG` is unset (default: info)
//! - `HOMESTEAD_DATA_FILE` - Customer document (default: customers.yaml)
//!
//! The same keys can be set in `homestead.toml`, with store settings under a
//! `[store]` table.

use confique::Config;
use homestead::config::{config_files, StoreConfig};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

#[derive(Config, Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    #[config(env = "HOMESTEAD_HOST", default = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[config(env = "HOMESTEAD_PORT", default = 8000)]
    pub port: u16,

    /// Fallback `tracing` filter directive
    #[config(env = "HOMESTEAD_LOG", default = "info")]
    pub log: String,

    #[config(nested)]
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Environment first, then config files, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, confique::Error> {
        let mut builder = Self::builder().env();
        for file in config_files(explicit) {
            builder = builder.file(file);
        }
        builder.load()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
