//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::db::DEFAULT_POOL_SIZE;

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

#[derive(Clone, Debug, Deserialize)]
/// Settings needed to serve the client API.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    #[serde(default = "default_pool_size")]
    pub max_pool_size: u32,
}
