// src/lib.rs

pub mod api;
pub mod config;
pub mod mcp;
pub mod solafon;
pub mod utils;

use anyhow::Result;

/// Application state shared across all request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Gateway to the Solafon platform API
    pub client: solafon::SolafonClient,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Self> {
        let client = solafon::SolafonClient::new(&config)?;
        Ok(Self { config, client })
    }
}
