use anyhow::{Context, Result};
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;
use validator::Validate;

use crate::dispatch::inputs::check_mw;
use crate::domain::{default_delhi_sources, GridRegistry, GridSource};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub grid: GridConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 10,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct DispatchConfig {
    /// Fixed renewable contribution subtracted from every demand (MW)
    #[validate(range(min = 0.0))]
    pub renewable_mw: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { renewable_mw: 500.0 }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    #[validate(nested)]
    pub sources: Vec<GridSourceConfig>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GridSourceConfig {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub capacity_mw: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            sources: default_delhi_sources()
                .into_iter()
                .map(|s| GridSourceConfig {
                    name: s.name,
                    capacity_mw: s.capacity_mw,
                })
                .collect(),
        }
    }
}

impl GridConfig {
    /// Validate the configured fleet and freeze it into a registry snapshot
    pub fn registry(&self) -> Result<GridRegistry> {
        self.validate().context("invalid grid source configuration")?;
        let sources = self
            .sources
            .iter()
            .map(|s| GridSource::new(s.name.clone(), s.capacity_mw))
            .collect();
        Ok(GridRegistry::new(sources)?)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("GRID_DISPATCH__").split("__"));
        Self::extract(figment)
    }

    pub fn extract(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        cfg.dispatch
            .validate()
            .context("invalid dispatch configuration")?;
        check_mw("renewable_mw", cfg.dispatch.renewable_mw)
            .context("invalid dispatch configuration")?;
        Ok(cfg)
    }
}
