use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Location of the two table files.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,
    #[serde(default = "default_payments_file")]
    pub payments_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            accounts_file: default_accounts_file(),
            payments_file: default_payments_file(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }
fn default_data_dir() -> PathBuf { PathBuf::from(".") }
fn default_accounts_file() -> String { "accounts.txt".into() }
fn default_payments_file() -> String { "payments.txt".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Configuration assembled from environment variables only.
/// Used when no config file is present.
pub fn from_env() -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Ok(host) = std::env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
        cfg.server.worker_threads = Some(w);
    }
    if let Ok(dir) = std::env::var("DATA_DIR") {
        cfg.storage.data_dir = PathBuf::from(dir);
    }
    cfg
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to env vars when the file is absent.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => from_env(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.accounts_file.trim().is_empty() || self.payments_file.trim().is_empty() {
            return Err(anyhow!("storage file names must not be empty"));
        }
        if self.accounts_file == self.payments_file {
            return Err(anyhow!("storage.accounts_file and storage.payments_file must differ"));
        }
        Ok(())
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(&self.accounts_file)
    }

    pub fn payments_path(&self) -> PathBuf {
        self.data_dir.join(&self.payments_file)
    }
}
