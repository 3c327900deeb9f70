use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

const CONFIG_FILE: &str = "mensura.toml";

/// Server configuration, read from `mensura.toml` in the working directory
/// when present. `MENSURA_DB` and `MENSURA_BIND` override the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bind: SocketAddr,
    pub database_path: PathBuf,
    /// Language passed to the OCR engine when built with `tesseract`.
    pub ocr_language: String,
    /// Upper bound on request bodies — base64 captures are large.
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5000)),
            database_path: PathBuf::from("mensura.db"),
            ocr_language: "eng".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("ignoring malformed {CONFIG_FILE}: {e}");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        };

        if let Ok(path) = std::env::var("MENSURA_DB") {
            config.database_path = PathBuf::from(path);
        }
        if let Ok(bind) = std::env::var("MENSURA_BIND") {
            match bind.parse() {
                Ok(addr) => config.bind = addr,
                Err(_) => tracing::warn!("ignoring unparsable MENSURA_BIND: '{bind}'"),
            }
        }

        config
    }
}
