use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_interval() -> String {
    "1h".to_string()
}

fn default_candle_limit() -> usize {
    100
}

fn default_rest_base_url() -> String {
    "https://api.binance.com".to_string()
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Trading pair whose candles are charted
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Kline interval (Binance notation: "1m", "1h", "1d", ...)
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Number of candles fetched per chart load
    #[serde(default = "default_candle_limit")]
    pub candle_limit: usize,

    /// Base URL of the market-data REST API
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            interval: default_interval(),
            candle_limit: default_candle_limit(),
            rest_base_url: default_rest_base_url(),
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
        }
    }
}

/// Load configuration from disk, falling back to defaults on any error.
fn load_config() -> AppConfig {
    let config_path = crate::paths::config_file();

    let data = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    data
                }
                Err(e) => {
                    warn!("Failed to parse config file, using defaults: {}", e);
                    AppConfigData::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file, using defaults: {}", e);
                AppConfigData::default()
            }
        }
    } else {
        info!("No config file found, writing defaults to {:?}", config_path);
        let data = AppConfigData::default();
        write_config(&config_path, &data);
        data
    };

    AppConfig { data, config_path }
}

/// Write configuration to disk as pretty JSON.
fn write_config(path: &PathBuf, data: &AppConfigData) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                error!("Failed to save config: {}", e);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(mut config: ResMut<AppConfig>) {
    *config = load_config();
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let data = AppConfigData::default();
        assert_eq!(data.symbol, "BTCUSDT");
        assert_eq!(data.interval, "1h");
        assert_eq!(data.candle_limit, 100);
        assert!(data.rest_base_url.starts_with("https://"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        // A config file with only a symbol should still deserialize
        let data: AppConfigData = serde_json::from_str(r#"{"symbol":"ETHUSDT"}"#).unwrap();
        assert_eq!(data.symbol, "ETHUSDT");
        assert_eq!(data.interval, "1h");
        assert_eq!(data.candle_limit, 100);
    }

    #[test]
    fn test_config_round_trip() {
        let data = AppConfigData {
            symbol: "SOLUSDT".into(),
            interval: "15m".into(),
            candle_limit: 250,
            rest_base_url: "https://example.test".into(),
        };
        let json = serde_json::to_string(&data).unwrap();
        let back: AppConfigData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.symbol, "SOLUSDT");
        assert_eq!(back.candle_limit, 250);
    }
}
