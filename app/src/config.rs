use directories::ProjectDirs;
use egui_node_widgets::{WidgetMetrics, WidgetStyle};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Settings read from `widgets.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the display scale used to normalise widget fonts.
    pub display_scale: Option<f32>,
    pub metrics: WidgetMetrics,
    pub style: WidgetStyle,
}

impl AppConfig {
    /// Display scale to hand to the widgets; `fallback` applies when unset or unusable.
    pub fn display_scale_or(&self, fallback: f32) -> f32 {
        match self.display_scale {
            Some(scale) if scale.is_finite() && scale > 0.0 => scale,
            Some(scale) => {
                warn!("Ignoring display_scale {} from config", scale);
                fallback
            }
            None => fallback,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn parse_config(toml_str: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}

fn get_config_path() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("me", "liesegang", "node_widgets")?;
    Some(proj_dirs.config_dir().join("widgets.toml"))
}

fn read_config(path: PathBuf) -> Result<AppConfig, ConfigError> {
    let toml_str = fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
    parse_config(&toml_str)
}

pub fn load_config() -> AppConfig {
    let Some(path) = get_config_path() else {
        error!("Could not determine the config directory, using defaults");
        return AppConfig::default();
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match read_config(path.clone()) {
        Ok(config) => {
            info!("Widget settings loaded from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            AppConfig::default()
        }
    }
}
