use serde::Deserialize;
use std::path::Path;

use crate::error::LayoutError;
use crate::models::HueCatalog;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Chip geometry for rendered hue pages
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Replacement hue page catalog; the built-in 40 pages if absent
    #[serde(default)]
    pub hue_pages: Option<Vec<String>>,
}

/// Size of one chip and the gap around it, in pixels
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    #[serde(default = "default_chip_size")]
    pub chip_size: u32,

    #[serde(default = "default_chip_gap")]
    pub chip_gap: u32,
}

fn default_chip_size() -> u32 {
    75
}

fn default_chip_gap() -> u32 {
    10
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chip_size: default_chip_size(),
            chip_gap: default_chip_gap(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.chip_size == 0 {
            return Err(LayoutError::InvalidGeometry(
                "chip_size must be positive".to_string(),
            ));
        }
        self.pitch().map(|_| ())
    }

    /// Distance between the origins of neighbouring chips
    pub fn pitch(&self) -> Result<u32, LayoutError> {
        self.chip_size.checked_add(self.chip_gap).ok_or_else(|| {
            LayoutError::InvalidGeometry("chip_size + chip_gap overflows u32".to_string())
        })
    }
}

impl AppConfig {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from a YAML file, falling back to defaults when
    /// no file is given or it cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        chip_size = config.layout.chip_size,
                        chip_gap = config.layout.chip_gap,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn catalog(&self) -> HueCatalog {
        match &self.hue_pages {
            Some(names) => HueCatalog::new(names.clone()),
            None => HueCatalog::default(),
        }
    }
}
