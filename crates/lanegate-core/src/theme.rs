//! Widget theme configuration
//!
//! A plain struct with a fixed set of recognized keys. Rendering to style
//! output is done by the `widget` crate; nothing here is global.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Recognized theme keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeKey {
    Primary,
    Background,
    Surface,
    Text,
    Border,
    Warning,
    BorderRadius,
}

impl ThemeKey {
    pub const ALL: [ThemeKey; 7] = [
        ThemeKey::Primary,
        ThemeKey::Background,
        ThemeKey::Surface,
        ThemeKey::Text,
        ThemeKey::Border,
        ThemeKey::Warning,
        ThemeKey::BorderRadius,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::Border => "border",
            Self::Warning => "warning",
            Self::BorderRadius => "borderRadius",
        }
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Palette colours (CSS hex notation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub primary: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub border: String,
    pub warning: String,
    /// Keys present in the config file that we do not recognize
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#375bd2".to_string(),
            background: "#ffffff".to_string(),
            surface: "#f5f7fd".to_string(),
            text: "#0c162c".to_string(),
            border: "#d1d6e4".to_string(),
            warning: "#f7b955".to_string(),
            unrecognized: BTreeMap::new(),
        }
    }
}

/// Widget theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub palette: Palette,
    /// Corner radius in pixels
    pub border_radius_px: u16,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            border_radius_px: 8,
            unrecognized: BTreeMap::new(),
        }
    }
}

impl ThemeConfig {
    /// Raw value for a recognized key
    pub fn value(&self, key: ThemeKey) -> String {
        match key {
            ThemeKey::Primary => self.palette.primary.clone(),
            ThemeKey::Background => self.palette.background.clone(),
            ThemeKey::Surface => self.palette.surface.clone(),
            ThemeKey::Text => self.palette.text.clone(),
            ThemeKey::Border => self.palette.border.clone(),
            ThemeKey::Warning => self.palette.warning.clone(),
            ThemeKey::BorderRadius => format!("{}px", self.border_radius_px),
        }
    }

    /// Check colours and warn about keys that will be ignored.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in ThemeKey::ALL {
            if key == ThemeKey::BorderRadius {
                continue;
            }
            let value = self.value(key);
            if !is_hex_color(&value) {
                return Err(ConfigError::InvalidTheme(format!(
                    "{} must be a hex colour (#rgb, #rrggbb or #rrggbbaa), got '{}'",
                    key, value
                )));
            }
        }

        for name in self
            .unrecognized
            .keys()
            .chain(self.palette.unrecognized.keys())
        {
            tracing::warn!(key = %name, "Ignoring unrecognized theme key");
        }

        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
