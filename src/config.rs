use crate::error::PaintError;
use crate::modules::paint_canvas::{ChromeAllowance, ToolSettings};
use crate::modules::preview::PreviewSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOG_ENV_VAR: &str = "PAINT_PREVIEW_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum ThemePreference { System, Light, Dark }

/// Settings read once at startup. Every field falls back to its default when
/// missing from the file, so older config files keep loading.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PaintConfig {
    pub background: [u8; 3],
    pub chrome: ChromeAllowance,
    pub tool_defaults: ToolSettings,
    pub preview: PreviewSettings,
    pub log_filter: String,
    pub theme_preference: ThemePreference,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            chrome: ChromeAllowance::default(),
            tool_defaults: ToolSettings::default(),
            preview: PreviewSettings::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            theme_preference: ThemePreference::System,
        }
    }
}

impl PaintConfig {
    pub fn get_config_path() -> PathBuf {
        let mut path: PathBuf = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("paint_preview");
        path.push("config.json");
        path
    }

    /// Loads the config from the default location. A missing file is not an
    /// error; an unreadable or malformed one is logged and replaced by defaults.
    pub fn load() -> Self {
        let path: PathBuf = Self::get_config_path();
        match Self::load_from(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "config unusable, falling back to defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, PaintError> {
        let contents: String = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PaintError::ConfigRead { path: path.to_path_buf(), source }),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| PaintError::ConfigParse { path: path.to_path_buf(), source })
    }

    pub fn save(&self) -> Result<(), PaintError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PaintError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PaintError::ConfigWrite { path: parent.to_path_buf(), source })?;
        }
        let json: String = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| PaintError::ConfigWrite { path: path.to_path_buf(), source })
    }

    /// `PAINT_PREVIEW_LOG` wins over the configured filter.
    pub fn effective_log_filter(&self) -> String {
        std::env::var(LOG_ENV_VAR).ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.log_filter.clone())
    }

    pub fn background_rgba(&self) -> image::Rgba<u8> {
        let [r, g, b] = self.background;
        image::Rgba([r, g, b, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::paint_canvas::ToolKind;

    fn scratch_path(name: &str) -> PathBuf {
        let mut p: PathBuf = std::env::temp_dir();
        p.push(format!("paint_preview_test_{}_{}", std::process::id(), name));
        p.push("config.json");
        p
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path: PathBuf = scratch_path("missing");
        let _ = fs::remove_file(&path);
        assert!(PaintConfig::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let path: PathBuf = scratch_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "background": [10, 20, 30] }"#).unwrap();

        let cfg: PaintConfig = PaintConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(cfg.background, [10, 20, 30]);
        assert_eq!(cfg.chrome, ChromeAllowance::default());
        assert_eq!(cfg.tool_defaults.tool, ToolKind::Free);
        assert_eq!(cfg.log_filter, "info");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let path: PathBuf = scratch_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err: PaintError = PaintConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, PaintError::ConfigParse { .. }));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn saved_theme_survives_reload() {
        let path: PathBuf = scratch_path("save");
        let mut cfg: PaintConfig = PaintConfig::default();
        cfg.theme_preference = ThemePreference::Dark;
        cfg.save_to(&path).unwrap();

        let loaded: PaintConfig = PaintConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.theme_preference, ThemePreference::Dark);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn background_is_opaque() {
        let cfg: PaintConfig = PaintConfig { background: [1, 2, 3], ..PaintConfig::default() };
        assert_eq!(cfg.background_rgba(), image::Rgba([1, 2, 3, 255]));
    }
}
