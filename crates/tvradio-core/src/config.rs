use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::focus::keys::RemotePlatform;
use super::focus::resolver::Tuning;
use super::focus::viewport::Padding;
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Geometric search and timer settings. Distances are pixel equivalents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_dead_zone")]
    pub dead_zone_px: f32,
    #[serde(default = "default_cross_axis_weight")]
    pub cross_axis_weight: f32,
    #[serde(default = "default_remeasure_debounce_ms")]
    pub remeasure_debounce_ms: u64,
    #[serde(default = "default_smooth_scroll_ms")]
    pub smooth_scroll_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Rows kept clear above the focused item when scrolling.
    #[serde(default = "default_padding_rows")]
    pub top_padding: u16,
    /// Rows kept clear below the focused item when scrolling.
    #[serde(default = "default_padding_rows")]
    pub bottom_padding: u16,
    /// Fetch the next page once fewer than this many items remain past focus.
    #[serde(default = "default_load_more_threshold")]
    pub load_more_threshold: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub platform: RemotePlatform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Simulated network latency for page fetches.
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            dead_zone_px: default_dead_zone(),
            cross_axis_weight: default_cross_axis_weight(),
            remeasure_debounce_ms: default_remeasure_debounce_ms(),
            smooth_scroll_ms: default_smooth_scroll_ms(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            top_padding: default_padding_rows(),
            bottom_padding: default_padding_rows(),
            load_more_threshold: default_load_more_threshold(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            fetch_delay_ms: default_fetch_delay_ms(),
        }
    }
}

fn default_dead_zone() -> f32 {
    10.0
}

fn default_cross_axis_weight() -> f32 {
    2.0
}

fn default_remeasure_debounce_ms() -> u64 {
    80
}

fn default_smooth_scroll_ms() -> u64 {
    150
}

fn default_padding_rows() -> u16 {
    1
}

fn default_load_more_threshold() -> usize {
    8
}

fn default_page_size() -> usize {
    12
}

fn default_fetch_delay_ms() -> u64 {
    250
}

impl NavigationConfig {
    pub fn tuning(&self) -> Tuning {
        Tuning {
            dead_zone: self.dead_zone_px,
            cross_axis_weight: self.cross_axis_weight,
        }
    }

    pub fn remeasure_debounce(&self) -> Duration {
        Duration::from_millis(self.remeasure_debounce_ms)
    }

    pub fn smooth_scroll(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }
}

impl ViewportConfig {
    /// Padding in pixel equivalents for a given row height.
    pub fn padding(&self, row_height: f32) -> Padding {
        Padding::new(
            self.top_padding as f32 * row_height,
            self.bottom_padding as f32 * row_height,
        )
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.navigation.dead_zone_px, 10.0);
        assert_eq!(config.navigation.cross_axis_weight, 2.0);
        assert_eq!(config.remote.platform, RemotePlatform::Tizen);
        assert_eq!(config.catalog.page_size, 12);
        assert!(Config::config_path().ends_with("tvradio/config.toml"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [remote]
            platform = "webos"

            [navigation]
            dead_zone_px = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(config.remote.platform, RemotePlatform::Webos);
        assert_eq!(config.navigation.dead_zone_px, 4.0);
        assert_eq!(config.navigation.remeasure_debounce_ms, 80);
        assert_eq!(config.viewport.load_more_threshold, 8);
    }

    #[test]
    fn test_load_writes_defaults_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.viewport.top_padding, 1);

        let mut changed = config.clone();
        changed.catalog.page_size = 30;
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().catalog.page_size, 30);
    }

    #[test]
    fn test_padding_scales_with_row_height() {
        let padding = ViewportConfig::default().padding(16.0);
        assert_eq!(padding, Padding::new(16.0, 16.0));
    }
}
