// Configuration for CamPaintR, loaded from a TOML file with per-field defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::color::MAX_COLOR_DIFF;
use crate::errors::{CamPaintError, Result};
use crate::region::MIN_REGION;

/// Configuration for CamPaintR
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub input_path: String,
    pub output_base_dir: String,

    /// Fixed target color for batch runs; the GUI picks one with the mouse instead
    #[serde(default)]
    pub target_color_rgb: Option<[u8; 3]>,

    /// Per-channel tolerance for a pixel to count as similar to the target
    #[serde(default = "default_max_color_diff")]
    pub max_color_diff: i32,

    /// Number of points a region must exceed to be kept
    #[serde(default = "default_min_region_size")]
    pub min_region_size: usize,

    /// Brush color painted over the largest region
    #[serde(default = "default_paint_color")]
    pub paint_color_rgb: [u8; 3],

    #[serde(default)]
    pub resize_dimensions: Option<[u32; 2]>,

    // A separate resize option for GUI mode
    #[serde(default)]
    pub gui_resize_dimensions: Option<[u32; 2]>,

    /// Seed for the per-region recolor colors; unset means a fresh
    /// entropy seed per run (visualization only, not correctness)
    #[serde(default)]
    pub recolor_seed: Option<u64>,

    #[serde(default = "default_parallel")]
    pub use_parallel: bool,
}

fn default_max_color_diff() -> i32 {
    MAX_COLOR_DIFF
}

fn default_min_region_size() -> usize {
    MIN_REGION
}

fn default_paint_color() -> [u8; 3] {
    [0, 0, 255] // Blue
}

fn default_parallel() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: "./input".to_string(),
            output_base_dir: "./output".to_string(),
            target_color_rgb: None,
            max_color_diff: MAX_COLOR_DIFF,
            min_region_size: MIN_REGION,
            paint_color_rgb: [0, 0, 255],
            resize_dimensions: None,
            gui_resize_dimensions: None,
            recolor_seed: None,
            use_parallel: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CamPaintError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            CamPaintError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Check that the configured values are usable before processing starts
    pub fn validate(&self) -> Result<()> {
        if self.input_path.is_empty() {
            return Err(CamPaintError::Config("input_path must not be empty".to_string()));
        }

        if self.output_base_dir.is_empty() {
            return Err(CamPaintError::Config("output_base_dir must not be empty".to_string()));
        }

        if self.max_color_diff < 1 || self.max_color_diff > 255 {
            return Err(CamPaintError::Config(format!(
                "max_color_diff must be between 1 and 255, got {}",
                self.max_color_diff
            )));
        }

        if let Some(dimensions) = self.resize_dimensions {
            if dimensions[0] == 0 || dimensions[1] == 0 {
                return Err(CamPaintError::Config(
                    "resize_dimensions must be at least 1x1".to_string(),
                ));
            }
        }

        if let Some(dimensions) = self.gui_resize_dimensions {
            if dimensions[0] == 0 || dimensions[1] == 0 {
                return Err(CamPaintError::Config(
                    "gui_resize_dimensions must be at least 1x1".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Write the configuration back out as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            CamPaintError::Config(format!("Failed to serialize configuration: {}", e))
        })?;

        fs::write(path.as_ref(), content).map_err(CamPaintError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        input_path = "./frames"
        output_base_dir = "./out"
    "#;

    #[test]
    fn minimal_file_gets_the_documented_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.max_color_diff, 20);
        assert_eq!(config.min_region_size, 50);
        assert_eq!(config.paint_color_rgb, [0, 0, 255]);
        assert!(config.target_color_rgb.is_none());
        assert!(config.recolor_seed.is_none());
        assert!(config.use_parallel);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            input_path = "./frames"
            output_base_dir = "./out"
            max_color_diff = 35
            min_region_size = 10
            target_color_rgb = [10, 200, 30]
            recolor_seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.max_color_diff, 35);
        assert_eq!(config.min_region_size, 10);
        assert_eq!(config.target_color_rgb, Some([10, 200, 30]));
        assert_eq!(config.recolor_seed, Some(42));
    }

    #[test]
    fn validate_rejects_out_of_range_tolerance() {
        let mut config = Config::default();
        config.max_color_diff = 0;
        assert!(config.validate().is_err());
        config.max_color_diff = 256;
        assert!(config.validate().is_err());
        config.max_color_diff = 255;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_resize_dimensions() {
        let mut config = Config::default();
        config.resize_dimensions = Some([0, 100]);
        assert!(config.validate().is_err());
        config.resize_dimensions = Some([640, 480]);
        assert!(config.validate().is_ok());
    }
}
