use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::pipeline::ExtractOptions;
use crate::scan::ScanProfile;

/// Dataset profile file.
///
/// ```toml
/// [scan]
/// coordinate_offset = 86
/// latitude_skip = 2
/// point_advance = 4
///
/// [progress]
/// report_every = 100000
/// ```
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub scan: ScanProfile,
    pub progress: ExtractOptions,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read profile file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse profile file")?;
        if config.progress.report_every == 0 {
            anyhow::bail!("progress.report_every must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.scan, ScanProfile::default());
        assert_eq!(config.progress, ExtractOptions::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [scan]
            coordinate_offset = 88
            latitude_skip = 1
            point_advance = 3

            [progress]
            report_every = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.scan.coordinate_offset, 88);
        assert_eq!(config.scan.latitude_skip, 1);
        assert_eq!(config.scan.point_advance, 3);
        assert_eq!(config.progress.report_every, 5000);
    }

    #[test]
    fn test_zero_cadence_rejected() {
        assert!(Config::from_toml("[progress]\nreport_every = 0").is_err());
    }

    #[test]
    fn test_bad_type_rejected() {
        assert!(Config::from_toml("[scan]\ncoordinate_offset = \"86\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("profile.toml");
        fs::write(&path, "[scan]\ncoordinate_offset = 90\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.scan.coordinate_offset, 90);

        assert!(Config::load_from_file(dir.path().join("missing.toml")).is_err());
    }
}
