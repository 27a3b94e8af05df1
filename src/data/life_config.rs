use crate::data::persistence::{get_data_dir, Persistable};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BIRTH_YEAR: i32 = 1999;
pub const DEFAULT_BIRTH_MONTH: u32 = 8;

/// Birth date the grid is computed from.
///
/// `birth_year` is `None` when the year could not be parsed from user input.
/// Every derived value treats that as "unknown" and the grid renders empty.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct LifeConfig {
    pub birth_year: Option<i32>,
    /// 1-based month, 1 = January.
    pub birth_month: u32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        LifeConfig {
            birth_year: Some(DEFAULT_BIRTH_YEAR),
            birth_month: DEFAULT_BIRTH_MONTH,
        }
    }
}

/// Reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct ConfigFile {
    #[serde(default)]
    settings: LifeConfig,
}

impl Persistable for ConfigFile {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl LifeConfig {
    pub fn new(birth_year: Option<i32>, birth_month: u32) -> Self {
        LifeConfig {
            birth_year,
            birth_month,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&get_data_dir()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let config = ConfigFile::load_from(dir)?.settings.validated()?;
        log::debug!(
            "loaded birth date {:?}/{} from {}",
            config.birth_year,
            config.birth_month,
            dir.display()
        );
        Ok(config)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        ConfigFile { settings: *self }.save_to(dir)
    }

    fn validated(self) -> Result<Self> {
        if !(1..=12).contains(&self.birth_month) {
            bail!(
                "birth_month must be between 1 and 12, got {}",
                self.birth_month
            );
        }
        Ok(self)
    }

    /// Zero-based birth month, 0 = January.
    pub fn birth_month0(&self) -> u32 {
        self.birth_month.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_august_1999() {
        let c = LifeConfig::default();
        assert_eq!(c.birth_year, Some(1999));
        assert_eq!(c.birth_month, 8);
        assert_eq!(c.birth_month0(), 7);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(LifeConfig::load_from(tmp.path()).unwrap(), LifeConfig::default());
    }

    #[test]
    fn test_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let c = LifeConfig::new(Some(1985), 3);
        c.save_to(tmp.path()).unwrap();
        assert_eq!(LifeConfig::load_from(tmp.path()).unwrap(), c);
    }

    #[test]
    fn test_missing_settings_key_uses_default() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.yaml"), "other: 1\n").unwrap();
        assert_eq!(LifeConfig::load_from(tmp.path()).unwrap(), LifeConfig::default());
    }

    #[test]
    fn test_missing_field_falls_back_per_field() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.yaml"), "settings:\n  birth_month: 2\n").unwrap();
        let c = LifeConfig::load_from(tmp.path()).unwrap();
        assert_eq!(c.birth_year, Some(1999));
        assert_eq!(c.birth_month, 2);
    }

    #[test]
    fn test_null_year_loads_as_unknown() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.yaml"),
            "settings:\n  birth_year: null\n  birth_month: 5\n",
        )
        .unwrap();
        assert_eq!(LifeConfig::load_from(tmp.path()).unwrap().birth_year, None);
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.yaml"), "settings:\n  birth_month: 13\n").unwrap();
        let err = LifeConfig::load_from(tmp.path()).unwrap_err();
        assert!(format!("{err}").contains("birth_month"));
    }
}
