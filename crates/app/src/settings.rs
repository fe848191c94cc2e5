//! Settings for the command line front end.
//!
//! Values come from an optional TOML file (`config/divido.toml` unless
//! `--config` points elsewhere) and from `DIVIDO_*` environment variables,
//! e.g. `DIVIDO_LEVEL=debug` or `DIVIDO_DEFAULT_MODE=weighted`.
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use engine::{Currency, SplitMode};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/divido";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub level: String,
    pub currency: Currency,
    pub default_mode: SplitMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            currency: Currency::Eur,
            default_mode: SplitMode::Equal,
        }
    }
}

impl Settings {
    /// Loads settings; an explicit `path` must exist, the default one may not.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file = File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(path.is_some());
        let builder = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("DIVIDO"));
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn empty_sources_fall_back_to_defaults() {
        let settings = Settings::build(Config::builder()).unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn reads_toml_values() {
        let toml = r#"
            level = "debug"
            currency = "CHF"
            default_mode = "weighted"
        "#;
        let builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));

        let settings = Settings::build(builder).unwrap();

        assert_eq!(settings.level, "debug");
        assert_eq!(settings.currency, Currency::Chf);
        assert_eq!(settings.default_mode, SplitMode::Weighted);
    }

    #[test]
    fn rejects_unknown_mode() {
        let builder = Config::builder()
            .add_source(File::from_str(r#"default_mode = "random""#, FileFormat::Toml));

        assert!(Settings::build(builder).is_err());
    }
}
