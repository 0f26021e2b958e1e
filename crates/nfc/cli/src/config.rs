//! Layered configuration for `nfc-gen`

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `NFC_GEN_FORMAT=table`
pub(crate) const ENV_PREFIX: &str = "NFC_GEN_";

/// File name looked up in the config directory when no `--config` is given
pub(crate) const CONFIG_FILE: &str = "nfc-gen.toml";

/// How a generated image is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Header followed by the whole memory as one hex string
    #[default]
    Hex,
    /// Header followed by one indexed row per page or block
    Table,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Output format used when `--format` is absent
    pub(crate) format: OutputFormat,
    /// Fixed RNG seed used when `--seed` is absent
    pub(crate) seed: Option<u64>,
    /// Generator used when none is named on the command line
    pub(crate) generator: Option<String>,
}

impl Config {
    /// Defaults, then the TOML file, then `NFC_GEN_*` variables
    pub(crate) fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub(crate) fn from_figment(figment: Figment) -> eyre::Result<Self> {
        Ok(figment.extract()?)
    }
}

/// Returns `~/.nxm/nfc-gen.toml`, or `nfc-gen.toml` in the working directory when no
/// home directory is known
pub(crate) fn default_config_path() -> PathBuf {
    std::env::home_dir()
        .map(|home| home.join(".nxm").join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub(crate) fn load_config(path: Option<&Path>) -> eyre::Result<Config> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);
    tracing::debug!(path = %path.display(), "loading config");
    Config::from_figment(Config::figment(&path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(Some(Path::new("/nonexistent/nfc-gen.toml"))).unwrap();
        assert_eq!(config.format, OutputFormat::Hex);
        assert_eq!(config.generator, None);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(
            r#"
            format = "table"
            seed = 42
            generator = "ntag215"
            "#,
        ));
        let config = Config::from_figment(figment).unwrap();
        assert_eq!(
            config,
            Config {
                format: OutputFormat::Table,
                seed: Some(42),
                generator: Some("ntag215".to_string()),
            }
        );
    }

    #[test]
    fn test_partial_toml() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string("seed = 7"));
        let config = Config::from_figment(figment).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.format, OutputFormat::Hex);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string(r#"format = "binary""#));
        assert!(Config::from_figment(figment).is_err());
    }
}
