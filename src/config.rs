use crate::core::ScoringParams;
use crate::core::score::{LTV_CAC_STANDARD_THRESHOLD, LTV_CAC_STRICT_THRESHOLD};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "ratemystartup.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub scoring: ScoringConfig,
    pub store: StoreConfig,
}

impl Config {
    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            ltv_cac_threshold: self.scoring.ltv_cac_policy.threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub default_user: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            json: false,
            default_user: "local".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub ltv_cac_policy: LtvCacPolicy,
}

/// Which LTV/CAC ratio the growth scorer treats as healthy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LtvCacPolicy {
    /// 3:1
    #[default]
    Standard,
    /// 5:1
    Strict,
}

impl LtvCacPolicy {
    pub fn threshold(self) -> f64 {
        match self {
            Self::Standard => LTV_CAC_STANDARD_THRESHOLD,
            Self::Strict => LTV_CAC_STRICT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".ratemystartup/submissions"),
        }
    }
}

/// `--config` wins and must exist; otherwise `./ratemystartup.toml` is used
/// when present.
fn resolve_config_path(cli_config_path: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match cli_config_path {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => bail!(
            "no ratemystartup config at {} (given via --config)",
            path.display()
        ),
        None => {
            let local_path = cwd.join(CONFIG_FILE_NAME);
            Ok(local_path.is_file().then_some(local_path))
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    let source = resolve_config_path(cli_config_path, cwd)?;
    let config = match &source {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };

    Ok(LoadedConfig { config, source })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "{} already exists; edit it or remove it before running init",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content)
        .with_context(|| format!("could not write scoring config to {}", path.display()))
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("could not render the default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read config {}", path.display()))?;
    toml::from_str::<Config>(&content).with_context(|| {
        format!(
            "invalid [general]/[scoring]/[store] settings in {}",
            path.display()
        )
    })
}
