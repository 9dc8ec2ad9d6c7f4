use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use salonbook_inventory::LedgerConfig;
use salonbook_observability::LoggingConfig;
use salonbook_scheduling::{ConfigError, SchedulingConfig};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_VAR: &str = "SALONBOOK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "salonbook.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse settings file {path:?}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("invalid scheduling settings: {0}")]
    Invalid(#[from] ConfigError),
}

/// Where the effective settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    File(PathBuf),
    /// The file was absent; built-in defaults apply.
    Defaults(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scheduling: SchedulingConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
    /// Load the demo appointments and stock items at startup.
    pub seed_demo_data: bool,
}

impl Settings {
    /// `$SALONBOOK_CONFIG`, or `salonbook.toml` in the working directory.
    pub fn config_path() -> PathBuf {
        env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.scheduling.validate()?;
        Ok(settings)
    }

    /// Load and validate settings; a missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<(Self, SettingsSource), SettingsError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Ok((Self::from_toml(&contents, path)?, SettingsSource::File(path.to_path_buf()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok((Self::default(), SettingsSource::Defaults(path.to_path_buf())))
            }
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
