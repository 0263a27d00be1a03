//! Access service configuration.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tuning for [`crate::MetaModelAccess`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Upper bound for [`crate::MetaModelAccess::model_when_ready`].
    pub wait_timeout_ms: u64,
    /// How often a waiting caller re-checks readiness when nothing is published.
    pub retry_interval_ms: u64,
    /// Buffered models per listener before slow listeners start lagging.
    pub listener_capacity: usize,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: 30_000,
            retry_interval_ms: 50,
            listener_capacity: 16,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    access: AccessConfig,
}

impl AccessConfig {
    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    #[must_use]
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms.max(1))
    }

    /// Parses the `[access]` table of a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ConfigFile>(contents).map(|file| file.access)
    }

    /// Reads the `[access]` table from `path`. Missing, unreadable and
    /// invalid files all give the defaults; only the latter two are warned.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no access settings file");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "access settings unreadable");
                return Self::default();
            }
        };
        match Self::from_toml_str(&contents) {
            Ok(config) => {
                info!(
                    path = %path.display(),
                    wait_timeout_ms = config.wait_timeout_ms,
                    retry_interval_ms = config.retry_interval_ms,
                    "access settings loaded"
                );
                config
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "access settings invalid, keeping defaults"
                );
                Self::default()
            }
        }
    }
}
