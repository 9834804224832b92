//! Process settings.
//!
//! This module provides [`Settings`], read once at startup from
//! environment variables and then shared read-only.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;
use url::Url;

use crate::error::{DeskError, DeskResult};
use crate::models::ReferenceKind;

/// Inbound shared secret used when `API_KEY` is unset.
pub const DEFAULT_API_KEY: &str = "PERSONAL_API_KEY";

/// Placeholder that must never be used as the regulator credential.
pub const FMCSA_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

/// Default root of the regulator carrier API.
pub const DEFAULT_FMCSA_API_BASE: &str = "https://mobile.fmcsa.dot.gov/qc/services/carriers";

/// Default dataset location, relative to the working directory.
pub const DEFAULT_LOADS_PATH: &str = "loads.csv";

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Startup configuration for the service.
///
/// Custom `Debug` redacts both secrets.
///
/// # Variables
///
/// | Variable | Default |
/// |---|---|
/// | `API_KEY` | `PERSONAL_API_KEY` |
/// | `FMCSA_API_KEY` | required |
/// | `FMCSA_API_BASE` | `https://mobile.fmcsa.dot.gov/qc/services/carriers` |
/// | `LOADS_PATH` | `loads.csv` |
/// | `LOAD_REFERENCE_KIND` | `string` |
/// | `BIND_ADDRESS` | `0.0.0.0:8080` |
#[derive(Clone)]
pub struct Settings {
    /// Shared secret expected in the `x-api-key` header.
    pub api_key: String,
    /// Credential for the regulator API.
    pub fmcsa_api_key: String,
    /// Root of the regulator carrier API.
    pub fmcsa_api_base: Url,
    /// Path of the load dataset.
    pub loads_path: PathBuf,
    /// Key schema of the dataset's reference-number column.
    pub reference_kind: ReferenceKind,
    /// Address the HTTP server binds to.
    pub bind_address: SocketAddr,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"[REDACTED]")
            .field("fmcsa_api_key", &"[REDACTED]")
            .field("fmcsa_api_base", &self.fmcsa_api_base.as_str())
            .field("loads_path", &self.loads_path)
            .field("reference_kind", &self.reference_kind)
            .field("bind_address", &self.bind_address)
            .finish()
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use freight_desk::config::Settings;
    ///
    /// let settings = Settings::from_env()?;
    /// println!("Serving on {}", settings.bind_address);
    /// # Ok::<(), freight_desk::error::DeskError>(())
    /// ```
    pub fn from_env() -> DeskResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    ///
    /// # Returns
    ///
    /// Returns the settings, or an error if:
    /// - `FMCSA_API_KEY` is unset, blank, or the `YOUR_API_KEY` placeholder
    /// - `API_KEY` is set but blank
    /// - `FMCSA_API_BASE`, `LOAD_REFERENCE_KIND` or `BIND_ADDRESS` does not parse
    pub fn from_lookup<F>(lookup: F) -> DeskResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fmcsa_api_key = lookup("FMCSA_API_KEY")
            .filter(|key| !key.trim().is_empty() && key != FMCSA_KEY_PLACEHOLDER)
            .ok_or_else(|| DeskError::ConfigMissing {
                var: "FMCSA_API_KEY".to_string(),
            })?;

        let api_key = lookup("API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string());
        if api_key.is_empty() {
            return Err(DeskError::ConfigInvalid {
                var: "API_KEY".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if api_key == DEFAULT_API_KEY {
            warn!("API_KEY is not set; inbound requests are checked against the default key");
        }

        let base = lookup("FMCSA_API_BASE").unwrap_or_else(|| DEFAULT_FMCSA_API_BASE.to_string());
        let fmcsa_api_base = Url::parse(&base).map_err(|e| DeskError::ConfigInvalid {
            var: "FMCSA_API_BASE".to_string(),
            message: e.to_string(),
        })?;

        let loads_path =
            PathBuf::from(lookup("LOADS_PATH").unwrap_or_else(|| DEFAULT_LOADS_PATH.to_string()));

        let reference_kind = match lookup("LOAD_REFERENCE_KIND") {
            Some(raw) => raw
                .parse::<ReferenceKind>()
                .map_err(|message| DeskError::ConfigInvalid {
                    var: "LOAD_REFERENCE_KIND".to_string(),
                    message,
                })?,
            None => ReferenceKind::default(),
        };

        let bind = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind
            .parse::<SocketAddr>()
            .map_err(|e| DeskError::ConfigInvalid {
                var: "BIND_ADDRESS".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            api_key,
            fmcsa_api_key,
            fmcsa_api_base,
            loads_path,
            reference_kind,
            bind_address,
        })
    }
}
