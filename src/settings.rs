//! # Settings
//!
//! The monitor is configured with one or more TOML files. When several files are
//! given, the later ones override the earlier ones key by key.
//!
//! ## Example
//!
//! ```toml
//! system_name = "Soil Moisture Monitor"
//! stale_after_secs = 300
//!
//! [http]
//! port = 8080
//!
//! [calibration]
//! dry = 3500
//! wet = 1500
//!
//! [services.garden.Serial]
//! path = "/dev/ttyUSB0"
//! ```

use crate::prelude::*;
use crate::services::Service;
use crate::telemetry::Calibration;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use toml::Table;

/// Represents a root settings object.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Settings {
    /// Shown as the system name on the dashboard.
    #[serde(default = "default_system_name")]
    pub system_name: String,

    /// IP address to display. Detected from the outbound interface when not set.
    #[serde(default)]
    pub ip: Option<String>,

    /// The latest reading is considered stale after this number of seconds.
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,

    /// The dashboard reloads itself with this interval.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u32,

    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub calibration: Calibration,

    /// Configured receivers.
    #[serde(default)]
    pub services: HashMap<String, Service>,
}

fn default_system_name() -> String {
    "Soil Moisture Monitor".into()
}

const fn default_stale_after_secs() -> u64 {
    300
}

const fn default_refresh_secs() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            system_name: default_system_name(),
            ip: None,
            stale_after_secs: default_stale_after_secs(),
            refresh_secs: default_refresh_secs(),
            http: HttpSettings::default(),
            calibration: Calibration::default(),
            services: HashMap::new(),
        }
    }
}

/// Web server settings.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HttpSettings {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_address() -> String {
    "0.0.0.0".into()
}

const fn default_port() -> u16 {
    8080
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

/// Read the settings files.
pub fn read(paths: &[PathBuf]) -> Result<Settings> {
    let mut table = Table::new();
    for path in paths {
        debug!("Reading {:?}…", path);
        let contents = fs::read_to_string(path).with_context(|| format!("could not read {:?}", path))?;
        let overrides = contents
            .parse::<Table>()
            .with_context(|| format!("could not parse {:?}", path))?;
        merge(&mut table, overrides);
    }
    let settings: Settings = toml::Value::Table(table).try_into()?;
    settings.validate()?;
    Ok(settings)
}

/// Recursively merges the `overrides` into the `base` table.
fn merge(base: &mut Table, overrides: Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base)), toml::Value::Table(value)) => merge(base, value),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

impl Settings {
    fn validate(&self) -> Result {
        if self.calibration.dry == self.calibration.wet {
            bail!("calibration `dry` and `wet` must differ, both are {}", self.calibration.dry);
        }
        if self.stale_after_secs == 0 {
            bail!("`stale_after_secs` must be positive");
        }
        Ok(())
    }
}
