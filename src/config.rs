/*
 * This file is part of Smcstat.
 *
 * Copyright (C) 2025 Smcstat contributors
 *
 * Smcstat is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Smcstat is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Smcstat. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use smc_error::{Result, SmcError};
use tracing::debug;

use crate::aggregate::{AggregatorOptions, ErrorPolicy, DEFAULT_SENTINELS};

fn default_sentinels() -> Vec<f32> { DEFAULT_SENTINELS.to_vec() }

fn default_absolute_values() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// What to do when a key cannot be read or decoded.
    #[serde(default)]
    pub policy: ErrorPolicy,
    /// Decoded values that mean "no reading".
    #[serde(default = "default_sentinels")]
    pub sentinels: Vec<f32>,
    /// Report magnitudes instead of signed values.
    #[serde(default = "default_absolute_values")]
    pub absolute_values: bool,
    /// Optional key capture to read instead of the live controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            policy: ErrorPolicy::default(),
            sentinels: default_sentinels(),
            absolute_values: default_absolute_values(),
            snapshot: None,
        }
    }
}

impl Settings {
    pub fn aggregator_options(&self) -> AggregatorOptions {
        AggregatorOptions {
            policy: self.policy,
            sentinels: self.sentinels.clone(),
            absolute_values: self.absolute_values,
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("smcstat").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("smcstat")
            .join("config.json");
    }
    PathBuf::from("/etc/smcstat/config.json")
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SmcError::FileRead { path: path.to_path_buf(), source });
        }
    };
    let settings: Settings = serde_json::from_str(&data)?;
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn load_settings() -> Result<Settings> {
    load_settings_from(&config_path())
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    validate_settings(settings)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&config_path(), settings)
}

pub fn validate_settings(settings: &Settings) -> Result<()> {
    if let Some(bad) = settings.sentinels.iter().find(|v| !v.is_finite()) {
        return Err(SmcError::config("sentinels", format!("{} is not a finite value", bad)));
    }
    if let Some(path) = &settings.snapshot {
        if path.as_os_str().is_empty() {
            return Err(SmcError::config("snapshot", "path must not be empty"));
        }
    }
    Ok(())
}
