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

//! Access to the system management controller.
//!
//! The controller is reached through a handle that is opened, queried key by
//! key, and closed. [`SmcSession`] owns an open connection and closes it when
//! dropped, so every exit path of an aggregation pass releases the handle.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use smc_error::{Result, SmcError};
use tracing::{debug, trace};

use crate::conv::RawSample;
use crate::registry::TypeCode;

/// IOKit service name of the controller.
pub const APPLE_SMC: &str = "AppleSMC";

/// Status code reported by the controller for an absent key.
pub const KEY_NOT_FOUND: u32 = 0x84;

/// Status code used when the handle itself cannot be opened.
pub const NOT_FOUND: u32 = 0xe00002f0;

/// Something that can open a connection to the controller.
#[cfg_attr(test, mockall::automock)]
pub trait SmcBackend {
    fn open(&self) -> Result<Box<dyn SmcConnection>>;
}

/// An open controller handle.
#[cfg_attr(test, mockall::automock)]
pub trait SmcConnection {
    /// Read the type code and bytes of a key.
    fn read_key(&mut self, key: &str) -> Result<RawSample>;

    /// Release the handle. Called exactly once by [`SmcSession`].
    fn close(&mut self);
}

/// Scoped controller handle; closes the connection on drop.
pub struct SmcSession {
    conn: Box<dyn SmcConnection>,
}

impl SmcSession {
    pub fn open(backend: &dyn SmcBackend) -> Result<Self> {
        let conn = backend.open()?;
        debug!("SMC handle opened");
        Ok(SmcSession { conn })
    }

    pub fn read_key(&mut self, key: &str) -> Result<RawSample> {
        let sample = self.conn.read_key(key)?;
        trace!(key, type_code = %sample.type_code, len = sample.declared_len, "read key");
        Ok(sample)
    }
}

impl Drop for SmcSession {
    fn drop(&mut self) {
        self.conn.close();
        debug!("SMC handle closed");
    }
}

/// One key in a capture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedKey {
    #[serde(rename = "type")]
    pub type_code: TypeCode,
    pub bytes: Vec<u8>,
    /// Declared data size; defaults to the number of bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl CapturedKey {
    fn to_sample(&self) -> RawSample {
        let len = self.size.unwrap_or(self.bytes.len());
        RawSample::with_len(self.type_code, self.bytes.clone(), len)
    }
}

fn default_service() -> String {
    APPLE_SMC.to_string()
}

/// A recorded set of controller keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Capture {
    #[serde(default = "default_service")]
    pub service: String,
    #[serde(default)]
    pub keys: BTreeMap<String, CapturedKey>,
}

impl Capture {
    pub fn insert(&mut self, key: impl Into<String>, sample: &RawSample) {
        self.keys.insert(
            key.into(),
            CapturedKey {
                type_code: sample.type_code,
                bytes: sample.bytes.clone(),
                size: (sample.declared_len != sample.bytes.len()).then_some(sample.declared_len),
            },
        );
    }
}

/// Backend that replays a capture file instead of talking to hardware.
///
/// The file is re-read on every `open`, mirroring a fresh handle per pass.
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    path: PathBuf,
}

impl SnapshotBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotBackend { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Capture> {
        let data = fs::read_to_string(&self.path).map_err(|source| SmcError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl SmcBackend for SnapshotBackend {
    fn open(&self) -> Result<Box<dyn SmcConnection>> {
        let capture = self.load().map_err(|e| {
            debug!(path = %self.path.display(), error = %e, "capture unavailable");
            SmcError::handle_open(APPLE_SMC, NOT_FOUND)
        })?;
        Ok(Box::new(CaptureConnection { capture }))
    }
}

struct CaptureConnection {
    capture: Capture,
}

impl SmcConnection for CaptureConnection {
    fn read_key(&mut self, key: &str) -> Result<RawSample> {
        self.capture
            .keys
            .get(key)
            .map(CapturedKey::to_sample)
            .ok_or_else(|| SmcError::query_failed(key, KEY_NOT_FOUND))
    }

    fn close(&mut self) {}
}
