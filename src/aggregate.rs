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

//! Turning lists of sensor keys into readings.
//!
//! Each pass opens one controller session, queries every key, decodes the
//! sample by its type code, drops sentinel values and collects the rest
//! under the key's description.
//!
//! Two policies are supported. [`ErrorPolicy::Strict`] aborts the pass on the
//! first failing key and returns no readings at all. [`ErrorPolicy::BestEffort`]
//! records the failure and moves on to the next key.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use smc_error::{Result, SmcError};
use tracing::{debug, info, warn};

use crate::conv::{self, RawSample};
use crate::sensors::{self, SensorDescriptor, SensorKind};
use crate::smc::{SmcBackend, SmcSession};

/// `-127` is what the controller reports for an absent probe.
pub const DEFAULT_SENTINELS: [f32; 2] = [0.0, -127.0];

/// Upper bound on a unit count read from the controller (`FNum` is `ui8 `).
pub const MAX_UNITS: u32 = u8::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    #[default]
    Strict,
    BestEffort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatorOptions {
    pub policy: ErrorPolicy,
    /// Values meaning "no reading". Compared with `==`, so `0.0` also matches `-0.0`.
    pub sentinels: Vec<f32>,
    /// Report magnitudes only. Lossy: the sign of negative readings is dropped.
    pub absolute_values: bool,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        AggregatorOptions {
            policy: ErrorPolicy::Strict,
            sentinels: DEFAULT_SENTINELS.to_vec(),
            absolute_values: true,
        }
    }
}

/// Description to value, in insertion order. Re-inserting a description
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingMap {
    entries: Vec<(String, f32)>,
}

impl ReadingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, description: impl Into<String>, value: f32) {
        let description = description.into();
        match self.entries.iter_mut().find(|(d, _)| *d == description) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((description, value)),
        }
    }

    pub fn get(&self, description: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(d, _)| d == description)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(d, v)| (d.as_str(), *v))
    }
}

impl Serialize for ReadingMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (d, v) in &self.entries {
            map.serialize_entry(d, v)?;
        }
        map.end()
    }
}

/// A key skipped under [`ErrorPolicy::BestEffort`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFailure {
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub readings: ReadingMap,
    /// Always empty under [`ErrorPolicy::Strict`].
    pub failures: Vec<KeyFailure>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatteryStatus {
    pub count: u32,
    /// Packed battery info bits, not decoded further.
    pub info: u32,
    pub on_ac_power: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatteryReport {
    pub status: BatteryStatus,
    pub failures: Vec<KeyFailure>,
}

/// A single key with its raw sample and, when it has one, its scalar value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawReading {
    pub key: String,
    /// Type code with trailing padding removed.
    pub type_name: String,
    pub bytes: Vec<u8>,
    pub declared_len: usize,
    pub value: Option<f32>,
}

pub struct Aggregator<'a> {
    backend: &'a dyn SmcBackend,
    options: AggregatorOptions,
}

impl<'a> Aggregator<'a> {
    pub fn new(backend: &'a dyn SmcBackend, options: AggregatorOptions) -> Self {
        Aggregator { backend, options }
    }

    pub fn options(&self) -> &AggregatorOptions {
        &self.options
    }

    /// Read every descriptor once.
    pub fn collect(&self, descriptors: &[SensorDescriptor]) -> Result<Report> {
        let mut session = SmcSession::open(self.backend)?;
        let mut report = Report::default();
        for descriptor in descriptors {
            self.read_into(&mut session, descriptor, &mut report)?;
        }
        self.log_pass(descriptors.len(), &report);
        Ok(report)
    }

    /// Read `count_key` as a unit count, then every template for each unit.
    pub fn collect_indexed(&self, count_key: &str, templates: &[SensorDescriptor]) -> Result<Report> {
        let mut session = SmcSession::open(self.backend)?;
        let mut report = Report::default();

        let count = match read_with(&mut session, count_key, unsigned).and_then(|n| unit_count(count_key, n)) {
            Ok(n) => n,
            Err(e) => {
                self.skip_or_abort(count_key, e, &mut report.failures)?;
                return Ok(report);
            }
        };
        debug!(key = count_key, count, "resolved unit count");

        for index in 0..count {
            for template in templates {
                self.read_into(&mut session, &template.for_index(index), &mut report)?;
            }
        }
        self.log_pass(count as usize * templates.len(), &report);
        Ok(report)
    }

    /// Read one sensor family using the built-in key tables.
    pub fn collect_kind(&self, kind: SensorKind) -> Result<Report> {
        let descriptors = kind.descriptors();
        match kind {
            SensorKind::Fan => self.collect_indexed(sensors::FAN_COUNT, &descriptors),
            _ => self.collect(&descriptors),
        }
    }

    /// Battery count, undecoded info bits and AC power flag.
    pub fn battery(&self) -> Result<BatteryReport> {
        let mut session = SmcSession::open(self.backend)?;
        let mut report = BatteryReport::default();

        match read_with(&mut session, sensors::BATTERY_COUNT, unsigned) {
            Ok(n) => report.status.count = n,
            Err(e) => self.skip_or_abort(sensors::BATTERY_COUNT, e, &mut report.failures)?,
        }
        match read_with(&mut session, sensors::BATTERY_INFO, unsigned) {
            Ok(bits) => report.status.info = bits,
            Err(e) => self.skip_or_abort(sensors::BATTERY_INFO, e, &mut report.failures)?,
        }
        match read_with(&mut session, sensors::BATTERY_POWERED, |s| {
            conv::decode_flag(&s.bytes, s.declared_len)
        }) {
            Ok(on) => report.status.on_ac_power = on,
            Err(e) => self.skip_or_abort(sensors::BATTERY_POWERED, e, &mut report.failures)?,
        }
        Ok(report)
    }

    /// Apply the sentinel filter and sign normalization to a decoded value.
    pub fn filter(&self, value: f32) -> Option<f32> {
        if self.options.sentinels.iter().any(|s| *s == value) {
            return None;
        }
        if self.options.absolute_values {
            Some(value.abs())
        } else {
            Some(value)
        }
    }

    fn read_into(
        &self,
        session: &mut SmcSession,
        descriptor: &SensorDescriptor,
        report: &mut Report,
    ) -> Result<()> {
        match read_with(session, &descriptor.key, conv::decode_scalar) {
            Ok(value) => {
                match self.filter(value) {
                    Some(v) => report.readings.insert(descriptor.description.clone(), v),
                    None => debug!(key = %descriptor.key, value, "no reading"),
                }
                Ok(())
            }
            Err(e) => self.skip_or_abort(&descriptor.key, e, &mut report.failures),
        }
    }

    fn skip_or_abort(&self, key: &str, err: SmcError, failures: &mut Vec<KeyFailure>) -> Result<()> {
        match self.options.policy {
            ErrorPolicy::Strict => Err(err),
            ErrorPolicy::BestEffort => {
                warn!(key, error = %err, decode = err.is_decode_error(), "skipping unreadable key");
                failures.push(KeyFailure {
                    key: key.to_string(),
                    reason: err.to_string(),
                });
                Ok(())
            }
        }
    }

    fn log_pass(&self, queried: usize, report: &Report) {
        info!(
            queried,
            readings = report.readings.len(),
            failures = report.failures.len(),
            "aggregation pass complete"
        );
    }
}

fn unit_count(key: &str, count: u32) -> Result<u32> {
    if count > MAX_UNITS {
        return Err(SmcError::unit_count(key, count, MAX_UNITS));
    }
    Ok(count)
}

fn unsigned(sample: &RawSample) -> Result<u32> {
    conv::decode_unsigned(&sample.bytes, sample.declared_len)
}

fn read_with<T>(
    session: &mut SmcSession,
    key: &str,
    decode: impl FnOnce(&RawSample) -> Result<T>,
) -> Result<T> {
    let sample = session.read_key(key)?;
    decode(&sample)
}

/// Read a single key without filtering.
pub fn read_raw(backend: &dyn SmcBackend, key: &str) -> Result<RawReading> {
    let mut session = SmcSession::open(backend)?;
    let sample = session.read_key(key)?;
    let value = conv::decode_scalar(&sample).ok();
    Ok(RawReading {
        key: key.to_string(),
        type_name: conv::normalize(sample.type_code.as_bytes()),
        bytes: sample.bytes,
        declared_len: sample.declared_len,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeCode;
    use crate::smc::{MockSmcBackend, MockSmcConnection, SmcConnection, KEY_NOT_FOUND};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn code(s: &str) -> TypeCode {
        s.parse().unwrap()
    }

    fn sp78(v: f32) -> RawSample {
        RawSample::new(code("sp78"), ((v * 256.0) as i16).to_be_bytes().to_vec())
    }

    fn flt(v: f32) -> RawSample {
        RawSample::new(code("flt "), v.to_le_bytes().to_vec())
    }

    fn ui8(v: u8) -> RawSample {
        RawSample::new(code("ui8 "), vec![v])
    }

    /// Backend expecting one open and one close, serving `samples` and
    /// failing every other key. Returns a counter of read_key calls.
    fn mock_backend(samples: Vec<(&str, RawSample)>) -> (MockSmcBackend, Arc<AtomicUsize>) {
        let map: HashMap<String, RawSample> = samples
            .into_iter()
            .map(|(k, s)| (k.to_string(), s))
            .collect();
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = reads.clone();

        let mut backend = MockSmcBackend::new();
        backend.expect_open().times(1).return_once(move || {
            let mut conn = MockSmcConnection::new();
            conn.expect_read_key().returning(move |key: &str| {
                counter.fetch_add(1, Ordering::SeqCst);
                map.get(key)
                    .cloned()
                    .ok_or_else(|| SmcError::query_failed(key, KEY_NOT_FOUND))
            });
            conn.expect_close().times(1).return_const(());
            Ok(Box::new(conn) as Box<dyn SmcConnection>)
        });
        (backend, reads)
    }

    fn descriptors(pairs: &[(&str, &str)]) -> Vec<SensorDescriptor> {
        pairs.iter().map(|(k, d)| SensorDescriptor::new(*k, *d)).collect()
    }

    fn best_effort() -> AggregatorOptions {
        AggregatorOptions {
            policy: ErrorPolicy::BestEffort,
            ..AggregatorOptions::default()
        }
    }

    #[test]
    fn test_reading_map_overwrites_in_place() {
        let mut map = ReadingMap::new();
        map.insert("a", 1.0);
        map.insert("b", 2.0);
        map.insert("a", 3.0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(3.0));
        let order: Vec<&str> = map.iter().map(|(d, _)| d).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_reading_map_serializes_as_object() {
        let mut map = ReadingMap::new();
        map.insert("CPU Proximity", 58.5);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"CPU Proximity":58.5}"#);
    }

    #[test]
    fn test_collect_filters_sentinels_and_sign() {
        let (backend, _) = mock_backend(vec![
            ("K001", sp78(-127.0)),
            ("K002", sp78(0.0)),
            ("K003", flt(-0.0)),
            ("K004", sp78(55.0)),
            ("K005", sp78(-55.0)),
        ]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let report = agg
            .collect(&descriptors(&[
                ("K001", "Absent"),
                ("K002", "Zero"),
                ("K003", "Negative Zero"),
                ("K004", "Probe"),
                ("K005", "Probe"),
            ]))
            .unwrap();
        assert_eq!(report.readings.len(), 1);
        assert_eq!(report.readings.get("Probe"), Some(55.0));
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_collect_negative_value_flipped() {
        let (backend, _) = mock_backend(vec![("IC0R", sp78(-1.5)), ("IC0C", sp78(2.0))]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let report = agg
            .collect(&descriptors(&[("IC0R", "CPU Rail"), ("IC0C", "CPU Core")]))
            .unwrap();
        assert_eq!(report.readings.get("CPU Rail"), Some(1.5));
        assert_eq!(report.readings.get("CPU Core"), Some(2.0));
    }

    #[test]
    fn test_collect_keep_sign() {
        let (backend, _) = mock_backend(vec![("IC0R", sp78(-1.5))]);
        let options = AggregatorOptions {
            absolute_values: false,
            ..AggregatorOptions::default()
        };
        let agg = Aggregator::new(&backend, options);
        let report = agg.collect(&descriptors(&[("IC0R", "CPU Rail")])).unwrap();
        assert_eq!(report.readings.get("CPU Rail"), Some(-1.5));
    }

    #[test]
    fn test_collect_custom_sentinels() {
        let (backend, _) = mock_backend(vec![("TC0P", sp78(-1.0)), ("TC0D", sp78(0.0))]);
        let options = AggregatorOptions {
            sentinels: vec![-1.0],
            ..AggregatorOptions::default()
        };
        let agg = Aggregator::new(&backend, options);
        let report = agg
            .collect(&descriptors(&[("TC0P", "CPU Proximity"), ("TC0D", "CPU Die")]))
            .unwrap();
        assert_eq!(report.readings.get("CPU Proximity"), None);
        // 0.0 is no longer a sentinel; abs(0.0) is kept
        assert_eq!(report.readings.get("CPU Die"), Some(0.0));
    }

    #[test]
    fn test_collect_strict_aborts_mid_batch() {
        let (backend, reads) = mock_backend(vec![
            ("K001", sp78(10.0)),
            ("K002", sp78(20.0)),
            ("K004", sp78(40.0)),
            ("K005", sp78(50.0)),
        ]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let result = agg.collect(&descriptors(&[
            ("K001", "One"),
            ("K002", "Two"),
            ("K003", "Three"),
            ("K004", "Four"),
            ("K005", "Five"),
        ]));
        let err = result.unwrap_err();
        assert!(matches!(err, SmcError::HardwareQueryFailed { ref key, .. } if key == "K003"));
        assert_eq!(reads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_collect_strict_aborts_on_decode_error() {
        let (backend, _) = mock_backend(vec![
            ("K001", sp78(10.0)),
            ("K002", RawSample::new(code("sp78"), vec![0x01, 0x02, 0x03])),
        ]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let err = agg
            .collect(&descriptors(&[("K001", "One"), ("K002", "Two")]))
            .unwrap_err();
        assert!(matches!(err, SmcError::InvalidSampleLength { .. }));
    }

    #[test]
    fn test_collect_best_effort_continues() {
        let (backend, reads) = mock_backend(vec![
            ("K001", sp78(10.0)),
            ("K002", RawSample::new(code("hex_"), vec![0x01, 0x02])),
            ("K004", sp78(40.0)),
        ]);
        let agg = Aggregator::new(&backend, best_effort());
        let report = agg
            .collect(&descriptors(&[
                ("K001", "One"),
                ("K002", "Two"),
                ("K003", "Three"),
                ("K004", "Four"),
            ]))
            .unwrap();
        assert_eq!(reads.load(Ordering::SeqCst), 4);
        assert_eq!(report.readings.len(), 2);
        assert_eq!(report.readings.get("Four"), Some(40.0));
        let failed: Vec<&str> = report.failures.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(failed, vec!["K002", "K003"]);
    }

    #[test]
    fn test_collect_open_failure_propagates() {
        let mut backend = MockSmcBackend::new();
        backend
            .expect_open()
            .times(1)
            .returning(|| Err(SmcError::handle_open("AppleSMC", 1)));
        let agg = Aggregator::new(&backend, best_effort());
        let err = agg.collect(&descriptors(&[("TC0P", "CPU")])).unwrap_err();
        assert!(matches!(err, SmcError::HandleOpen { .. }));
    }

    #[test]
    fn test_collect_indexed_fans() {
        let (backend, _) = mock_backend(vec![
            ("FNum", ui8(2)),
            ("F0Ac", flt(1200.0)),
            ("F0Mn", flt(0.0)),
            ("F1Ac", RawSample::new(code("fpe2"), vec![0x1F, 0x40])),
            ("F1Mn", flt(1000.0)),
        ]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let templates = descriptors(&[("F{}Ac", "Fan {} Current Speed"), ("F{}Mn", "Fan {} Minimum Speed")]);
        let report = agg.collect_indexed("FNum", &templates).unwrap();
        assert_eq!(report.readings.len(), 3);
        assert_eq!(report.readings.get("Fan 1 Current Speed"), Some(1200.0));
        assert_eq!(report.readings.get("Fan 1 Minimum Speed"), None);
        assert_eq!(report.readings.get("Fan 2 Current Speed"), Some(2000.0));
        assert_eq!(report.readings.get("Fan 2 Minimum Speed"), Some(1000.0));
    }

    #[test]
    fn test_collect_indexed_zero_units() {
        let (backend, reads) = mock_backend(vec![("FNum", ui8(0))]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let templates = descriptors(&[("F{}Ac", "Fan {} Current Speed")]);
        let report = agg.collect_indexed("FNum", &templates).unwrap();
        assert!(report.readings.is_empty());
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_collect_indexed_missing_count() {
        let (backend, _) = mock_backend(vec![]);
        let templates = descriptors(&[("F{}Ac", "Fan {} Current Speed")]);

        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        assert!(agg.collect_indexed("FNum", &templates).is_err());

        let (backend, _) = mock_backend(vec![]);
        let agg = Aggregator::new(&backend, best_effort());
        let report = agg.collect_indexed("FNum", &templates).unwrap();
        assert!(report.readings.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "FNum");
    }

    #[test]
    fn test_collect_indexed_rejects_oversized_count() {
        // 200000 units from a ui32 count key
        let count = RawSample::new(code("ui32"), vec![0x00, 0x03, 0x0D, 0x40]);
        let templates = descriptors(&[("F{}Ac", "Fan {} Current Speed")]);

        let (backend, reads) = mock_backend(vec![("FNum", count.clone())]);
        let agg = Aggregator::new(&backend, best_effort());
        let report = agg.collect_indexed("FNum", &templates).unwrap();
        assert!(report.readings.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "FNum");
        assert_eq!(reads.load(Ordering::SeqCst), 1);

        let (backend, _) = mock_backend(vec![("FNum", count)]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let err = agg.collect_indexed("FNum", &templates).unwrap_err();
        assert!(matches!(err, SmcError::UnitCountOutOfRange { count: 200_000, max: MAX_UNITS, .. }));
    }

    #[test]
    fn test_collect_indexed_accepts_count_at_limit() {
        let (backend, reads) = mock_backend(vec![("FNum", ui8(u8::MAX))]);
        let agg = Aggregator::new(&backend, best_effort());
        let templates = descriptors(&[("F{}Ac", "Fan {} Current Speed")]);
        let report = agg.collect_indexed("FNum", &templates).unwrap();
        assert_eq!(report.failures.len(), MAX_UNITS as usize);
        assert_eq!(reads.load(Ordering::SeqCst), 1 + MAX_UNITS as usize);
    }

    #[test]
    fn test_options_accessor() {
        let (backend, _) = mock_backend(vec![]);
        let agg = Aggregator::new(&backend, best_effort());
        assert_eq!(agg.options().policy, ErrorPolicy::BestEffort);
        // open is expected once
        let _ = agg.collect(&[]);
    }

    #[test]
    fn test_collect_indexed_strict_fails_on_missing_unit_key() {
        let (backend, _) = mock_backend(vec![("FNum", ui8(2)), ("F0Ac", flt(1200.0))]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let templates = descriptors(&[("F{}Ac", "Fan {} Current Speed")]);
        let err = agg.collect_indexed("FNum", &templates).unwrap_err();
        assert!(matches!(err, SmcError::HardwareQueryFailed { ref key, .. } if key == "F1Ac"));
    }

    #[test]
    fn test_battery() {
        let (backend, _) = mock_backend(vec![
            ("BNum", ui8(1)),
            ("BSIn", RawSample::new(code("hex_"), vec![0x00, 0x07])),
            ("BATP", RawSample::new(code("flag"), vec![0x01])),
        ]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let report = agg.battery().unwrap();
        assert_eq!(
            report.status,
            BatteryStatus { count: 1, info: 7, on_ac_power: true }
        );
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_battery_strict_propagates() {
        let (backend, _) = mock_backend(vec![("BNum", ui8(1))]);
        let agg = Aggregator::new(&backend, AggregatorOptions::default());
        let err = agg.battery().unwrap_err();
        assert!(matches!(err, SmcError::HardwareQueryFailed { ref key, .. } if key == "BSIn"));
    }

    #[test]
    fn test_battery_best_effort_defaults() {
        let (backend, _) = mock_backend(vec![("BATP", RawSample::new(code("flag"), vec![0x00]))]);
        let agg = Aggregator::new(&backend, best_effort());
        let report = agg.battery().unwrap();
        assert_eq!(report.status, BatteryStatus::default());
        let failed: Vec<&str> = report.failures.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(failed, vec!["BNum", "BSIn"]);
    }

    #[test]
    fn test_read_raw() {
        let (backend, _) = mock_backend(vec![("F0Ac", flt(1234.5))]);
        let raw = read_raw(&backend, "F0Ac").unwrap();
        assert_eq!(raw.type_name, "flt");
        assert_eq!(raw.declared_len, 4);
        assert_eq!(raw.value, Some(1234.5));
    }

    #[test]
    fn test_read_raw_undecodable() {
        let (backend, _) = mock_backend(vec![("BSIn", RawSample::new(code("hex_"), vec![0x00, 0x07]))]);
        let raw = read_raw(&backend, "BSIn").unwrap();
        assert_eq!(raw.type_name, "hex_");
        assert_eq!(raw.value, None);
    }
}
