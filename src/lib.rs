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

//! Smcstat - decode system management controller sensor telemetry
//!
//! The controller reports every key as a four-character type code plus a
//! short byte buffer. This library maps type codes to decoding rules,
//! decodes fixed-point, float, integer and flag samples, and aggregates
//! whole sensor families into description-to-value maps.

pub mod aggregate;
pub mod config;
pub mod conv;
pub mod logger;
pub mod registry;
pub mod sensors;
pub mod smc;

pub use aggregate::{
    read_raw, Aggregator, AggregatorOptions, BatteryReport, BatteryStatus, ErrorPolicy,
    KeyFailure, RawReading, ReadingMap, Report,
};
pub use conv::{
    decode_fixed_point, decode_flag, decode_float, decode_scalar, decode_unsigned,
    decode_unsigned_as_float, normalize, RawSample,
};
pub use registry::{DecodingRule, FixedPointSpec, TypeCode};
pub use sensors::{SensorDescriptor, SensorKind};
pub use smc::{SmcBackend, SmcConnection, SmcSession, SnapshotBackend};
pub use smc_error::{Result, SmcError};
