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

//! Decoders for raw SMC sample bytes.
//!
//! Byte order is not uniform across encodings: fixed-point and integer
//! fields are big-endian, `flt ` fields are little-endian.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use smc_error::{Result, SmcError};
use tracing::trace;

use crate::registry::{self, DecodingRule, TypeCode, FLAG_TYPE, FLOAT_TYPE};

/// Bytes and type tag returned by the controller for a single key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSample {
    pub type_code: TypeCode,
    pub bytes: Vec<u8>,
    /// Number of meaningful bytes as reported by the controller.
    pub declared_len: usize,
}

impl RawSample {
    pub fn new(type_code: TypeCode, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let declared_len = bytes.len();
        RawSample { type_code, bytes, declared_len }
    }

    pub fn with_len(type_code: TypeCode, bytes: impl Into<Vec<u8>>, declared_len: usize) -> Self {
        RawSample { type_code, bytes: bytes.into(), declared_len }
    }
}

/// Return the first `declared_len` bytes after checking the length against
/// what the encoding allows and what the buffer actually holds.
fn field<'a>(
    type_code: &str,
    bytes: &'a [u8],
    declared_len: usize,
    allowed: RangeInclusive<usize>,
) -> Result<&'a [u8]> {
    if !allowed.contains(&declared_len) || declared_len > bytes.len() {
        let expected = if allowed.start() == allowed.end() {
            allowed.start().to_string()
        } else {
            format!("{}..={}", allowed.start(), allowed.end())
        };
        return Err(SmcError::invalid_length(type_code, expected, declared_len));
    }
    Ok(&bytes[..declared_len])
}

/// Decode an `fp*`/`sp*` sample: big-endian 16-bit value divided by the
/// registry divisor, two's complement for the signed family.
pub fn decode_fixed_point(code: &TypeCode, bytes: &[u8], declared_len: usize) -> Result<f32> {
    let spec = registry::lookup(code).ok_or_else(|| SmcError::unknown_type(code.as_str()))?;
    let b = field(code.as_str(), bytes, declared_len, 2..=2)?;
    let raw = u16::from_be_bytes([b[0], b[1]]);
    let value = if spec.signed {
        f32::from(raw as i16)
    } else {
        f32::from(raw)
    };
    Ok(value / spec.divisor)
}

/// Decode a `flt ` sample: little-endian IEEE-754 single precision, unscaled.
pub fn decode_float(bytes: &[u8], declared_len: usize) -> Result<f32> {
    let b = field(FLOAT_TYPE.as_str(), bytes, declared_len, 4..=4)?;
    Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Decode a big-endian unsigned integer of 1 to 4 bytes (`ui8 `, `ui16`, `ui32`).
pub fn decode_unsigned(bytes: &[u8], declared_len: usize) -> Result<u32> {
    let b = field("ui*", bytes, declared_len, 1..=4)?;
    Ok(b.iter().fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte)))
}

/// Unsigned integer widened to f32. Precision is lost above 2^24.
pub fn decode_unsigned_as_float(bytes: &[u8], declared_len: usize) -> Result<f32> {
    decode_unsigned(bytes, declared_len).map(|v| v as f32)
}

/// Decode a single-byte flag; any nonzero value is true.
pub fn decode_flag(bytes: &[u8], declared_len: usize) -> Result<bool> {
    let b = field(FLAG_TYPE.as_str(), bytes, declared_len, 1..=1)?;
    Ok(b[0] != 0)
}

/// Turn a fixed-size character buffer into text, dropping trailing NULs and spaces.
pub fn normalize(buffer: &[u8]) -> String {
    String::from_utf8_lossy(buffer)
        .trim_end_matches(['\0', ' '])
        .to_string()
}

/// Decode any sample with a scalar interpretation, choosing the rule from its type code.
pub fn decode_scalar(sample: &RawSample) -> Result<f32> {
    let rule = DecodingRule::for_type(&sample.type_code)
        .ok_or_else(|| SmcError::unknown_type(sample.type_code.as_str()))?;
    trace!(
        type_code = %sample.type_code,
        bytes = ?sample.bytes,
        len = sample.declared_len,
        "decoding sample"
    );
    let (bytes, len) = (sample.bytes.as_slice(), sample.declared_len);
    match rule {
        DecodingRule::FixedPoint(_) => decode_fixed_point(&sample.type_code, bytes, len),
        DecodingRule::Float => decode_float(bytes, len),
        DecodingRule::UnsignedInteger => decode_unsigned_as_float(bytes, len),
        DecodingRule::Flag => decode_flag(bytes, len).map(|on| if on { 1.0 } else { 0.0 }),
    }
}
