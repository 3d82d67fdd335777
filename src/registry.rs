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

//! SMC type codes and the table of known fixed-point encodings.
//!
//! Every SMC key reports a four-character type tag alongside its bytes.
//! The tag picks the [`DecodingRule`]; for the `fp*`/`sp*` families it also
//! picks the scaling divisor and signedness from [`FIXED_POINT_TYPES`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use smc_error::SmcError;

/// Four-character ASCII type tag, compared byte for byte (`"flt "` keeps its space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeCode([u8; 4]);

impl TypeCode {
    pub const fn new(raw: [u8; 4]) -> Self {
        TypeCode(raw)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl FromStr for TypeCode {
    type Err = SmcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.is_ascii() {
            return Err(SmcError::InvalidTypeCode(s.to_string()));
        }
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(TypeCode(raw))
    }
}

impl TryFrom<String> for TypeCode {
    type Error = SmcError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TypeCode> for String {
    fn from(code: TypeCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scaling for a 16-bit fixed-point field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointSpec {
    pub divisor: f32,
    pub signed: bool,
}

const fn unsigned(divisor: f32) -> FixedPointSpec {
    FixedPointSpec { divisor, signed: false }
}

const fn signed(divisor: f32) -> FixedPointSpec {
    FixedPointSpec { divisor, signed: true }
}

/// The fixed-point encodings defined by the SMC. The two hex digits after the
/// prefix are the integer and fraction bit counts.
pub const FIXED_POINT_TYPES: [(&str, FixedPointSpec); 23] = [
    ("fp1f", unsigned(32768.0)),
    ("fp2e", unsigned(16384.0)),
    ("fp3d", unsigned(8192.0)),
    ("fp4c", unsigned(4096.0)),
    ("fp5b", unsigned(2048.0)),
    ("fp6a", unsigned(1024.0)),
    ("fp79", unsigned(512.0)),
    ("fp88", unsigned(256.0)),
    ("fpa6", unsigned(64.0)),
    ("fpc4", unsigned(16.0)),
    ("fpe2", unsigned(4.0)),
    ("sp1e", signed(16384.0)),
    ("sp2d", signed(8192.0)),
    ("sp3c", signed(4096.0)),
    ("sp4b", signed(2048.0)),
    ("sp5a", signed(1024.0)),
    ("sp69", signed(512.0)),
    ("sp78", signed(256.0)),
    ("sp87", signed(128.0)),
    ("sp96", signed(64.0)),
    ("spa5", signed(32.0)),
    ("spb4", signed(16.0)),
    ("spf0", signed(1.0)),
];

pub const FLOAT_TYPE: TypeCode = TypeCode::new(*b"flt ");
pub const FLAG_TYPE: TypeCode = TypeCode::new(*b"flag");
pub const UNSIGNED_TYPES: [TypeCode; 3] = [
    TypeCode::new(*b"ui8 "),
    TypeCode::new(*b"ui16"),
    TypeCode::new(*b"ui32"),
];

lazy_static! {
    static ref FIXED_POINT: HashMap<TypeCode, FixedPointSpec> = FIXED_POINT_TYPES
        .iter()
        .filter_map(|(code, spec)| code.parse::<TypeCode>().ok().map(|c| (c, *spec)))
        .collect();
}

/// Look up a fixed-point encoding. Codes outside the table yield `None`.
pub fn lookup(code: &TypeCode) -> Option<FixedPointSpec> {
    FIXED_POINT.get(code).copied()
}

/// How the bytes of a sample are turned into a scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodingRule {
    FixedPoint(FixedPointSpec),
    Float,
    UnsignedInteger,
    Flag,
}

impl DecodingRule {
    /// Select the rule for a type code, or `None` when the code has no scalar
    /// interpretation (e.g. `hex_` or `{bst` record types).
    pub fn for_type(code: &TypeCode) -> Option<DecodingRule> {
        if let Some(spec) = lookup(code) {
            return Some(DecodingRule::FixedPoint(spec));
        }
        if *code == FLOAT_TYPE {
            Some(DecodingRule::Float)
        } else if *code == FLAG_TYPE {
            Some(DecodingRule::Flag)
        } else if UNSIGNED_TYPES.contains(code) {
            Some(DecodingRule::UnsignedInteger)
        } else {
            None
        }
    }
}
