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

//! Known SMC keys and their human-facing descriptions.
//!
//! Fan keys are templates: `{}` in the key is replaced with the zero-based
//! fan index and `{}` in the description with the one-based index.

use serde::{Deserialize, Serialize};

/// Number of fans (`ui8 `).
pub const FAN_COUNT: &str = "FNum";
/// Number of batteries (`ui8 `).
pub const BATTERY_COUNT: &str = "BNum";
/// AC power present (`flag`).
pub const BATTERY_POWERED: &str = "BATP";
/// Packed battery info (`hex_`), left undecoded.
pub const BATTERY_INFO: &str = "BSIn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorDescriptor {
    /// Key passed to the controller.
    pub key: String,
    pub description: String,
}

impl SensorDescriptor {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        SensorDescriptor {
            key: key.into(),
            description: description.into(),
        }
    }

    /// Expand a per-unit template for unit `index`.
    pub fn for_index(&self, index: u32) -> SensorDescriptor {
        SensorDescriptor {
            key: self.key.replacen("{}", &index.to_string(), 1),
            description: self.description.replacen("{}", &(index + 1).to_string(), 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Temperature,
    Power,
    Voltage,
    Current,
    Fan,
}

impl SensorKind {
    pub const ALL: [SensorKind; 5] = [
        SensorKind::Temperature,
        SensorKind::Power,
        SensorKind::Voltage,
        SensorKind::Current,
        SensorKind::Fan,
    ];

    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Power => "W",
            SensorKind::Voltage => "V",
            SensorKind::Current => "A",
            SensorKind::Fan => "rpm",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SensorKind::Temperature => "Temperature",
            SensorKind::Power => "Power",
            SensorKind::Voltage => "Voltage",
            SensorKind::Current => "Current",
            SensorKind::Fan => "Fans",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            SensorKind::Temperature => TEMPERATURE,
            SensorKind::Power => POWER,
            SensorKind::Voltage => VOLTAGE,
            SensorKind::Current => CURRENT,
            SensorKind::Fan => FAN,
        }
    }

    /// Descriptors for this family. For [`SensorKind::Fan`] these are templates.
    pub fn descriptors(self) -> Vec<SensorDescriptor> {
        self.table()
            .iter()
            .map(|(key, desc)| SensorDescriptor::new(*key, *desc))
            .collect()
    }
}

const TEMPERATURE: &[(&str, &str)] = &[
    ("TA0P", "Ambient"),
    ("TA1P", "Ambient 1"),
    ("TB0T", "Battery TS_MAX"),
    ("TB1T", "Battery 1"),
    ("TB2T", "Battery 2"),
    ("TC0C", "CPU Core 0"),
    ("TC1C", "CPU Core 1"),
    ("TC2C", "CPU Core 2"),
    ("TC3C", "CPU Core 3"),
    ("TC0D", "CPU Die"),
    ("TC0E", "CPU Die Virtual"),
    ("TC0F", "CPU Die Filtered"),
    ("TC0H", "CPU Heatsink"),
    ("TC0P", "CPU Proximity"),
    ("TCGC", "PECI GPU"),
    ("TCSA", "PECI SA"),
    ("TCXC", "PECI CPU"),
    ("TG0D", "GPU Die"),
    ("TG0H", "GPU Heatsink"),
    ("TG0P", "GPU Proximity"),
    ("TH0P", "Drive Bay"),
    ("TM0P", "Memory Proximity"),
    ("TM0S", "Memory Slot"),
    ("TN0D", "Northbridge Die"),
    ("TN0P", "Northbridge Proximity"),
    ("TPCD", "Platform Controller Hub Die"),
    ("TW0P", "Airport Proximity"),
    ("Th1H", "Heatsink 1"),
    ("Ts0P", "Palm Rest"),
    ("Ts0S", "Memory Bank Proximity"),
];

const POWER: &[(&str, &str)] = &[
    ("PC0C", "CPU Core"),
    ("PC0R", "CPU Rail"),
    ("PCPC", "CPU Package Cores"),
    ("PCPG", "CPU Package GPU"),
    ("PCPT", "CPU Package Total"),
    ("PDTR", "DC In"),
    ("PG0R", "GPU Rail"),
    ("PM0R", "Memory Rail"),
    ("PPBR", "Battery Rail"),
    ("PSTR", "System Total"),
];

const VOLTAGE: &[(&str, &str)] = &[
    ("VBAT", "Battery"),
    ("VC0C", "CPU Core"),
    ("VD0R", "DC In"),
    ("VG0C", "GPU Core"),
    ("VM0R", "Memory Rail"),
    ("VN0C", "Northbridge Core"),
    ("VP0R", "12V Rail"),
];

const CURRENT: &[(&str, &str)] = &[
    ("IB0R", "Battery Rail"),
    ("IC0C", "CPU Core"),
    ("IC0R", "CPU Rail"),
    ("ID0R", "DC In"),
    ("IG0C", "GPU Core"),
    ("IM0R", "Memory Rail"),
    ("IPBR", "Battery Power Rail"),
];

const FAN: &[(&str, &str)] = &[
    ("F{}Ac", "Fan {} Current Speed"),
    ("F{}Mn", "Fan {} Minimum Speed"),
    ("F{}Mx", "Fan {} Maximum Speed"),
    ("F{}Tg", "Fan {} Target Speed"),
];
