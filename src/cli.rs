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

//! Command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "smcstat")]
#[command(version)]
#[command(about = "Read temperature, power, voltage, current, fan and battery sensors from the SMC")]
#[command(long_about = "Read temperature, power, voltage, current, fan and battery sensors from the SMC

EXAMPLES:
    smcstat --snapshot capture.json            Show every sensor family
    smcstat --snapshot capture.json temp       Temperatures only
    smcstat --snapshot capture.json --json fans
    smcstat --snapshot capture.json key TC0P   Raw bytes and decoded value of one key
    smcstat config show                        Effective settings as JSON
    smcstat --best-effort config save          Persist the best-effort policy

ENVIRONMENT VARIABLES:
    RUST_LOG=debug         Override the log filter

FILES:
    ~/.config/smcstat/config.json              Settings")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Read keys from a capture file instead of the controller
    #[arg(long, global = true, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip unreadable keys instead of aborting
    #[arg(long, global = true)]
    pub best_effort: bool,

    /// Keep the sign of negative readings
    #[arg(long, global = true)]
    pub keep_sign: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Temperature sensors (°C)
    Temp,
    /// Power sensors (W)
    Power,
    /// Voltage sensors (V)
    Voltage,
    /// Current sensors (A)
    Current,
    /// Fan speeds (rpm)
    Fans,
    /// Battery count, info bits and AC power state
    Battery,
    /// Every sensor family (default)
    All,
    /// Raw sample and decoded value of a single key
    Key {
        /// Four-character SMC key, e.g. TC0P
        key: String,
    },
    /// Settings management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show effective settings as JSON
    Show,
    /// Print the settings file location
    Path,
    /// Write the effective settings (including command line overrides) to the settings file
    Save,
}
