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

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::{Map, Value};
use tracing::debug;

use smcstat::aggregate::{read_raw, Aggregator, BatteryReport, ErrorPolicy, KeyFailure, Report};
use smcstat::config::{config_path, load_settings, save_settings, Settings};
use smcstat::logger;
use smcstat::sensors::SensorKind;
use smcstat::smc::SnapshotBackend;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logging(cli.verbose, cli.log_json) {
        eprintln!("warning: {}", e);
    }

    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = load_settings()
        .with_context(|| format!("loading settings from {}", config_path().display()))?;
    apply_overrides(&mut settings, &cli);
    debug!(?settings, "effective settings");

    let command = cli.command.clone().unwrap_or(Commands::All);
    if let Commands::Config(sub) = &command {
        match sub {
            ConfigCommands::Show => println!("{}", serde_json::to_string_pretty(&settings)?),
            ConfigCommands::Path => println!("{}", config_path().display()),
            ConfigCommands::Save => {
                save_settings(&settings)
                    .with_context(|| format!("writing settings to {}", config_path().display()))?;
                println!("Wrote settings to {}", config_path().display());
            }
        }
        return Ok(());
    }

    let backend = match &settings.snapshot {
        Some(path) => SnapshotBackend::new(path),
        None => bail!("no SMC backend available; pass --snapshot <PATH> or set \"snapshot\" in {}", config_path().display()),
    };
    let aggregator = Aggregator::new(&backend, settings.aggregator_options());
    debug!(options = ?aggregator.options(), "aggregator ready");

    match command {
        Commands::Temp => print_kind(&aggregator, SensorKind::Temperature, cli.json),
        Commands::Power => print_kind(&aggregator, SensorKind::Power, cli.json),
        Commands::Voltage => print_kind(&aggregator, SensorKind::Voltage, cli.json),
        Commands::Current => print_kind(&aggregator, SensorKind::Current, cli.json),
        Commands::Fans => print_kind(&aggregator, SensorKind::Fan, cli.json),
        Commands::Battery => print_battery(&aggregator.battery()?, cli.json),
        Commands::All => print_all(&aggregator, cli.json),
        Commands::Key { key } => {
            let raw = read_raw(&backend, &key)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&raw)?);
            } else {
                let bytes: Vec<String> = raw.bytes.iter().map(|b| format!("{:02x}", b)).collect();
                let value = raw.value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
                println!("{}  [{}]  {} bytes  ({})  {}", raw.key, raw.type_name, raw.declared_len, bytes.join(" "), value);
            }
            Ok(())
        }
        Commands::Config(_) => Ok(()),
    }
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(path) = &cli.snapshot {
        settings.snapshot = Some(path.clone());
    }
    if cli.best_effort {
        settings.policy = ErrorPolicy::BestEffort;
    }
    if cli.keep_sign {
        settings.absolute_values = false;
    }
}

fn print_kind(aggregator: &Aggregator, kind: SensorKind, as_json: bool) -> anyhow::Result<()> {
    let report = aggregator
        .collect_kind(kind)
        .with_context(|| format!("reading {} sensors", kind.title().to_lowercase()))?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(kind, &report);
    }
    Ok(())
}

fn print_all(aggregator: &Aggregator, as_json: bool) -> anyhow::Result<()> {
    let mut out = Map::new();
    for kind in SensorKind::ALL {
        let report = aggregator
            .collect_kind(kind)
            .with_context(|| format!("reading {} sensors", kind.title().to_lowercase()))?;
        if as_json {
            out.insert(kind_name(kind), serde_json::to_value(&report)?);
        } else {
            print_table(kind, &report);
            println!();
        }
    }
    let battery = aggregator.battery().context("reading battery status")?;
    if as_json {
        out.insert("battery".to_string(), serde_json::to_value(&battery)?);
        println!("{}", serde_json::to_string_pretty(&Value::Object(out))?);
    } else {
        print_battery(&battery, false)?;
    }
    Ok(())
}

fn kind_name(kind: SensorKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| kind.title().to_lowercase())
}

fn print_table(kind: SensorKind, report: &Report) {
    println!("{}:", kind.title());
    let width = report.readings.iter().map(|(d, _)| d.len()).max().unwrap_or(0);
    for (desc, value) in report.readings.iter() {
        let precision = if kind == SensorKind::Fan { 0 } else { 2 };
        println!("  {:<width$}  {:>10.prec$} {}", desc, value, kind.unit(), width = width, prec = precision);
    }
    print_failures(&report.failures);
}

fn print_battery(report: &BatteryReport, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("Battery:");
    println!("  Count        {}", report.status.count);
    println!("  Info         {:#06x}", report.status.info);
    println!("  AC Power     {}", if report.status.on_ac_power { "yes" } else { "no" });
    print_failures(&report.failures);
    Ok(())
}

fn print_failures(failures: &[KeyFailure]) {
    for f in failures {
        eprintln!("warning: skipped {}: {}", f.key, f.reason);
    }
}
