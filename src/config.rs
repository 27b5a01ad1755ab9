use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{default_level_duration, ChipDenomination, OptimizeParams};

#[derive(Parser, Debug)]
#[command(
    name = "chip-planner",
    version,
    about = "Plan starting stacks and blind structures from a physical chip set"
)]
pub struct Args {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick the best stack size, blind structure and chip distribution.
    Optimize(PlanArgs),
    /// Suggest chip relabels and compare plans before and after.
    Revalue(PlanArgs),
}

#[derive(clap::Args, Clone, Debug)]
pub struct PlanArgs {
    #[arg(long, help = "TOML or JSON file with chips, players and policy")]
    pub config: Option<PathBuf>,
    #[arg(
        long = "chip",
        value_name = "VALUE:QUANTITY[:COLOR]",
        help = "Repeatable; replaces the config file's chip list"
    )]
    pub chips: Vec<String>,
    #[arg(long)]
    pub players: Option<u32>,
    #[arg(long)]
    pub rebuys: Option<u32>,
    #[arg(long, help = "Target tournament duration in minutes")]
    pub duration: Option<u32>,
    #[arg(long, help = "Minutes per blind level [default: 15]")]
    pub level_duration: Option<u32>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Optimize,
    Revalue,
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub mode: Mode,
    pub params: OptimizeParams,
    pub format: FormatArg,
    pub verbosity: u8,
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|e| Error::Cli(e.to_string()))
}

pub fn build_config(args: Args) -> Result<RunConfig> {
    let (mode, plan) = match args.command {
        Command::Optimize(plan) => (Mode::Optimize, plan),
        Command::Revalue(plan) => (Mode::Revalue, plan),
    };
    let params = build_params(&plan)?;
    Ok(RunConfig {
        mode,
        params,
        format: plan.format,
        verbosity: args.verbose,
    })
}

/// Merges the optional config file with command-line flags; flags win.
pub fn build_params(plan: &PlanArgs) -> Result<OptimizeParams> {
    let base = match &plan.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let cli_chips = parse_chips(&plan.chips)?;

    match base {
        Some(mut params) => {
            if !cli_chips.is_empty() {
                params.available_chips = cli_chips;
            }
            if let Some(players) = plan.players {
                params.players_count = players;
            }
            if let Some(rebuys) = plan.rebuys {
                params.rebuys_expected = rebuys;
            }
            if let Some(duration) = plan.duration {
                params.target_duration = duration;
            }
            if let Some(level_duration) = plan.level_duration {
                params.level_duration = level_duration;
            }
            Ok(params)
        }
        None => {
            if cli_chips.is_empty() {
                return Err(Error::EmptyChips);
            }
            let players = plan.players.ok_or(Error::MissingSetting("players"))?;
            let duration = plan.duration.ok_or(Error::MissingSetting("duration"))?;
            let mut params =
                OptimizeParams::new(cli_chips, players, plan.rebuys.unwrap_or(0), duration);
            params.level_duration = plan.level_duration.unwrap_or_else(default_level_duration);
            Ok(params)
        }
    }
}

pub fn load_config(path: &Path) -> Result<OptimizeParams> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Parses repeated `value:quantity[:color]` entries. Each entry may itself
/// hold a comma-separated list.
pub fn parse_chips(entries: &[String]) -> Result<Vec<ChipDenomination>> {
    let mut chips = Vec::new();
    let mut values = HashSet::new();

    for input in entries {
        if input.trim().is_empty() {
            return Err(Error::EmptyChips);
        }
        for entry in input.split(',') {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                return Err(Error::EmptyChipEntry);
            }

            let mut parts = trimmed.split(':');
            let value_str = parts.next().unwrap_or("").trim();
            let quantity_str = parts.next().unwrap_or("").trim();
            let color = parts.next().map(str::trim);
            if parts.next().is_some() || value_str.is_empty() || quantity_str.is_empty() {
                return Err(Error::InvalidChipEntry(trimmed.to_string()));
            }

            let value: u64 = value_str
                .parse()
                .map_err(|_| Error::InvalidChipValue(trimmed.to_string()))?;
            if value == 0 {
                return Err(Error::InvalidChipValue(trimmed.to_string()));
            }
            let quantity: u64 = quantity_str
                .parse()
                .map_err(|_| Error::InvalidChipQuantity(trimmed.to_string()))?;
            if !values.insert(value) {
                return Err(Error::DuplicateChipValue(value));
            }

            let color = match color {
                Some(color) if !color.is_empty() => color.to_string(),
                _ => value.to_string(),
            };
            chips.push(ChipDenomination::new(value, quantity, color));
        }
    }

    Ok(chips)
}
