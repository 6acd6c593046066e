//! `spendgrid_cli`: load transactions, run the engine, print datasets.

pub mod args;

use std::{
    env,
    fs,
    io::{self, IsTerminal, Read, Write},
};

use serde::Serialize;
use tracing::{debug, info};

use spendgrid_config::{Config, ConfigError, ConfigManager};
use spendgrid_core::{
    AggregationService, ChartService, Grouping, HeatmapService, SeriesSelection, SeriesSelector,
};
use spendgrid_domain::{Transaction, TransactionKind};

use crate::{
    config::ChartSettings,
    errors::{Result, SpendGridError},
    render::{RenderOptions, TerminalRenderer},
    utils::build_info,
};

pub use args::{CliArgs, Command, CommandEntry, COMMANDS};

/// Disables colour when set to any value.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Entry point used by the binary: parses `std::env::args` and writes to stdout.
pub fn run_cli() -> Result<()> {
    let stdout = io::stdout();
    let is_terminal = stdout.is_terminal();
    let mut out = stdout.lock();
    run_with_args(env::args().skip(1), &mut out, is_terminal)
}

/// Runs one command, writing its output to `out`.
pub fn run_with_args<I, S>(args: I, out: &mut dyn Write, is_terminal: bool) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args = CliArgs::parse(args)?;
    debug!(command = ?args.command, input = ?args.input, "parsed command line");

    match args.command {
        Command::Help => return write_help(out),
        Command::Version => return write_version(out),
        _ => {}
    }

    let config = load_config(&args)?;
    let settings = ChartSettings::from_config(&config)?;
    let options = RenderOptions {
        color: use_color(&args, &config, is_terminal),
        currency: settings.currency.clone(),
        locale: settings.locale,
        decimals: 2,
    };
    colored::control::set_override(options.color);

    let transactions = read_transactions(args.input.as_deref().unwrap_or("-"))?;
    info!(
        command = ?args.command,
        transactions = transactions.len(),
        "running chart command"
    );

    match args.command {
        Command::Heatmap => {
            let heatmap = HeatmapService::build(&transactions, settings.week_start);
            emit(out, &args, &heatmap, || {
                TerminalRenderer::heatmap(&heatmap, &settings.labels, &options)
            })
        }
        Command::Pie => {
            let grouping = args.group.unwrap_or(Grouping::Category);
            let aggregation = AggregationService::group(
                &transactions,
                grouping,
                SeriesSelector::Kind(args.pie_kind()?),
            );
            let aggregation = if grouping == Grouping::Category {
                aggregation
            } else {
                aggregation.sorted_by_key()
            };
            let slices = ChartService::pie(aggregation.buckets(), &settings.style.palette);
            emit(out, &args, &slices, || {
                TerminalRenderer::slices(&slices, &options)
            })
        }
        Command::Overview => {
            let aggregation = AggregationService::group(
                &transactions,
                Grouping::Category,
                SeriesSelector::Kind(TransactionKind::Expense),
            );
            let remaining = args
                .remaining
                .unwrap_or_else(|| net_balance(&transactions));
            let slices = ChartService::overview(
                aggregation.buckets(),
                remaining,
                &settings.style,
                &settings.labels,
            );
            emit(out, &args, &slices, || {
                TerminalRenderer::slices(&slices, &options)
            })
        }
        Command::Flow => {
            let grouping = period_grouping(&args)?;
            let aggregation =
                AggregationService::group(&transactions, grouping, SeriesSelector::Flow)
                    .sorted_by_key();
            let dataset = ChartService::time_series(
                aggregation.buckets(),
                &SeriesSelection::Flow,
                &settings.style,
            );
            emit(out, &args, &dataset, || {
                TerminalRenderer::series(&dataset, &options)
            })
        }
        Command::Trend => {
            let grouping = period_grouping(&args)?;
            let aggregation = AggregationService::group(
                &transactions,
                grouping,
                SeriesSelector::CategoryOf(TransactionKind::Expense),
            )
            .sorted_by_key();
            let selection = if args.series.is_empty() {
                SeriesSelection::custom(aggregation.series().iter().cloned())
            } else {
                SeriesSelection::custom(args.series.iter().cloned())
            };
            let dataset =
                ChartService::time_series(aggregation.buckets(), &selection, &settings.style);
            emit(out, &args, &dataset, || {
                TerminalRenderer::series(&dataset, &options)
            })
        }
        Command::Help | Command::Version => Ok(()),
    }
}

/// Income minus expense over every parseable transaction.
pub fn net_balance(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.date_key().is_some())
        .map(|transaction| match transaction.kind {
            TransactionKind::Income => transaction.amount,
            TransactionKind::Expense => -transaction.amount,
        })
        .sum()
}

fn period_grouping(args: &CliArgs) -> Result<Grouping> {
    match args.group.unwrap_or(Grouping::Month) {
        Grouping::Category => Err(SpendGridError::InvalidInput(
            "time series need --group day or --group month".into(),
        )),
        grouping => Ok(grouping),
    }
}

fn load_config(args: &CliArgs) -> Result<Config> {
    if let Some(path) = &args.config {
        return Ok(ConfigManager::new(path.clone()).load()?);
    }
    match ConfigManager::default_location() {
        Ok(manager) => Ok(manager.load()?),
        Err(ConfigError::NoConfigDir) => {
            debug!("no config directory, using defaults");
            Ok(Config::default())
        }
        Err(err) => Err(err.into()),
    }
}

fn use_color(args: &CliArgs, config: &Config, is_terminal: bool) -> bool {
    !args.json
        && !args.plain
        && config.color_output
        && env::var_os(NO_COLOR_ENV).is_none()
        && is_terminal
}

fn read_transactions(source: &str) -> Result<Vec<Transaction>> {
    let data = if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source)?
    };
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&data)?)
}

fn emit<T, F>(out: &mut dyn Write, args: &CliArgs, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if args.json {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render())?;
    }
    Ok(())
}

fn write_help(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Usage: spendgrid_cli <command> [options]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    for entry in COMMANDS {
        writeln!(out, "  {:<10} {}", entry.name, entry.description)?;
        writeln!(out, "  {:<10} usage: {}", "", entry.usage)?;
    }
    writeln!(out)?;
    writeln!(out, "Options:")?;
    writeln!(out, "  --config PATH  read chart settings from PATH")?;
    writeln!(out, "  --json         print datasets as JSON")?;
    writeln!(out, "  --plain        disable colour")?;
    writeln!(out)?;
    writeln!(out, "<file> is a JSON array of transactions; `-` reads stdin.")?;
    Ok(())
}

fn write_version(out: &mut dyn Write) -> Result<()> {
    let build = build_info::current();
    writeln!(out, "spendgrid_cli {}", build.version)?;
    for (label, value) in build.lines().into_iter().skip(1) {
        writeln!(out, "  {label:<8} {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_balance_skips_unparseable_dates() {
        let transactions = vec![
            Transaction::income("2024-01-01", 100.0, "Salary"),
            Transaction::expense("2024-01-02", 30.0, "Food"),
            Transaction::expense("soon", 500.0, "Food"),
        ];
        assert_eq!(net_balance(&transactions), 70.0);
    }

    #[test]
    fn help_lists_every_command() {
        let mut out = Vec::new();
        run_with_args(["help"], &mut out, false).expect("help");
        let text = String::from_utf8(out).expect("utf8");
        for entry in COMMANDS {
            assert!(text.contains(entry.name), "{}", entry.name);
        }
    }

    #[test]
    fn category_grouping_is_not_a_period() {
        let args = CliArgs::parse(["flow", "x.json", "--group", "category"]).expect("parse");
        assert!(period_grouping(&args).is_err());
    }
}
