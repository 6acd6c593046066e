use std::path::PathBuf;

use spendgrid_core::Grouping;
use spendgrid_domain::TransactionKind;

use crate::errors::{Result, SpendGridError};

/// A subcommand with its one-line help.
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "heatmap",
        usage: "heatmap <file>",
        description: "Calendar grid of daily spending intensity",
    },
    CommandEntry {
        name: "pie",
        usage: "pie <file> [--group category|day|month] [--series income|expense]",
        description: "One slice per group",
    },
    CommandEntry {
        name: "overview",
        usage: "overview <file> [--remaining N]",
        description: "Expense categories plus the leftover or overspend slice",
    },
    CommandEntry {
        name: "flow",
        usage: "flow <file> [--group day|month]",
        description: "Income and expense per period",
    },
    CommandEntry {
        name: "trend",
        usage: "trend <file> [--group day|month] [--series a,b,...]",
        description: "Expense per category per period",
    },
    CommandEntry {
        name: "version",
        usage: "version",
        description: "Build information",
    },
    CommandEntry {
        name: "help",
        usage: "help",
        description: "This message",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Heatmap,
    Pie,
    Overview,
    Flow,
    Trend,
    Version,
    Help,
}

impl Command {
    fn parse(name: &str) -> Result<Self> {
        Ok(match name {
            "heatmap" => Command::Heatmap,
            "pie" => Command::Pie,
            "overview" => Command::Overview,
            "flow" => Command::Flow,
            "trend" => Command::Trend,
            "version" | "--version" | "-V" => Command::Version,
            "help" | "--help" | "-h" => Command::Help,
            other => {
                return Err(SpendGridError::InvalidInput(format!(
                    "unknown command `{other}` (try `help`)"
                )))
            }
        })
    }

    fn needs_input(self) -> bool {
        !matches!(self, Command::Version | Command::Help)
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: Command,
    /// Transaction file; `-` reads stdin.
    pub input: Option<String>,
    pub group: Option<Grouping>,
    pub series: Vec<String>,
    pub remaining: Option<f64>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub plain: bool,
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::<String>::into);
        let command = match args.next() {
            Some(name) => Command::parse(&name)?,
            None => Command::Help,
        };
        let mut parsed = CliArgs {
            command,
            input: None,
            group: None,
            series: Vec::new(),
            remaining: None,
            config: None,
            json: false,
            plain: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => parsed.json = true,
                "--plain" => parsed.plain = true,
                "--group" => {
                    let value = required_value(&mut args, "--group")?;
                    parsed.group = Some(value.parse().map_err(SpendGridError::InvalidInput)?);
                }
                "--series" => {
                    let value = required_value(&mut args, "--series")?;
                    parsed.series = value
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(String::from)
                        .collect();
                }
                "--remaining" => {
                    let value = required_value(&mut args, "--remaining")?;
                    let amount = value.trim().parse::<f64>().map_err(|_| {
                        SpendGridError::InvalidInput(format!("`{value}` is not a number"))
                    })?;
                    parsed.remaining = Some(amount);
                }
                "--config" => {
                    parsed.config = Some(PathBuf::from(required_value(&mut args, "--config")?));
                }
                flag if flag.starts_with("--") => {
                    return Err(SpendGridError::InvalidInput(format!(
                        "unknown option `{flag}`"
                    )))
                }
                _ if parsed.input.is_none() => parsed.input = Some(arg.clone()),
                _ => {
                    return Err(SpendGridError::InvalidInput(format!(
                        "unexpected argument `{arg}`"
                    )))
                }
            }
        }

        if parsed.command.needs_input() && parsed.input.is_none() {
            return Err(SpendGridError::InvalidInput(
                "missing transaction file (use `-` for stdin)".into(),
            ));
        }
        Ok(parsed)
    }

    /// Transaction kind named by `--series` for the pie chart; expenses by default.
    pub fn pie_kind(&self) -> Result<TransactionKind> {
        match self.series.as_slice() {
            [] => Ok(TransactionKind::Expense),
            [only] if only == "expense" => Ok(TransactionKind::Expense),
            [only] if only == "income" => Ok(TransactionKind::Income),
            [other] => Err(SpendGridError::InvalidInput(format!(
                "pie series must be `income` or `expense`, not `{other}`"
            ))),
            _ => Err(SpendGridError::InvalidInput(
                "pie takes a single --series value".into(),
            )),
        }
    }
}

fn required_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| SpendGridError::InvalidInput(format!("{flag} needs a value")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_in_any_order() {
        let args = CliArgs::parse(["trend", "--series", "Food, Rent", "tx.json", "--json"])
            .expect("parse");
        assert_eq!(args.command, Command::Trend);
        assert_eq!(args.input.as_deref(), Some("tx.json"));
        assert_eq!(args.series, ["Food", "Rent"]);
        assert!(args.json);
        assert!(!args.plain);
    }

    #[test]
    fn remaining_accepts_negative_numbers() {
        let args = CliArgs::parse(["overview", "-", "--remaining", "-75"]).expect("parse");
        assert_eq!(args.remaining, Some(-75.0));
    }

    #[test]
    fn no_arguments_means_help() {
        let args = CliArgs::parse(Vec::<String>::new()).expect("parse");
        assert_eq!(args.command, Command::Help);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(CliArgs::parse(["chart", "x.json"]).is_err());
        assert!(CliArgs::parse(["pie"]).is_err());
        assert!(CliArgs::parse(["pie", "x.json", "--group", "weekly"]).is_err());
        assert!(CliArgs::parse(["pie", "x.json", "--remaining"]).is_err());
        assert!(CliArgs::parse(["pie", "x.json", "--color"]).is_err());
    }

    #[test]
    fn pie_kind_defaults_to_expense() {
        let args = CliArgs::parse(["pie", "x.json"]).expect("parse");
        assert_eq!(args.pie_kind().expect("kind"), TransactionKind::Expense);
        let args = CliArgs::parse(["pie", "x.json", "--series", "savings"]).expect("parse");
        assert!(args.pie_kind().is_err());
    }

    #[test]
    fn pie_kind_takes_one_series() {
        let args = CliArgs::parse(["pie", "x.json", "--series", "income"]).expect("parse");
        assert_eq!(args.pie_kind().expect("kind"), TransactionKind::Income);
        let args =
            CliArgs::parse(["pie", "x.json", "--series", "income,expense"]).expect("parse");
        let err = args.pie_kind().unwrap_err();
        assert!(err.to_string().contains("single --series"), "{err}");
    }
}
