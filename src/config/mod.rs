//! Turns the stored [`Config`] into validated engine settings.

use chrono::Weekday;
use tracing::debug;

use spendgrid_config::Config;
use spendgrid_core::{ChartStyle, Color, LabelOverrides, NumberLocale, Palette};

use crate::errors::Result;

/// Everything the engine and renderer need from the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub style: ChartStyle,
    pub week_start: Weekday,
    pub labels: LabelOverrides,
    pub currency: String,
    pub locale: NumberLocale,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            style: ChartStyle::default(),
            week_start: Config::default_week_start(),
            labels: LabelOverrides::default(),
            currency: Config::default_currency(),
            locale: NumberLocale::from_tag(&Config::default_locale()),
        }
    }
}

impl ChartSettings {
    /// Validates every colour; an empty or malformed palette is an error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let style = ChartStyle {
            palette: Palette::parse(&config.palette)?,
            series_palette: Palette::parse(&config.series_palette)?,
            leftover: Color::parse(&config.leftover_color)?,
            overspend: Color::parse(&config.overspend_color)?,
            income: Color::parse(&config.income_color)?,
            expense: Color::parse(&config.expense_color)?,
        };
        debug!(
            palette = style.palette.len(),
            week_start = ?config.week_start,
            labels = config.labels.len(),
            locale = %config.locale,
            "resolved chart settings"
        );
        Ok(Self {
            style,
            week_start: config.week_start,
            labels: LabelOverrides::new(config.labels.clone()),
            currency: config.currency.clone(),
            locale: NumberLocale::from_tag(&config.locale),
        })
    }
}

impl TryFrom<&Config> for ChartSettings {
    type Error = crate::errors::SpendGridError;

    fn try_from(config: &Config) -> Result<Self> {
        Self::from_config(config)
    }
}
