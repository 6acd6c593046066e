use std::{collections::BTreeMap, str::FromStr};

use chrono::Weekday;
use serde::{de::Deserializer, Deserialize, Serialize};

/// Chart preferences read by the CLI and turned into engine settings.
///
/// Colours are kept as strings here; they are validated when the settings are
/// built, so a bad hand edit surfaces as a clear error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(
        default = "Config::default_week_start",
        deserialize_with = "deserialize_week_start"
    )]
    pub week_start: Weekday,
    #[serde(default = "Config::default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "Config::default_leftover_color")]
    pub leftover_color: String,
    #[serde(default = "Config::default_overspend_color")]
    pub overspend_color: String,
    #[serde(default = "Config::default_income_color")]
    pub income_color: String,
    #[serde(default = "Config::default_expense_color")]
    pub expense_color: String,
    #[serde(default = "Config::default_series_palette")]
    pub series_palette: Vec<String>,
    /// Display text per label id, e.g. `"remaining": "Restante"`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default = "Config::default_color_output")]
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            locale: Self::default_locale(),
            week_start: Self::default_week_start(),
            palette: Self::default_palette(),
            leftover_color: Self::default_leftover_color(),
            overspend_color: Self::default_overspend_color(),
            income_color: Self::default_income_color(),
            expense_color: Self::default_expense_color(),
            series_palette: Self::default_series_palette(),
            labels: BTreeMap::new(),
            color_output: Self::default_color_output(),
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_week_start() -> Weekday {
        Weekday::Sun
    }

    pub fn default_palette() -> Vec<String> {
        [
            "#0072d6", "#ff9500", "#af52de", "#ff2d55", "#5ac8fa", "#ffcc00", "#34c759", "#8e8e93",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    pub fn default_leftover_color() -> String {
        "#32d74b".into()
    }

    pub fn default_overspend_color() -> String {
        "#ff3b30".into()
    }

    pub fn default_income_color() -> String {
        "#32d74b".into()
    }

    pub fn default_expense_color() -> String {
        "#ff3b30".into()
    }

    pub fn default_series_palette() -> Vec<String> {
        ["#ff3b30", "#0072d6", "#ff9500", "#75d9ff"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn default_color_output() -> bool {
        true
    }
}

/// Accepts `"sun"`, `"Monday"`, `null`; anything unrecognised falls back to Sunday.
fn deserialize_week_start<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|raw| Weekday::from_str(raw.trim()).ok())
        .unwrap_or_else(Config::default_week_start))
}
