//! Colours, palettes and the fixed chart colours.

use std::{fmt, str::FromStr};

use crate::error::ChartError;

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#0072d6", "#ff9500", "#af52de", "#ff2d55", "#5ac8fa", "#ffcc00", "#34c759", "#8e8e93",
];
pub const DEFAULT_SERIES_PALETTE: [&str; 4] = ["#ff3b30", "#0072d6", "#ff9500", "#75d9ff"];
pub const DEFAULT_LEFTOVER_COLOR: &str = "#32d74b";
pub const DEFAULT_OVERSPEND_COLOR: &str = "#ff3b30";
pub const DEFAULT_INCOME_COLOR: &str = "#32d74b";
pub const DEFAULT_EXPENSE_COLOR: &str = "#ff3b30";

/// A `#rgb` or `#rrggbb` colour, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn parse(value: &str) -> Result<Self, ChartError> {
        let trimmed = value.trim();
        let hex = trimmed
            .strip_prefix('#')
            .filter(|hex| matches!(hex.len(), 3 | 6))
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ChartError::InvalidColor(value.to_string()))?;
        Ok(Self(format!("#{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels; short forms are expanded.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.0[1..];
        let channel = |index: usize| -> u8 {
            if hex.len() == 3 {
                let digit = u8::from_str_radix(&hex[index..index + 1], 16).unwrap_or(0);
                digit * 17
            } else {
                u8::from_str_radix(&hex[index * 2..index * 2 + 2], 16).unwrap_or(0)
            }
        };
        (channel(0), channel(1), channel(2))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// A non-empty, cyclic list of colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, ChartError> {
        if colors.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn parse<I, S>(values: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = values
            .into_iter()
            .map(|value| Color::parse(value.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Colour for position `index`, wrapping around the palette.
    pub fn color_at(&self, index: usize) -> &Color {
        &self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    fn from_constants(values: &[&str]) -> Self {
        Self {
            colors: values.iter().map(|value| Color(value.to_string())).collect(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_constants(&DEFAULT_PALETTE)
    }
}

/// Every colour a chart dataset needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    /// Slices of pie and overview charts.
    pub palette: Palette,
    /// Custom series of the trend chart.
    pub series_palette: Palette,
    pub leftover: Color,
    pub overspend: Color,
    pub income: Color,
    pub expense: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            series_palette: Palette::from_constants(&DEFAULT_SERIES_PALETTE),
            leftover: Color(DEFAULT_LEFTOVER_COLOR.to_string()),
            overspend: Color(DEFAULT_OVERSPEND_COLOR.to_string()),
            income: Color(DEFAULT_INCOME_COLOR.to_string()),
            expense: Color(DEFAULT_EXPENSE_COLOR.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_validate_and_normalise() {
        assert_eq!(Color::parse(" #FF9500 ").unwrap().as_str(), "#ff9500");
        assert_eq!(Color::parse("#abc").unwrap().rgb(), (0xaa, 0xbb, 0xcc));
        assert_eq!(Color::parse("#0072d6").unwrap().rgb(), (0x00, 0x72, 0xd6));
        for bad in ["", "0072d6", "#12", "#12345g", "#1234567"] {
            assert_eq!(
                Color::parse(bad),
                Err(ChartError::InvalidColor(bad.to_string()))
            );
        }
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(Palette::new(Vec::new()), Err(ChartError::EmptyPalette));
        assert_eq!(
            Palette::parse(Vec::<String>::new()),
            Err(ChartError::EmptyPalette)
        );
    }

    #[test]
    fn palette_wraps_around() {
        let palette = Palette::parse(["#111", "#222"]).unwrap();
        assert_eq!(palette.color_at(0).as_str(), "#111");
        assert_eq!(palette.color_at(3).as_str(), "#222");
    }

    #[test]
    fn default_constants_are_valid_colours() {
        let style = ChartStyle::default();
        for color in style
            .palette
            .colors()
            .iter()
            .chain(style.series_palette.colors())
            .chain([&style.leftover, &style.overspend, &style.income, &style.expense])
        {
            assert_eq!(Color::parse(color.as_str()).as_ref(), Ok(color));
        }
        assert_eq!(style.palette.len(), 8);
        assert_eq!(style.series_palette.color_at(4).as_str(), "#ff3b30");
    }
}
