//! Calendar grid cells and the spending heatmap built from them.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;

/// One slot of the calendar grid.
///
/// Leading `Pad` cells align the first real day under its weekday column; they
/// are never a zero-amount day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    Pad,
    Day { date: DateKey, amount: f64 },
}

impl CalendarCell {
    pub fn date(&self) -> Option<DateKey> {
        match self {
            CalendarCell::Pad => None,
            CalendarCell::Day { date, .. } => Some(*date),
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            CalendarCell::Pad => 0.0,
            CalendarCell::Day { amount, .. } => *amount,
        }
    }

    pub fn is_pad(&self) -> bool {
        matches!(self, CalendarCell::Pad)
    }
}

/// Ordinal spending intensity of a day relative to the busiest day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl IntensityLevel {
    pub const ALL: [IntensityLevel; 5] = [
        IntensityLevel::None,
        IntensityLevel::Low,
        IntensityLevel::Medium,
        IntensityLevel::High,
        IntensityLevel::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IntensityLevel::None => "none",
            IntensityLevel::Low => "low",
            IntensityLevel::Medium => "medium",
            IntensityLevel::High => "high",
            IntensityLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar cell with its intensity already classified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeatmapCell {
    Pad,
    Day {
        date: DateKey,
        amount: f64,
        level: IntensityLevel,
    },
}

impl HeatmapCell {
    pub fn date(&self) -> Option<DateKey> {
        match self {
            HeatmapCell::Pad => None,
            HeatmapCell::Day { date, .. } => Some(*date),
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            HeatmapCell::Pad => 0.0,
            HeatmapCell::Day { amount, .. } => *amount,
        }
    }

    pub fn level(&self) -> Option<IntensityLevel> {
        match self {
            HeatmapCell::Pad => None,
            HeatmapCell::Day { level, .. } => Some(*level),
        }
    }

    pub fn is_pad(&self) -> bool {
        matches!(self, HeatmapCell::Pad)
    }
}

/// Daily spending laid out over whole months, ready for a 7-column grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub week_start: Weekday,
    /// Largest daily expense total, floored at 1.
    pub max_amount: f64,
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    pub fn empty(week_start: Weekday) -> Self {
        Self {
            week_start,
            max_amount: 1.0,
            cells: Vec::new(),
        }
    }

    /// `true` when there was nothing to place; renderers show a "no data" state.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn pad_count(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_pad()).count()
    }

    pub fn days(&self) -> impl Iterator<Item = &HeatmapCell> {
        self.cells.iter().filter(|cell| !cell.is_pad())
    }

    /// Grid rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> std::slice::Chunks<'_, HeatmapCell> {
        self.cells.chunks(7)
    }

    pub fn first_day(&self) -> Option<DateKey> {
        self.cells.iter().find_map(HeatmapCell::date)
    }

    pub fn last_day(&self) -> Option<DateKey> {
        self.cells.iter().rev().find_map(HeatmapCell::date)
    }

    /// Looks up the cell for a date, e.g. to resolve a click.
    pub fn day(&self, date: &DateKey) -> Option<&HeatmapCell> {
        let first = self.first_day()?;
        let offset = (date.date() - first.date()).num_days();
        if offset < 0 {
            return None;
        }
        self.cells
            .get(self.pad_count() + offset as usize)
            .filter(|cell| cell.date().as_ref() == Some(date))
    }

    /// Two-letter column headers starting at `week_start`.
    pub fn weekday_headers(&self) -> [&'static str; 7] {
        let mut headers = [""; 7];
        let mut day = self.week_start;
        for header in headers.iter_mut() {
            *header = weekday_short_name(day);
            day = day.succ();
        }
        headers
    }
}

fn weekday_short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Heatmap {
        let first = DateKey::from_ymd(2024, 2, 1).unwrap();
        let mut cells = vec![HeatmapCell::Pad; 4];
        let mut date = first;
        loop {
            cells.push(HeatmapCell::Day {
                date,
                amount: 0.0,
                level: IntensityLevel::None,
            });
            match date.next_day() {
                Some(next) if next.month() == 2 => date = next,
                _ => break,
            }
        }
        Heatmap {
            week_start: Weekday::Sun,
            max_amount: 1.0,
            cells,
        }
    }

    #[test]
    fn levels_are_ordered() {
        assert!(IntensityLevel::None < IntensityLevel::Low);
        assert!(IntensityLevel::High < IntensityLevel::Critical);
        assert_eq!(IntensityLevel::default(), IntensityLevel::None);
    }

    #[test]
    fn day_lookup_skips_pads() {
        let heatmap = sample();
        assert_eq!(heatmap.pad_count(), 4);
        let date = DateKey::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(heatmap.day(&date).and_then(HeatmapCell::date), Some(date));
        let outside = DateKey::from_ymd(2024, 3, 1).unwrap();
        assert!(heatmap.day(&outside).is_none());
        let before = DateKey::from_ymd(2024, 1, 31).unwrap();
        assert!(heatmap.day(&before).is_none());
    }

    #[test]
    fn weeks_chunk_by_seven() {
        let heatmap = sample();
        let rows: Vec<_> = heatmap.weeks().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].len(), 33 - 28);
    }

    #[test]
    fn headers_follow_week_start() {
        let mut heatmap = sample();
        assert_eq!(heatmap.weekday_headers()[0], "Su");
        heatmap.week_start = Weekday::Mon;
        assert_eq!(
            heatmap.weekday_headers(),
            ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
        );
    }

    #[test]
    fn pad_cells_serialize_with_a_tag() {
        let value = serde_json::to_value(CalendarCell::Pad).unwrap();
        assert_eq!(value["kind"], "pad");
        let day = CalendarCell::Day {
            date: DateKey::from_ymd(2023, 10, 27).unwrap(),
            amount: 40.0,
        };
        let value = serde_json::to_value(day).unwrap();
        assert_eq!(value["date"], "2023-10-27");
        assert_eq!(value["amount"], 40.0);
    }
}
