use chrono::Weekday;
use tracing::debug;

use spendgrid_domain::{CalendarCell, Heatmap, HeatmapCell, Transaction};

use crate::{
    aggregation_service::AggregationService, calendar_service::CalendarService,
    intensity::IntensityClassifier,
};

pub struct HeatmapService;

impl HeatmapService {
    /// Builds the heatmap, taking the maximum from the daily expense totals.
    pub fn build(transactions: &[Transaction], week_start: Weekday) -> Heatmap {
        let daily = AggregationService::daily_expenses(transactions);
        let max_amount =
            IntensityClassifier::max_amount(daily.buckets().iter().map(|bucket| bucket.total()));
        Self::build_with_max(transactions, week_start, max_amount)
    }

    /// Builds the heatmap against a caller-supplied maximum, e.g. one shared
    /// across several months.
    pub fn build_with_max(
        transactions: &[Transaction],
        week_start: Weekday,
        max_amount: f64,
    ) -> Heatmap {
        let grid = CalendarService::build_grid(transactions, week_start);
        if grid.is_empty() {
            return Heatmap::empty(week_start);
        }
        let heatmap = Self::classify_grid(&grid, week_start, max_amount);
        debug!(
            days = heatmap.cells.len() - heatmap.pad_count(),
            max_amount = heatmap.max_amount,
            "built heatmap"
        );
        heatmap
    }

    /// Attaches an intensity level to every day of an existing grid.
    pub fn classify_grid(grid: &[CalendarCell], week_start: Weekday, max_amount: f64) -> Heatmap {
        let max_amount = IntensityClassifier::max_amount([max_amount]);
        let cells = grid
            .iter()
            .map(|cell| match *cell {
                CalendarCell::Pad => HeatmapCell::Pad,
                CalendarCell::Day { date, amount } => HeatmapCell::Day {
                    date,
                    amount,
                    level: IntensityClassifier::classify(amount, max_amount),
                },
            })
            .collect();
        Heatmap {
            week_start,
            max_amount,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use spendgrid_domain::{DateKey, IntensityLevel};

    use super::*;

    #[test]
    fn busiest_day_is_critical() {
        let transactions = vec![
            Transaction::expense("2024-02-03", 100.0, "Rent"),
            Transaction::expense("2024-02-04", 30.0, "Food"),
            Transaction::expense("2024-02-05", 10.0, "Food"),
        ];
        let heatmap = HeatmapService::build(&transactions, Weekday::Sun);
        assert_eq!(heatmap.max_amount, 100.0);
        let level = |day| {
            heatmap
                .day(&DateKey::from_ymd(2024, 2, day).unwrap())
                .and_then(HeatmapCell::level)
        };
        assert_eq!(level(3), Some(IntensityLevel::Critical));
        assert_eq!(level(4), Some(IntensityLevel::Medium));
        assert_eq!(level(5), Some(IntensityLevel::Low));
        assert_eq!(level(6), Some(IntensityLevel::None));
    }

    #[test]
    fn explicit_max_changes_levels() {
        let transactions = vec![Transaction::expense("2024-02-03", 100.0, "Rent")];
        let heatmap = HeatmapService::build_with_max(&transactions, Weekday::Sun, 1000.0);
        assert_eq!(heatmap.max_amount, 1000.0);
        let cell = heatmap.day(&DateKey::from_ymd(2024, 2, 3).unwrap()).unwrap();
        assert_eq!(cell.level(), Some(IntensityLevel::Low));
    }

    #[test]
    fn empty_input_is_the_no_data_state() {
        let heatmap = HeatmapService::build(&[], Weekday::Mon);
        assert!(heatmap.is_empty());
        assert_eq!(heatmap.week_start, Weekday::Mon);
        assert_eq!(heatmap.max_amount, 1.0);
    }
}
