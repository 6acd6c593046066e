//! Calendar grid layout over whole months.

use chrono::Weekday;
use tracing::{debug, warn};

use spendgrid_domain::{weekday_offset, CalendarCell, DateKey, Transaction, TransactionKind};

use crate::aggregation_service::AggregationService;

/// Week start used when the caller has no preference.
pub const DEFAULT_WEEK_START: Weekday = Weekday::Sun;

/// First and last day covered by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: DateKey,
    pub end: DateKey,
}

impl MonthRange {
    pub fn day_count(&self) -> usize {
        (self.end.date() - self.start.date()).num_days() as usize + 1
    }

    /// Leading blank cells so `start` lands under its weekday column.
    pub fn pad_count(&self, week_start: Weekday) -> usize {
        weekday_offset(self.start.weekday(), week_start) as usize
    }

    pub fn days(&self) -> impl Iterator<Item = DateKey> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.next_day().filter(|next| *next <= end)
        })
    }
}

pub struct CalendarService;

impl CalendarService {
    /// Full months spanning the earliest and latest parseable date of any kind.
    pub fn month_range(transactions: &[Transaction]) -> Option<MonthRange> {
        let mut bounds: Option<(DateKey, DateKey)> = None;
        let mut skipped = 0usize;
        for transaction in transactions {
            let Some(date) = transaction.date_key() else {
                skipped += 1;
                continue;
            };
            bounds = Some(match bounds {
                None => (date, date),
                Some((min, max)) => (min.min(date), max.max(date)),
            });
        }
        if skipped > 0 {
            warn!(skipped, "left transactions with unparseable dates off the calendar");
        }
        bounds.map(|(min, max)| MonthRange {
            start: min.first_of_month(),
            end: max.last_of_month(),
        })
    }

    /// Pads plus one cell per day, each carrying that day's expense total.
    pub fn build_grid(transactions: &[Transaction], week_start: Weekday) -> Vec<CalendarCell> {
        let Some(range) = Self::month_range(transactions) else {
            return Vec::new();
        };
        let daily = AggregationService::daily_expenses(transactions);
        let cells = Self::layout(range, week_start, |date| {
            daily
                .bucket(&date)
                .map(|bucket| bucket.value(TransactionKind::Expense.as_str()))
                .unwrap_or(0.0)
        });
        debug!(
            start = %range.start,
            end = %range.end,
            cells = cells.len(),
            "built calendar grid"
        );
        cells
    }

    /// Lays out `range` with leading pads, asking `amount_for` for each day.
    pub fn layout<F>(range: MonthRange, week_start: Weekday, amount_for: F) -> Vec<CalendarCell>
    where
        F: Fn(DateKey) -> f64,
    {
        let pads = range.pad_count(week_start);
        let mut cells = Vec::with_capacity(pads + range.day_count());
        cells.extend(std::iter::repeat(CalendarCell::Pad).take(pads));
        cells.extend(range.days().map(|date| CalendarCell::Day {
            date,
            amount: amount_for(date),
        }));
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_covers_whole_months_of_both_kinds() {
        let transactions = vec![
            Transaction::expense("2024-03-14", 5.0, "Food"),
            Transaction::income("2024-01-20T08:00:00", 900.0, "Salary"),
        ];
        let range = CalendarService::month_range(&transactions).unwrap();
        assert_eq!(range.start.to_string(), "2024-01-01");
        assert_eq!(range.end.to_string(), "2024-03-31");
        assert_eq!(range.day_count(), 31 + 29 + 31);
    }

    #[test]
    fn range_crosses_the_year_boundary() {
        let transactions = vec![
            Transaction::expense("2024-01-02", 12.0, "Food"),
            Transaction::expense("2023-12-30", 40.0, "Gifts"),
        ];
        let range = CalendarService::month_range(&transactions).unwrap();
        assert_eq!(range.start.to_string(), "2023-12-01");
        assert_eq!(range.end.to_string(), "2024-01-31");
        assert_eq!(range.day_count(), 62);

        // 1 Dec 2023 is a Friday.
        let grid = CalendarService::build_grid(&transactions, Weekday::Sun);
        assert_eq!(grid.iter().take_while(|cell| cell.is_pad()).count(), 5);
        assert_eq!(grid.len(), 5 + 62);
        assert_eq!(grid.iter().map(|cell| cell.amount()).sum::<f64>(), 52.0);
    }

    #[test]
    fn income_only_days_stay_at_zero() {
        let transactions = vec![Transaction::income("2024-02-10", 900.0, "Salary")];
        let grid = CalendarService::build_grid(&transactions, Weekday::Sun);
        assert!(grid.iter().all(|cell| cell.amount() == 0.0));
        // 1 Feb 2024 is a Thursday.
        assert_eq!(grid.iter().take_while(|cell| cell.is_pad()).count(), 4);
        assert_eq!(grid.len(), 4 + 29);
    }

    #[test]
    fn week_start_shifts_padding() {
        let transactions = vec![Transaction::expense("2024-02-10", 9.0, "Food")];
        let monday = CalendarService::build_grid(&transactions, Weekday::Mon);
        assert_eq!(monday.iter().take_while(|cell| cell.is_pad()).count(), 3);
        let thursday = CalendarService::build_grid(&transactions, Weekday::Thu);
        assert!(!thursday[0].is_pad());
    }

    #[test]
    fn unparseable_only_input_gives_empty_grid() {
        let transactions = vec![Transaction::expense("yesterday", 9.0, "Food")];
        assert!(CalendarService::month_range(&transactions).is_none());
        assert!(CalendarService::build_grid(&transactions, DEFAULT_WEEK_START).is_empty());
    }

    #[test]
    fn same_day_expenses_are_summed() {
        let transactions = vec![
            Transaction::expense("2024-02-10T09:00:00", 9.0, "Food"),
            Transaction::expense("2024-02-10 18:30", 1.5, "Bus"),
        ];
        let grid = CalendarService::build_grid(&transactions, Weekday::Sun);
        let date = DateKey::from_ymd(2024, 2, 10).unwrap();
        let cell = grid.iter().find(|cell| cell.date() == Some(date)).unwrap();
        assert_eq!(cell.amount(), 10.5);
    }
}
