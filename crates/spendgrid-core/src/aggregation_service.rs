//! Groups transactions into ordered buckets of summed series.

use std::{cell::Cell, collections::HashMap, fmt, hash::Hash, str::FromStr};

use tracing::{debug, warn};

use spendgrid_domain::{Bucket, BucketKey, DateKey, Transaction, TransactionKind};

/// Buckets in first-seen key order, with a key -> position lookup.
#[derive(Debug, Clone)]
pub struct Aggregation<K> {
    series: Vec<String>,
    buckets: Vec<Bucket<K>>,
    index: HashMap<K, usize>,
}

impl<K> Default for Aggregation<K> {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            buckets: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Aggregation<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `series` in the bucket for `key`, creating it on first sight.
    pub fn record(&mut self, key: K, series: &str, amount: f64) {
        if !self.series.iter().any(|known| known == series) {
            self.series.push(series.to_string());
        }
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.buckets.len();
                self.index.insert(key.clone(), position);
                self.buckets.push(Bucket::new(key));
                position
            }
        };
        self.buckets[position].add(series, amount);
    }

    /// Gives every bucket an explicit 0 for series it never saw.
    fn fill_missing_series(&mut self) {
        for bucket in &mut self.buckets {
            for series in &self.series {
                bucket.values.entry(series.clone()).or_insert(0.0);
            }
        }
    }

    pub fn bucket(&self, key: &K) -> Option<&Bucket<K>> {
        self.index
            .get(key)
            .and_then(|&position| self.buckets.get(position))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().map(|bucket| &bucket.key)
    }

    /// Re-sorts buckets by key. Chronological for date and month keys.
    pub fn sorted_by_key(mut self) -> Self
    where
        K: Ord,
    {
        self.buckets.sort_by(|a, b| a.key.cmp(&b.key));
        self.index = self
            .buckets
            .iter()
            .enumerate()
            .map(|(position, bucket)| (bucket.key.clone(), position))
            .collect();
        self
    }
}

impl<K> Aggregation<K> {
    /// Series names in first-seen order.
    pub fn series(&self) -> &[String] {
        &self.series
    }

    pub fn buckets(&self) -> &[Bucket<K>] {
        &self.buckets
    }

    pub fn into_buckets(self) -> Vec<Bucket<K>> {
        self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of one series across all buckets.
    pub fn total(&self, series: &str) -> f64 {
        self.buckets.iter().map(|bucket| bucket.value(series)).sum()
    }
}

/// Built-in ways of keying transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    Day,
    Month,
    Category,
}

impl Grouping {
    /// Key for a transaction under this grouping.
    ///
    /// Transactions whose date does not parse get no key under any grouping,
    /// including by category, so every chart sees the same set.
    pub fn key_for(self, transaction: &Transaction) -> Option<BucketKey> {
        let date = transaction.date_key()?;
        Some(match self {
            Grouping::Day => BucketKey::Day(date),
            Grouping::Month => BucketKey::Month(date.month_key()),
            Grouping::Category => BucketKey::Category(transaction.category_label().to_string()),
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grouping::Day => "day",
            Grouping::Month => "month",
            Grouping::Category => "category",
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grouping {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" | "date" => Ok(Grouping::Day),
            "month" | "monthly" => Ok(Grouping::Month),
            "category" | "categories" => Ok(Grouping::Category),
            other => Err(format!("unknown grouping `{other}`")),
        }
    }
}

/// Built-in ways of turning a transaction into a series contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesSelector {
    /// `income` and `expense` series, by transaction kind.
    Flow,
    /// Only transactions of this kind, in a series named after the kind.
    Kind(TransactionKind),
    /// Only transactions of this kind, one series per category.
    CategoryOf(TransactionKind),
}

impl SeriesSelector {
    pub fn contribution<'a>(self, transaction: &'a Transaction) -> Option<(&'a str, f64)> {
        match self {
            SeriesSelector::Flow => Some((transaction.kind.as_str(), transaction.amount)),
            SeriesSelector::Kind(kind) => {
                (transaction.kind == kind).then_some((kind.as_str(), transaction.amount))
            }
            SeriesSelector::CategoryOf(kind) => (transaction.kind == kind)
                .then(|| (transaction.category_label(), transaction.amount)),
        }
    }
}

pub struct AggregationService;

impl AggregationService {
    /// Groups `transactions` by `key_fn` and sums what `series_fn` returns.
    ///
    /// A `None` from either closure leaves the transaction out entirely. Buckets
    /// come back in the order their keys were first seen.
    pub fn aggregate<'t, K, FK, FS, S>(
        transactions: &'t [Transaction],
        key_fn: FK,
        series_fn: FS,
    ) -> Aggregation<K>
    where
        K: Eq + Hash + Clone,
        FK: Fn(&'t Transaction) -> Option<K>,
        FS: Fn(&'t Transaction) -> Option<(S, f64)>,
        S: AsRef<str>,
    {
        let mut aggregation = Aggregation::new();
        for transaction in transactions {
            let Some(key) = key_fn(transaction) else {
                continue;
            };
            let Some((series, amount)) = series_fn(transaction) else {
                continue;
            };
            aggregation.record(key, series.as_ref(), amount);
        }
        aggregation.fill_missing_series();
        debug!(
            transactions = transactions.len(),
            buckets = aggregation.len(),
            series = aggregation.series.len(),
            "aggregated transactions"
        );
        aggregation
    }

    /// Aggregates with one of the built-in groupings and selectors.
    pub fn group(
        transactions: &[Transaction],
        grouping: Grouping,
        selector: SeriesSelector,
    ) -> Aggregation<BucketKey> {
        let unparseable = Cell::new(0usize);
        let aggregation = Self::aggregate(
            transactions,
            |transaction| {
                let key = grouping.key_for(transaction);
                if key.is_none() {
                    unparseable.set(unparseable.get() + 1);
                }
                key
            },
            |transaction| selector.contribution(transaction),
        );
        if unparseable.get() > 0 {
            warn!(
                skipped = unparseable.get(),
                %grouping,
                "skipped transactions with unparseable dates"
            );
        }
        aggregation
    }

    /// Expense totals per local calendar day.
    pub fn daily_expenses(transactions: &[Transaction]) -> Aggregation<DateKey> {
        Self::aggregate(transactions, Transaction::date_key, |transaction| {
            SeriesSelector::Kind(TransactionKind::Expense).contribution(transaction)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::expense("2023-10-03", 12.0, "Food"),
            Transaction::income("2023-10-01", 1000.0, "Salary"),
            Transaction::expense("2023-10-01", 30.0, "Rent"),
            Transaction::expense("2023-10-03T19:00:00", 8.5, "Food"),
            Transaction::expense("2023-11-02", 20.0, "Food"),
        ]
    }

    #[test]
    fn buckets_follow_first_seen_order() {
        let aggregation =
            AggregationService::group(&sample(), Grouping::Day, SeriesSelector::Flow);
        let keys: Vec<String> = aggregation.keys().map(|key| key.to_string()).collect();
        assert_eq!(keys, ["2023-10-03", "2023-10-01", "2023-11-02"]);
        assert_eq!(aggregation.series(), ["expense", "income"]);
    }

    #[test]
    fn missing_series_are_filled_with_zero() {
        let aggregation =
            AggregationService::group(&sample(), Grouping::Day, SeriesSelector::Flow);
        let first = &aggregation.buckets()[0];
        assert_eq!(first.values.get("income"), Some(&0.0));
        assert_eq!(first.value("expense"), 20.5);
    }

    #[test]
    fn sorting_is_chronological_and_keeps_lookup() {
        let aggregation =
            AggregationService::group(&sample(), Grouping::Day, SeriesSelector::Flow)
                .sorted_by_key();
        let keys: Vec<String> = aggregation.keys().map(|key| key.to_string()).collect();
        assert_eq!(keys, ["2023-10-01", "2023-10-03", "2023-11-02"]);
        let key = BucketKey::Day(DateKey::from_ymd(2023, 10, 1).unwrap());
        assert_eq!(aggregation.bucket(&key).unwrap().value("income"), 1000.0);
    }

    #[test]
    fn category_of_builds_one_series_per_category() {
        let aggregation = AggregationService::group(
            &sample(),
            Grouping::Month,
            SeriesSelector::CategoryOf(TransactionKind::Expense),
        );
        assert_eq!(aggregation.series(), ["Food", "Rent"]);
        assert_eq!(aggregation.len(), 2);
        assert_eq!(aggregation.buckets()[1].value("Rent"), 0.0);
    }

    #[test]
    fn unparseable_dates_are_excluded_from_every_grouping() {
        let mut transactions = sample();
        transactions.push(Transaction::expense("31/10/2023", 99.0, "Food"));
        for grouping in [Grouping::Day, Grouping::Month, Grouping::Category] {
            let aggregation =
                AggregationService::group(&transactions, grouping, SeriesSelector::Flow);
            assert_eq!(aggregation.total("expense"), 70.5, "{grouping}");
        }
    }

    #[test]
    fn custom_closures_drive_grouping() {
        let transactions = sample();
        let aggregation = AggregationService::aggregate(
            &transactions,
            |transaction| Some(transaction.amount >= 20.0),
            |transaction| Some((transaction.kind.as_str(), 1.0)),
        );
        assert_eq!(aggregation.bucket(&true).unwrap().value("expense"), 2.0);
        assert_eq!(aggregation.bucket(&false).unwrap().value("expense"), 2.0);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let aggregation = AggregationService::group(&[], Grouping::Category, SeriesSelector::Flow);
        assert!(aggregation.is_empty());
        assert!(aggregation.series().is_empty());
        assert!(AggregationService::daily_expenses(&[]).is_empty());
    }

    #[test]
    fn grouping_parses_from_cli_words() {
        assert_eq!("Monthly".parse::<Grouping>(), Ok(Grouping::Month));
        assert!("weekly".parse::<Grouping>().is_err());
    }
}
