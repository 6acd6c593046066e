//! Aggregation buckets and the keys they are grouped by.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    common::ChartKey,
    date_key::{DateKey, MonthKey},
};

/// One aggregation group: a key plus a running total per series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket<K> {
    pub key: K,
    pub values: BTreeMap<String, f64>,
}

impl<K> Bucket<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            values: BTreeMap::new(),
        }
    }

    /// Value of a series, 0 when the bucket never saw it.
    pub fn value(&self, series: &str) -> f64 {
        self.values.get(series).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, series: &str, amount: f64) {
        match self.values.get_mut(series) {
            Some(total) => *total += amount,
            None => {
                self.values.insert(series.to_string(), amount);
            }
        }
    }

    /// Sum across every series in the bucket.
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }
}

/// Key produced by the built-in groupings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BucketKey {
    Day(DateKey),
    Month(MonthKey),
    Category(String),
}

impl BucketKey {
    pub fn as_date(&self) -> Option<DateKey> {
        match self {
            BucketKey::Day(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_month(&self) -> Option<MonthKey> {
        match self {
            BucketKey::Month(month) => Some(*month),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            BucketKey::Category(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Day(date) => fmt::Display::fmt(date, f),
            BucketKey::Month(month) => fmt::Display::fmt(month, f),
            BucketKey::Category(name) => f.write_str(name),
        }
    }
}

impl ChartKey for BucketKey {
    fn key_string(&self) -> String {
        self.to_string()
    }

    fn label(&self) -> String {
        match self {
            BucketKey::Day(date) => date.label(),
            BucketKey::Month(month) => month.label(),
            BucketKey::Category(name) => name.clone(),
        }
    }
}
