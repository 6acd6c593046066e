//! Records handed to chart widgets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// Where a pie slice came from.
pub enum SliceKind {
    /// Built from an aggregation bucket; coloured from the palette.
    Bucket,
    /// Synthetic slice for money left over.
    Leftover,
    /// Synthetic slice for spending past the available balance.
    Overspend,
}

impl SliceKind {
    pub fn is_synthetic(self) -> bool {
        !matches!(self, SliceKind::Bucket)
    }
}

/// One slice of a pie or donut chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieSlice {
    /// Source key; synthetic slices use their label id.
    pub key: String,
    pub name: String,
    pub value: f64,
    pub color: String,
    pub kind: SliceKind,
}

/// A plotted series and the colour it is drawn with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesLine {
    pub name: String,
    pub color: String,
}

/// One period of a bar or line chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesRecord {
    pub key: String,
    pub label: String,
    pub values: BTreeMap<String, f64>,
}

impl SeriesRecord {
    pub fn value(&self, series: &str) -> f64 {
        self.values.get(series).copied().unwrap_or(0.0)
    }
}

/// Bar/line chart input: the series to draw plus one record per period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimeSeriesDataset {
    pub lines: Vec<SeriesLine>,
    pub records: Vec<SeriesRecord>,
}

impl TimeSeriesDataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, key: &str) -> Option<&SeriesRecord> {
        self.records.iter().find(|record| record.key == key)
    }
}
