//! Pie, overview and time-series datasets for chart widgets.

use std::collections::BTreeMap;

use tracing::debug;

use spendgrid_domain::{
    Bucket, ChartKey, PieSlice, SeriesLine, SeriesRecord, SliceKind, TimeSeriesDataset,
    TransactionKind,
};

use crate::{
    labels::{Translate, LABEL_OVERSPEND, LABEL_REMAINING},
    style::{ChartStyle, Palette},
};

/// Which series a time-series dataset tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeriesSelection {
    /// `income` and `expense` in their fixed colours.
    #[default]
    Flow,
    /// Caller-named series coloured from the series palette.
    Custom(Vec<String>),
}

impl SeriesSelection {
    pub fn custom<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SeriesSelection::Custom(names.into_iter().map(Into::into).collect())
    }

    fn lines(&self, style: &ChartStyle) -> Vec<SeriesLine> {
        match self {
            SeriesSelection::Flow => vec![
                SeriesLine {
                    name: TransactionKind::Income.as_str().to_string(),
                    color: style.income.to_string(),
                },
                SeriesLine {
                    name: TransactionKind::Expense.as_str().to_string(),
                    color: style.expense.to_string(),
                },
            ],
            SeriesSelection::Custom(names) => names
                .iter()
                .enumerate()
                .map(|(index, name)| SeriesLine {
                    name: name.clone(),
                    color: style.series_palette.color_at(index).to_string(),
                })
                .collect(),
        }
    }
}

pub struct ChartService;

impl ChartService {
    /// One slice per bucket, valued at the bucket's total across series.
    pub fn pie<K: ChartKey>(buckets: &[Bucket<K>], palette: &Palette) -> Vec<PieSlice> {
        Self::slices(buckets, palette, Bucket::total)
    }

    /// One slice per bucket, valued at a single series.
    pub fn pie_series<K: ChartKey>(
        buckets: &[Bucket<K>],
        series: &str,
        palette: &Palette,
    ) -> Vec<PieSlice> {
        Self::slices(buckets, palette, |bucket| bucket.value(series))
    }

    /// Pie slices plus the synthetic leftover or overspend slice.
    ///
    /// The synthetic slice comes last and does not consume a palette colour.
    pub fn overview<K: ChartKey>(
        buckets: &[Bucket<K>],
        remaining: f64,
        style: &ChartStyle,
        labels: &impl Translate,
    ) -> Vec<PieSlice> {
        let mut slices = Self::pie(buckets, &style.palette);
        slices.extend(Self::remainder_slice(remaining, style, labels));
        slices
    }

    /// Slice for money left (`remaining > 0`) or overspent (`remaining < 0`).
    pub fn remainder_slice(
        remaining: f64,
        style: &ChartStyle,
        labels: &impl Translate,
    ) -> Option<PieSlice> {
        let (kind, id, color) = if remaining > 0.0 {
            (SliceKind::Leftover, LABEL_REMAINING, &style.leftover)
        } else if remaining < 0.0 {
            (SliceKind::Overspend, LABEL_OVERSPEND, &style.overspend)
        } else {
            return None;
        };
        Some(PieSlice {
            key: id.to_string(),
            name: labels.translate(id),
            value: remaining.abs(),
            color: color.to_string(),
            kind,
        })
    }

    /// One record per bucket, in bucket order, with a value for every tracked series.
    pub fn time_series<K: ChartKey>(
        buckets: &[Bucket<K>],
        selection: &SeriesSelection,
        style: &ChartStyle,
    ) -> TimeSeriesDataset {
        let lines = selection.lines(style);
        let records = buckets
            .iter()
            .map(|bucket| SeriesRecord {
                key: bucket.key.key_string(),
                label: bucket.key.label(),
                values: lines
                    .iter()
                    .map(|line| (line.name.clone(), bucket.value(&line.name)))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect::<Vec<_>>();
        debug!(
            records = records.len(),
            lines = lines.len(),
            "built time series dataset"
        );
        TimeSeriesDataset { lines, records }
    }

    fn slices<K, F>(buckets: &[Bucket<K>], palette: &Palette, value_of: F) -> Vec<PieSlice>
    where
        K: ChartKey,
        F: Fn(&Bucket<K>) -> f64,
    {
        buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| PieSlice {
                key: bucket.key.key_string(),
                name: bucket.key.label(),
                value: value_of(bucket),
                color: palette.color_at(index).to_string(),
                kind: SliceKind::Bucket,
            })
            .collect()
    }
}
