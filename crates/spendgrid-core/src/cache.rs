//! Memoized datasets for one transaction list at a time.

use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};

use chrono::Weekday;
use tracing::debug;

use spendgrid_domain::{BucketKey, Heatmap, Transaction};

use crate::{
    aggregation_service::{Aggregation, AggregationService, Grouping, SeriesSelector},
    heatmap_service::HeatmapService,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Caches aggregations and heatmaps keyed on the identity of the list.
///
/// Presenting a different `Arc` than last time drops every entry, even if
/// its contents are equal.
#[derive(Debug, Default)]
pub struct DatasetCache {
    source: Option<Arc<[Transaction]>>,
    aggregations: HashMap<(Grouping, SeriesSelector), Aggregation<BucketKey>>,
    heatmaps: HashMap<Weekday, Heatmap>,
    stats: CacheStats,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aggregation(
        &mut self,
        transactions: &Arc<[Transaction]>,
        grouping: Grouping,
        selector: SeriesSelector,
    ) -> &Aggregation<BucketKey> {
        self.track(transactions);
        match self.aggregations.entry((grouping, selector)) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                debug!(%grouping, ?selector, "aggregation cache hit");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                debug!(%grouping, ?selector, "aggregation cache miss");
                entry.insert(AggregationService::group(transactions, grouping, selector))
            }
        }
    }

    pub fn heatmap(&mut self, transactions: &Arc<[Transaction]>, week_start: Weekday) -> &Heatmap {
        self.track(transactions);
        match self.heatmaps.entry(week_start) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                debug!(?week_start, "heatmap cache hit");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                debug!(?week_start, "heatmap cache miss");
                entry.insert(HeatmapService::build(transactions, week_start))
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.source = None;
        self.aggregations.clear();
        self.heatmaps.clear();
    }

    fn track(&mut self, transactions: &Arc<[Transaction]>) {
        let same = self
            .source
            .as_ref()
            .is_some_and(|source| Arc::ptr_eq(source, transactions));
        if !same {
            if self.source.is_some() {
                debug!("transaction list changed, dropping cached datasets");
            }
            self.clear();
            self.source = Some(Arc::clone(transactions));
        }
    }
}
