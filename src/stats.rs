//! Run statistics as an explicit accumulator.
//!
//! Each batch builds its own [`BatchStats`]; the driver folds them
//! together with [`BatchStats::combine`]. Nothing is shared between
//! concurrent workers.

use serde::{Deserialize, Serialize};

use etymon_lookup::EtymologyRecord;

/// Counters over a set of finalised records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Records seen.
    pub words_processed: usize,
    /// Records with at least one root or a year.
    pub words_with_data: usize,
    /// Records no source knew anything about.
    pub words_without_data: usize,
    /// Total root entries across all records.
    pub root_connections: usize,
    /// Sum of quality scores, for averaging.
    pub quality_sum: u64,
}

impl BatchStats {
    /// Count one finalised record.
    pub fn record(&mut self, record: &EtymologyRecord) {
        self.words_processed += 1;
        if record.is_empty() {
            self.words_without_data += 1;
        } else {
            self.words_with_data += 1;
        }
        self.root_connections += record.roots.len();
        self.quality_sum += u64::from(record.quality_score);
    }

    /// Fold `other` into `self`.
    pub fn combine(&mut self, other: &BatchStats) {
        self.words_processed += other.words_processed;
        self.words_with_data += other.words_with_data;
        self.words_without_data += other.words_without_data;
        self.root_connections += other.root_connections;
        self.quality_sum += other.quality_sum;
    }

    /// Mean quality score, or `0.0` when nothing was processed.
    pub fn average_quality(&self) -> f64 {
        if self.words_processed == 0 {
            return 0.0;
        }
        self.quality_sum as f64 / self.words_processed as f64
    }

    /// Mean number of roots per processed word.
    pub fn average_connections(&self) -> f64 {
        if self.words_processed == 0 {
            return 0.0;
        }
        self.root_connections as f64 / self.words_processed as f64
    }
}

impl<'a> FromIterator<&'a EtymologyRecord> for BatchStats {
    fn from_iter<I: IntoIterator<Item = &'a EtymologyRecord>>(iter: I) -> Self {
        let mut stats = Self::default();
        for record in iter {
            stats.record(record);
        }
        stats
    }
}
