//! Batch driver: splits a word list into batches, looks each batch up with
//! bounded concurrency and checkpoints progress after every batch.
//!
//! Each lookup owns the record it builds; workers share only the
//! [`Etymologist`]. Statistics are returned per batch and folded by the
//! driver, never updated in place by workers.

use std::path::Path;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;

use etymon_lookup::{EtymologyRecord, Etymologist};

use crate::checkpoint::Checkpoint;
use crate::config::BatchConfig;
use crate::error::Result;
use crate::stats::BatchStats;

/// A contiguous slice of the word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Position of this batch in the full list. Stable across runs for a
    /// fixed list and batch size.
    pub index: usize,
    /// Words in list order.
    pub words: Vec<String>,
}

/// The finalised records of one batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Index of the batch these records came from.
    pub index: usize,
    /// One record per word, in batch order.
    pub records: Vec<EtymologyRecord>,
    /// Statistics over `records`.
    pub stats: BatchStats,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Statistics over every batch processed in this run.
    pub stats: BatchStats,
    /// Batches looked up in this run.
    pub batches_processed: usize,
    /// Batches skipped because the checkpoint marked them done.
    pub batches_skipped: usize,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Wall-clock duration of the run.
    pub fn elapsed(&self) -> chrono::TimeDelta {
        self.finished_at - self.started_at
    }
}

/// Split `words` into batches of `batch_size`, leaving out batches the
/// checkpoint already marks processed.
///
/// A `batch_size` of 0 is treated as 1.
pub fn plan_batches(words: &[String], batch_size: usize, checkpoint: &Checkpoint) -> Vec<Batch> {
    words
        .chunks(batch_size.max(1))
        .enumerate()
        .filter(|(index, _)| !checkpoint.is_processed(*index))
        .map(|(index, chunk)| Batch {
            index,
            words: chunk.to_vec(),
        })
        .collect()
}

/// Look up every word of `batch` with at most `concurrency` lookups in flight.
///
/// Records come back in batch order regardless of completion order.
pub async fn process_batch(
    etymologist: &Etymologist,
    batch: &Batch,
    language: &str,
    concurrency: usize,
) -> BatchOutcome {
    let records: Vec<EtymologyRecord> = stream::iter(&batch.words)
        .map(|word| etymologist.lookup(word, language))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let stats: BatchStats = records.iter().collect();
    tracing::debug!(
        batch = batch.index,
        words = stats.words_processed,
        with_data = stats.words_with_data,
        "batch looked up"
    );

    BatchOutcome {
        index: batch.index,
        records,
        stats,
    }
}

/// Process every pending batch of `words` in order.
///
/// Each finished batch is handed to `sink` for persistence, then marked in
/// `checkpoint`, which is saved to `checkpoint_path` when one is given. A
/// sink error stops the run before the failing batch is marked, so the
/// batch is retried on resume.
///
/// # Errors
///
/// Returns the first error from `sink` or from saving the checkpoint.
pub async fn run<F>(
    etymologist: &Etymologist,
    words: &[String],
    config: &BatchConfig,
    checkpoint: &mut Checkpoint,
    checkpoint_path: Option<&Path>,
    mut sink: F,
) -> Result<RunSummary>
where
    F: FnMut(&BatchOutcome) -> Result<()>,
{
    let started_at = Utc::now();
    let limit = config.max_words.map_or(words.len(), |max| max.min(words.len()));
    let words = &words[..limit];

    let batch_size = config.batch_size.max(1);
    let total_batches = words.len().div_ceil(batch_size);
    let pending = plan_batches(words, batch_size, checkpoint);
    let batches_skipped = total_batches - pending.len();

    tracing::info!(
        words = words.len(),
        language = %config.language,
        batches = total_batches,
        skipped = batches_skipped,
        "starting etymology run"
    );

    let mut stats = BatchStats::default();
    let mut batches_processed = 0;

    for batch in &pending {
        let outcome = process_batch(etymologist, batch, &config.language, config.concurrency).await;

        if let Err(e) = sink(&outcome) {
            tracing::error!(batch = batch.index, error = %e, "failed to persist batch");
            return Err(e);
        }

        checkpoint.mark_processed(batch.index);
        if let Some(path) = checkpoint_path {
            checkpoint.save(path)?;
        }

        stats.combine(&outcome.stats);
        batches_processed += 1;

        tracing::info!(
            batch = batch.index,
            progress = format!("{batches_processed}/{}", pending.len()),
            words = stats.words_processed,
            avg_quality = stats.average_quality(),
            "batch complete"
        );
    }

    let summary = RunSummary {
        stats,
        batches_processed,
        batches_skipped,
        started_at,
        finished_at: Utc::now(),
    };

    tracing::info!(
        words = summary.stats.words_processed,
        with_data = summary.stats.words_with_data,
        without_data = summary.stats.words_without_data,
        connections = summary.stats.root_connections,
        elapsed_secs = summary.elapsed().num_seconds(),
        "etymology run complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::sync::Arc;

    use etymon_lookup::{EtymologySource, LookupConfig};

    use crate::error::EtymonError;
    use crate::sources::SupplementarySource;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_owned()).collect()
    }

    fn etymologist() -> Etymologist {
        let sources: Vec<Arc<dyn EtymologySource>> =
            vec![Arc::new(SupplementarySource::builtin().expect("seed"))];
        Etymologist::new(LookupConfig::default(), sources).expect("valid")
    }

    fn batch_config(batch_size: usize) -> BatchConfig {
        BatchConfig {
            batch_size,
            concurrency: 2,
            ..Default::default()
        }
    }

    #[test]
    fn plan_splits_into_chunks() {
        let list = words(&["a", "b", "c", "d", "e"]);
        let batches = plan_batches(&list, 2, &Checkpoint::new(list.len()));
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].words, words(&["a", "b"]));
        assert_eq!(batches[2].index, 2);
        assert_eq!(batches[2].words, words(&["e"]));
    }

    #[test]
    fn plan_skips_processed_batches() {
        let list = words(&["a", "b", "c", "d", "e"]);
        let mut checkpoint = Checkpoint::new(list.len());
        checkpoint.mark_processed(1);

        let indices: Vec<_> = plan_batches(&list, 2, &checkpoint)
            .iter()
            .map(|b| b.index)
            .collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn plan_empty_list() {
        assert!(plan_batches(&[], 10, &Checkpoint::new(0)).is_empty());
    }

    #[test]
    fn plan_zero_batch_size_is_one() {
        let list = words(&["a", "b"]);
        assert_eq!(plan_batches(&list, 0, &Checkpoint::new(2)).len(), 2);
    }

    #[tokio::test]
    async fn process_batch_preserves_order() {
        let etymologist = etymologist();
        let batch = Batch {
            index: 4,
            words: words(&["philosophy", "xyzzy123", "etymology", "computer"]),
        };
        let outcome = process_batch(&etymologist, &batch, "English", 3).await;

        assert_eq!(outcome.index, 4);
        let looked_up: Vec<_> = outcome.records.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(looked_up, vec!["philosophy", "xyzzy123", "etymology", "computer"]);
        assert_eq!(outcome.stats.words_processed, 4);
        assert_eq!(outcome.stats.words_with_data, 3);
        assert_eq!(outcome.stats.words_without_data, 1);
        assert_eq!(outcome.stats.root_connections, 5);
    }

    #[tokio::test]
    async fn run_processes_all_batches_and_checkpoints() {
        let etymologist = etymologist();
        let list = words(&["etymology", "democracy", "xyzzy123", "biology", "computer"]);
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("checkpoint.json");
        let mut checkpoint = Checkpoint::new(list.len());
        let mut persisted = Vec::new();

        let summary = run(
            &etymologist,
            &list,
            &batch_config(2),
            &mut checkpoint,
            Some(&path),
            |outcome| {
                persisted.push(outcome.index);
                Ok(())
            },
        )
        .await
        .expect("run");

        assert_eq!(persisted, vec![0, 1, 2]);
        assert_eq!(summary.batches_processed, 3);
        assert_eq!(summary.batches_skipped, 0);
        assert_eq!(summary.stats.words_processed, 5);
        assert_eq!(summary.stats.words_without_data, 1);
        assert!(summary.finished_at >= summary.started_at);

        let saved = Checkpoint::load(&path, list.len()).expect("load");
        assert_eq!(saved.processed_batches.len(), 3);
    }

    #[tokio::test]
    async fn run_resumes_from_checkpoint() {
        let etymologist = etymologist();
        let list = words(&["etymology", "democracy", "biology", "computer"]);
        let mut checkpoint = Checkpoint::new(list.len());
        checkpoint.mark_processed(0);

        let mut seen = Vec::new();
        let summary = run(
            &etymologist,
            &list,
            &batch_config(2),
            &mut checkpoint,
            None,
            |outcome| {
                seen.extend(outcome.records.iter().map(|r| r.word.clone()));
                Ok(())
            },
        )
        .await
        .expect("run");

        assert_eq!(seen, words(&["biology", "computer"]));
        assert_eq!(summary.batches_skipped, 1);
        assert_eq!(summary.batches_processed, 1);
    }

    #[tokio::test]
    async fn sink_failure_leaves_batch_pending() {
        let etymologist = etymologist();
        let list = words(&["etymology", "democracy", "biology"]);
        let mut checkpoint = Checkpoint::new(list.len());

        let result = run(
            &etymologist,
            &list,
            &batch_config(1),
            &mut checkpoint,
            None,
            |outcome| {
                if outcome.index == 1 {
                    Err(EtymonError::Output("disk full".into()))
                } else {
                    Ok(())
                }
            },
        )
        .await;

        assert!(result.is_err());
        assert!(checkpoint.is_processed(0));
        assert!(!checkpoint.is_processed(1));
        assert!(!checkpoint.is_processed(2));
    }

    #[tokio::test]
    async fn run_honours_max_words() {
        let etymologist = etymologist();
        let list = words(&["etymology", "democracy", "biology", "computer"]);
        let mut checkpoint = Checkpoint::new(list.len());
        let config = BatchConfig {
            max_words: Some(3),
            ..batch_config(2)
        };

        let summary = run(&etymologist, &list, &config, &mut checkpoint, None, |_| Ok(()))
            .await
            .expect("run");
        assert_eq!(summary.stats.words_processed, 3);
        assert_eq!(summary.batches_processed, 2);
    }
}
