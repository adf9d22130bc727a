use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::difficulty::score;
use crate::error::Result;
use crate::store::PhraseStore;

/// Knobs for a backfill run
#[derive(Debug, Clone, Default)]
pub struct BackfillOptions {
    /// Process at most this many records
    pub limit: Option<usize>,
    /// Checked before each record; once set, the remaining records are skipped
    pub cancel: Option<Arc<AtomicBool>>,
}

impl BackfillOptions {
    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Outcome of a backfill run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackfillSummary {
    /// Unscored records found by the initial read
    pub scanned: usize,
    pub scored: usize,
    pub failed: usize,
    /// Not attempted because of the limit or cancellation
    pub skipped: usize,
    /// Unscored records left afterwards, or `None` if the recount failed
    pub remaining: Option<u64>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl BackfillSummary {
    /// Every scanned record was written and nothing is left unscored
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.skipped == 0 && self.remaining == Some(0)
    }
}

/// Score every record without a difficulty and write the result back.
///
/// Only the initial read is fatal. A failed write is logged, counted and left
/// for the next run; the loop carries on with the next record.
pub fn backfill<S: PhraseStore>(store: &mut S, options: &BackfillOptions) -> Result<BackfillSummary> {
    let started_at = Local::now();
    let records = store.unscored()?;
    let scanned = records.len();
    let budget = options.limit.unwrap_or(scanned).min(scanned);
    info!(scanned, budget, "starting difficulty backfill");

    let mut scored = 0;
    let mut failed = 0;
    let mut attempted = 0;

    for record in records.iter().take(budget) {
        if options.cancelled() {
            info!(attempted, "backfill cancelled");
            break;
        }
        attempted += 1;

        let difficulty = score(record.content.as_deref(), record.language.as_deref());
        match store.set_difficulty(record.id, difficulty) {
            Ok(()) => {
                debug!(phrase_id = record.id, score = difficulty.value(), "stored difficulty");
                scored += 1;
            }
            Err(e) => {
                warn!(phrase_id = record.id, error = %e, "failed to store difficulty");
                failed += 1;
            }
        }
    }

    let remaining = match store.count_unscored() {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(error = %e, "could not verify remaining unscored phrases");
            None
        }
    };

    let summary = BackfillSummary {
        scanned,
        scored,
        failed,
        skipped: scanned - attempted,
        remaining,
        started_at,
        finished_at: Local::now(),
    };
    info!(
        scored = summary.scored,
        failed = summary.failed,
        skipped = summary.skipped,
        remaining = ?summary.remaining,
        "backfill finished"
    );
    Ok(summary)
}
