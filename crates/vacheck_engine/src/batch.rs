//! Batch evaluation.
//!
//! Records are independent, so a batch is split into contiguous chunks and
//! each chunk is checked on its own scoped thread. Outcomes come back in
//! input order.

use std::thread;

use vacheck_foundation::Result;
use vacheck_table::RuleTable;

use crate::config::CheckConfig;
use crate::engine::{CheckOutcome, ConsistencyEngine};
use crate::vector::SymptomVector;

/// Checks every record against `rules`.
///
/// All records are checked for compatibility first; if any fails, nothing is
/// evaluated.
///
/// # Errors
///
/// Returns the first compatibility error (see
/// [`ConsistencyEngine::check_compatible`]).
pub fn evaluate_batch(
    records: Vec<SymptomVector>,
    rules: &RuleTable,
    config: &CheckConfig,
) -> Result<Vec<CheckOutcome>> {
    let engine = ConsistencyEngine::from_config(rules, config);
    for record in &records {
        engine.check_compatible(record)?;
    }

    let workers = config.workers.max(1).min(records.len().max(1));
    tracing::debug!(records = records.len(), workers, "checking batch");

    if workers == 1 {
        return Ok(records.into_iter().map(|r| engine.run(r)).collect());
    }

    let chunk_size = records.len().div_ceil(workers);
    let mut chunks: Vec<Vec<SymptomVector>> = Vec::with_capacity(workers);
    let mut records = records.into_iter();
    loop {
        let chunk: Vec<_> = records.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }

    let outcomes: Vec<CheckOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                scope.spawn(move || chunk.into_iter().map(|r| engine.run(r)).collect::<Vec<_>>())
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(done) => done,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });
    Ok(outcomes)
}
