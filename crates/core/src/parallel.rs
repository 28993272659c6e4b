//! Settle-all fan-out over rayon.

use std::panic::{AssertUnwindSafe, catch_unwind};

use anyhow::{Result, anyhow};
use rayon::prelude::*;

/// Runs `op` on every item in parallel and waits for all of them.
///
/// No job can cancel another: errors and panics are both turned into that
/// job's own `Err`. Results are indexed like `items`, whatever the
/// completion order.
pub fn settle_all<T, R, F>(items: &[T], op: F) -> Vec<Result<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync + Send,
{
    items
        .par_iter()
        .map(|item| {
            catch_unwind(AssertUnwindSafe(|| op(item))).unwrap_or_else(|panic| {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(anyhow!("job panicked: {message}"))
            })
        })
        .collect()
}
