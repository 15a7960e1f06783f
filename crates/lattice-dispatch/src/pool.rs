//! Accelerator worker-pool management.
//!
//! Provides lazy-initialized `rayon::ThreadPool` handles per accelerator
//! index. Each index gets its own dedicated pool, built on first dispatch
//! and cached for reuse, so two accelerator domains never contend for the
//! same workers.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rayon::ThreadPool;

use lattice_core::{LatticeError, Result};

/// Global registry of worker pools (one per accelerator index).
static POOLS: OnceLock<Mutex<HashMap<usize, Arc<ThreadPool>>>> = OnceLock::new();

fn pools() -> &'static Mutex<HashMap<usize, Arc<ThreadPool>>> {
    POOLS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Threads per accelerator pool, from `LATTICE_ACCEL_THREADS`.
/// Zero (rayon picks) when unset or unparsable. Read once per pool build.
fn configured_threads() -> usize {
    std::env::var("LATTICE_ACCEL_THREADS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Get or create the worker pool for the given accelerator index.
///
/// The pool is lazily built on first access and cached for reuse.
pub fn get_pool(index: usize) -> Result<Arc<ThreadPool>> {
    let mut map = pools().lock();
    if let Some(pool) = map.get(&index) {
        return Ok(Arc::clone(pool));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(configured_threads())
        .thread_name(move |i| format!("lattice-accel{index}-{i}"))
        .build()
        .map_err(|e| LatticeError::DomainInit {
            index,
            msg: e.to_string(),
        })?;
    tracing::debug!(
        "built accelerator pool {} with {} threads",
        index,
        pool.current_num_threads()
    );
    let pool = Arc::new(pool);
    map.insert(index, Arc::clone(&pool));
    Ok(pool)
}

/// Check if an accelerator domain can be constructed at all.
pub fn accelerator_available() -> bool {
    get_pool(0).is_ok()
}
