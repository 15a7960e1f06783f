//! The data-parallel dispatch primitive.

use rayon::prelude::*;

use lattice_core::{Index, Result, Shape};

use crate::domain::Domain;
use crate::pool;

/// Invoke `op` exactly once for every coordinate in `shape`, on `domain`.
///
/// The call blocks until all `shape.size()` invocations complete. There is
/// no ordering guarantee between coordinates: the accelerator domain runs
/// them concurrently and the host domain's order is an implementation
/// detail. Successive dispatches from one caller are totally ordered because
/// the call blocks.
///
/// A zero-size shape is a successful no-op: zero invocations, `Ok(())`.
///
/// The `Send + Sync` bound on `op` is the restricted-capture contract: the
/// same operation body must be valid wherever it may run, so a closure
/// capturing host-only (non-`Send`) state is rejected at compile time for
/// either domain. Capture `View`/`Array` handles by value; each invocation
/// may write only the elements addressed by its own coordinate (the
/// no-aliasing discipline the `Slot` soundness contract relies on).
///
/// An `Err` from any invocation aborts the dispatch and propagates out of
/// this call. Writes already committed by sibling invocations remain —
/// there is no atomicity across the shape, no retry, no rollback.
pub fn parallel_for_each<F>(domain: Domain, shape: &Shape, op: F) -> Result<()>
where
    F: Fn(Index) -> Result<()> + Send + Sync,
{
    let total = shape.size();
    if total == 0 {
        tracing::trace!("dispatch over empty shape {} skipped", shape);
        return Ok(());
    }
    tracing::trace!("dispatching {} invocations over {} on {}", total, shape, domain);

    match domain {
        Domain::Host => {
            for index in shape.indices() {
                op(index)?;
            }
            Ok(())
        }
        Domain::Accelerator(idx) => {
            let workers = pool::get_pool(idx)?;
            workers.install(|| {
                (0..total)
                    .into_par_iter()
                    .try_for_each(|offset| op(shape.delinearize(offset)?))
            })
        }
    }
}
