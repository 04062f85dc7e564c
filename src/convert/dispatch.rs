//! Parallel fan-out of conversion units over a worker pool.

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::convert::unit::{ConversionUnit, rasterize_unit};
use crate::foundation::error::{ConvertError, ConvertResult};

/// Build a rayon pool with `nproc` workers (`0` uses rayon's default,
/// one worker per core).
pub(crate) fn build_thread_pool(nproc: usize) -> ConvertResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if nproc > 0 {
        builder = builder.num_threads(nproc);
    }
    builder
        .build()
        .map_err(|e| ConvertError::validation(format!("failed to build worker pool: {e}")))
}

/// Convert every unit across a pool of `nproc` workers, blocking until all
/// complete.
///
/// Units are fully independent: each owns its frames and writes to a distinct
/// output path, so no ordering holds between them and worker count never
/// affects the bytes any unit writes. Progress is reported as units finish.
/// The first failure aborts the run once the pool drains; there is no
/// per-unit retry or skip.
pub fn dispatch_units(units: Vec<ConversionUnit>, nproc: usize) -> ConvertResult<()> {
    if units.is_empty() {
        return Ok(());
    }

    let pool = build_thread_pool(nproc)?;
    let bar = ProgressBar::new(units.len() as u64);
    let results: Vec<ConvertResult<()>> = pool.install(|| {
        units
            .into_par_iter()
            .map(|mut unit| {
                let result = rasterize_unit(&mut unit);
                bar.inc(1);
                result
            })
            .collect()
    });
    bar.finish_and_clear();

    results.into_iter().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/convert/dispatch.rs"]
mod tests;
