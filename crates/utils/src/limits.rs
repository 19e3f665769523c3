//! Worker-pool sizing from explicit arguments, the environment, and the host

use evalrig_core::{Error, Result, EVALRIG_WORKERS_VAR};
use std::env;

/// Resolve the worker limit for a batch.
///
/// An explicit request wins, then the `EVALRIG_WORKERS` environment
/// variable, then the host CPU count. Zero is rejected wherever it comes
/// from: the pool-size contract needs a positive limit.
pub fn resolve_worker_limit(requested: Option<usize>) -> Result<usize> {
    if let Some(limit) = requested {
        if limit == 0 {
            return Err(Error::configuration("worker limit must be positive"));
        }
        return Ok(limit);
    }

    match env::var(EVALRIG_WORKERS_VAR) {
        Ok(value) => {
            let limit: usize = value.trim().parse().map_err(|_| {
                Error::environment(
                    EVALRIG_WORKERS_VAR,
                    format!("invalid worker count '{value}'"),
                )
            })?;
            if limit == 0 {
                return Err(Error::environment(
                    EVALRIG_WORKERS_VAR,
                    "worker count must be positive",
                ));
            }
            Ok(limit)
        }
        Err(_) => Ok(num_cpus::get()),
    }
}
