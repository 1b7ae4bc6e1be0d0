//! Cross-cutting timing wrapper for root-group handlers
//!
//! Purely observational: measures wall-clock duration of a handler
//! future and logs it. The handler's result passes through untouched,
//! including failures. Timeout policy, if any, belongs to the transport
//! layer.

use std::future::Future;
use std::time::Instant;

/// Runs a handler future, logging its elapsed wall-clock time.
pub async fn timed<F, T>(handler: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let started = Instant::now();
    let out = fut.await;
    log::debug!("{} handler finished in {:?}", handler, started.elapsed());
    out
}
