use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond wall clock used for `createdAt`/`updatedAt` stamps and generated ids.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// [`Clock`] backed by [`SystemTime`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

static ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate an identifier `<prefix>-<millis>-<seq>`.
///
/// The process-wide sequence keeps ids unique even when two are minted within the same
/// millisecond.
pub fn next_id(prefix: &str, clock: &dyn Clock) -> String {
    let seq = ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{seq}", clock.now_millis())
}
