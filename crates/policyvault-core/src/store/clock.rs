use chrono::Utc;

/// Source of transaction timestamps.
///
/// Record timestamps always come from here, never from caller input.
pub trait TransactionClock: Send + Sync {
    fn now_seconds(&self) -> i64;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TransactionClock for SystemClock {
    fn now_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to one instant. Use this in tests to avoid clock-dependent assertions.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl TransactionClock for FixedClock {
    fn now_seconds(&self) -> i64 {
        self.0
    }
}
