//! Primitive call accounting

use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::time::Duration;

use super::ops::Op;

/// Monotone counters for primitive activity. All counters are atomic, so a
/// kernel shared across host tasks needs no further synchronization; they
/// only move forward between resets.
pub struct Stats {
    calls: AtomicU64,
    fails: AtomicU64,
    user_time_ns: AtomicU64,
    per_op: [AtomicU64; Op::COUNT],
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub primitive_calls: u64,
    pub primitive_fails: u64,
    pub user_time: Duration,
}

impl Stats {
    pub(crate) fn new() -> Stats {
        Stats {
            calls: AtomicU64::new(0),
            fails: AtomicU64::new(0),
            user_time_ns: AtomicU64::new(0),
            per_op: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    #[inline]
    pub(crate) fn record_call(&self, op: Op) {
        self.calls.fetch_add(1, Relaxed);
        self.per_op[op as usize].fetch_add(1, Relaxed);
    }

    #[inline]
    pub(crate) fn record_fail(&self) {
        self.fails.fetch_add(1, Relaxed);
    }

    #[inline]
    pub(crate) fn add_time(&self, ns: u64) {
        self.user_time_ns.fetch_add(ns, Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            primitive_calls: self.calls.load(Relaxed),
            primitive_fails: self.fails.load(Relaxed),
            user_time: Duration::from_nanos(self.user_time_ns.load(Relaxed)),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.calls.store(0, Relaxed);
        self.fails.store(0, Relaxed);
        self.user_time_ns.store(0, Relaxed);
        for c in &self.per_op {
            c.store(0, Relaxed);
        }
    }

    /// Calls recorded for one primitive.
    pub fn calls_for(&self, op: Op) -> u64 {
        self.per_op[op as usize].load(Relaxed)
    }

    /// Per-primitive call counts in registry order.
    pub fn per_op(&self) -> Vec<(&'static str, u64)> {
        Op::ALL
            .iter()
            .map(|&op| (op.name(), self.calls_for(op)))
            .collect()
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}
