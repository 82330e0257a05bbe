//! Loop timing metrics for the hold task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hdrhistogram::Histogram;
use parking_lot::Mutex;

/// Thread-safe timing collector shared between the hold task and the
/// owner that prints the report.
#[derive(Clone)]
pub struct LoopMetrics {
    cycle_hist: Arc<Mutex<Histogram<u64>>>,
    jitter_hist: Arc<Mutex<Histogram<u64>>>,
    last_cycle_ns: Arc<AtomicU64>,
    missed_deadlines: Arc<AtomicU64>,
}

impl LoopMetrics {
    pub fn new() -> Self {
        Self {
            cycle_hist: Arc::new(Mutex::new(Histogram::new(3).unwrap())),
            jitter_hist: Arc::new(Mutex::new(Histogram::new(3).unwrap())),
            last_cycle_ns: Arc::new(AtomicU64::new(0)),
            missed_deadlines: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records one iteration's compute time. A missed deadline is counted
    /// when the work alone exceeded the sample interval.
    pub fn record_cycle(&self, duration: Duration, interval: Duration) {
        let ns = duration.as_nanos() as u64;
        self.cycle_hist.lock().record(ns).ok();

        let last = self.last_cycle_ns.swap(ns, Ordering::Relaxed);
        if last > 0 {
            self.jitter_hist.lock().record(last.abs_diff(ns)).ok();
        }

        if duration > interval {
            self.missed_deadlines.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn report(&self) -> LoopReport {
        let cycle = self.cycle_hist.lock();
        let jitter = self.jitter_hist.lock();

        LoopReport {
            cycle_p50: Duration::from_nanos(cycle.value_at_quantile(0.5)),
            cycle_p99: Duration::from_nanos(cycle.value_at_quantile(0.99)),
            jitter_p99: Duration::from_nanos(jitter.value_at_quantile(0.99)),
            missed_deadlines: self.missed_deadlines.load(Ordering::Relaxed),
        }
    }
}

impl Default for LoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct LoopReport {
    pub cycle_p50: Duration,
    pub cycle_p99: Duration,
    pub jitter_p99: Duration,
    pub missed_deadlines: u64,
}
