//! Per-run counters and timing accumulators.

use std::time::Duration;

use serde::Serialize;

/// Counters and timing accumulators for a single simulation run.
///
/// Mutated only by the engine, zeroed by `reset`. All fields are monotone
/// non-decreasing within a run. Consumers derive rates and averages from
/// the raw fields or through the helper methods; the timing figures are
/// advisory wall-clock samples around fault handling and swap I/O.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SimStats {
    /// Total references serviced.
    pub accesses: u64,
    /// References that found their page resident.
    pub hits: u64,
    /// References that required fault handling.
    pub faults: u64,
    /// Pages written to the backing store during eviction.
    pub swaps_out: u64,
    /// Pages read back from the backing store.
    pub swaps_in: u64,
    /// Wall-clock time spent inside fault handling.
    pub fault_time: Duration,
    /// Wall-clock time spent writing evicted pages.
    pub swap_out_time: Duration,
    /// Wall-clock time spent reloading pages.
    pub swap_in_time: Duration,
}

impl SimStats {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of accesses that hit, or `None` before any access.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> Option<f64> {
        (self.accesses > 0).then(|| self.hits as f64 / self.accesses as f64)
    }

    /// Fraction of accesses that faulted, or `None` before any access.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fault_rate(&self) -> Option<f64> {
        (self.accesses > 0).then(|| self.faults as f64 / self.accesses as f64)
    }

    /// Mean time per fault, or `None` if no fault occurred.
    #[must_use]
    pub fn avg_fault_time(&self) -> Option<Duration> {
        mean(self.fault_time, self.faults)
    }

    /// Mean time per swap-out, or `None` if none occurred.
    #[must_use]
    pub fn avg_swap_out_time(&self) -> Option<Duration> {
        mean(self.swap_out_time, self.swaps_out)
    }

    /// Mean time per swap-in, or `None` if none occurred.
    #[must_use]
    pub fn avg_swap_in_time(&self) -> Option<Duration> {
        mean(self.swap_in_time, self.swaps_in)
    }

    /// Combined backing-store I/O time for the run.
    #[must_use]
    pub fn total_io_time(&self) -> Duration {
        self.swap_out_time + self.swap_in_time
    }
}

fn mean(total: Duration, count: u64) -> Option<Duration> {
    let count = u32::try_from(count).ok().filter(|&c| c > 0)?;
    Some(total / count)
}

/// End-of-run record handed to the harness.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Name of the replacement policy the run used.
    pub policy: &'static str,
    /// Final counter and timing values.
    #[serde(flatten)]
    pub stats: SimStats,
}
