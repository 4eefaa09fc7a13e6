// src/config.rs
//
// Process-wide tunables, ported from the `ConcurrencyUtils`-style facade:
// worker count plus four size thresholds above which a transform engages
// the worker pool. Represented as an explicit struct of atomics rather than
// bare global statics, with a process-wide accessor for callers that want
// the original singleton behavior and a plain constructor for tests that
// want an isolated instance.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Default minimum size (in elements) above which a 1-D transform fans out
/// across two worker threads.
pub const DEFAULT_THRESHOLD_1D_2: usize = 8192;
/// Default minimum size above which a 1-D transform fans out across four
/// worker threads.
pub const DEFAULT_THRESHOLD_1D_4: usize = 65536;
/// Default minimum `rows * cols` above which a 2-D transform parallelizes
/// its row/column passes.
pub const DEFAULT_THRESHOLD_2D: usize = 65536;
/// Reserved for a future 3-D driver; not consulted by anything in this
/// crate today.
pub const DEFAULT_THRESHOLD_3D: usize = 65536;

/// The 1-D thresholds are clamped to this floor: below it, the bookkeeping
/// of splitting and rejoining a transform costs more than doing it on one
/// thread. The 2-D/3-D thresholds are intentionally left unclamped.
const MIN_1D_THRESHOLD: usize = 512;

const ORD: Ordering = Ordering::SeqCst;

/// Process-wide tunables controlling when a transform parallelizes and how
/// many workers it may use.
///
/// All fields are atomics: readers never block, and a change only affects
/// transforms started after the change is observed. A snapshot is taken
/// once at the top of each transform call, so an in-flight transform is
/// unaffected by a concurrent configuration change.
pub struct Config {
    workers: AtomicUsize,
    threshold_1d_2: AtomicUsize,
    threshold_1d_4: AtomicUsize,
    threshold_2d: AtomicUsize,
    threshold_3d: AtomicUsize,
}

impl Config {
    /// Builds a fresh configuration with the default worker count (the
    /// largest power of two not exceeding the available hardware
    /// parallelism) and the default thresholds.
    pub fn new() -> Self {
        Config {
            workers: AtomicUsize::new(default_worker_count()),
            threshold_1d_2: AtomicUsize::new(DEFAULT_THRESHOLD_1D_2),
            threshold_1d_4: AtomicUsize::new(DEFAULT_THRESHOLD_1D_4),
            threshold_2d: AtomicUsize::new(DEFAULT_THRESHOLD_2D),
            threshold_3d: AtomicUsize::new(DEFAULT_THRESHOLD_3D),
        }
    }

    /// Current worker count. Always a power of two, always >= 1.
    pub fn number_of_workers(&self) -> usize {
        self.workers.load(ORD)
    }

    /// Sets the worker count, rounding down to the nearest power of two.
    /// A request for 0 is treated as 1. Only takes effect for the
    /// process-wide pool (see [`crate::pool::global`]) if called before
    /// that pool's first construction -- its thread count, unlike the
    /// thresholds below, is fixed for the rest of the process once a plan
    /// has been built anywhere.
    pub fn set_number_of_workers(&self, n: usize) {
        self.workers.store(round_down_to_power_of_two(n.max(1)), ORD);
    }

    /// Threshold above which a 1-D transform of this size uses two workers.
    pub fn threshold_1d_2(&self) -> usize {
        self.threshold_1d_2.load(ORD)
    }

    /// Threshold above which a 1-D transform of this size uses four
    /// workers. Clamped to a minimum of 512, same as `set_threshold_1d_2`.
    pub fn threshold_1d_4(&self) -> usize {
        self.threshold_1d_4.load(ORD)
    }

    /// Threshold above which a 2-D transform's row/column passes
    /// parallelize. Not clamped to a minimum, unlike the 1-D thresholds.
    pub fn threshold_2d(&self) -> usize {
        self.threshold_2d.load(ORD)
    }

    /// Reserved 3-D threshold, settable/gettable for API parity with the
    /// original but unused by any transform in this crate.
    pub fn threshold_3d(&self) -> usize {
        self.threshold_3d.load(ORD)
    }

    pub fn set_threshold_1d_2(&self, n: usize) {
        self.threshold_1d_2.store(n.max(MIN_1D_THRESHOLD), ORD);
    }

    pub fn set_threshold_1d_4(&self, n: usize) {
        self.threshold_1d_4.store(n.max(MIN_1D_THRESHOLD), ORD);
    }

    pub fn set_threshold_2d(&self, n: usize) {
        self.threshold_2d.store(n, ORD);
    }

    pub fn set_threshold_3d(&self, n: usize) {
        self.threshold_3d.store(n, ORD);
    }

    /// Resets every threshold (not the worker count) back to its default.
    pub fn reset_thresholds(&self) {
        self.threshold_1d_2.store(DEFAULT_THRESHOLD_1D_2, ORD);
        self.threshold_1d_4.store(DEFAULT_THRESHOLD_1D_4, ORD);
        self.threshold_2d.store(DEFAULT_THRESHOLD_2D, ORD);
        self.threshold_3d.store(DEFAULT_THRESHOLD_3D, ORD);
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

/// Largest power of two not exceeding the number of logical CPUs visible
/// to this process (falls back to 1 if unavailable).
fn default_worker_count() -> usize {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    round_down_to_power_of_two(available)
}

fn round_down_to_power_of_two(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        1usize << (usize::BITS - 1 - n.leading_zeros())
    }
}

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// The process-wide configuration instance, lazily initialized on first
/// access with the defaults above.
pub fn global() -> &'static Config {
    GLOBAL.get_or_init(Config::new)
}
