// src/plan1d.rs
//
// The 1-D transform plan: picks an algorithm for its length once at
// construction, precomputes that algorithm's tables, and owns a worker
// pool sized from the process-wide configuration at that same moment. A
// `Plan1D` never reallocates or re-selects an algorithm after
// construction -- build a new plan if the length changes.

use std::sync::Arc;

use num_complex::Complex64;

use crate::config;
use crate::error::FftError;
use crate::kernel::{self, split_radix, Algorithm};
use crate::pool::{self, WorkerPool};

/// An immutable, reusable plan for 1-D complex and real FFTs of a fixed
/// length.
pub struct Plan1D {
    n: usize,
    algo: Algorithm,
    pool: Arc<WorkerPool>,
}

impl Plan1D {
    /// Builds a plan for transforms of length `n`. `n` must be positive.
    /// Dispatches onto the process-wide worker pool shared with every
    /// other plan rather than spinning up its own threads.
    pub fn new(n: i64) -> Result<Self, FftError> {
        let algo = Algorithm::select(n)?;
        Ok(Plan1D {
            n: n as usize,
            algo,
            pool: pool::global(),
        })
    }

    /// The transform length this plan was built for.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn check_len(&self, got: usize) -> Result<(), FftError> {
        if got == self.n {
            Ok(())
        } else {
            Err(FftError::DimensionMismatch { expected: self.n, got })
        }
    }

    /// In-place forward complex DFT.
    pub fn complex_forward(&self, buf: &mut [Complex64]) -> Result<(), FftError> {
        self.check_len(buf.len())?;
        self.dispatch(buf, false, false)
    }

    /// In-place inverse complex DFT, dividing by `len()` when `scale` is set.
    pub fn complex_inverse(&self, buf: &mut [Complex64], scale: bool) -> Result<(), FftError> {
        self.check_len(buf.len())?;
        self.dispatch(buf, true, scale)
    }

    /// Forward real-input DFT, packing the conjugate-symmetric spectrum
    /// back into a same-length real buffer (see `kernel::packed1d` for the
    /// packed-Hermitian layout).
    pub fn real_forward(&self, x: &mut [f64]) -> Result<(), FftError> {
        self.check_len(x.len())?;
        kernel::real_forward_packed(&self.algo, x);
        Ok(())
    }

    /// Inverse of [`real_forward`](Self::real_forward).
    pub fn real_inverse(&self, x: &mut [f64], scale: bool) -> Result<(), FftError> {
        self.check_len(x.len())?;
        kernel::real_inverse_packed(&self.algo, x, scale);
        Ok(())
    }

    /// Forward real-input DFT producing the *full*, unpacked complex
    /// spectrum. `x`'s imaginary parts are overwritten with zero before the
    /// transform, so callers need not clear them first.
    pub fn real_forward_full(&self, x: &mut [Complex64]) -> Result<(), FftError> {
        self.check_len(x.len())?;
        kernel::real_forward_full(&self.algo, x);
        Ok(())
    }

    /// Inverse-transforms a full Hermitian-symmetric complex spectrum
    /// (as produced by [`real_forward_full`](Self::real_forward_full)).
    pub fn real_inverse_full(&self, x: &mut [Complex64], scale: bool) -> Result<(), FftError> {
        self.check_len(x.len())?;
        kernel::real_inverse_full(&self.algo, x, scale);
        Ok(())
    }

    fn dispatch(&self, buf: &mut [Complex64], inverse: bool, scale: bool) -> Result<(), FftError> {
        match &self.algo {
            Algorithm::SplitRadix { twiddles, bitrev } => {
                let workers = self.workers_for(self.n);
                if workers > 1 {
                    split_radix::parallel_transform(&self.pool, buf, twiddles, bitrev, inverse, scale, workers)
                } else if inverse {
                    split_radix::inverse(buf, twiddles, bitrev, scale);
                    Ok(())
                } else {
                    split_radix::forward(buf, twiddles, bitrev);
                    Ok(())
                }
            }
            _ => {
                if inverse {
                    self.algo.inverse(buf, scale);
                } else {
                    self.algo.forward(buf);
                }
                Ok(())
            }
        }
    }

    /// How many of this plan's pool threads a transform of its length
    /// should use, per the 1-D thresholds in the process-wide config. Only
    /// the split-radix path currently consults this -- mixed-radix and
    /// Bluestein run single-threaded regardless of size.
    fn workers_for(&self, n: usize) -> usize {
        let cfg = config::global();
        let pool_size = self.pool.size();
        if pool_size >= 4 && n >= cfg.threshold_1d_4() {
            4.min(pool_size)
        } else if pool_size >= 2 && n >= cfg.threshold_1d_2() {
            2.min(pool_size)
        } else {
            1
        }
    }
}

#[cfg(test)]
#[path = "plan1d_tests.rs"]
mod tests;
