// src/plan2d.rs
//
// The 2-D transform plan: a row pass (one length-`cols` transform per row)
// followed by a column pass (one length-`rows` transform per column),
// each its own barrier. Built from two `Plan1D`s so the row/column kernels,
// algorithm selection and packed real encoding are all reused rather than
// duplicated.

use std::sync::Arc;

use num_complex::Complex64;

use crate::config;
use crate::error::FftError;
use crate::packed2d;
use crate::plan1d::Plan1D;
use crate::pool::{self, WorkerPool};

/// An immutable, reusable plan for 2-D complex and real FFTs of a fixed
/// `rows x cols` shape. Data is row-major: element `(r, c)` lives at
/// `data[r * cols + c]`.
pub struct Plan2D {
    rows: usize,
    cols: usize,
    row_plan: Plan1D,
    col_plan: Plan1D,
    pool: Arc<WorkerPool>,
}

#[derive(Clone, Copy)]
struct SendMutPtr(*mut Complex64);
unsafe impl Send for SendMutPtr {}

#[derive(Clone, Copy)]
struct SendPlanPtr(*const Plan1D);
unsafe impl Send for SendPlanPtr {}

impl Plan2D {
    /// Builds a plan for `rows x cols` transforms. Both dimensions must be
    /// positive. The row plan, column plan and this plan's own row/column
    /// passes all dispatch onto the same process-wide worker pool.
    pub fn new(rows: i64, cols: i64) -> Result<Self, FftError> {
        let row_plan = Plan1D::new(cols)?;
        let col_plan = Plan1D::new(rows)?;
        Ok(Plan2D {
            rows: rows as usize,
            cols: cols as usize,
            row_plan,
            col_plan,
            pool: pool::global(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn check_len(&self, got: usize) -> Result<(), FftError> {
        let expected = self.rows * self.cols;
        if got == expected {
            Ok(())
        } else {
            Err(FftError::DimensionMismatch { expected, got })
        }
    }

    /// In-place forward 2-D complex DFT (row pass, then column pass).
    pub fn complex_forward(&self, data: &mut [Complex64]) -> Result<(), FftError> {
        self.check_len(data.len())?;
        self.transform(data, false, false)
    }

    /// In-place inverse 2-D complex DFT, dividing by `rows * cols` when
    /// `scale` is set.
    pub fn complex_inverse(&self, data: &mut [Complex64], scale: bool) -> Result<(), FftError> {
        self.check_len(data.len())?;
        self.transform(data, true, scale)
    }

    /// Forward real-input 2-D DFT, packing the result into a same-size
    /// real buffer via [`packed2d`]. Requires both `rows` and `cols` to be
    /// even -- the packed layout relies on the column-0 and
    /// column-`cols/2` slots it folds into every row, both of which only
    /// exist for even `cols`, and on an analogous row-axis symmetry for
    /// even `rows`. Odd shapes use [`real_forward_full`](Self::real_forward_full)
    /// instead.
    pub fn real_forward(&self, x: &mut [f64]) -> Result<(), FftError> {
        self.check_len(x.len())?;
        self.check_even_shape()?;
        let mut spectrum: Vec<Complex64> = x.iter().map(|&re| Complex64::new(re, 0.0)).collect();
        self.transform(&mut spectrum, false, false)?;
        packed2d::pack_full(&spectrum, self.rows, self.cols, x);
        Ok(())
    }

    /// Inverse of [`real_forward`](Self::real_forward). Same even-shape
    /// requirement.
    pub fn real_inverse(&self, x: &mut [f64], scale: bool) -> Result<(), FftError> {
        self.check_len(x.len())?;
        self.check_even_shape()?;
        let mut spectrum = packed2d::unpack(x, self.rows, self.cols);
        self.transform(&mut spectrum, true, scale)?;
        for (out, c) in x.iter_mut().zip(spectrum.iter()) {
            *out = c.re;
        }
        Ok(())
    }

    /// Forward real-input 2-D DFT producing the full, unpacked complex
    /// spectrum. Works for any shape, including odd `rows`/`cols` where
    /// [`real_forward`](Self::real_forward)'s packed layout doesn't apply.
    /// `x`'s imaginary parts are overwritten with zero before the
    /// transform.
    pub fn real_forward_full(&self, x: &mut [Complex64]) -> Result<(), FftError> {
        self.check_len(x.len())?;
        for c in x.iter_mut() {
            c.im = 0.0;
        }
        self.transform(x, false, false)
    }

    /// Inverse-transforms a full Hermitian-symmetric complex spectrum (as
    /// produced by [`real_forward_full`](Self::real_forward_full)).
    pub fn real_inverse_full(&self, x: &mut [Complex64], scale: bool) -> Result<(), FftError> {
        self.check_len(x.len())?;
        self.transform(x, true, scale)
    }

    fn check_even_shape(&self) -> Result<(), FftError> {
        if packed2d::supports_packed_layout(self.rows, self.cols) {
            Ok(())
        } else {
            let n = if self.rows % 2 != 0 { self.rows } else { self.cols };
            Err(FftError::InvalidLength { n: n as i64 })
        }
    }

    fn transform(&self, data: &mut [Complex64], inverse: bool, scale: bool) -> Result<(), FftError> {
        if self.workers_for_2d() > 1 {
            self.parallel_row_pass(data, inverse, scale)?;
            self.parallel_col_pass(data, inverse, scale)
        } else {
            self.sequential_row_pass(data, inverse, scale)?;
            self.sequential_col_pass(data, inverse, scale)
        }
    }

    fn workers_for_2d(&self) -> usize {
        let pool_size = self.pool.size();
        if pool_size > 1 && self.rows * self.cols >= config::global().threshold_2d() {
            pool_size
        } else {
            1
        }
    }

    fn sequential_row_pass(&self, data: &mut [Complex64], inverse: bool, scale: bool) -> Result<(), FftError> {
        for r in 0..self.rows {
            let row = &mut data[r * self.cols..(r + 1) * self.cols];
            if inverse {
                self.row_plan.complex_inverse(row, scale)?;
            } else {
                self.row_plan.complex_forward(row)?;
            }
        }
        Ok(())
    }

    fn sequential_col_pass(&self, data: &mut [Complex64], inverse: bool, scale: bool) -> Result<(), FftError> {
        let (rows, cols) = (self.rows, self.cols);
        let mut column = vec![Complex64::new(0.0, 0.0); rows];
        for c in 0..cols {
            for r in 0..rows {
                column[r] = data[r * cols + c];
            }
            if inverse {
                self.col_plan.complex_inverse(&mut column, scale)?;
            } else {
                self.col_plan.complex_forward(&mut column)?;
            }
            for r in 0..rows {
                data[r * cols + c] = column[r];
            }
        }
        Ok(())
    }

    /// Same row pass, split into contiguous row ranges run across
    /// `self.pool`'s threads. Sound for the same reason as
    /// `split_radix::parallel_transform`: the ranges are disjoint and
    /// `scoped_for_each` joins every job before this call returns, so the
    /// raw pointers never outlive the borrow of `data` that produced them.
    fn parallel_row_pass(&self, data: &mut [Complex64], inverse: bool, scale: bool) -> Result<(), FftError> {
        let (rows, cols) = (self.rows, self.cols);
        let workers = self.workers_for_2d();
        let starts = partition_indices(rows, workers);

        let data_ptr = SendMutPtr(data.as_mut_ptr());
        let row_plan_ptr = SendPlanPtr(&self.row_plan as *const Plan1D);

        let jobs: Vec<_> = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(rows);
                move || {
                    // SAFETY: see doc comment above.
                    let slice = unsafe { std::slice::from_raw_parts_mut(data_ptr.0, rows * cols) };
                    let row_plan = unsafe { &*row_plan_ptr.0 };
                    for r in start..end {
                        let row = &mut slice[r * cols..(r + 1) * cols];
                        let _ = if inverse {
                            row_plan.complex_inverse(row, scale)
                        } else {
                            row_plan.complex_forward(row)
                        };
                    }
                }
            })
            .collect();

        self.pool.scoped_for_each(jobs)
    }

    /// Column-pass analogue of `parallel_row_pass`. Each job gathers its
    /// own columns into a local `Vec`, transforms, and scatters back, so
    /// the only cross-thread aliasing is the disjoint column ranges in
    /// `data` itself.
    fn parallel_col_pass(&self, data: &mut [Complex64], inverse: bool, scale: bool) -> Result<(), FftError> {
        let (rows, cols) = (self.rows, self.cols);
        let workers = self.workers_for_2d();
        let starts = partition_indices(cols, workers);

        let data_ptr = SendMutPtr(data.as_mut_ptr());
        let col_plan_ptr = SendPlanPtr(&self.col_plan as *const Plan1D);

        let jobs: Vec<_> = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(cols);
                move || {
                    // SAFETY: see `parallel_row_pass`.
                    let slice = unsafe { std::slice::from_raw_parts_mut(data_ptr.0, rows * cols) };
                    let col_plan = unsafe { &*col_plan_ptr.0 };
                    let mut column = vec![Complex64::new(0.0, 0.0); rows];
                    for c in start..end {
                        for r in 0..rows {
                            column[r] = slice[r * cols + c];
                        }
                        let _ = if inverse {
                            col_plan.complex_inverse(&mut column, scale)
                        } else {
                            col_plan.complex_forward(&mut column)
                        };
                        for r in 0..rows {
                            slice[r * cols + c] = column[r];
                        }
                    }
                }
            })
            .collect();

        self.pool.scoped_for_each(jobs)
    }
}

/// Splits `[0, total)` into up to `workers` contiguous chunks, returning
/// chunk start offsets.
fn partition_indices(total: usize, workers: usize) -> Vec<usize> {
    let workers = workers.max(1).min(total.max(1));
    let chunk = total.div_ceil(workers);
    (0..total).step_by(chunk.max(1)).collect()
}

#[cfg(test)]
#[path = "plan2d_tests.rs"]
mod tests;
