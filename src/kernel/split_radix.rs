// src/kernel/split_radix.rs
//
// Power-of-two complex FFT core: bit-reversal permutation followed by
// log2(N) radix-2 decimation-in-time butterfly passes, computed in f64.
//
// Each pass is a barrier of independent butterfly groups -- the outer `j`
// loop below enumerates groups that never touch each other's indices,
// which is exactly the unit `parallel_butterfly_pass` splits across
// worker threads.

use num_complex::Complex64;

use crate::error::FftError;
use crate::pool::WorkerPool;

/// In-place decimation-in-time FFT of a power-of-two length buffer.
///
/// `twiddles` must hold at least `n/2` entries of `W_n^k = exp(-2*pi*i*k/n)`
/// (a full-length table as produced by
/// [`crate::kernel::twiddle::precompute_twiddles_full`] works: only the
/// first half is ever read). `bitrev` must be the bit-reversal permutation
/// of `[0, n)`.
pub(crate) fn forward(buf: &mut [Complex64], twiddles: &[Complex64], bitrev: &[usize]) {
    transform(buf, twiddles, bitrev, false);
}

/// In-place inverse FFT. Divides by `n` when `scale` is set, matching the
/// `complex_inverse` contract.
pub(crate) fn inverse(buf: &mut [Complex64], twiddles: &[Complex64], bitrev: &[usize], scale: bool) {
    transform(buf, twiddles, bitrev, true);
    if scale {
        let factor = 1.0 / buf.len() as f64;
        for x in buf.iter_mut() {
            *x *= factor;
        }
    }
}

fn transform(buf: &mut [Complex64], twiddles: &[Complex64], bitrev: &[usize], inverse: bool) {
    let n = buf.len();
    if n <= 1 {
        return;
    }

    bit_reverse_permute(buf, bitrev);

    let mut stride = 1usize;
    let mut tw_index = n >> 1;
    while stride < n {
        for block in (0..n).step_by(stride << 1) {
            butterfly_group(buf, block, stride, tw_index, twiddles, inverse);
        }
        stride <<= 1;
        tw_index >>= 1;
    }
}

/// One independent group of butterflies within a pass -- safe to run on its
/// own worker thread since it only ever touches
/// `buf[block .. block + 2*stride]`.
#[inline]
fn butterfly_group(
    buf: &mut [Complex64],
    block: usize,
    stride: usize,
    tw_index: usize,
    twiddles: &[Complex64],
    inverse: bool,
) {
    for i in 0..stride {
        let mut w = twiddles[i * tw_index];
        if inverse {
            w = w.conj();
        }
        let idx = block + i;
        let a = buf[idx];
        let b = buf[idx + stride];
        let t = b * w;
        buf[idx] = a + t;
        buf[idx + stride] = a - t;
    }
}

fn bit_reverse_permute(buf: &mut [Complex64], bitrev: &[usize]) {
    for i in 0..buf.len() {
        let j = bitrev[i];
        if i < j {
            buf.swap(i, j);
        }
    }
}

/// Splits a single pass's block range `[0, n)` (in units of `2*stride`-sized
/// blocks) into up to `workers` contiguous chunks, for the 1-D plan's
/// parallel decomposition. Returns block *start offsets* in element units.
pub(crate) fn pass_chunk_starts(n: usize, stride: usize, workers: usize) -> Vec<usize> {
    let block_size = stride << 1;
    let num_blocks = n / block_size;
    let workers = workers.max(1).min(num_blocks.max(1));
    let blocks_per_chunk = num_blocks.div_ceil(workers);
    (0..num_blocks)
        .step_by(blocks_per_chunk.max(1))
        .map(|b| b * block_size)
        .collect()
}

/// Same transform as [`forward`]/[`inverse`], but each butterfly pass is
/// split into `workers` contiguous chunks (via [`pass_chunk_starts`]) and
/// run across `pool`'s threads, joining before the next pass starts -- the
/// decomposition stays bulk-synchronous, only the work inside one barrier
/// is parallel.
pub(crate) fn parallel_transform(
    pool: &WorkerPool,
    buf: &mut [Complex64],
    twiddles: &[Complex64],
    bitrev: &[usize],
    inverse: bool,
    scale: bool,
    workers: usize,
) -> Result<(), FftError> {
    let n = buf.len();
    if n <= 1 {
        return Ok(());
    }

    bit_reverse_permute(buf, bitrev);

    let mut stride = 1usize;
    let mut tw_index = n >> 1;
    while stride < n {
        parallel_butterfly_pass(pool, buf, stride, tw_index, twiddles, inverse, workers)?;
        stride <<= 1;
        tw_index >>= 1;
    }

    if inverse && scale {
        let factor = 1.0 / n as f64;
        for x in buf.iter_mut() {
            *x *= factor;
        }
    }
    Ok(())
}

/// A bare pointer wrapper asserting it's safe to hand to another thread.
/// Sound here because every job built from one of these only ever touches
/// the disjoint, block-aligned chunk it was given, and the caller blocks on
/// [`WorkerPool::scoped_for_each`] before the borrow that produced the
/// pointer ends.
#[derive(Clone, Copy)]
struct SendMutPtr(*mut Complex64);
unsafe impl Send for SendMutPtr {}

#[derive(Clone, Copy)]
struct SendConstPtr(*const Complex64);
unsafe impl Send for SendConstPtr {}

fn parallel_butterfly_pass(
    pool: &WorkerPool,
    buf: &mut [Complex64],
    stride: usize,
    tw_index: usize,
    twiddles: &[Complex64],
    inverse: bool,
    workers: usize,
) -> Result<(), FftError> {
    let n = buf.len();
    let block_size = stride << 1;
    let starts = pass_chunk_starts(n, stride, workers);

    let buf_ptr = SendMutPtr(buf.as_mut_ptr());
    let tw_ptr = SendConstPtr(twiddles.as_ptr());
    let tw_len = twiddles.len();

    let jobs: Vec<_> = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(n);
            move || {
                // SAFETY: `start..end` is one of `pass_chunk_starts`'s
                // disjoint, block-aligned ranges, so no two jobs in this
                // batch ever touch the same index; the pool join below
                // happens before `buf`'s borrow in the caller ends.
                let slice = unsafe { std::slice::from_raw_parts_mut(buf_ptr.0, n) };
                let tw = unsafe { std::slice::from_raw_parts(tw_ptr.0, tw_len) };
                for block in (start..end).step_by(block_size) {
                    butterfly_group(slice, block, stride, tw_index, tw, inverse);
                }
            }
        })
        .collect();

    pool.scoped_for_each(jobs)
}

#[cfg(test)]
#[path = "split_radix_tests.rs"]
mod tests;
