// src/kernel/bluestein.rs
//
// Bluestein's (chirp-z) algorithm: turns an arbitrary-length DFT into a
// cyclic convolution, which is then computed as two power-of-two FFTs
// using the same `split_radix` kernel the power-of-two plans use directly.
// Every table (chirp sequence, convolution kernel, twiddles/bit-reversal
// for the inner length) is precomputed once at plan construction, so a
// transform itself never allocates.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::split_radix;
use super::twiddle::{precompute_bitrev, precompute_twiddles_full};

/// Precomputed state for an N-point Bluestein transform: the chirp
/// sequence and the frequency-domain convolution kernel, both computed
/// once at plan-construction time.
pub(crate) struct BluesteinTables {
    n: usize,
    /// Inner convolution length: the smallest power of two >= 2N-1.
    m: usize,
    /// `chirp[k] = exp(-i*pi*k^2/N)`, `k in [0, N)`.
    chirp: Box<[Complex64]>,
    /// Frequency-domain image of the (conjugate) chirp convolution kernel,
    /// zero-padded to length `m` and already forward-transformed.
    kernel_freq: Box<[Complex64]>,
    /// Twiddle/bit-reversal tables for the inner length-`m` power-of-two
    /// FFTs used to perform the convolution.
    twiddles_m: Box<[Complex64]>,
    bitrev_m: Box<[usize]>,
}

/// Smallest power of two `>= 2n - 1`.
pub(crate) fn inner_fft_size(n: usize) -> usize {
    (2 * n - 1).next_power_of_two()
}

impl BluesteinTables {
    pub(crate) fn new(n: usize) -> Self {
        let m = inner_fft_size(n);
        let chirp: Box<[Complex64]> = (0..n)
            .map(|k| {
                let angle = -PI * (k * k) as f64 / n as f64;
                Complex64::new(angle.cos(), angle.sin())
            })
            .collect();

        let mut kernel = vec![Complex64::new(0.0, 0.0); m];
        kernel[0] = chirp[0].conj();
        for k in 1..n {
            let v = chirp[k].conj();
            kernel[k] = v;
            kernel[m - k] = v;
        }

        let twiddles_m = precompute_twiddles_full(m);
        let bitrev_m = precompute_bitrev(m);
        split_radix::forward(&mut kernel, &twiddles_m, &bitrev_m);

        BluesteinTables {
            n,
            m,
            chirp,
            kernel_freq: kernel.into_boxed_slice(),
            twiddles_m,
            bitrev_m,
        }
    }

    /// In-place forward DFT of `buf` (length `n`) via chirp-z convolution.
    pub(crate) fn forward(&self, buf: &mut [Complex64]) {
        let mut work = vec![Complex64::new(0.0, 0.0); self.m];
        for (k, w) in work.iter_mut().enumerate().take(self.n) {
            *w = buf[k] * self.chirp[k];
        }
        split_radix::forward(&mut work, &self.twiddles_m, &self.bitrev_m);
        for (w, k) in work.iter_mut().zip(self.kernel_freq.iter()) {
            *w *= k;
        }
        split_radix::inverse(&mut work, &self.twiddles_m, &self.bitrev_m, true);
        for (k, b) in buf.iter_mut().enumerate().take(self.n) {
            *b = work[k] * self.chirp[k];
        }
    }

    /// In-place inverse DFT via the standard conjugate trick:
    /// `IDFT(x) = conj(DFT(conj(x))) / N` (division only when `scale`).
    pub(crate) fn inverse(&self, buf: &mut [Complex64], scale: bool) {
        for x in buf.iter_mut() {
            *x = x.conj();
        }
        self.forward(buf);
        let factor = if scale { 1.0 / self.n as f64 } else { 1.0 };
        for x in buf.iter_mut() {
            *x = x.conj() * factor;
        }
    }
}

#[cfg(test)]
#[path = "bluestein_tests.rs"]
mod tests;
