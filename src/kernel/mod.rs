// src/kernel/mod.rs
//
// The per-length complex-transform core shared by the 1-D and 2-D plans:
// algorithm selection (split-radix / mixed-radix / Bluestein), the kernels
// themselves, and the packed-Hermitian real-FFT encoding built on top of
// them.

pub(crate) mod bluestein;
pub(crate) mod mixed_radix;
pub(crate) mod packed1d;
pub(crate) mod small_dft;
pub(crate) mod split_radix;
pub(crate) mod twiddle;

use num_complex::Complex64;

use crate::error::FftError;
use bluestein::BluesteinTables;
use twiddle::{precompute_bitrev, precompute_twiddles_full};

/// The algorithm a [`crate::plan1d::Plan1D`] (or a row/column of a
/// [`crate::plan2d::Plan2D`]) picked for its length, along with the tables
/// that algorithm precomputed once at construction time.
pub(crate) enum Algorithm {
    SplitRadix {
        twiddles: Box<[Complex64]>,
        bitrev: Box<[usize]>,
    },
    MixedRadix {
        factors: Vec<usize>,
    },
    Bluestein(BluesteinTables),
}

impl Algorithm {
    /// Picks an algorithm for transform length `n`, per the selection rules:
    /// split-radix for power-of-two lengths of at least 4, mixed-radix for
    /// any other length whose prime factors are all in `{2, 3, 4, 5}`
    /// (this also covers the degenerate lengths 1, 2 and 3), Bluestein
    /// otherwise.
    pub(crate) fn select(n: i64) -> Result<Algorithm, FftError> {
        if n <= 0 {
            return Err(FftError::InvalidLength { n });
        }
        let n = n as usize;
        if n >= 4 && n.is_power_of_two() {
            log::debug!("plan length {n}: selected split-radix");
            return Ok(Algorithm::SplitRadix {
                twiddles: precompute_twiddles_full(n),
                bitrev: precompute_bitrev(n),
            });
        }
        if let Some(factors) = mixed_radix::factorize(n) {
            log::debug!("plan length {n}: selected mixed-radix {factors:?}");
            return Ok(Algorithm::MixedRadix { factors });
        }
        log::debug!("plan length {n}: selected Bluestein");
        Ok(Algorithm::Bluestein(BluesteinTables::new(n)))
    }

    pub(crate) fn forward(&self, buf: &mut [Complex64]) {
        match self {
            Algorithm::SplitRadix { twiddles, bitrev } => split_radix::forward(buf, twiddles, bitrev),
            Algorithm::MixedRadix { factors } => mixed_radix::forward(buf, factors),
            Algorithm::Bluestein(t) => t.forward(buf),
        }
    }

    pub(crate) fn inverse(&self, buf: &mut [Complex64], scale: bool) {
        match self {
            Algorithm::SplitRadix { twiddles, bitrev } => split_radix::inverse(buf, twiddles, bitrev, scale),
            Algorithm::MixedRadix { factors } => mixed_radix::inverse(buf, factors, scale),
            Algorithm::Bluestein(t) => t.inverse(buf, scale),
        }
    }
}

/// Packs a real buffer's forward spectrum (computed via `algo`) into the
/// length-`n` packed-Hermitian encoding (see `packed1d`).
pub(crate) fn real_forward_packed(algo: &Algorithm, x: &mut [f64]) {
    let n = x.len();
    let mut spectrum: Vec<Complex64> = x.iter().map(|&re| Complex64::new(re, 0.0)).collect();
    algo.forward(&mut spectrum);
    if n % 2 == 0 {
        packed1d::pack_even(&spectrum, x);
    } else {
        packed1d::pack_odd(&spectrum, x);
    }
}

/// Inverse of [`real_forward_packed`]: reconstructs the full spectrum from
/// the packed buffer, runs the inverse transform, and writes back the real
/// part (the imaginary part is mathematically zero given exact Hermitian
/// input).
pub(crate) fn real_inverse_packed(algo: &Algorithm, x: &mut [f64], scale: bool) {
    let n = x.len();
    let mut spectrum = if n % 2 == 0 {
        packed1d::unpack_even(x)
    } else {
        packed1d::unpack_odd(x)
    };
    algo.inverse(&mut spectrum, scale);
    for (out, c) in x.iter_mut().zip(spectrum.iter()) {
        *out = c.re;
    }
}

/// `realForwardFull`: treats `x` as `n` real samples with implicit zero
/// imaginary parts and overwrites it with the full (unpacked) complex
/// spectrum.
pub(crate) fn real_forward_full(algo: &Algorithm, x: &mut [Complex64]) {
    for c in x.iter_mut() {
        c.im = 0.0;
    }
    algo.forward(x);
}

/// `realInverseFull`: inverse-transforms a full Hermitian-symmetric complex
/// spectrum; the result's imaginary part is mathematically zero.
pub(crate) fn real_inverse_full(algo: &Algorithm, x: &mut [Complex64], scale: bool) {
    algo.inverse(x, scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_split_radix_for_power_of_two_at_least_four() {
        assert!(matches!(Algorithm::select(4).unwrap(), Algorithm::SplitRadix { .. }));
        assert!(matches!(Algorithm::select(1024).unwrap(), Algorithm::SplitRadix { .. }));
    }

    #[test]
    fn selects_mixed_radix_for_smooth_composites_and_small_lengths() {
        assert!(matches!(Algorithm::select(1).unwrap(), Algorithm::MixedRadix { .. }));
        assert!(matches!(Algorithm::select(2).unwrap(), Algorithm::MixedRadix { .. }));
        assert!(matches!(Algorithm::select(3).unwrap(), Algorithm::MixedRadix { .. }));
        assert!(matches!(Algorithm::select(60).unwrap(), Algorithm::MixedRadix { .. }));
    }

    #[test]
    fn selects_bluestein_for_prime_lengths() {
        assert!(matches!(Algorithm::select(17).unwrap(), Algorithm::Bluestein(_)));
    }

    #[test]
    fn rejects_non_positive_lengths() {
        assert_eq!(Algorithm::select(0).unwrap_err(), FftError::InvalidLength { n: 0 });
        assert_eq!(Algorithm::select(-5).unwrap_err(), FftError::InvalidLength { n: -5 });
    }

    #[test]
    fn real_round_trip_even_and_odd_lengths() {
        for &n in &[8usize, 9, 16, 17] {
            let algo = Algorithm::select(n as i64).unwrap();
            let original: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).sin()).collect();
            let mut buf = original.clone();
            real_forward_packed(&algo, &mut buf);
            real_inverse_packed(&algo, &mut buf, true);
            for (got, want) in buf.iter().zip(original.iter()) {
                assert!((got - want).abs() < 1e-8, "n={n} got={got} want={want}");
            }
        }
    }
}
