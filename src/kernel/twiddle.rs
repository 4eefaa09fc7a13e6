// src/kernel/twiddle.rs
//
// Precomputed trigonometric tables and the radix-2 bit-reversal
// permutation, computed in f64 over the full N-length table since the
// mixed-radix and Bluestein paths both need twiddles indexed by the
// *global* transform length, not just N/2.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Fills `twiddles` with `W_n^k = exp(-2*pi*i*k/n)` for `k` in `0..n`.
///
/// A full-circle table (rather than only the `n/2` entries a pure radix-2
/// butterfly needs) lets the mixed-radix combine step and Bluestein's
/// chirp both index it directly by `k % n`.
pub(crate) fn precompute_twiddles_full(n: usize) -> Box<[Complex64]> {
    (0..n)
        .map(|k| {
            let angle = -2.0 * PI * (k as f64) / (n as f64);
            Complex64::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// Bit-reversal permutation of `[0, n)`, `n` a power of two.
pub(crate) fn precompute_bitrev(n: usize) -> Box<[usize]> {
    let mut bitrev = vec![0usize; n];
    let mut j = 0usize;
    for i in 1..n {
        let mut k = n >> 1;
        while j >= k {
            j -= k;
            k >>= 1;
        }
        j += k;
        bitrev[i] = j;
    }
    bitrev.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitrev_is_a_permutation() {
        let n = 16;
        let table = precompute_bitrev(n);
        let mut seen = vec![false; n];
        for &j in table.iter() {
            assert!(j < n);
            assert!(!seen[j]);
            seen[j] = true;
        }
    }

    #[test]
    fn bitrev_matches_bit_reversal_definition() {
        let n = 8; // 3 bits
        let table = precompute_bitrev(n);
        let expected = [0, 4, 2, 6, 1, 5, 3, 7];
        assert_eq!(&*table, &expected);
    }

    #[test]
    fn twiddle_zero_is_one() {
        let table = precompute_twiddles_full(8);
        assert!((table[0].re - 1.0).abs() < 1e-12);
        assert!(table[0].im.abs() < 1e-12);
    }
}
