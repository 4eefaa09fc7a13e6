// src/kernel/mixed_radix.rs
//
// Generalized Cooley-Tukey decomposition for a composite length N whose
// prime factors are all in {2, 3, 4, 5}: recursively split into `p`
// interleaved subsequences of length `m = N/p`, transform each, then
// recombine with a twiddle multiply and a `p`-point butterfly
// (`small_dft`). Intermediate permutation is implicit in the gather/
// scatter index arithmetic -- no separate bit-reversal table is needed
// here (unlike the power-of-two `split_radix` path).

use num_complex::Complex64;
use std::f64::consts::PI;

use super::small_dft::small_dft;

/// Factors `n` into the ordered sequence of radices the mixed-radix kernel
/// will apply, smallest radices last so the outermost recursive split uses
/// the largest factor and the smaller factors end up in the innermost,
/// most memory-local recursion. Returns `None` if `n` has a prime factor
/// outside `{2, 3, 4, 5}`.
pub(crate) fn factorize(mut n: usize) -> Option<Vec<usize>> {
    if n == 0 {
        return None;
    }
    let mut factors = Vec::new();
    for &r in &[5usize, 4, 3, 2] {
        while n % r == 0 {
            factors.push(r);
            n /= r;
        }
    }
    if n != 1 {
        return None;
    }
    factors.sort_unstable();
    factors.reverse();
    Some(factors)
}

/// In-place forward transform of a buffer whose length is the product of
/// `factors`.
pub(crate) fn forward(buf: &mut [Complex64], factors: &[usize]) {
    let out = recurse(buf, factors, false);
    buf.copy_from_slice(&out);
}

/// In-place inverse transform, dividing by `n` when `scale` is set.
pub(crate) fn inverse(buf: &mut [Complex64], factors: &[usize], scale: bool) {
    let n = buf.len();
    let mut out = recurse(buf, factors, true);
    if scale {
        let factor = 1.0 / n as f64;
        for x in out.iter_mut() {
            *x *= factor;
        }
    }
    buf.copy_from_slice(&out);
}

/// Recursively computes the DFT (or IDFT) of `x`. The premultiply twiddle
/// at each recursion level is relative to *that level's* length
/// (`x.len()`), since each level is itself a self-contained Cooley-Tukey
/// decomposition of its own subsequence.
fn recurse(x: &[Complex64], factors: &[usize], inverse: bool) -> Vec<Complex64> {
    let n = x.len();
    if factors.is_empty() {
        debug_assert_eq!(n, 1);
        return x.to_vec();
    }

    let p = factors[0];
    let m = n / p;
    debug_assert_eq!(p * m, n);

    // Gather the p decimated subsequences y_k[j] = x[j*p + k].
    let mut transformed_subsequences: Vec<Vec<Complex64>> = Vec::with_capacity(p);
    for k in 0..p {
        let y_k: Vec<Complex64> = (0..m).map(|j| x[j * p + k]).collect();
        transformed_subsequences.push(recurse(&y_k, &factors[1..], inverse));
    }

    let sign = if inverse { 1.0 } else { -1.0 };
    let mut out = vec![Complex64::new(0.0, 0.0); n];
    for j in 0..m {
        // Twiddle-premultiply: V_k[j] = W_n^{k*j} * Y_k[j].
        let v: Vec<Complex64> = (0..p)
            .map(|k| {
                let angle = sign * 2.0 * PI * (k * j) as f64 / n as f64;
                let w = Complex64::new(angle.cos(), angle.sin());
                transformed_subsequences[k][j] * w
            })
            .collect();
        // p-point butterfly: X[j + t*m] = sum_k W_p^{k*t} * V_k[j].
        let combined = small_dft(&v, inverse);
        for t in 0..p {
            out[j + t * m] = combined[t];
        }
    }
    out
}

#[cfg(test)]
#[path = "mixed_radix_tests.rs"]
mod tests;
