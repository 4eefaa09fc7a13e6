// src/kernel/packed1d.rs
//
// The 1-D packed-Hermitian encoding: folds the conjugate-symmetric
// spectrum of a real-input DFT back into a buffer of the original real
// length N.
//
// `real_forward`/`real_inverse` compute the *full* complex spectrum via the
// plan's ordinary complex algorithm (split-radix / mixed-radix / Bluestein)
// over the real input embedded with zero imaginary parts, then this module
// folds that full spectrum into -- or unfolds it back out of -- the packed
// representation. This trades the classical "N/2-point complex FFT" real-FFT
// optimization for reusing the already-built complex machinery directly.

use num_complex::Complex64;

/// Packs a length-`n` (even) full complex spectrum into the N-element
/// packed-Hermitian real buffer: `out[0] = Re(X0)`, `out[1] = Re(X_{n/2})`,
/// then `(Re, Im)` pairs for bins `1..n/2`.
pub(crate) fn pack_even(spectrum: &[Complex64], out: &mut [f64]) {
    let n = spectrum.len();
    debug_assert_eq!(n % 2, 0);
    debug_assert_eq!(out.len(), n);
    out[0] = spectrum[0].re;
    out[1] = spectrum[n / 2].re;
    for k in 1..n / 2 {
        out[2 * k] = spectrum[k].re;
        out[2 * k + 1] = spectrum[k].im;
    }
}

/// Reconstructs the full length-`n` complex spectrum from a packed-Hermitian
/// buffer, using conjugate symmetry `X[n-k] = conj(X[k])`.
pub(crate) fn unpack_even(buf: &[f64]) -> Vec<Complex64> {
    let n = buf.len();
    debug_assert_eq!(n % 2, 0);
    let mut spectrum = vec![Complex64::new(0.0, 0.0); n];
    spectrum[0] = Complex64::new(buf[0], 0.0);
    spectrum[n / 2] = Complex64::new(buf[1], 0.0);
    for k in 1..n / 2 {
        let c = Complex64::new(buf[2 * k], buf[2 * k + 1]);
        spectrum[k] = c;
        spectrum[n - k] = c.conj();
    }
    spectrum
}

/// Packs an odd-length full complex spectrum: `out[0] = Re(X0)`, then pairs
/// `(Re(Xk), Im(Xk))` for `k in [1, (n-1)/2]` fill the rest. There is no
/// Nyquist bin for odd `n`, so every one of the remaining `n-1` slots is a
/// genuine (re, im) pair -- unlike the even-length layout, which reserves
/// one slot for the Nyquist real value.
pub(crate) fn pack_odd(spectrum: &[Complex64], out: &mut [f64]) {
    let n = spectrum.len();
    debug_assert_eq!(n % 2, 1);
    debug_assert_eq!(out.len(), n);
    out[0] = spectrum[0].re;
    for k in 1..=(n - 1) / 2 {
        out[2 * k - 1] = spectrum[k].re;
        out[2 * k] = spectrum[k].im;
    }
}

pub(crate) fn unpack_odd(buf: &[f64]) -> Vec<Complex64> {
    let n = buf.len();
    debug_assert_eq!(n % 2, 1);
    let mut spectrum = vec![Complex64::new(0.0, 0.0); n];
    spectrum[0] = Complex64::new(buf[0], 0.0);
    for k in 1..=(n - 1) / 2 {
        let c = Complex64::new(buf[2 * k - 1], buf[2 * k]);
        spectrum[k] = c;
        spectrum[n - k] = c.conj();
    }
    spectrum
}
