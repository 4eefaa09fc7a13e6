// src/kernel/small_dft.rs
//
// Direct O(p^2) DFT for the small radices the mixed-radix combine step
// needs (p in {2, 3, 4, 5}), plus the degenerate p=1 case. Also doubles as
// the closed-form path for N in {1, 2, 3} mentioned in the plan-selection
// rules, since those are just a single-stage mixed-radix factorization.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Computes the `p`-point DFT (or inverse DFT, when `inverse` is set) of
/// `v` directly, writing the result to a freshly allocated vector.
pub(crate) fn small_dft(v: &[Complex64], inverse: bool) -> Vec<Complex64> {
    let p = v.len();
    let sign = if inverse { 1.0 } else { -1.0 };
    (0..p)
        .map(|t| {
            let mut acc = Complex64::new(0.0, 0.0);
            for (k, &vk) in v.iter().enumerate() {
                let angle = sign * 2.0 * PI * (t * k) as f64 / p as f64;
                acc += vk * Complex64::new(angle.cos(), angle.sin());
            }
            acc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_point_dft_of_ones_is_impulse() {
        let v = [Complex64::new(1.0, 0.0); 3];
        let x = small_dft(&v, false);
        assert!((x[0] - Complex64::new(3.0, 0.0)).norm() < 1e-12);
        assert!(x[1].norm() < 1e-12);
        assert!(x[2].norm() < 1e-12);
    }

    #[test]
    fn forward_then_inverse_round_trips_up_to_scale() {
        let v = [
            Complex64::new(1.0, 0.5),
            Complex64::new(-2.0, 1.0),
            Complex64::new(0.25, -0.75),
            Complex64::new(3.0, 0.0),
            Complex64::new(-1.0, -1.0),
        ];
        let fwd = small_dft(&v, false);
        let back = small_dft(&fwd, true);
        for (got, want) in back.iter().zip(v.iter()) {
            assert!((got / 5.0 - want).norm() < 1e-10);
        }
    }
}
