use super::*;

fn direct_dft(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    (0..n)
        .map(|k| {
            let mut acc = Complex64::new(0.0, 0.0);
            for (j, &xj) in x.iter().enumerate() {
                let angle = -2.0 * std::f64::consts::PI * (j * k) as f64 / n as f64;
                acc += xj * Complex64::new(angle.cos(), angle.sin());
            }
            acc
        })
        .collect()
}

#[test]
fn rejects_non_positive_length() {
    assert_eq!(Plan1D::new(0).unwrap_err(), FftError::InvalidLength { n: 0 });
    assert_eq!(Plan1D::new(-1).unwrap_err(), FftError::InvalidLength { n: -1 });
}

#[test]
fn rejects_mismatched_buffer_length() {
    let plan = Plan1D::new(8).unwrap();
    let mut buf = vec![Complex64::new(0.0, 0.0); 4];
    assert_eq!(
        plan.complex_forward(&mut buf).unwrap_err(),
        FftError::DimensionMismatch { expected: 8, got: 4 }
    );
}

#[test]
fn complex_round_trip_across_algorithm_choices() {
    for &n in &[8i64, 9, 17, 60] {
        let plan = Plan1D::new(n).unwrap();
        let original: Vec<Complex64> = (0..n)
            .map(|i| Complex64::new((i as f64 * 0.31).sin(), (i as f64 * 0.17).cos()))
            .collect();
        let mut buf = original.clone();
        plan.complex_forward(&mut buf).unwrap();
        plan.complex_inverse(&mut buf, true).unwrap();
        for (got, want) in buf.iter().zip(original.iter()) {
            assert!((got - want).norm() < 1e-8, "n={n} {got:?} != {want:?}");
        }
    }
}

#[test]
fn complex_forward_matches_direct_dft() {
    let n = 12i64;
    let plan = Plan1D::new(n).unwrap();
    let original: Vec<Complex64> = (0..n).map(|i| Complex64::new(i as f64, 0.0)).collect();
    let expected = direct_dft(&original);
    let mut buf = original.clone();
    plan.complex_forward(&mut buf).unwrap();
    for (got, want) in buf.iter().zip(expected.iter()) {
        assert!((got - want).norm() < 1e-8);
    }
}

#[test]
fn large_power_of_two_uses_parallel_dispatch_and_still_round_trips() {
    // The process-wide pool's thread count is fixed at its first
    // construction, so only the threshold is adjustable here; lowering it
    // is enough to route this size through the parallel path whenever the
    // shared pool has more than one worker.
    config::global().set_threshold_1d_2(512);
    let n = 4096i64;
    let plan = Plan1D::new(n).unwrap();
    let original: Vec<Complex64> = (0..n)
        .map(|i| Complex64::new((i as f64 * 0.01).sin(), 0.0))
        .collect();
    let mut buf = original.clone();
    plan.complex_forward(&mut buf).unwrap();
    plan.complex_inverse(&mut buf, true).unwrap();
    for (got, want) in buf.iter().zip(original.iter()) {
        assert!((got - want).norm() < 1e-6);
    }
    config::global().reset_thresholds();
}

#[test]
fn real_forward_and_inverse_round_trip() {
    for &n in &[8i64, 9] {
        let plan = Plan1D::new(n).unwrap();
        let original: Vec<f64> = (0..n).map(|i| (i as f64 * 0.9).cos()).collect();
        let mut buf = original.clone();
        plan.real_forward(&mut buf).unwrap();
        plan.real_inverse(&mut buf, true).unwrap();
        for (got, want) in buf.iter().zip(original.iter()) {
            assert!((got - want).abs() < 1e-8, "n={n}");
        }
    }
}

#[test]
fn real_forward_full_and_inverse_full_round_trip() {
    let n = 8i64;
    let plan = Plan1D::new(n).unwrap();
    let original: Vec<f64> = (0..n).map(|i| i as f64 - 3.5).collect();
    let mut buf: Vec<Complex64> = original.iter().map(|&re| Complex64::new(re, 1234.0)).collect();
    plan.real_forward_full(&mut buf).unwrap();
    plan.real_inverse_full(&mut buf, true).unwrap();
    for (got, want) in buf.iter().zip(original.iter()) {
        assert!((got.re - want).abs() < 1e-8);
        assert!(got.im.abs() < 1e-8);
    }
}
