use super::*;

fn direct_dft(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    (0..n)
        .map(|k| {
            let mut acc = Complex64::new(0.0, 0.0);
            for (j, &xj) in x.iter().enumerate() {
                let angle = -2.0 * PI * (j * k) as f64 / n as f64;
                acc += xj * Complex64::new(angle.cos(), angle.sin());
            }
            acc
        })
        .collect()
}

#[test]
fn factorize_accepts_only_2_3_4_5_smooth_numbers() {
    assert_eq!(factorize(1), Some(vec![]));
    assert_eq!(factorize(3), Some(vec![3]));
    assert_eq!(factorize(6), Some(vec![3, 2]));
    assert_eq!(factorize(60), Some(vec![5, 4, 3])); // 60 = 5*4*3
    assert_eq!(factorize(7), None);
    assert_eq!(factorize(14), None); // 2*7
}

#[test]
fn three_point_forward_matches_known_value() {
    let factors = factorize(3).unwrap();
    let mut buf = [Complex64::new(1.0, 0.0); 3];
    forward(&mut buf, &factors);
    assert!((buf[0] - Complex64::new(3.0, 0.0)).norm() < 1e-12);
    assert!(buf[1].norm() < 1e-12);
    assert!(buf[2].norm() < 1e-12);
}

#[test]
fn matches_direct_dft_for_a_3_smooth_composite() {
    let n = 60;
    let factors = factorize(n).unwrap();
    let input: Vec<Complex64> = (0..n)
        .map(|i| Complex64::new((i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()))
        .collect();
    let expected = direct_dft(&input);

    let mut buf = input.clone();
    forward(&mut buf, &factors);
    for (got, want) in buf.iter().zip(expected.iter()) {
        assert!((got - want).norm() < 1e-8, "{got:?} != {want:?}");
    }
}

#[test]
fn round_trip_scaled_recovers_input() {
    let n = 30;
    let factors = factorize(n).unwrap();
    let original: Vec<Complex64> = (0..n).map(|i| Complex64::new(i as f64, -(i as f64))).collect();
    let mut buf = original.clone();
    forward(&mut buf, &factors);
    inverse(&mut buf, &factors, true);
    for (got, want) in buf.iter().zip(original.iter()) {
        assert!((got - want).norm() < 1e-8);
    }
}
