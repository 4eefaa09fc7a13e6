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
fn inner_fft_size_is_next_power_of_two_above_2n_minus_1() {
    assert_eq!(inner_fft_size(5), 16); // 2*5-1=9 -> 16
    assert_eq!(inner_fft_size(3), 8); // 2*3-1=5 -> 8
}

#[test]
fn impulse_response_of_prime_length_five_is_all_ones() {
    let tables = BluesteinTables::new(5);
    let mut buf = vec![Complex64::new(0.0, 0.0); 5];
    buf[0] = Complex64::new(1.0, 0.0);
    tables.forward(&mut buf);
    for c in &buf {
        assert!((c - Complex64::new(1.0, 0.0)).norm() < 1e-13, "{c:?}");
    }
}

#[test]
fn matches_direct_dft_for_a_prime_length() {
    let n = 17;
    let tables = BluesteinTables::new(n);
    let input: Vec<Complex64> = (0..n)
        .map(|i| Complex64::new((i as f64 * 0.9).cos(), (i as f64 * 0.4).sin()))
        .collect();
    let expected = direct_dft(&input);

    let mut buf = input.clone();
    tables.forward(&mut buf);
    for (got, want) in buf.iter().zip(expected.iter()) {
        assert!((got - want).norm() < 1e-8, "{got:?} != {want:?}");
    }
}

#[test]
fn round_trip_scaled_recovers_input() {
    let n = 11;
    let tables = BluesteinTables::new(n);
    let original: Vec<Complex64> = (0..n)
        .map(|i| Complex64::new(i as f64 - 3.0, (i as f64).sqrt()))
        .collect();
    let mut buf = original.clone();
    tables.forward(&mut buf);
    tables.inverse(&mut buf, true);
    for (got, want) in buf.iter().zip(original.iter()) {
        assert!((got - want).norm() < 1e-8);
    }
}
