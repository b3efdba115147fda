use super::*;

#[test]
fn same_seed_same_stream() {
    let mut a = seeded(42);
    let mut b = seeded(42);
    for _ in 0..16 {
        assert_eq!(gaussian(&mut a, 0.0, 1.0), gaussian(&mut b, 0.0, 1.0));
    }
}

#[test]
fn degenerate_std_returns_mean() {
    let mut rng = seeded(1);
    assert_eq!(gaussian(&mut rng, 0.25, 0.0), 0.25);
    assert_eq!(gaussian(&mut rng, 0.25, -1.0), 0.25);
    assert_eq!(gaussian(&mut rng, 0.25, f64::NAN), 0.25);
}

#[test]
fn gaussian_mean_is_roughly_right() {
    let mut rng = seeded(7);
    let n = 4000;
    let sum: f64 = (0..n).map(|_| gaussian(&mut rng, 0.5, 0.2)).sum();
    let mean = sum / n as f64;
    assert!((mean - 0.5).abs() < 0.02, "mean was {mean}");
}

#[test]
fn clamp01_bounds_and_nan() {
    assert_eq!(clamp01(-0.3), 0.0);
    assert_eq!(clamp01(1.7), 1.0);
    assert_eq!(clamp01(0.42), 0.42);
    assert_eq!(clamp01(f64::NAN), 0.0);
}
