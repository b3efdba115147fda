use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// The random stream threaded through generation, layout, drift and rendering.
pub type DriftRng = StdRng;

pub fn seeded(seed: u64) -> DriftRng {
    StdRng::seed_from_u64(seed)
}

/// One draw from `N(mean, std)`. A non-positive or non-finite `std` yields `mean`.
pub fn gaussian(rng: &mut impl rand::Rng, mean: f64, std: f64) -> f64 {
    match Normal::new(mean, std) {
        Ok(dist) if std > 0.0 => dist.sample(rng),
        _ => mean,
    }
}

pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;
