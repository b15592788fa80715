use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Uniform, WeightedIndex};
use crate::error::{SimError, SimResult};

/// Symmetric uniform perturbation, hard-clamped into `[low, high]`.
pub fn vary_value<R: Rng + ?Sized>(
    value: f64,
    low: f64,
    high: f64,
    max_change: f64,
    rng: &mut R,
) -> f64 {
    let change = rng.gen_range(-max_change..max_change);
    (value + change).clamp(low, high)
}

/// Draw from `[low, high)`.
pub fn sample_uniform<R: Rng + ?Sized>(low: f64, high: f64, rng: &mut R) -> SimResult<f64> {
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(SimError::Random);
    }
    Ok(Uniform::new(low, high).sample(rng))
}

pub fn sample_bernoulli<R: Rng + ?Sized>(p: f64, rng: &mut R) -> SimResult<bool> {
    let bernoulli = Bernoulli::new(p).map_err(|_| SimError::Random)?;
    Ok(bernoulli.sample(rng))
}

/// Categorical draw from `(value, weight)` pairs.
pub fn pick_weighted<T: Copy, R: Rng + ?Sized>(choices: &[(T, f64)], rng: &mut R) -> SimResult<T> {
    let index = WeightedIndex::new(choices.iter().map(|(_, w)| *w))
        .map_err(|_| SimError::Random)?;
    Ok(choices[index.sample(rng)].0)
}

/// Equal-odds draw; the current value is not excluded.
pub fn pick_uniform<T: Copy, R: Rng + ?Sized>(choices: &[T], rng: &mut R) -> SimResult<T> {
    if choices.is_empty() {
        return Err(SimError::Random);
    }
    Ok(choices[rng.gen_range(0..choices.len())])
}
