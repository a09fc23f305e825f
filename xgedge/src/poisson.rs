//! The Poisson distribution.

/// Fills `probs` with the probability mass at `0, 1, ..., probs.len() - 1` events, using the
/// recurrence `P(k) = P(k - 1) · λ / k`. Returns the captured mass.
pub fn fill_series(lambda: f64, probs: &mut [f64]) -> f64 {
    let mut prob = f64::exp(-lambda);
    let mut sum = 0.0;
    for (k, slot) in probs.iter_mut().enumerate() {
        if k > 0 {
            prob *= lambda / k as f64;
        }
        *slot = prob;
        sum += prob;
    }
    sum
}
