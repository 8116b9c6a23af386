//! Selection mechanisms: tournament, elitism, roulette wheel.
//!
//! All selectors work on fitness slices and return indices into the pool,
//! leaving cloning decisions to the caller. Fitness is the normalized
//! `1 / (energy + ε)` transform: higher is better, infeasible individuals
//! (zero energy) get zero fitness.

use rand::Rng;

/// Maps evaluated energies to fitness values normalized to sum to 1.
///
/// Feasible individuals get `1 / (energy + eps)`; infeasible or unevaluated
/// ones (zero or non-finite energy) get 0. When every individual is
/// infeasible the result is all zeros.
pub fn normalized_fitnesses(energies: &[f64], eps: f64) -> Vec<f64> {
    let raw: Vec<f64> = energies
        .iter()
        .map(|&e| if e > 0.0 && e.is_finite() { 1.0 / (e + eps) } else { 0.0 })
        .collect();
    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        raw.into_iter().map(|f| f / total).collect()
    } else {
        raw
    }
}

/// Tournament selection: samples `k` individuals uniformly at random (with
/// replacement) and returns the index of the fittest.
pub fn tournament_select<R: Rng>(fitnesses: &[f64], k: usize, rng: &mut R) -> usize {
    let mut best = rng.random_range(0..fitnesses.len());
    for _ in 1..k.max(1) {
        let challenger = rng.random_range(0..fitnesses.len());
        if fitnesses[challenger] > fitnesses[best] {
            best = challenger;
        }
    }
    best
}

/// Elitism: indices of the `count` fittest individuals, fitness descending.
pub fn elite_indices(fitnesses: &[f64], count: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitnesses.len()).collect();
    indices.sort_by(|&a, &b| {
        fitnesses[b]
            .partial_cmp(&fitnesses[a])
            .expect("fitness should not be NaN")
    });
    indices.truncate(count);
    indices
}

/// Roulette-wheel selection over fitness mass.
///
/// Draws a uniform number in `[0, total)` and returns the first index whose
/// cumulative fitness meets it. Falls back to a uniform random choice when
/// the total fitness is zero.
pub fn roulette_select<R: Rng>(fitnesses: &[f64], rng: &mut R) -> usize {
    let total: f64 = fitnesses.iter().sum();
    if total <= 0.0 {
        return rng.random_range(0..fitnesses.len());
    }

    let draw = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, f) in fitnesses.iter().enumerate() {
        cumulative += f;
        if cumulative >= draw {
            return i;
        }
    }
    fitnesses.len() - 1
}
