//! Genetic algorithm configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the evolutionary run.
///
/// # Examples
///
/// ```
/// use drone_delivery_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_max_generations(200)
///     .with_elite_count(4);
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.elite_count, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Individuals per generation (pre-filter).
    pub population_size: usize,
    /// Hard cap on generations.
    pub max_generations: usize,
    /// Probability that a parent pair is recombined (PMX + cut crossover
    /// jointly); otherwise the parents pass through unchanged.
    pub crossover_prob: f64,
    /// Probability of mutating a child's order gene.
    pub order_mutation_prob: f64,
    /// Probability of mutating a child's cut gene.
    pub cut_mutation_prob: f64,
    /// Individuals carried over unconditionally each generation.
    pub elite_count: usize,
    /// Sample size for tournament parent selection.
    pub tournament_size: usize,
    /// Energy tolerance for the convergence criterion: a generation whose
    /// best energy moved by no more than this counts as stagnant.
    pub epsilon: f64,
    /// Consecutive stagnant generations that trigger convergence.
    pub convergence_window: usize,
    /// Improvement assigned to the very first generation (stands in for an
    /// infinite previous-best energy).
    pub penalty: f64,
    /// Regeneration attempts when an entire offspring pool is infeasible
    /// before the run is declared parameters-infeasible.
    pub max_repair_retries: usize,
    /// The ε in the `1 / (energy + ε)` fitness transform.
    pub fitness_epsilon: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            crossover_prob: 0.9,
            order_mutation_prob: 0.1,
            cut_mutation_prob: 0.1,
            elite_count: 2,
            tournament_size: 3,
            epsilon: 300.0,
            convergence_window: 20,
            penalty: 1e9,
            max_repair_retries: 10,
            fitness_epsilon: 1e-6,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_prob(mut self, prob: f64) -> Self {
        self.crossover_prob = prob;
        self
    }

    /// Sets both mutation probabilities.
    pub fn with_mutation_probs(mut self, order: f64, cuts: f64) -> Self {
        self.order_mutation_prob = order;
        self.cut_mutation_prob = cuts;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Sets the tournament sample size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the convergence criterion: energy tolerance and window length.
    pub fn with_convergence(mut self, epsilon: f64, window: usize) -> Self {
        self.epsilon = epsilon;
        self.convergence_window = window;
        self
    }
}
