//! Evolutionary loop and convergence control.
//!
//! [`GaRunner`] drives the generation processor until the generation cap,
//! convergence (best energy stable within `epsilon` for
//! `convergence_window` consecutive generations), or a
//! parameters-infeasible signal. It tracks the global best individual and
//! records per-generation fitness/energy statistics for external reporting.

use rand::Rng;
use serde::Serialize;

use crate::energy::DroneParams;
use crate::models::{FleetProblem, Task};
use crate::simulation::{FleetSimulator, SimParams};

use super::chromosome::{random_population, Chromosome};
use super::config::GaConfig;
use super::generation::{GenerationOutcome, GenerationProcessor};
use super::selection::normalized_fitnesses;

/// Why the evolutionary loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The generation cap was reached.
    MaxGenerations,
    /// Best energy stayed within epsilon for the whole convergence window.
    Converged,
    /// Every offspring pool was infeasible after bounded retries; the
    /// constraints (fleet size, battery, deadlines) are too tight.
    ParametersInfeasible,
}

/// Per-generation fitness and energy statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationStats {
    /// Highest normalized fitness.
    pub max_fitness: f64,
    /// Mean normalized fitness.
    pub avg_fitness: f64,
    /// Lowest normalized fitness.
    pub min_fitness: f64,
    /// Highest energy in the generation.
    pub max_energy: f64,
    /// Mean energy.
    pub avg_energy: f64,
    /// Lowest (best) energy.
    pub min_energy: f64,
}

impl GenerationStats {
    fn from_samples(fitnesses: &[f64], energies: &[f64]) -> Self {
        let n = energies.len() as f64;
        Self {
            max_fitness: fitnesses.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            avg_fitness: fitnesses.iter().sum::<f64>() / n,
            min_fitness: fitnesses.iter().copied().fold(f64::INFINITY, f64::min),
            max_energy: energies.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            avg_energy: energies.iter().sum::<f64>() / n,
            min_energy: energies.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }
}

/// Counts consecutive generations whose best energy moved by at most
/// `epsilon`; reports convergence once the count reaches `window`.
///
/// The first observation has no predecessor and is compared against
/// `initial_delta` (conventionally a large penalty value, so the first
/// generation never counts as stagnant).
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    epsilon: f64,
    window: usize,
    initial_delta: f64,
    previous: Option<f64>,
    counter: usize,
}

impl ConvergenceTracker {
    /// Creates a tracker.
    pub fn new(epsilon: f64, window: usize, initial_delta: f64) -> Self {
        Self {
            epsilon,
            window,
            initial_delta,
            previous: None,
            counter: 0,
        }
    }

    /// Feeds one generation's best energy; returns `true` once converged.
    pub fn observe(&mut self, best_energy: f64) -> bool {
        let delta = match self.previous {
            Some(previous) => (best_energy - previous).abs(),
            None => self.initial_delta,
        };
        if delta <= self.epsilon {
            self.counter += 1;
        } else {
            self.counter = 0;
        }
        self.previous = Some(best_energy);
        self.window > 0 && self.counter >= self.window
    }

    /// Current run of stagnant generations.
    pub fn stagnant_generations(&self) -> usize {
        self.counter
    }
}

/// Everything a run produces for external reporting.
#[derive(Debug, Clone, Serialize)]
pub struct GaResult {
    /// The best individual seen across all generations, if any generation
    /// produced a feasible population.
    pub best: Option<Chromosome>,
    /// Its total fleet energy; `f64::INFINITY` when `best` is `None`.
    pub best_energy: f64,
    /// 1-indexed generation where the best individual appeared (0 = none).
    pub best_generation: usize,
    /// The best individual's decoded routes, one task sequence per drone.
    pub routes: Vec<Vec<usize>>,
    /// Task list annotated with the best plan's recharge-previous markers.
    pub tasks: Vec<Task>,
    /// Per-generation statistics, one entry per completed generation.
    pub history: Vec<GenerationStats>,
    /// Why the loop stopped.
    pub stop_reason: StopReason,
    /// Completed generations.
    pub generations_run: usize,
}

/// The evolutionary loop.
///
/// # Examples
///
/// ```
/// use drone_delivery_ga::energy::DroneParams;
/// use drone_delivery_ga::ga::{GaConfig, GaRunner};
/// use drone_delivery_ga::models::{Drone, FleetProblem, Point, Task};
/// use drone_delivery_ga::simulation::SimParams;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let tasks = vec![
///     Task::new(0, Point::new(0.0, 0.0), Point::new(50.0, 0.0), 1.0, 1e5),
///     Task::new(1, Point::new(50.0, 0.0), Point::new(100.0, 0.0), 1.0, 1e5),
/// ];
/// let drones = vec![Drone::new(0, Point::new(0.0, 0.0))];
/// let stations = vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
/// let problem = FleetProblem::new(tasks, drones, stations).expect("valid");
///
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(10);
/// let runner = GaRunner::new(&problem, DroneParams::default(), SimParams::default(), config);
/// let result = runner.run(&mut SmallRng::seed_from_u64(1));
/// assert!(result.best.is_some());
/// assert!(result.best_energy.is_finite());
/// ```
pub struct GaRunner<'a> {
    problem: &'a FleetProblem,
    drone_params: DroneParams,
    sim_params: SimParams,
    config: GaConfig,
}

impl<'a> GaRunner<'a> {
    /// Creates a runner over a problem and its parameters.
    pub fn new(
        problem: &'a FleetProblem,
        drone_params: DroneParams,
        sim_params: SimParams,
        config: GaConfig,
    ) -> Self {
        Self {
            problem,
            drone_params,
            sim_params,
            config,
        }
    }

    /// Runs the full evolutionary loop.
    pub fn run<R: Rng>(&self, rng: &mut R) -> GaResult {
        let num_tasks = self.problem.num_tasks();
        let num_drones = self.problem.num_drones();

        let simulator = FleetSimulator::new(self.problem, &self.drone_params, &self.sim_params);
        let processor = GenerationProcessor::new(&simulator, &self.config, num_tasks, num_drones);

        let mut population =
            random_population(self.config.population_size, num_tasks, num_drones, rng);
        let mut tracker = ConvergenceTracker::new(
            self.config.epsilon,
            self.config.convergence_window,
            self.config.penalty,
        );

        let mut best: Option<Chromosome> = None;
        let mut best_energy = f64::INFINITY;
        let mut best_generation = 0;
        let mut history = Vec::new();
        let mut generations_run = 0;
        let mut stop_reason = StopReason::MaxGenerations;

        for generation in 1..=self.config.max_generations {
            match processor.process(&population, rng) {
                GenerationOutcome::Next(next) => population = next,
                GenerationOutcome::ParametersInfeasible => {
                    tracing::warn!(
                        generation,
                        "parameters infeasible: no feasible offspring; relax fleet size, battery, or deadlines"
                    );
                    stop_reason = StopReason::ParametersInfeasible;
                    break;
                }
            }
            generations_run = generation;

            // The processed population is fully evaluated and feasible.
            let energies: Vec<f64> = population.iter().map(|c| c.energy()).collect();
            let fitnesses = normalized_fitnesses(&energies, self.config.fitness_epsilon);
            history.push(GenerationStats::from_samples(&fitnesses, &energies));

            let mut gen_best = 0;
            for i in 1..energies.len() {
                if energies[i] < energies[gen_best] {
                    gen_best = i;
                }
            }
            let gen_best_energy = energies[gen_best];

            if gen_best_energy <= best_energy {
                best_energy = gen_best_energy;
                best = Some(population[gen_best].clone());
                best_generation = generation;
                tracing::info!(generation, energy = gen_best_energy, "new global best");
            }
            tracing::debug!(
                generation,
                best = gen_best_energy,
                avg = history[generation - 1].avg_energy,
                "generation complete"
            );

            if tracker.observe(gen_best_energy) {
                tracing::info!(
                    generation,
                    window = self.config.convergence_window,
                    "converged: best energy stable"
                );
                stop_reason = StopReason::Converged;
                break;
            }
        }

        let (routes, tasks) = match &best {
            Some(chromosome) => {
                let plan = simulator.simulate(chromosome);
                (chromosome.decode(num_drones), plan.into_tasks())
            }
            None => (Vec::new(), self.problem.tasks().to_vec()),
        };

        GaResult {
            best,
            best_energy,
            best_generation,
            routes,
            tasks,
            history,
            stop_reason,
            generations_run,
        }
    }
}
