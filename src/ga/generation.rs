//! Generation processing: opposition, breeding, evaluation, survivor
//! assembly.
//!
//! One call to [`GenerationProcessor::process`] turns a population into the
//! next generation:
//!
//! 1. Mirror the population (opposition-based augmentation).
//! 2. Breed both pools independently: tournament parent selection,
//!    crossover, mutation.
//! 3. Evaluate every offspring and drop infeasible ones (zero energy).
//! 4. If nothing survived, regenerate from scratch and retry, a bounded
//!    number of times.
//! 5. Assemble survivors: elites first, roulette fill to full size.

use rand::Rng;

use crate::simulation::FleetSimulator;

use super::chromosome::{opposite_population, random_population, Chromosome};
use super::config::GaConfig;
use super::operators::{crossover, mutate_cuts, mutate_order};
use super::selection::{elite_indices, normalized_fitnesses, roulette_select, tournament_select};

/// Redraws before the roulette fill accepts a duplicate individual.
const DUPLICATE_REDRAW_ATTEMPTS: usize = 10;

/// Result of processing one generation.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// The next generation, fully evaluated and feasible.
    Next(Vec<Chromosome>),
    /// Every offspring pool was infeasible even after the bounded
    /// regeneration retries; the problem constraints are too tight.
    ParametersInfeasible,
}

/// Drives one population through opposition, variation, evaluation, and
/// survivor selection.
pub struct GenerationProcessor<'a> {
    simulator: &'a FleetSimulator<'a>,
    config: &'a GaConfig,
    num_tasks: usize,
    num_drones: usize,
}

impl<'a> GenerationProcessor<'a> {
    /// Creates a processor bound to a simulator and configuration.
    pub fn new(
        simulator: &'a FleetSimulator<'a>,
        config: &'a GaConfig,
        num_tasks: usize,
        num_drones: usize,
    ) -> Self {
        Self {
            simulator,
            config,
            num_tasks,
            num_drones,
        }
    }

    /// Produces the next generation from `population`.
    pub fn process<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> GenerationOutcome {
        let mut attempt = 0;
        loop {
            let source = if attempt == 0 {
                population.to_vec()
            } else {
                tracing::warn!(
                    attempt,
                    "offspring pool fully infeasible, regenerating population"
                );
                random_population(self.config.population_size, self.num_tasks, self.num_drones, rng)
            };

            let mirrored = opposite_population(&source);
            let mut pool = self.breed(&source, rng);
            pool.extend(self.breed(&mirrored, rng));

            for individual in &mut pool {
                let energy = self.simulator.evaluate(individual);
                individual.set_energy(energy);
            }
            pool.retain(|individual| individual.energy() > 0.0);

            if !pool.is_empty() {
                return GenerationOutcome::Next(self.assemble(&pool, rng));
            }

            attempt += 1;
            if attempt > self.config.max_repair_retries {
                return GenerationOutcome::ParametersInfeasible;
            }
        }
    }

    /// Applies tournament parent selection, crossover, and mutation to one
    /// pool, producing an equally sized offspring pool.
    ///
    /// The pool is not evaluated yet, so the tournament runs on a uniform
    /// fitness and only supplies sampling mechanics; real selection
    /// pressure comes later from elitism and the roulette fill.
    fn breed<R: Rng>(&self, source: &[Chromosome], rng: &mut R) -> Vec<Chromosome> {
        let uniform = vec![1.0; source.len()];
        let k = self.config.tournament_size;

        let mut offspring = Vec::with_capacity(source.len());
        while offspring.len() < source.len() {
            let p1 = &source[tournament_select(&uniform, k, rng)];
            let p2 = &source[tournament_select(&uniform, k, rng)];

            let (mut c1, mut c2) = if rng.random::<f64>() < self.config.crossover_prob {
                crossover(p1, p2, rng)
            } else {
                (p1.clone(), p2.clone())
            };

            for child in [&mut c1, &mut c2] {
                if rng.random::<f64>() < self.config.order_mutation_prob {
                    mutate_order(child.order_mut(), rng);
                }
                if rng.random::<f64>() < self.config.cut_mutation_prob {
                    mutate_cuts(child.cuts_mut(), self.num_tasks, rng);
                }
            }

            offspring.push(c1);
            if offspring.len() < source.len() {
                offspring.push(c2);
            }
        }
        offspring
    }

    /// Builds the next generation from the filtered, evaluated pool:
    /// elites first, then roulette-wheel fill with bounded duplicate
    /// avoidance.
    fn assemble<R: Rng>(&self, pool: &[Chromosome], rng: &mut R) -> Vec<Chromosome> {
        let energies: Vec<f64> = pool.iter().map(|c| c.energy()).collect();
        let fitnesses = normalized_fitnesses(&energies, self.config.fitness_epsilon);

        let mut next = Vec::with_capacity(self.config.population_size);
        for idx in elite_indices(&fitnesses, self.config.elite_count.min(pool.len())) {
            if next.len() == self.config.population_size {
                break;
            }
            next.push(pool[idx].clone());
        }

        while next.len() < self.config.population_size {
            let mut pick = roulette_select(&fitnesses, rng);
            for _ in 0..DUPLICATE_REDRAW_ATTEMPTS {
                if !next.iter().any(|c| c.same_genes(&pool[pick])) {
                    break;
                }
                pick = roulette_select(&fitnesses, rng);
            }
            next.push(pool[pick].clone());
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::DroneParams;
    use crate::models::{Drone, FleetProblem, Point, Task};
    use crate::simulation::SimParams;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn easy_problem() -> FleetProblem {
        let tasks = vec![
            Task::new(0, Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1.0, 1e6),
            Task::new(1, Point::new(100.0, 0.0), Point::new(200.0, 0.0), 0.5, 1e6),
            Task::new(2, Point::new(50.0, 50.0), Point::new(0.0, 50.0), 1.5, 1e6),
            Task::new(3, Point::new(10.0, 10.0), Point::new(20.0, 20.0), 0.2, 1e6),
        ];
        let drones = vec![
            Drone::new(0, Point::new(0.0, 0.0)),
            Drone::new(1, Point::new(100.0, 100.0)),
        ];
        let stations = vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(50.0, 50.0)];
        FleetProblem::new(tasks, drones, stations).expect("valid")
    }

    fn hopeless_problem() -> FleetProblem {
        // One station, unreachably far, and a battery too small for any leg.
        let tasks = vec![Task::new(
            0,
            Point::new(0.0, 0.0),
            Point::new(500.0, 0.0),
            1.0,
            1e6,
        )];
        let drones = vec![Drone::new(0, Point::new(0.0, 0.0))];
        let stations = vec![Point::new(1.0e6, 1.0e6)];
        FleetProblem::new(tasks, drones, stations).expect("valid")
    }

    #[test]
    fn test_process_yields_full_feasible_generation() {
        let problem = easy_problem();
        let params = DroneParams::default();
        let sim_params = SimParams {
            cruise_speed: 15.0,
            battery_capacity: 1e9,
        };
        let simulator = FleetSimulator::new(&problem, &params, &sim_params);
        let config = GaConfig::default().with_population_size(20);
        let processor = GenerationProcessor::new(&simulator, &config, 4, 2);

        let mut rng = SmallRng::seed_from_u64(42);
        let population = random_population(20, 4, 2, &mut rng);

        match processor.process(&population, &mut rng) {
            GenerationOutcome::Next(next) => {
                assert_eq!(next.len(), 20);
                for individual in &next {
                    assert!(individual.energy() > 0.0);
                    assert!(individual.energy().is_finite());
                    let mut sorted = individual.order().to_vec();
                    sorted.sort_unstable();
                    assert_eq!(sorted, vec![0, 1, 2, 3]);
                }
            }
            GenerationOutcome::ParametersInfeasible => panic!("easy problem flagged infeasible"),
        }
    }

    #[test]
    fn test_process_is_deterministic_under_seed() {
        let problem = easy_problem();
        let params = DroneParams::default();
        let sim_params = SimParams {
            cruise_speed: 15.0,
            battery_capacity: 1e9,
        };
        let simulator = FleetSimulator::new(&problem, &params, &sim_params);
        let config = GaConfig::default().with_population_size(10);
        let processor = GenerationProcessor::new(&simulator, &config, 4, 2);

        let run = |seed: u64| -> Vec<f64> {
            let mut rng = SmallRng::seed_from_u64(seed);
            let population = random_population(10, 4, 2, &mut rng);
            match processor.process(&population, &mut rng) {
                GenerationOutcome::Next(next) => next.iter().map(|c| c.energy()).collect(),
                GenerationOutcome::ParametersInfeasible => panic!("unexpected"),
            }
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_elites_survive_into_next_generation() {
        let problem = easy_problem();
        let params = DroneParams::default();
        let sim_params = SimParams {
            cruise_speed: 15.0,
            battery_capacity: 1e9,
        };
        let simulator = FleetSimulator::new(&problem, &params, &sim_params);
        let config = GaConfig::default().with_population_size(16).with_elite_count(3);
        let processor = GenerationProcessor::new(&simulator, &config, 4, 2);

        let mut rng = SmallRng::seed_from_u64(5);
        let population = random_population(16, 4, 2, &mut rng);
        if let GenerationOutcome::Next(next) = processor.process(&population, &mut rng) {
            // Survivors are sorted elites-first, so the head of the next
            // generation is its best individual.
            let head = next[0].energy();
            for individual in &next {
                assert!(individual.energy() >= head);
            }
        } else {
            panic!("easy problem flagged infeasible");
        }
    }

    #[test]
    fn test_hopeless_problem_reports_parameters_infeasible() {
        let problem = hopeless_problem();
        let params = DroneParams::default();
        let sim_params = SimParams {
            cruise_speed: 15.0,
            battery_capacity: 1.0,
        };
        let simulator = FleetSimulator::new(&problem, &params, &sim_params);
        let config = GaConfig::default().with_population_size(6);
        let processor = GenerationProcessor::new(&simulator, &config, 1, 1);

        let mut rng = SmallRng::seed_from_u64(1);
        let population = random_population(6, 1, 1, &mut rng);
        assert!(matches!(
            processor.process(&population, &mut rng),
            GenerationOutcome::ParametersInfeasible
        ));
    }
}
