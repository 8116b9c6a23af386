//! Two-part chromosome encoding a fleet assignment.
//!
//! # Encoding
//!
//! A chromosome is a pair `(order, cuts)`:
//! - **order**: a permutation of all task IDs.
//! - **cuts**: a sorted, strictly increasing list of partition boundaries in
//!   `[1, num_tasks - 1]`, one fewer than the number of drones (clamped when
//!   there are more drones than tasks).
//!
//! Extending the cuts with the implicit boundaries `0` and `num_tasks`
//! slices `order` into contiguous segments; segment *i* is drone *i*'s task
//! sequence.

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

fn unevaluated() -> f64 {
    f64::INFINITY
}

/// A candidate fleet routing: task order plus per-drone partition cuts.
///
/// The energy value is `f64::INFINITY` until the simulator scores the
/// chromosome, and `0.0` when the simulated plan is infeasible.
///
/// # Examples
///
/// ```
/// use drone_delivery_ga::ga::Chromosome;
///
/// let c = Chromosome::new(vec![2, 0, 1, 3], vec![1, 3]);
/// assert_eq!(c.decode(3), vec![vec![2], vec![0, 1], vec![3]]);
/// assert_eq!(c.energy(), f64::INFINITY);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chromosome {
    order: Vec<usize>,
    cuts: Vec<usize>,
    #[serde(skip, default = "unevaluated")]
    energy: f64,
}

impl Chromosome {
    /// Creates a chromosome from explicit genes.
    pub fn new(order: Vec<usize>, cuts: Vec<usize>) -> Self {
        Self {
            order,
            cuts,
            energy: f64::INFINITY,
        }
    }

    /// Number of cuts a valid chromosome carries for the given problem
    /// shape: `num_drones - 1`, clamped to `num_tasks - 1` (and to zero for
    /// a single task or single drone).
    pub fn cut_count(num_tasks: usize, num_drones: usize) -> usize {
        if num_tasks <= 1 {
            return 0;
        }
        (num_drones.saturating_sub(1)).min(num_tasks - 1)
    }

    /// Creates a uniformly random valid chromosome.
    pub fn random<R: Rng>(num_tasks: usize, num_drones: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..num_tasks).collect();

        // Fisher-Yates shuffle
        for i in (1..order.len()).rev() {
            let j = rng.random_range(0..=i as u64) as usize;
            order.swap(i, j);
        }

        let count = Self::cut_count(num_tasks, num_drones);
        let mut cuts = if count > 0 {
            let positions: Vec<usize> = (1..num_tasks).collect();
            positions
                .choose_multiple(rng, count)
                .copied()
                .collect::<Vec<usize>>()
        } else {
            Vec::new()
        };
        cuts.sort_unstable();

        Self::new(order, cuts)
    }

    /// The task-order gene.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Mutable access to the task-order gene.
    pub fn order_mut(&mut self) -> &mut Vec<usize> {
        &mut self.order
    }

    /// The partition-cut gene.
    pub fn cuts(&self) -> &[usize] {
        &self.cuts
    }

    /// Mutable access to the partition-cut gene.
    pub fn cuts_mut(&mut self) -> &mut Vec<usize> {
        &mut self.cuts
    }

    /// Number of tasks encoded.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the chromosome encodes no tasks.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Evaluated total fleet energy. `f64::INFINITY` when not yet
    /// evaluated, `0.0` when infeasible.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Stores the evaluated energy.
    pub fn set_energy(&mut self, energy: f64) {
        self.energy = energy;
    }

    /// Returns `true` if both chromosomes carry identical genes, ignoring
    /// their evaluation state.
    pub fn same_genes(&self, other: &Chromosome) -> bool {
        self.order == other.order && self.cuts == other.cuts
    }

    /// The opposition-based mirror: every order gene `g` becomes
    /// `(num_tasks - 1) - g`; cuts are unchanged. Applying this twice
    /// restores the original chromosome.
    pub fn opposite(&self) -> Chromosome {
        let n = self.order.len();
        let order = self.order.iter().map(|&g| (n - 1) - g).collect();
        Chromosome::new(order, self.cuts.clone())
    }

    /// Decodes the chromosome into one task sequence per drone.
    ///
    /// Drones beyond the number of segments get empty routes. The union of
    /// all segments is the full task set, by construction.
    pub fn decode(&self, num_drones: usize) -> Vec<Vec<usize>> {
        let n = self.order.len();
        let mut bounds = Vec::with_capacity(self.cuts.len() + 2);
        bounds.push(0);
        bounds.extend_from_slice(&self.cuts);
        bounds.push(n);

        let mut routes = vec![Vec::new(); num_drones];
        for (i, route) in routes.iter_mut().enumerate().take(bounds.len() - 1) {
            *route = self.order[bounds[i]..bounds[i + 1]].to_vec();
        }
        routes
    }
}

/// Creates `size` random valid chromosomes.
pub fn random_population<R: Rng>(
    size: usize,
    num_tasks: usize,
    num_drones: usize,
    rng: &mut R,
) -> Vec<Chromosome> {
    (0..size)
        .map(|_| Chromosome::random(num_tasks, num_drones, rng))
        .collect()
}

/// Mirrors a whole population via [`Chromosome::opposite`].
pub fn opposite_population(population: &[Chromosome]) -> Vec<Chromosome> {
    population.iter().map(|c| c.opposite()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn assert_valid(c: &Chromosome, num_tasks: usize, num_drones: usize) {
        let mut sorted = c.order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..num_tasks).collect::<Vec<usize>>());

        assert_eq!(c.cuts().len(), Chromosome::cut_count(num_tasks, num_drones));
        for w in c.cuts().windows(2) {
            assert!(w[0] < w[1], "cuts not strictly increasing: {:?}", c.cuts());
        }
        for &cut in c.cuts() {
            assert!((1..num_tasks).contains(&cut));
        }
    }

    #[test]
    fn test_random_is_valid() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_valid(&Chromosome::random(10, 4, &mut rng), 10, 4);
        }
    }

    #[test]
    fn test_random_degenerate_shapes() {
        let mut rng = SmallRng::seed_from_u64(42);

        let single_task = Chromosome::random(1, 5, &mut rng);
        assert_eq!(single_task.order(), &[0]);
        assert!(single_task.cuts().is_empty());

        let single_drone = Chromosome::random(6, 1, &mut rng);
        assert!(single_drone.cuts().is_empty());

        // More drones than tasks: clamp to num_tasks - 1 cuts.
        let crowded = Chromosome::random(3, 7, &mut rng);
        assert_eq!(crowded.cuts().len(), 2);
        assert_valid(&crowded, 3, 7);
    }

    #[test]
    fn test_decode_segments() {
        let c = Chromosome::new(vec![4, 2, 0, 1, 3], vec![2, 3]);
        let routes = c.decode(3);
        assert_eq!(routes, vec![vec![4, 2], vec![0], vec![1, 3]]);
    }

    #[test]
    fn test_decode_pads_extra_drones() {
        let c = Chromosome::new(vec![1, 0], vec![1]);
        let routes = c.decode(4);
        assert_eq!(routes.len(), 4);
        assert_eq!(routes[0], vec![1]);
        assert_eq!(routes[1], vec![0]);
        assert!(routes[2].is_empty());
        assert!(routes[3].is_empty());
    }

    #[test]
    fn test_decode_partition_is_total() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let c = Chromosome::random(12, 5, &mut rng);
            let mut seen: Vec<usize> = c.decode(5).into_iter().flatten().collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..12).collect::<Vec<usize>>());
        }
    }

    #[test]
    fn test_opposite_involution() {
        let c = Chromosome::new(vec![3, 0, 2, 1, 4], vec![2]);
        let mirrored = c.opposite();
        assert_eq!(mirrored.order(), &[1, 4, 2, 3, 0]);
        assert_eq!(mirrored.cuts(), c.cuts());
        assert!(mirrored.opposite().same_genes(&c));
    }

    #[test]
    fn test_opposite_population_keeps_size() {
        let mut rng = SmallRng::seed_from_u64(3);
        let pop = random_population(8, 6, 2, &mut rng);
        let mirrored = opposite_population(&pop);
        assert_eq!(mirrored.len(), 8);
        for (orig, mirror) in pop.iter().zip(&mirrored) {
            assert!(mirror.opposite().same_genes(orig));
        }
    }

    #[test]
    fn test_energy_lifecycle() {
        let mut c = Chromosome::new(vec![0, 1], vec![]);
        assert_eq!(c.energy(), f64::INFINITY);
        c.set_energy(123.5);
        assert_eq!(c.energy(), 123.5);
        // Derived chromosomes start unevaluated again.
        assert_eq!(c.opposite().energy(), f64::INFINITY);
    }

    #[test]
    fn test_same_genes_ignores_energy() {
        let mut a = Chromosome::new(vec![0, 1, 2], vec![1]);
        let b = Chromosome::new(vec![0, 1, 2], vec![1]);
        a.set_energy(99.0);
        assert!(a.same_genes(&b));
        assert!(!a.same_genes(&Chromosome::new(vec![2, 1, 0], vec![1])));
    }

    #[test]
    fn test_chromosome_serde_skips_energy() {
        let mut c = Chromosome::new(vec![1, 0, 2], vec![2]);
        c.set_energy(500.0);
        let json = serde_json::to_string(&c).expect("serialize");
        let back: Chromosome = serde_json::from_str(&json).expect("deserialize");
        assert!(back.same_genes(&c));
        assert_eq!(back.energy(), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn prop_random_chromosomes_are_valid(
            seed in any::<u64>(),
            num_tasks in 1usize..40,
            num_drones in 1usize..10,
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let c = Chromosome::random(num_tasks, num_drones, &mut rng);
            let mut sorted = c.order().to_vec();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..num_tasks).collect::<Vec<usize>>());
            prop_assert_eq!(c.cuts().len(), Chromosome::cut_count(num_tasks, num_drones));
            prop_assert!(c.cuts().windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_opposite_is_involution(seed in any::<u64>(), num_tasks in 1usize..40) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let c = Chromosome::random(num_tasks, 3, &mut rng);
            prop_assert!(c.opposite().opposite().same_genes(&c));
        }

        #[test]
        fn prop_decode_partitions_all_tasks(
            seed in any::<u64>(),
            num_tasks in 1usize..40,
            num_drones in 1usize..10,
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let c = Chromosome::random(num_tasks, num_drones, &mut rng);
            let routes = c.decode(num_drones);
            prop_assert_eq!(routes.len(), num_drones);
            let mut seen: Vec<usize> = routes.into_iter().flatten().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..num_tasks).collect::<Vec<usize>>());
        }
    }
}
