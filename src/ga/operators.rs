//! Crossover and mutation operators.
//!
//! - [`pmx_crossover`] — partial-mapped crossover over the order gene
//! - [`cut_crossover`] — single-point recombination of the cut gene
//! - [`crossover`] — both applied jointly to a parent pair
//! - [`mutate_order`] — two-gene swap or segment reversal
//! - [`mutate_cuts`] — shift one cut by ±1
//!
//! Operators are unconditional; crossover/mutation probabilities are applied
//! by the generation processor. Every operator preserves chromosome
//! validity: children are permutations of the parents' value set and cut
//! lists stay sorted, strictly increasing, and inside `[1, num_tasks - 1]`.

use rand::Rng;

use super::chromosome::Chromosome;

/// Share of order mutations that swap two genes; the rest reverse a segment.
const SWAP_SHARE: f64 = 0.8;

/// Partial-mapped crossover (PMX) over two parent permutations.
///
/// Picks one random segment, copies it verbatim from each parent into its
/// child, and fills the remaining positions from the other parent, chasing
/// the segment's value mapping whenever the donor gene is already taken.
/// Both children are valid permutations of the parents' value set.
pub fn pmx_crossover<R: Rng>(p1: &[usize], p2: &[usize], rng: &mut R) -> (Vec<usize>, Vec<usize>) {
    let size = p1.len();
    if size < 2 || p1 == p2 {
        return (p1.to_vec(), p2.to_vec());
    }

    let a = rng.random_range(0..size);
    let b = rng.random_range(0..size);
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    (
        pmx_child(p1, p2, start, end),
        pmx_child(p2, p1, start, end),
    )
}

/// Builds one PMX child keeping `keep[start..=end]` and filling the rest
/// from `donor`.
fn pmx_child(keep: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let size = keep.len();

    // value -> position lookup for the kept parent, built once per call.
    let mut position_in_keep = vec![0usize; size];
    for (i, &v) in keep.iter().enumerate() {
        position_in_keep[v] = i;
    }
    let mut in_segment = vec![false; size];
    for &v in &keep[start..=end] {
        in_segment[v] = true;
    }

    let mut child = donor.to_vec();
    child[start..=end].copy_from_slice(&keep[start..=end]);
    for i in (0..start).chain(end + 1..size) {
        let mut value = donor[i];
        while in_segment[value] {
            value = donor[position_in_keep[value]];
        }
        child[i] = value;
    }
    child
}

/// Single-point recombination of two cut lists.
///
/// Splits both parents at one random index and cross-concatenates, then
/// normalizes each child so the strictly-increasing invariant holds.
pub fn cut_crossover<R: Rng>(
    c1: &[usize],
    c2: &[usize],
    num_tasks: usize,
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    if c1.is_empty() && c2.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let split = rng.random_range(0..=c1.len().min(c2.len()));

    let child1: Vec<usize> = c1[..split].iter().chain(&c2[split..]).copied().collect();
    let child2: Vec<usize> = c2[..split].iter().chain(&c1[split..]).copied().collect();
    (
        normalize_cuts(child1, c1.len(), num_tasks, rng),
        normalize_cuts(child2, c2.len(), num_tasks, rng),
    )
}

/// Applies PMX and cut recombination jointly to a parent pair.
pub fn crossover<R: Rng>(p1: &Chromosome, p2: &Chromosome, rng: &mut R) -> (Chromosome, Chromosome) {
    let num_tasks = p1.len();
    let (o1, o2) = pmx_crossover(p1.order(), p2.order(), rng);
    let (c1, c2) = cut_crossover(p1.cuts(), p2.cuts(), num_tasks, rng);
    (Chromosome::new(o1, c1), Chromosome::new(o2, c2))
}

/// Mutates the order gene: a two-gene swap most of the time, otherwise a
/// segment reversal.
pub fn mutate_order<R: Rng>(order: &mut [usize], rng: &mut R) {
    if order.len() < 2 {
        return;
    }
    if rng.random::<f64>() < SWAP_SHARE {
        let i = rng.random_range(0..order.len());
        let j = rng.random_range(0..order.len());
        order.swap(i, j);
    } else {
        let a = rng.random_range(0..order.len());
        let b = rng.random_range(0..order.len());
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        order[start..=end].reverse();
    }
}

/// Mutates the cut gene: shifts one randomly chosen cut by ±1, clipped to
/// `[1, num_tasks - 1]`, then normalizes.
pub fn mutate_cuts<R: Rng>(cuts: &mut Vec<usize>, num_tasks: usize, rng: &mut R) {
    if cuts.is_empty() {
        return;
    }
    let idx = rng.random_range(0..cuts.len());
    let shifted = if rng.random_range(0..2u32) == 0 {
        cuts[idx] + 1
    } else {
        cuts[idx].saturating_sub(1)
    };
    cuts[idx] = shifted.clamp(1, num_tasks - 1);

    let target = cuts.len();
    *cuts = normalize_cuts(std::mem::take(cuts), target, num_tasks, rng);
}

/// Restores the cut invariant after recombination or mutation: sorted,
/// strictly increasing, `target_len` entries drawn from `[1, num_tasks - 1]`.
/// Collisions are repaired by redrawing unused positions.
fn normalize_cuts<R: Rng>(
    mut cuts: Vec<usize>,
    target_len: usize,
    num_tasks: usize,
    rng: &mut R,
) -> Vec<usize> {
    cuts.sort_unstable();
    cuts.dedup();

    if cuts.len() < target_len {
        let mut free: Vec<usize> = (1..num_tasks).filter(|p| !cuts.contains(p)).collect();
        while cuts.len() < target_len && !free.is_empty() {
            let pick = rng.random_range(0..free.len());
            cuts.push(free.swap_remove(pick));
        }
        cuts.sort_unstable();
    }
    cuts
}
