//! Genetic algorithm for the closed sensor tour.
//!
//! Evolves a population of candidate tours (permutations) over a fixed
//! number of generations using fitness-proportional selection, elitism,
//! order crossover, and swap mutation.

use crate::error::PlannerError;
use crate::field::SensorField;
use crate::route::Route;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Fitness assigned to zero-length tours (N <= 1 or fully coincident
/// sites). A large finite sentinel keeps the weighted sampling pool
/// well-defined where 1/length would divide by zero.
const ZERO_LENGTH_FITNESS: f64 = 1e9;

/// Fraction of the population carried over unmodified each generation.
const ELITE_FRACTION: f64 = 0.1;

/// Individual in the genetic algorithm population
#[derive(Debug, Clone)]
pub struct Individual {
    /// The tour representation
    pub tour: Vec<usize>,
    /// Closed-tour length
    pub length: f64,
    /// Fitness (reciprocal of length, higher is better)
    pub fitness: f64,
}

impl Individual {
    pub fn new(tour: Vec<usize>, field: &SensorField) -> Self {
        let length = field.tour_length(&tour);
        let fitness = if length > 0.0 {
            1.0 / length
        } else {
            ZERO_LENGTH_FITNESS
        };

        Individual {
            tour,
            length,
            fitness,
        }
    }
}

/// Genetic Algorithm configuration
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Population size
    pub population_size: usize,
    /// Number of evolution steps to perform
    pub generations: usize,
    /// Per-individual probability of a swap mutation, in [0, 1]
    pub mutation_rate: f64,
    /// Random seed
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfig {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.02,
            seed: 42,
        }
    }
}

impl GaConfig {
    /// Reject configuration values outside documented bounds.
    fn validate(&self) -> Result<(), PlannerError> {
        if self.population_size == 0 {
            return Err(PlannerError::InvalidInput(
                "population_size must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(PlannerError::InvalidInput(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

/// Genetic Algorithm implementation
pub struct GeneticAlgorithm {
    config: GaConfig,
    rng: ChaCha8Rng,
    population: Vec<Individual>,
    generation: usize,
    best_history: Vec<f64>,
}

impl GeneticAlgorithm {
    pub fn new(config: GaConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        GeneticAlgorithm {
            config,
            rng,
            population: Vec::new(),
            generation: 0,
            best_history: Vec::new(),
        }
    }

    /// Number of elite individuals copied unmodified each generation.
    fn elite_count(&self) -> usize {
        (self.config.population_size as f64 * ELITE_FRACTION).ceil() as usize
    }

    /// Initialize generation 0 with uniformly shuffled permutations.
    fn initialize_population(&mut self, field: &SensorField) {
        self.population.clear();
        self.generation = 0;
        self.best_history.clear();

        for _ in 0..self.config.population_size {
            let mut tour: Vec<usize> = (0..field.dimension()).collect();
            tour.shuffle(&mut self.rng);
            self.population.push(Individual::new(tour, field));
        }
    }

    /// Shortest tour length in the current population.
    fn best_length(&self) -> f64 {
        self.population
            .iter()
            .map(|ind| ind.length)
            .fold(f64::INFINITY, f64::min)
    }

    /// Build a fitness-proportional mating pool of population indices,
    /// sampled with replacement (roulette wheel over the fitness mass).
    fn build_mating_pool(&mut self) -> Vec<usize> {
        let total: f64 = self.population.iter().map(|ind| ind.fitness).sum();
        let mut pool = Vec::with_capacity(self.population.len());

        for _ in 0..self.population.len() {
            let mut pick = self.rng.gen::<f64>() * total;
            let mut chosen = self.population.len() - 1;

            for (i, ind) in self.population.iter().enumerate() {
                pick -= ind.fitness;
                if pick <= 0.0 {
                    chosen = i;
                    break;
                }
            }

            pool.push(chosen);
        }

        pool
    }

    /// Order crossover (OX): copy a random non-empty slice of parent1
    /// verbatim, then fill the remaining positions left-to-right with
    /// parent2's sites in their relative order.
    ///
    /// The child is a permutation by construction: the slice places each of
    /// its sites exactly once, and the fill pass only draws sites absent
    /// from the slice.
    fn order_crossover(&mut self, parent1: &[usize], parent2: &[usize]) -> Vec<usize> {
        let n = parent1.len();
        if n < 2 {
            return parent1.to_vec();
        }

        // start < end always holds, so the copied slice is never empty.
        let start = self.rng.gen_range(0..n);
        let end = self.rng.gen_range(start + 1..=n);

        let mut child = vec![usize::MAX; n];
        let mut placed = vec![false; n];

        for i in start..end {
            child[i] = parent1[i];
            placed[parent1[i]] = true;
        }

        let mut fill = parent2.iter().filter(|&&site| !placed[site]);
        for slot in child.iter_mut() {
            if *slot == usize::MAX {
                if let Some(&site) = fill.next() {
                    *slot = site;
                }
            }
        }

        child
    }

    /// Swap mutation: with probability `mutation_rate`, exchange two
    /// distinct random positions. A transposition of a permutation is a
    /// permutation, so the invariant holds trivially.
    fn mutate(&mut self, tour: &mut [usize]) {
        let n = tour.len();
        if n < 2 {
            return;
        }

        if self.rng.gen::<f64>() < self.config.mutation_rate {
            let i = self.rng.gen_range(0..n);
            let mut j = self.rng.gen_range(0..n - 1);
            if j >= i {
                j += 1;
            }
            tour.swap(i, j);
        }
    }

    /// Create the next generation: elites copied through, the remainder
    /// bred from the mating pool.
    fn evolve(&mut self, field: &SensorField) {
        let pool = self.build_mating_pool();

        let mut ranked: Vec<usize> = (0..self.population.len()).collect();
        ranked.sort_by_key(|&i| OrderedFloat(-self.population[i].fitness));

        let mut next_generation: Vec<Individual> = ranked
            .iter()
            .take(self.elite_count())
            .map(|&i| self.population[i].clone())
            .collect();

        while next_generation.len() < self.config.population_size {
            let i1 = pool[self.rng.gen_range(0..pool.len())];
            let i2 = pool[self.rng.gen_range(0..pool.len())];

            let parent1 = self.population[i1].tour.clone();
            let parent2 = self.population[i2].tour.clone();

            let mut child = self.order_crossover(&parent1, &parent2);
            self.mutate(&mut child);
            next_generation.push(Individual::new(child, field));
        }

        self.population = next_generation;
        self.generation += 1;
    }

    /// Run the genetic algorithm against a field.
    ///
    /// Performs exactly `generations` evolution steps on top of the random
    /// initial population and returns the fittest individual of the final
    /// population. Deterministic given the configured seed.
    pub fn run(&mut self, field: &SensorField) -> Result<Route, PlannerError> {
        self.config.validate()?;
        if field.is_empty() {
            return Err(PlannerError::InvalidInput(
                "coordinate set is empty".to_string(),
            ));
        }

        let start = std::time::Instant::now();

        self.initialize_population(field);
        self.best_history.push(self.best_length());

        for _ in 0..self.config.generations {
            self.evolve(field);
            self.best_history.push(self.best_length());

            log::debug!(
                "generation {}: best length {:.3}",
                self.generation,
                self.best_length()
            );
        }

        let best = self
            .population
            .iter()
            .max_by_key(|ind| OrderedFloat(ind.fitness))
            .cloned()
            .ok_or_else(|| PlannerError::InvalidInput("population is empty".to_string()))?;

        log::info!(
            "GA finished after {} generations: best length {:.3}",
            self.generation,
            best.length
        );

        let mut route = Route::from_tour(field, best.tour, "GeneticAlgorithm");
        route.computation_time = start.elapsed().as_secs_f64();
        route.iterations = Some(self.generation);

        Ok(route)
    }

    /// Get current generation
    pub fn current_generation(&self) -> usize {
        self.generation
    }

    /// Best tour length per generation, starting with generation 0.
    /// Monotonically non-increasing thanks to elitism.
    pub fn best_length_history(&self) -> &[f64] {
        &self.best_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Coordinate;
    use proptest::prelude::*;

    fn square_field() -> SensorField {
        SensorField::new(
            "square",
            vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(10.0, 0.0),
                Coordinate::new(10.0, 10.0),
                Coordinate::new(0.0, 10.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_converges_on_square() {
        let field = square_field();
        let config = GaConfig {
            population_size: 60,
            generations: 80,
            mutation_rate: 0.02,
            seed: 42,
        };

        let route = GeneticAlgorithm::new(config).run(&field).unwrap();
        assert!(route.is_complete(&field));
        assert!((route.length - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_output_is_permutation() {
        let field = SensorField::generate("f", 18, 3);
        let config = GaConfig {
            population_size: 30,
            generations: 25,
            mutation_rate: 0.05,
            seed: 7,
        };

        let route = GeneticAlgorithm::new(config).run(&field).unwrap();
        assert!(route.is_complete(&field));
        assert!(route.length >= 0.0);
        assert_eq!(route.iterations, Some(25));
    }

    #[test]
    fn test_elitism_monotonic_best() {
        let field = SensorField::generate("f", 16, 11);
        let config = GaConfig {
            population_size: 40,
            generations: 30,
            mutation_rate: 0.05,
            seed: 5,
        };

        let mut ga = GeneticAlgorithm::new(config);
        ga.run(&field).unwrap();

        let history = ga.best_length_history();
        assert_eq!(history.len(), 31);
        for pair in history.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-9);
        }
    }

    #[test]
    fn test_deterministic_given_seed() {
        let field = SensorField::generate("f", 12, 2);
        let config = GaConfig {
            population_size: 20,
            generations: 15,
            mutation_rate: 0.1,
            seed: 99,
        };

        let a = GeneticAlgorithm::new(config.clone()).run(&field).unwrap();
        let b = GeneticAlgorithm::new(config).run(&field).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.length, b.length);
    }

    #[test]
    fn test_population_of_one() {
        // With a single individual, elitism fills the next generation and
        // the reproduction loop never runs: the output equals the initial
        // random individual regardless of the generation count.
        let field = SensorField::generate("f", 10, 4);

        let short = GaConfig {
            population_size: 1,
            generations: 0,
            mutation_rate: 0.02,
            seed: 21,
        };
        let long = GaConfig {
            generations: 5,
            ..short.clone()
        };

        let a = GeneticAlgorithm::new(short).run(&field).unwrap();
        let b = GeneticAlgorithm::new(long).run(&field).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.length, b.length);
    }

    #[test]
    fn test_single_site_field() {
        let field = SensorField::new("one", vec![Coordinate::new(5.0, 5.0)]).unwrap();
        let config = GaConfig {
            population_size: 4,
            generations: 3,
            ..Default::default()
        };

        let route = GeneticAlgorithm::new(config).run(&field).unwrap();
        assert_eq!(route.tour, vec![0]);
        assert_eq!(route.length, 0.0);
    }

    #[test]
    fn test_coincident_sites_use_sentinel_fitness() {
        let field = SensorField::new(
            "stacked",
            vec![Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 1.0)],
        )
        .unwrap();
        let config = GaConfig {
            population_size: 6,
            generations: 4,
            ..Default::default()
        };

        let route = GeneticAlgorithm::new(config).run(&field).unwrap();
        assert!(route.is_complete(&field));
        assert_eq!(route.length, 0.0);
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let field = square_field();

        let zero_pop = GaConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            GeneticAlgorithm::new(zero_pop).run(&field),
            Err(PlannerError::InvalidInput(_))
        ));

        let bad_rate = GaConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            GeneticAlgorithm::new(bad_rate).run(&field),
            Err(PlannerError::InvalidInput(_))
        ));

        let empty = SensorField::new("empty", Vec::new()).unwrap();
        assert!(matches!(
            GeneticAlgorithm::new(GaConfig::default()).run(&empty),
            Err(PlannerError::InvalidInput(_))
        ));
    }

    fn seeded_permutation(n: usize, seed: u64) -> Vec<usize> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(&mut rng);
        perm
    }

    fn is_permutation(tour: &[usize], n: usize) -> bool {
        let mut seen = vec![false; n];
        tour.len() == n
            && tour.iter().all(|&s| {
                if s >= n || seen[s] {
                    false
                } else {
                    seen[s] = true;
                    true
                }
            })
    }

    proptest! {
        #[test]
        fn prop_order_crossover_yields_permutation(
            n in 1usize..40,
            seed1 in any::<u64>(),
            seed2 in any::<u64>(),
            ga_seed in any::<u64>(),
        ) {
            let parent1 = seeded_permutation(n, seed1);
            let parent2 = seeded_permutation(n, seed2);

            let mut ga = GeneticAlgorithm::new(GaConfig {
                seed: ga_seed,
                ..Default::default()
            });
            let child = ga.order_crossover(&parent1, &parent2);

            prop_assert!(is_permutation(&child, n));
        }

        #[test]
        fn prop_mutation_preserves_permutation(
            n in 1usize..40,
            seed in any::<u64>(),
            ga_seed in any::<u64>(),
        ) {
            let mut tour = seeded_permutation(n, seed);

            let mut ga = GeneticAlgorithm::new(GaConfig {
                mutation_rate: 1.0,
                seed: ga_seed,
                ..Default::default()
            });
            ga.mutate(&mut tour);

            prop_assert!(is_permutation(&tour, n));
        }
    }
}
