//! Headless evolutionary loop over [`LinearPolicy`] candidates.
//!
//! Each generation every candidate plays the same set of seeded episodes in
//! parallel; the best one is kept and the rest of the population is refilled
//! with mutated copies of it.

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::policy::{LinearPolicy, evaluate};
use log::info;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub population: usize,
    pub generations: usize,
    pub sigma: f32,
    pub episodes_per_policy: usize,
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self { population: 10, generations: 50, sigma: 0.25, episodes_per_policy: 3, seed: 42 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
}

pub struct EvoTrainer {
    sim: SimConfig,
    cfg: TrainerConfig,
    pop: Vec<LinearPolicy>,
    rng: SmallRng,
    generation: usize,
    generation_best: Vec<f64>,
    best: LinearPolicy,
    best_fitness: f64,
}

impl EvoTrainer {
    pub fn new(sim: SimConfig, cfg: TrainerConfig) -> Result<Self> {
        sim.validate()?;
        if cfg.population == 0 || cfg.episodes_per_policy == 0 {
            return Err(SimError::Configuration("population and episodes_per_policy must be non-zero".into()));
        }
        let mut rng = SmallRng::seed_from_u64(cfg.seed);
        let pop: Vec<LinearPolicy> = (0..cfg.population).map(|_| LinearPolicy::random(&mut rng)).collect();
        let best = pop[0].clone();
        Ok(Self {
            sim,
            cfg,
            pop,
            rng,
            generation: 0,
            generation_best: Vec::new(),
            best,
            best_fitness: f64::NEG_INFINITY,
        })
    }

    /// Total fitness of every candidate over this generation's episodes.
    pub fn evaluate_population(&self) -> Result<Vec<f64>> {
        let seeds: Vec<u64> =
            (0..self.cfg.episodes_per_policy).map(|e| episode_seed(self.cfg.seed, self.generation, e)).collect();
        self.pop
            .par_iter()
            .map(|candidate| -> Result<f64> {
                let mut policy = candidate.clone();
                let mut fitness = 0.0;
                for &seed in &seeds {
                    evaluate(&mut policy, &self.sim, seed, &mut fitness)?;
                }
                Ok(fitness)
            })
            .collect()
    }

    /// Scores the population, keeps the best candidate and replaces the rest
    /// with its mutated copies.
    pub fn step_generation(&mut self) -> Result<GenerationReport> {
        let scores = self.evaluate_population()?;
        let mut best_idx = 0;
        for (i, &s) in scores.iter().enumerate() {
            if s > scores[best_idx] {
                best_idx = i;
            }
        }
        let best = scores[best_idx];
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        self.generation_best.push(best);
        if best > self.best_fitness {
            self.best_fitness = best;
            self.best = self.pop[best_idx].clone();
        }

        let parent = self.pop[best_idx].clone();
        let mut next = Vec::with_capacity(self.cfg.population);
        next.push(parent.clone());
        while next.len() < self.cfg.population {
            let mut child = parent.clone();
            child.mutate(&mut self.rng, self.cfg.sigma);
            next.push(child);
        }
        self.pop = next;

        let report = GenerationReport { generation: self.generation, best, mean };
        self.generation += 1;
        Ok(report)
    }

    pub fn run(&mut self) -> Result<&LinearPolicy> {
        for _ in 0..self.cfg.generations {
            let r = self.step_generation()?;
            info!("generation {}: best {:.1}, mean {:.2}", r.generation, r.best, r.mean);
        }
        Ok(&self.best)
    }

    pub fn best(&self) -> &LinearPolicy {
        &self.best
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn generation_best(&self) -> &[f64] {
        &self.generation_best
    }

    pub fn population(&self) -> &[LinearPolicy] {
        &self.pop
    }
}

/// Per-episode seed shared by all candidates of a generation.
fn episode_seed(base: u64, generation: usize, episode: usize) -> u64 {
    base ^ (generation as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (episode as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> TrainerConfig {
        TrainerConfig { population: 6, generations: 3, sigma: 0.25, episodes_per_policy: 2, seed: 3 }
    }

    #[test]
    fn test_rejects_empty_population() {
        let cfg = TrainerConfig { population: 0, ..small() };
        assert!(EvoTrainer::new(SimConfig::small(), cfg).is_err());
        assert!(EvoTrainer::new(SimConfig::new(0), small()).is_err());
    }

    #[test]
    fn test_population_size_is_kept() {
        let mut t = EvoTrainer::new(SimConfig::small(), small()).unwrap();
        t.step_generation().unwrap();
        assert_eq!(t.population().len(), 6);
        assert_eq!(t.generation(), 1);
    }

    #[test]
    fn test_scores_are_reproducible() {
        let a = EvoTrainer::new(SimConfig::small(), small()).unwrap();
        let b = EvoTrainer::new(SimConfig::small(), small()).unwrap();
        assert_eq!(a.evaluate_population().unwrap(), b.evaluate_population().unwrap());
    }

    #[test]
    fn test_elite_survives() {
        let mut t = EvoTrainer::new(SimConfig::small(), small()).unwrap();
        let scores = t.evaluate_population().unwrap();
        let report = t.step_generation().unwrap();
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(report.best, max);
        assert_eq!(t.best_fitness(), max);
        assert_eq!(&t.population()[0], t.best());
    }

    #[test]
    fn test_run_records_every_generation() {
        let mut t = EvoTrainer::new(SimConfig::small(), small()).unwrap();
        t.run().unwrap();
        assert_eq!(t.generation_best().len(), 3);
        // Each episode scores at least its starting length.
        assert!(t.generation_best().iter().all(|&b| b >= 2.0));
    }
}
