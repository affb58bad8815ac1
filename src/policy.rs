use crate::config::SimConfig;
use crate::dir::Decision;
use crate::episode::{Episode, Termination};
use crate::error::Result;
use crate::perception::{PERCEPTION_LEN, Perception};
use rand::Rng;
use serde::{Deserialize, Serialize};

const ACTIONS: usize = 3;

/// Maps a perception vector to a steering decision. The simulation never
/// looks behind this seam.
pub trait Policy {
    fn decide(&mut self, perception: &Perception) -> Decision;
}

impl<F: FnMut(&Perception) -> Decision> Policy for F {
    fn decide(&mut self, perception: &Perception) -> Decision {
        self(perception)
    }
}

/// Single-layer network: one weighted sum per decision, highest wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPolicy {
    pub weights: [[f32; PERCEPTION_LEN]; ACTIONS],
    pub bias: [f32; ACTIONS],
}

impl LinearPolicy {
    pub fn zeroed() -> Self {
        Self { weights: [[0.0; PERCEPTION_LEN]; ACTIONS], bias: [0.0; ACTIONS] }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut p = Self::zeroed();
        p.mutate(rng, 1.0);
        p
    }

    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R, sigma: f32) {
        if sigma <= 0.0 {
            return;
        }
        for row in self.weights.iter_mut() {
            for w in row.iter_mut() {
                *w += rng.gen_range(-sigma..sigma);
            }
        }
        for b in self.bias.iter_mut() {
            *b += rng.gen_range(-sigma..sigma);
        }
    }

    pub fn activate(&self, perception: &Perception) -> [f32; ACTIONS] {
        let x = perception.as_inputs();
        let mut out = self.bias;
        for (o, row) in out.iter_mut().zip(self.weights.iter()) {
            *o += row.iter().zip(x.iter()).map(|(w, v)| w * v).sum::<f32>();
        }
        out
    }

    /// Argmax over the activations; ties go to the lowest index.
    pub fn choose(&self, perception: &Perception) -> Decision {
        let out = self.activate(perception);
        let mut best = 0;
        for i in 1..ACTIONS {
            if out[i] > out[best] {
                best = i;
            }
        }
        Decision::ALL[best]
    }
}

impl Policy for LinearPolicy {
    fn decide(&mut self, perception: &Perception) -> Decision {
        self.choose(perception)
    }
}

/// Perceive, decide, step until the episode ends.
pub fn run_episode<P, R>(policy: &mut P, episode: &mut Episode<R>) -> Termination
where
    P: Policy + ?Sized,
    R: Rng,
{
    loop {
        if let Some(t) = episode.status().termination() {
            return t;
        }
        let perception = episode.perceive();
        let decision = policy.decide(&perception);
        episode.step(decision);
    }
}

/// Plays one seeded episode and credits its final length to `fitness`.
pub fn evaluate<P: Policy + ?Sized>(policy: &mut P, config: &SimConfig, seed: u64, fitness: &mut f64) -> Result<Termination> {
    let mut episode = Episode::seeded(config.clone(), seed)?;
    let t = run_episode(policy, &mut episode);
    episode.add_fitness(fitness);
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir::Dir;
    use crate::episode::TerminationReason;
    use crate::pos::Cell;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_zeroed_policy_turns_left() {
        // All outputs tie at zero; the first index wins.
        let p = LinearPolicy::zeroed();
        assert_eq!(p.choose(&Perception([false; 6])), Decision::TurnLeft);
    }

    #[test]
    fn test_choose_picks_largest_activation() {
        let mut p = LinearPolicy::zeroed();
        p.weights[2][0] = 1.0; // danger ahead pushes right
        p.bias[1] = 0.5; // otherwise straight
        assert_eq!(p.choose(&Perception([true, false, false, false, false, false])), Decision::TurnRight);
        assert_eq!(p.choose(&Perception([false; 6])), Decision::GoStraight);
    }

    #[test]
    fn test_mutate_changes_weights() {
        let mut rng = SmallRng::seed_from_u64(1);
        let base = LinearPolicy::random(&mut rng);
        let mut child = base.clone();
        child.mutate(&mut rng, 0.25);
        assert_ne!(base, child);
        let mut same = base.clone();
        same.mutate(&mut rng, 0.0);
        assert_eq!(base, same);
    }

    #[test]
    fn test_closure_policy_runs_to_wall() {
        let mut straight = |_: &Perception| Decision::GoStraight;
        let mut ep = Episode::from_parts(
            SimConfig::new(6),
            &[Cell::new(2, 3)],
            Dir::East,
            Cell::new(0, 0),
            SmallRng::seed_from_u64(2),
        )
        .unwrap();
        let t = run_episode(&mut straight, &mut ep);
        assert_eq!(t.reason, TerminationReason::WallCollision);
        assert_eq!(t.ticks, 4);
    }

    #[test]
    fn test_evaluate_accumulates() {
        let mut p = LinearPolicy::zeroed();
        let cfg = SimConfig::small();
        let mut fitness = 0.0;
        let a = evaluate(&mut p, &cfg, 5, &mut fitness).unwrap();
        let b = evaluate(&mut p, &cfg, 6, &mut fitness).unwrap();
        assert_eq!(fitness, a.fitness() + b.fitness());
        assert!(fitness >= 2.0);
    }

    #[test]
    fn test_evaluate_is_reproducible() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut p = LinearPolicy::random(&mut rng);
        let cfg = SimConfig::default();
        let (mut f1, mut f2) = (0.0, 0.0);
        let a = evaluate(&mut p, &cfg, 77, &mut f1).unwrap();
        let b = evaluate(&mut p, &cfg, 77, &mut f2).unwrap();
        assert_eq!(a, b);
        assert_eq!(f1, f2);
    }
}
