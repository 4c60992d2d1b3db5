//! Salp Swarm movement rule.

use super::types::{IterationContext, MovementRule};
use crate::population::Population;
use rand::Rng;

/// Salp Swarm Algorithm (SSA).
///
/// The first half of the chain are leaders that explore around the food
/// source (the best candidate):
///
/// ```text
/// c1  = 2 · exp(−(4t / T)²)
/// x_d = F_d ± c1 · ((ub_d − lb_d) · c2 + lb_d)     (sign chosen by c3 < 0.5)
/// ```
///
/// The remaining salps follow their predecessor, `x_i ← (x_i + x_{i−1}) / 2`,
/// using the predecessor's already-updated position.
///
/// # References
///
/// Mirjalili et al. (2017), "Salp Swarm Algorithm: A bio-inspired optimizer
/// for engineering design problems"
#[derive(Debug, Clone, Copy, Default)]
pub struct SalpSwarm {
    c1: f64,
}

impl SalpSwarm {
    /// Creates the rule.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Exploration coefficient at iteration `t` of `max_iteration`.
pub(crate) fn exploration_coefficient(t: usize, max_iteration: usize) -> f64 {
    let ratio = 4.0 * t as f64 / max_iteration as f64;
    2.0 * (-(ratio * ratio)).exp()
}

impl MovementRule for SalpSwarm {
    fn name(&self) -> &'static str {
        "SSA"
    }

    fn begin_iteration<R: Rng>(
        &mut self,
        ctx: &IterationContext<'_>,
        _population: &Population,
        _rng: &mut R,
    ) {
        self.c1 = exploration_coefficient(ctx.iteration, ctx.max_iteration);
    }

    fn move_candidate<R: Rng>(
        &mut self,
        index: usize,
        ctx: &IterationContext<'_>,
        population: &mut Population,
        rng: &mut R,
    ) {
        let bounds = ctx.bounds;
        if 2 * index < population.len() {
            let food = &ctx.best.position;
            let x = &mut population.get_mut(index).position;
            for (d, xd) in x.iter_mut().enumerate() {
                let c2 = rng.random_range(0.0..1.0);
                let c3 = rng.random_range(0.0..1.0);
                let step = self.c1 * (bounds.span(d) * c2 + bounds.lower()[d]);
                *xd = if c3 < 0.5 {
                    food[d] + step
                } else {
                    food[d] - step
                };
            }
        } else {
            let previous = population.get(index - 1).position.clone();
            let x = &mut population.get_mut(index).position;
            for (xd, pd) in x.iter_mut().zip(&previous) {
                *xd = (*xd + pd) / 2.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::{Bounds, Candidate};
    use crate::random::create_rng;

    #[test]
    fn test_coefficient_decays() {
        let t_max = 100;
        let first = exploration_coefficient(1, t_max);
        let mid = exploration_coefficient(50, t_max);
        let last = exploration_coefficient(99, t_max);
        assert!(first > mid && mid > last);
        assert!(first <= 2.0);
        assert!((mid - 2.0 * (-4.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_follower_averages_predecessor() {
        let bounds = Bounds::uniform(-10.0, 10.0, 2).unwrap();
        let mut pop = Population::from_candidates(vec![
            Candidate::new(vec![0.0, 0.0]),
            Candidate::new(vec![4.0, -2.0]),
        ]);
        let best = pop.get(0).clone();
        let ctx = IterationContext {
            iteration: 1,
            max_iteration: 10,
            bounds: &bounds,
            best: &best,
        };
        let mut rng = create_rng(5);
        let mut rule = SalpSwarm::new();
        rule.begin_iteration(&ctx, &pop, &mut rng);
        // Index 1 of 2 is a follower.
        rule.move_candidate(1, &ctx, &mut pop, &mut rng);
        assert_eq!(pop.get(1).position, vec![2.0, -1.0]);
    }

    #[test]
    fn test_leader_stays_near_food_source() {
        let bounds = Bounds::uniform(-1.0, 1.0, 4).unwrap();
        let mut pop = Population::from_candidates(vec![
            Candidate::new(vec![0.9; 4]),
            Candidate::new(vec![0.0; 4]),
        ]);
        let mut best = Candidate::new(vec![0.1; 4]);
        best.fitness = 0.0;
        let ctx = IterationContext {
            iteration: 5,
            max_iteration: 10,
            bounds: &bounds,
            best: &best,
        };
        let mut rng = create_rng(11);
        let mut rule = SalpSwarm::new();
        rule.begin_iteration(&ctx, &pop, &mut rng);
        rule.move_candidate(0, &ctx, &mut pop, &mut rng);
        // |step| <= c1 * max(|lb|, |ub|) = c1
        let c1 = exploration_coefficient(5, 10);
        for &v in &pop.get(0).position {
            assert!((v - 0.1).abs() <= c1 + 1e-12);
        }
    }
}
