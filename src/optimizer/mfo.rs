//! Moth-Flame movement rule.

use super::types::{IterationContext, MovementRule};
use crate::population::{Candidate, Population};
use rand::Rng;
use std::f64::consts::PI;

/// Spiral shape constant `b`.
const SPIRAL_SHAPE: f64 = 1.0;

/// Moth-Flame Optimization (MFO).
///
/// Flames are the best positions found so far: at the start of every
/// iteration the previous flames and the current moths are merged, sorted
/// by fitness and truncated to `N`. The number of active flames shrinks
/// linearly from `N` to 1:
///
/// ```text
/// flame_no = round(N − t · (N − 1) / T)
/// ```
///
/// Moth `i` flies a logarithmic spiral around flame `min(i, flame_no − 1)`:
///
/// ```text
/// a   = −1 − t / T
/// τ   = (a − 1) · rand + 1
/// x_d = |F_d − x_d| · e^{bτ} · cos(2πτ) + F_d
/// ```
///
/// # References
///
/// Mirjalili (2015), "Moth-flame optimization algorithm: A novel
/// nature-inspired heuristic paradigm"
#[derive(Debug, Clone, Default)]
pub struct MothFlame {
    flames: Vec<Candidate>,
    flame_no: usize,
    convergence: f64,
}

impl MothFlame {
    /// Creates the rule with no flames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flames, best first.
    pub fn flames(&self) -> &[Candidate] {
        &self.flames
    }

    /// Number of flames moths are currently attracted to.
    pub fn flame_no(&self) -> usize {
        self.flame_no
    }
}

/// Active flame count at iteration `t` for a population of `n`.
pub(crate) fn flame_count(n: usize, t: usize, max_iteration: usize) -> usize {
    let shrink = t as f64 * (n as f64 - 1.0) / max_iteration as f64;
    ((n as f64 - shrink).round() as usize).clamp(1, n.max(1))
}

impl MovementRule for MothFlame {
    fn name(&self) -> &'static str {
        "MFO"
    }

    fn begin_iteration<R: Rng>(
        &mut self,
        ctx: &IterationContext<'_>,
        population: &Population,
        _rng: &mut R,
    ) {
        let n = population.len();
        if self.flames.is_empty() {
            self.flames = population.sorted();
        } else {
            self.flames.extend(population.candidates().iter().cloned());
            self.flames.sort_by(Candidate::cmp_fitness);
            self.flames.truncate(n);
        }

        self.flame_no = flame_count(n, ctx.iteration, ctx.max_iteration);
        self.convergence = -1.0 - ctx.iteration as f64 / ctx.max_iteration as f64;
    }

    fn move_candidate<R: Rng>(
        &mut self,
        index: usize,
        _ctx: &IterationContext<'_>,
        population: &mut Population,
        rng: &mut R,
    ) {
        let flame = &self.flames[index.min(self.flame_no.saturating_sub(1))];
        let x = &mut population.get_mut(index).position;
        for (xd, &fd) in x.iter_mut().zip(&flame.position) {
            let tau = (self.convergence - 1.0) * rng.random_range(0.0..1.0) + 1.0;
            let distance = (fd - *xd).abs();
            *xd = distance * (SPIRAL_SHAPE * tau).exp() * (2.0 * PI * tau).cos() + fd;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Bounds;
    use crate::random::create_rng;

    fn with_fitness(position: Vec<f64>, fitness: f64) -> Candidate {
        Candidate { position, fitness }
    }

    #[test]
    fn test_flame_count_schedule() {
        assert_eq!(flame_count(50, 0, 1000), 50);
        assert_eq!(flame_count(50, 500, 1000), 26);
        assert_eq!(flame_count(50, 1000, 1000), 1);
        assert_eq!(flame_count(1, 3, 10), 1);
    }

    #[test]
    fn test_flames_keep_best_of_history() {
        let bounds = Bounds::uniform(-5.0, 5.0, 1).unwrap();
        let best = with_fitness(vec![0.0], 0.0);
        let ctx = IterationContext {
            iteration: 1,
            max_iteration: 4,
            bounds: &bounds,
            best: &best,
        };
        let mut rng = create_rng(0);
        let mut rule = MothFlame::new();

        let pop = Population::from_candidates(vec![
            with_fitness(vec![3.0], 9.0),
            with_fitness(vec![1.0], 1.0),
        ]);
        rule.begin_iteration(&ctx, &pop, &mut rng);
        assert_eq!(rule.flames()[0].fitness, 1.0);
        assert_eq!(rule.flames()[1].fitness, 9.0);

        // Moths got worse; the flames must remember the earlier positions.
        let worse = Population::from_candidates(vec![
            with_fitness(vec![4.0], 16.0),
            with_fitness(vec![5.0], 25.0),
        ]);
        let ctx2 = IterationContext { iteration: 2, ..ctx };
        rule.begin_iteration(&ctx2, &worse, &mut rng);
        let kept: Vec<f64> = rule.flames().iter().map(|f| f.fitness).collect();
        assert_eq!(kept, vec![1.0, 9.0]);
        assert_eq!(rule.flame_no(), flame_count(2, 2, 4));
    }

    #[test]
    fn test_moth_at_flame_stays() {
        let bounds = Bounds::uniform(-5.0, 5.0, 2).unwrap();
        let best = with_fitness(vec![1.0, 1.0], 2.0);
        let ctx = IterationContext {
            iteration: 1,
            max_iteration: 10,
            bounds: &bounds,
            best: &best,
        };
        let mut pop = Population::from_candidates(vec![with_fitness(vec![1.0, 1.0], 2.0)]);
        let mut rng = create_rng(2);
        let mut rule = MothFlame::new();
        rule.begin_iteration(&ctx, &pop, &mut rng);
        rule.move_candidate(0, &ctx, &mut pop, &mut rng);
        assert_eq!(pop.get(0).position, vec![1.0, 1.0]);
    }
}
