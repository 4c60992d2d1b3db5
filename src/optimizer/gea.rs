//! Golden Eagle movement rule.

use super::types::{IterationContext, MovementRule};
use crate::population::Population;
use rand::Rng;

/// Golden Eagle optimizer (GEA).
///
/// Each eagle draws a per-dimension attack vector `R ∈ [0,1]^dim`. With
/// probability 0.5 it moves toward the best eagle, `x ← x + R ⊙ (best − x)`;
/// otherwise toward a uniformly chosen member of the population,
/// `x ← x + R ⊙ (x_j − x)`. The chosen member may be the eagle itself, in
/// which case the step is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoldenEagle;

impl MovementRule for GoldenEagle {
    fn name(&self) -> &'static str {
        "GEA"
    }

    fn move_candidate<R: Rng>(
        &mut self,
        index: usize,
        ctx: &IterationContext<'_>,
        population: &mut Population,
        rng: &mut R,
    ) {
        let attack: Vec<f64> = (0..ctx.bounds.dim())
            .map(|_| rng.random_range(0.0..1.0))
            .collect();

        let target = if rng.random_bool(0.5) {
            ctx.best.position.clone()
        } else {
            let j = rng.random_range(0..population.len());
            population.get(j).position.clone()
        };

        let x = &mut population.get_mut(index).position;
        for ((xd, rd), td) in x.iter_mut().zip(&attack).zip(&target) {
            *xd += rd * (td - *xd);
        }
    }
}
