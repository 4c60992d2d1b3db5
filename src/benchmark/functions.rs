//! Standard benchmark suite.
//!
//! All functions are minimized and reject NaN or infinite input. The
//! index table of [`StandardSuite`] is stable: reports and saved
//! configurations refer to benchmarks by index.
//!
//! | index | name | global minimum |
//! |---|---|---|
//! | 0 | `sphere` | 0 at origin |
//! | 1 | `ackley` | 0 at origin |
//! | 2 | `dixon_price` | 0 |
//! | 3 | `griewank` | 0 at origin |
//! | 4 | `perm` | 0 at `x_j = ±j` |
//! | 5 | `rastrigin` | 0 at origin |
//! | 6 | `rosenbrock` | 0 at `(1, …, 1)` |
//! | 7 | `schwefel` | ≈0 at `x_i ≈ 420.9687` |
//! | 8 | `zakharov` | 0 at origin |

use super::types::{Benchmark, BenchmarkFn, BenchmarkProvider};
use crate::error::{Error, Result};
use std::f64::consts::{E, PI};

type FnResult = std::result::Result<f64, String>;

/// `(name, function)` pairs in index order.
const SUITE: [(&str, BenchmarkFn); 9] = [
    ("sphere", sphere),
    ("ackley", ackley),
    ("dixon_price", dixon_price),
    ("griewank", griewank),
    ("perm", perm),
    ("rastrigin", rastrigin),
    ("rosenbrock", rosenbrock),
    ("schwefel", schwefel),
    ("zakharov", zakharov),
];

/// The built-in nine-function suite.
///
/// # Examples
///
/// ```
/// use u_swarmbench::benchmark::{BenchmarkProvider, StandardSuite};
///
/// let sphere = StandardSuite.select(0).unwrap();
/// assert_eq!(sphere.name(), "sphere");
/// assert_eq!(sphere.evaluate(&[3.0, 4.0]).unwrap(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSuite;

impl StandardSuite {
    /// Number of benchmarks in the suite.
    pub const LEN: usize = SUITE.len();

    /// All valid indices, in order.
    pub fn indices() -> Vec<usize> {
        (0..Self::LEN).collect()
    }

    /// Name of the benchmark at `index`, if any.
    pub fn name_of(index: usize) -> Option<&'static str> {
        SUITE.get(index).map(|(name, _)| *name)
    }

    /// Looks up an index by benchmark name (case-insensitive).
    pub fn index_of(name: &str) -> Option<usize> {
        SUITE
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

impl BenchmarkProvider for StandardSuite {
    fn select(&self, index: usize) -> Result<Benchmark> {
        SUITE
            .get(index)
            .map(|&(name, function)| Benchmark::new(name, function))
            .ok_or(Error::UnknownBenchmark(index))
    }
}

fn check_finite(x: &[f64]) -> std::result::Result<(), String> {
    if x.iter().any(|v| !v.is_finite()) {
        return Err("input contains NaN or infinite values".into());
    }
    Ok(())
}

fn check_min_dim(x: &[f64], min: usize) -> std::result::Result<(), String> {
    if x.len() < min {
        return Err(format!(
            "input must have at least {min} elements, got {}",
            x.len()
        ));
    }
    Ok(())
}

/// `Σ x_i²`.
pub fn sphere(x: &[f64]) -> FnResult {
    check_finite(x)?;
    Ok(x.iter().map(|v| v * v).sum())
}

/// Ackley function with `a = 20`, `b = 0.2`, `c = 2π`.
pub fn ackley(x: &[f64]) -> FnResult {
    check_finite(x)?;
    check_min_dim(x, 1)?;
    const A: f64 = 20.0;
    const B: f64 = 0.2;
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|v| v * v).sum();
    let sum_cos: f64 = x.iter().map(|v| (2.0 * PI * v).cos()).sum();
    Ok(-A * (-B * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + A + E)
}

/// Dixon–Price function. Needs at least two dimensions.
pub fn dixon_price(x: &[f64]) -> FnResult {
    check_finite(x)?;
    check_min_dim(x, 2)?;
    let head = (x[0] - 1.0).powi(2);
    let tail: f64 = x
        .windows(2)
        .enumerate()
        .map(|(k, w)| (k + 2) as f64 * (2.0 * w[1] * w[1] - w[0]).powi(2))
        .sum();
    Ok(head + tail)
}

/// Griewank function with `fr = 4000`.
pub fn griewank(x: &[f64]) -> FnResult {
    check_finite(x)?;
    const FR: f64 = 4000.0;
    let sum: f64 = x.iter().map(|v| v * v).sum();
    let product: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| (v / ((i + 1) as f64).sqrt()).cos())
        .product();
    Ok(sum / FR - product + 1.0)
}

/// Perm function `(d, β)` with `β = 0.5`, averaged over the dimension.
pub fn perm(x: &[f64]) -> FnResult {
    check_finite(x)?;
    check_min_dim(x, 1)?;
    const BETA: f64 = 0.5;
    let n = x.len();
    let mut total = 0.0;
    for k in 1..=n {
        let inner: f64 = x
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                let j = (idx + 1) as f64;
                (j.powi(k as i32) + BETA) * ((v.abs() / j).powi(k as i32) - 1.0)
            })
            .sum();
        total += inner * inner;
    }
    Ok(total / n as f64)
}

/// `10n + Σ (x_i² − 10 cos 2πx_i)`.
pub fn rastrigin(x: &[f64]) -> FnResult {
    check_finite(x)?;
    let n = x.len() as f64;
    Ok(10.0 * n
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
            .sum::<f64>())
}

/// Rosenbrock valley. Needs at least two dimensions.
pub fn rosenbrock(x: &[f64]) -> FnResult {
    check_finite(x)?;
    check_min_dim(x, 2)?;
    Ok(x.windows(2)
        .map(|w| (1.0 - w[0]).powi(2) + 100.0 * (w[1] - w[0] * w[0]).powi(2))
        .sum())
}

/// `418.9829 n − Σ x_i sin √|x_i|`.
pub fn schwefel(x: &[f64]) -> FnResult {
    check_finite(x)?;
    let n = x.len() as f64;
    Ok(418.9829 * n - x.iter().map(|v| v * v.abs().sqrt().sin()).sum::<f64>())
}

/// Zakharov function.
pub fn zakharov(x: &[f64]) -> FnResult {
    check_finite(x)?;
    let sum_sq: f64 = x.iter().map(|v| v * v).sum();
    let s: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1) as f64 * v)
        .sum::<f64>()
        / 2.0;
    Ok(sum_sq + s.powi(2) + s.powi(4))
}
