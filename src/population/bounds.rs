//! Box constraints of the search space.

use crate::error::{Error, Result};

/// Per-dimension lower and upper bounds `[lb_i, ub_i]`.
///
/// The dimension of the search space is the length of the bound vectors.
///
/// # Examples
///
/// ```
/// use u_swarmbench::population::Bounds;
///
/// let scalar = Bounds::uniform(-10.0, 10.0, 3).unwrap();
/// assert_eq!(scalar.dim(), 3);
///
/// let explicit = Bounds::new(vec![0.0, -1.0], vec![1.0, 1.0]).unwrap();
/// assert_eq!(explicit.upper(), &[1.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds from explicit vectors.
    ///
    /// Fails if the vectors differ in length, are empty, contain
    /// non-finite values, or if any `lb_i > ub_i`.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(Error::InvalidConfig(format!(
                "bounds mismatch: lower has {} elements, upper has {}",
                lower.len(),
                upper.len()
            )));
        }
        if lower.is_empty() {
            return Err(Error::InvalidConfig("dim must be at least 1".into()));
        }
        for (i, (&lb, &ub)) in lower.iter().zip(upper.iter()).enumerate() {
            if !lb.is_finite() || !ub.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "bounds at index {i} must be finite"
                )));
            }
            if lb > ub {
                return Err(Error::InvalidConfig(format!(
                    "invalid bounds at index {i}: lower ({lb}) > upper ({ub})"
                )));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Broadcasts scalar bounds to `dim` dimensions.
    pub fn uniform(lower: f64, upper: f64, dim: usize) -> Result<Self> {
        Self::new(vec![lower; dim], vec![upper; dim])
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Width `ub_d - lb_d` of dimension `d`.
    pub fn span(&self, d: usize) -> f64 {
        self.upper[d] - self.lower[d]
    }

    /// Clamps `x` coordinate-wise into the box.
    pub fn clip(&self, x: &mut [f64]) {
        for ((v, &lb), &ub) in x.iter_mut().zip(&self.lower).zip(&self.upper) {
            *v = v.clamp(lb, ub);
        }
    }

    /// Returns `true` if every coordinate of `x` lies in the box.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim()
            && x
                .iter()
                .zip(&self.lower)
                .zip(&self.upper)
                .all(|((&v, &lb), &ub)| lb <= v && v <= ub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_broadcast() {
        let b = Bounds::uniform(-100.0, 100.0, 30).unwrap();
        assert_eq!(b.dim(), 30);
        assert!(b.lower().iter().all(|&v| v == -100.0));
        assert!((b.span(7) - 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_mismatch() {
        assert!(Bounds::new(vec![0.0], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_rejects_inverted() {
        assert!(Bounds::new(vec![0.0, 5.0], vec![1.0, 4.0]).is_err());
    }

    #[test]
    fn test_rejects_empty_and_nan() {
        assert!(Bounds::uniform(-1.0, 1.0, 0).is_err());
        assert!(Bounds::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn test_degenerate_dimension_allowed() {
        let b = Bounds::new(vec![2.0], vec![2.0]).unwrap();
        let mut x = [5.0];
        b.clip(&mut x);
        assert_eq!(x, [2.0]);
    }

    #[test]
    fn test_clip_and_contains() {
        let b = Bounds::new(vec![-1.0, 0.0], vec![1.0, 10.0]).unwrap();
        let mut x = [-3.0, 12.0];
        assert!(!b.contains(&x));
        b.clip(&mut x);
        assert_eq!(x, [-1.0, 10.0]);
        assert!(b.contains(&x));
        assert!(!b.contains(&[0.0]));
    }
}
