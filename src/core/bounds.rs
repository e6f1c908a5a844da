use crate::core::particle::DIM;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const AXIS_NAMES: [char; DIM] = ['x', 'y'];

/// Axis-aligned box `[min_x, max_x] × [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        }
    }
}

impl Bounds {
    /// Create validated bounds.
    ///
    /// Errors: `Error::InvalidBounds` if `min >= max` on either axis or a bound is not finite.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self> {
        let b = Self {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        b.validate()?;
        Ok(b)
    }

    /// Square box `[lo, hi]²`.
    pub fn square(lo: f64, hi: f64) -> Result<Self> {
        Self::new(lo, hi, lo, hi)
    }

    pub fn validate(&self) -> Result<()> {
        for k in 0..DIM {
            let (lo, hi) = self.range(k);
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(Error::InvalidBounds {
                    axis: AXIS_NAMES[k],
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(())
    }

    /// `(min, max)` on axis `k` (0 = x, 1 = y).
    #[inline]
    pub fn range(&self, k: usize) -> (f64, f64) {
        if k == 0 {
            (self.min_x, self.max_x)
        } else {
            (self.min_y, self.max_y)
        }
    }

    /// Edge length on axis `k`.
    #[inline]
    pub fn extent(&self, k: usize) -> f64 {
        let (lo, hi) = self.range(k);
        hi - lo
    }

    /// True if a disc of `radius` centred at coordinate `c` on axis `k` crosses a wall.
    #[inline]
    pub fn wall_contact(&self, k: usize, c: f64, radius: f64) -> bool {
        let (lo, hi) = self.range(k);
        c + radius > hi || c - radius < lo
    }

    /// True if the point lies inside the box or on its boundary.
    pub fn contains(&self, r: &[f64; DIM]) -> bool {
        r.iter().enumerate().all(|(k, &c)| {
            let (lo, hi) = self.range(k);
            lo <= c && c <= hi
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_axis_rejected() {
        let err = Bounds::new(0.0, 1.0, 2.0, 2.0).unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { axis: 'y', .. }));
        let err = Bounds::new(1.0, 0.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { axis: 'x', .. }));
        assert!(Bounds::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    }

    #[test]
    fn wall_contact_accounts_for_radius() -> Result<()> {
        let b = Bounds::square(0.0, 1.0)?;
        assert!(!b.wall_contact(0, 0.5, 0.1));
        assert!(b.wall_contact(0, 0.95, 0.1));
        assert!(b.wall_contact(1, 0.05, 0.1));
        // Touching the wall exactly is not a contact
        assert!(!b.wall_contact(0, 0.9, 0.1));
        assert!(!b.wall_contact(1, 1.0, 0.0));
        Ok(())
    }

    #[test]
    fn contains_includes_boundary() -> Result<()> {
        let b = Bounds::new(-1.0, 1.0, 0.0, 2.0)?;
        assert!(b.contains(&[-1.0, 2.0]));
        assert!(!b.contains(&[0.0, -0.001]));
        assert_eq!(b.extent(1), 2.0);
        Ok(())
    }
}
