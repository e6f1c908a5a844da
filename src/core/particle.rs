use crate::error::{Error, Result};
use std::fmt;

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// A circular particle in D=2.
///
/// Plain value record: the engine reads and writes the fields directly.
/// - `r`: position [x, y]
/// - `v`: velocity [vx, vy]
/// - `radius`: contact radius (>= 0), fixed after construction
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Contact radius (>= 0).
    pub radius: f64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` is negative or any component is NaN/inf.
    pub fn new(r: [f64; DIM], v: [f64; DIM], radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidParam("radius must be finite and >= 0".into()));
        }
        check_finite("position", &r)?;
        check_finite("velocity", &v)?;
        Ok(Self { r, v, radius })
    }

    /// Create a particle from untyped component slices.
    ///
    /// Errors:
    /// - `Error::InvalidDimension` if either slice does not hold exactly two components.
    pub fn from_slices(r: &[f64], v: &[f64], radius: f64) -> Result<Self> {
        Self::new(to_vec2("position", r)?, to_vec2("velocity", v)?, radius)
    }

    /// Set position from a component slice (must have length 2, finite).
    pub fn set_position(&mut self, r: &[f64]) -> Result<()> {
        let r = to_vec2("position", r)?;
        check_finite("position", &r)?;
        self.r = r;
        Ok(())
    }

    /// Set velocity from a component slice (must have length 2, finite).
    pub fn set_velocity(&mut self, v: &[f64]) -> Result<()> {
        let v = to_vec2("velocity", v)?;
        check_finite("velocity", &v)?;
        self.v = v;
        Ok(())
    }

    /// Position after drifting for `dt` with the current velocity.
    #[inline]
    pub fn tentative_position(&self, dt: f64) -> [f64; DIM] {
        let mut t = self.r;
        for (tk, &vk) in t.iter_mut().zip(&self.v) {
            *tk += vk * dt;
        }
        t
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.r[0], self.r[1])
    }
}

fn to_vec2(what: &'static str, xs: &[f64]) -> Result<[f64; DIM]> {
    <[f64; DIM]>::try_from(xs).map_err(|_| Error::InvalidDimension {
        what,
        len: xs.len(),
    })
}

fn check_finite(what: &str, xs: &[f64; DIM]) -> Result<()> {
    if !xs.iter().all(|x| x.is_finite()) {
        return Err(Error::InvalidParam(format!("{what} must be finite")));
    }
    Ok(())
}
