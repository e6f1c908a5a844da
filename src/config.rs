//! Simulation configuration, optionally loaded from TOML.
//!
//! [`SimConfig`] is an immutable value handed to [`crate::core::Simulation`] at
//! construction. Every key is optional in the file; missing keys fall back to
//! [`SimConfig::default`], so a minimal TOML can override just what you need:
//!
//! ```toml
//! num_particles = 50
//! dt = 0.01
//! total_time = 5.0
//! radius = 0.05
//! contact_rule = "exact_coordinate"
//!
//! [bounds]
//! min_x = 0.0
//! max_x = 1.0
//! min_y = 0.0
//! max_y = 1.0
//! ```

use crate::core::particle::DIM;
use crate::core::{Bounds, ContactRule};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Particle count for random initialization.
    pub num_particles: usize,
    /// Integration step.
    pub dt: f64,
    /// The driver ticks while elapsed time is below this value.
    pub total_time: f64,
    /// Box extent.
    pub bounds: Bounds,
    /// Per-particle contact radius.
    pub radius: f64,
    /// Upper bound (exclusive) for initial velocity components.
    pub max_speed: f64,
    pub contact_rule: ContactRule,
    /// RNG seed for reproducible initialization; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_particles: 10,
            dt: 0.1,
            total_time: 1.0,
            bounds: Bounds::default(),
            radius: 0.1,
            max_speed: 3.0,
            contact_rule: ContactRule::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: SimConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&contents)?;
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Checks needed to step an existing particle set: time step, stop time and box.
    pub fn validate_stepping(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidTimeStep(self.dt));
        }
        if !self.total_time.is_finite() || self.total_time < 0.0 {
            return Err(Error::InvalidParam(
                "total_time must be finite and >= 0".into(),
            ));
        }
        self.bounds.validate()
    }

    /// Full validation, including the random-initialization parameters.
    pub fn validate(&self) -> Result<()> {
        self.validate_stepping()?;
        if self.num_particles == 0 {
            return Err(Error::InvalidParam("num_particles must be > 0".into()));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(Error::InvalidParam("radius must be finite and >= 0".into()));
        }
        for k in 0..DIM {
            if self.bounds.extent(k) < 2.0 * self.radius {
                return Err(Error::InvalidParam(
                    "box must be at least 2 * radius wide in every dimension".into(),
                ));
            }
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(Error::InvalidParam(
                "max_speed must be finite and > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() -> Result<()> {
        SimConfig::default().validate()
    }

    #[test]
    fn partial_toml_overrides_defaults() -> Result<()> {
        let cfg = SimConfig::from_toml_str(
            r#"
            num_particles = 3
            dt = 0.01
            contact_rule = "exact_coordinate"
            seed = 42

            [bounds]
            min_x = -1.0
            max_x = 1.0
            min_y = 0.0
            max_y = 2.0
            "#,
        )?;
        assert_eq!(cfg.num_particles, 3);
        assert_eq!(cfg.dt, 0.01);
        assert_eq!(cfg.contact_rule, ContactRule::ExactCoordinate);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.bounds.min_x, -1.0);
        assert_eq!(cfg.total_time, 1.0);
        assert_eq!(cfg.radius, 0.1);
        Ok(())
    }

    #[test]
    fn invalid_values_rejected() {
        let err = SimConfig::from_toml_str("dt = 0.0").unwrap_err();
        assert!(matches!(err, Error::InvalidTimeStep(_)));

        let err = SimConfig::from_toml_str(
            "[bounds]\nmin_x = 0.0\nmax_x = 1.0\nmin_y = 3.0\nmax_y = 1.0",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { axis: 'y', .. }));

        let err = SimConfig::from_toml_str("num_particles = 0").unwrap_err();
        assert!(err.to_string().contains("num_particles"));

        let err = SimConfig::from_toml_str("radius = 6.0").unwrap_err();
        assert!(err.to_string().contains("2 * radius"));
    }

    #[test]
    fn parse_errors_surface_as_config() {
        let err = SimConfig::from_toml_str("dt = \"fast\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let err = SimConfig::from_toml_str("gravity = 9.8").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::load("/nonexistent/boxsim.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
