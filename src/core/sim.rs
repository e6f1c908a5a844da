use crate::config::SimConfig;
use crate::core::engine::{step_particle, StepOutcome};
use crate::core::event::CollisionObserver;
use crate::core::particle::DIM;
use crate::core::Particle;
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Fixed-step driver: owns the particle store and steps every particle once per tick.
///
/// Particles are stepped in ascending index order against the live store, so a
/// particle sees the already-updated state of every lower index within the same tick.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    time_now: f64,
    ticks: u64,
    pub particles: Vec<Particle>,
}

impl Simulation {
    /// Create a simulation with `config.num_particles` particles of radius `config.radius`.
    ///
    /// Positions are sampled uniformly in `[min + radius, max - radius]` on each axis, so no
    /// particle starts in wall contact. Velocity components are sampled in `[0, max_speed)`.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let mut rng: StdRng = match config.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let radius = config.radius;
        let mut particles: Vec<Particle> = Vec::with_capacity(config.num_particles);
        for _ in 0..config.num_particles {
            let mut r = [0.0_f64; DIM];
            for (k, r_k) in r.iter_mut().enumerate() {
                let (lo, hi) = config.bounds.range(k);
                *r_k = rng.random_range((lo + radius)..=(hi - radius));
            }
            let mut v = [0.0_f64; DIM];
            v.iter_mut()
                .for_each(|x| *x = rng.random_range(0.0..config.max_speed));

            particles.push(Particle::new(r, v, radius)?);
        }

        log::debug!(
            "initialized {} particles (radius {}, dt {}, total_time {}, rule {:?})",
            particles.len(),
            radius,
            config.dt,
            config.total_time,
            config.contact_rule
        );

        Ok(Self {
            config,
            time_now: 0.0,
            ticks: 0,
            particles,
        })
    }

    /// Create a simulation from an explicit initial state.
    ///
    /// `config.num_particles` and `config.radius` are ignored; every particle must lie
    /// inside the box.
    pub fn from_particles(config: SimConfig, particles: Vec<Particle>) -> Result<Self> {
        config.validate_stepping()?;
        for (i, p) in particles.iter().enumerate() {
            if !config.bounds.contains(&p.r) {
                return Err(Error::InvalidParam(format!(
                    "particle {i} at ({}, {}) lies outside the box",
                    p.r[0], p.r[1]
                )));
            }
        }
        Ok(Self {
            config,
            time_now: 0.0,
            ticks: 0,
            particles,
        })
    }

    /// Returns elapsed simulated time.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Positions as a Vec of fixed-size arrays.
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.r).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.v).collect()
    }

    /// One line per particle: `x y`.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for p in &self.particles {
            out.push_str(&p.to_string());
            out.push('\n');
        }
        out
    }

    /// Step every particle once, in ascending index order, and advance time by `dt`.
    ///
    /// Returns the number of particle contacts reported during the tick. On error the
    /// tick is abandoned: particles before the failing index keep their new state and
    /// the clock does not advance.
    pub fn tick<O: CollisionObserver + ?Sized>(&mut self, observer: &mut O) -> Result<usize> {
        observer.on_tick(self.ticks);
        let SimConfig {
            dt,
            bounds,
            contact_rule,
            ..
        } = self.config;

        let mut contacts = 0usize;
        for i in 0..self.particles.len() {
            let outcome =
                step_particle(i, &mut self.particles, dt, &bounds, contact_rule, observer)?;
            if let StepOutcome::Contact(_) = outcome {
                contacts += 1;
            }
        }

        self.ticks += 1;
        self.time_now += dt;
        log::trace!(
            "tick {} done at t = {} ({} contacts)",
            self.ticks,
            self.time_now,
            contacts
        );
        Ok(contacts)
    }

    /// Tick while elapsed time is strictly below `target_time`.
    pub fn advance_to<O: CollisionObserver + ?Sized>(
        &mut self,
        target_time: f64,
        observer: &mut O,
    ) -> Result<()> {
        if !target_time.is_finite() {
            return Err(Error::InvalidParam("target_time must be finite".into()));
        }
        while self.time_now < target_time {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// True once elapsed time has reached the configured `total_time`.
    ///
    /// Elapsed time is accumulated by repeated `+= dt`, so rounding decides the tick count:
    /// `dt = 0.1`, `total_time = 1.0` runs 11 ticks.
    pub fn is_finished(&self) -> bool {
        self.time_now >= self.config.total_time
    }

    /// Run until the configured `total_time`.
    pub fn run<O: CollisionObserver + ?Sized>(&mut self, observer: &mut O) -> Result<()> {
        self.advance_to(self.config.total_time, observer)
    }
}
