//! Fixed-step simulation of circular particles bouncing inside a 2D box.
//!
//! The [`core::step_particle`] engine advances one particle per call; the
//! [`core::Simulation`] driver calls it for every particle, in index order, once
//! per tick until the configured stop time.

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python {
    use numpy::ndarray::Array2;
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::SimConfig;
    use crate::core::particle::DIM;
    use crate::core::{Bounds, CollisionLog, ContactRule, Simulation};

    fn py_err<E: ToString>(e: E) -> PyErr {
        PyValueError::new_err(e.to_string())
    }

    /// BoxSim: Python-facing wrapper around the Rust Simulation driver.
    ///
    /// Every collision raised while stepping is kept and can be read back with
    /// `get_collisions()`.
    #[pyclass]
    pub struct BoxSim {
        sim: Simulation,
        log: CollisionLog,
    }

    #[pymethods]
    impl BoxSim {
        /// Initialize a randomly populated box.
        ///
        /// Parameters
        /// - num_particles: number of particles (int, > 0)
        /// - bounds: [min_x, max_x, min_y, max_y]
        /// - radius: per-particle contact radius (float, >= 0)
        /// - dt: time step (float, > 0)
        /// - total_time: stop time used by run()
        /// - max_speed: initial velocity components are drawn from [0, max_speed)
        /// - exact_contact: use exact coordinate equality instead of circle overlap
        /// - seed: RNG seed (int) for reproducibility; None for nondeterministic
        ///
        /// Errors: raises ValueError on invalid parameters.
        #[new]
        #[pyo3(signature = (num_particles, bounds, radius=0.1, dt=0.1, total_time=1.0, max_speed=3.0, exact_contact=false, seed=None))]
        #[allow(clippy::too_many_arguments)]
        fn new(
            num_particles: usize,
            bounds: Vec<f64>,
            radius: f64,
            dt: f64,
            total_time: f64,
            max_speed: f64,
            exact_contact: bool,
            seed: Option<u64>,
        ) -> PyResult<Self> {
            let [min_x, max_x, min_y, max_y] = <[f64; 4]>::try_from(bounds.as_slice())
                .map_err(|_| py_err("bounds must be [min_x, max_x, min_y, max_y]"))?;
            let config = SimConfig {
                num_particles,
                dt,
                total_time,
                bounds: Bounds::new(min_x, max_x, min_y, max_y).map_err(py_err)?,
                radius,
                max_speed,
                contact_rule: if exact_contact {
                    ContactRule::ExactCoordinate
                } else {
                    ContactRule::Overlap
                },
                seed,
            };
            let sim = Simulation::new(config).map_err(py_err)?;
            Ok(Self {
                sim,
                log: CollisionLog::new(),
            })
        }

        /// Step every particle once; returns the number of particle contacts.
        fn tick(&mut self) -> PyResult<usize> {
            self.sim.tick(&mut self.log).map_err(py_err)
        }

        /// Tick until elapsed time reaches `target_time` (releases the GIL during computation).
        fn advance_to(&mut self, py: Python<'_>, target_time: f64) -> PyResult<()> {
            py.detach(|| self.sim.advance_to(target_time, &mut self.log))
                .map_err(py_err)
        }

        /// Tick until the configured total_time (releases the GIL during computation).
        fn run(&mut self, py: Python<'_>) -> PyResult<()> {
            py.detach(|| self.sim.run(&mut self.log)).map_err(py_err)
        }

        /// Elapsed simulated time.
        fn time(&self) -> f64 {
            self.sim.time()
        }

        /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
        fn get_positions(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
            to_array(py, self.sim.positions())
        }

        /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
        fn get_velocities(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
            to_array(py, self.sim.velocities())
        }

        /// Set all particle positions from an (N, 2) float64 array.
        /// Values must be finite and inside the box.
        fn set_positions<'py>(&mut self, positions: PyReadonlyArray2<'py, f64>) -> PyResult<()> {
            let rows = read_rows(&positions, self.sim.num_particles())?;
            let bounds = self.sim.config().bounds;
            if let Some(i) = rows.iter().position(|r| !bounds.contains(r)) {
                return Err(py_err(format!("position {i} lies outside the box")));
            }
            for (p, r) in self.sim.particles.iter_mut().zip(&rows) {
                p.set_position(r).map_err(py_err)?;
            }
            Ok(())
        }

        /// Set all particle velocities from an (N, 2) float64 array. Values must be finite.
        fn set_velocities<'py>(&mut self, velocities: PyReadonlyArray2<'py, f64>) -> PyResult<()> {
            let rows = read_rows(&velocities, self.sim.num_particles())?;
            for (p, v) in self.sim.particles.iter_mut().zip(&rows) {
                p.set_velocity(v).map_err(py_err)?;
            }
            Ok(())
        }

        /// Return recorded collisions as a list of (tick, i, j).
        fn get_collisions(&self) -> Vec<(u64, usize, usize)> {
            self.log
                .entries()
                .iter()
                .map(|(t, c)| (*t, c.i, c.j))
                .collect()
        }
    }

    fn to_array(py: Python<'_>, rows: Vec<[f64; DIM]>) -> Py<PyArray2<f64>> {
        let mut arr = Array2::<f64>::zeros((rows.len(), DIM));
        for (i, row) in rows.iter().enumerate() {
            for k in 0..DIM {
                arr[[i, k]] = row[k];
            }
        }
        arr.into_pyarray(py).unbind()
    }

    fn read_rows(arr: &PyReadonlyArray2<'_, f64>, n: usize) -> PyResult<Vec<[f64; DIM]>> {
        let arr = arr.as_array();
        if arr.shape() != [n, DIM] {
            return Err(py_err(format!(
                "array must have shape ({}, {}), got {:?}",
                n,
                DIM,
                arr.shape()
            )));
        }
        let mut rows = Vec::with_capacity(n);
        for i in 0..n {
            let row = [arr[[i, 0]], arr[[i, 1]]];
            if !row.iter().all(|x| x.is_finite()) {
                return Err(py_err("array values must be finite"));
            }
            rows.push(row);
        }
        Ok(rows)
    }

    /// The boxsim Python module entry point.
    #[pymodule]
    fn boxsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<BoxSim>()?;
        Ok(())
    }
}
