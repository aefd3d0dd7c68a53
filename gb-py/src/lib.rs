//! Python bindings for the gb-core golf ball impact engine.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from gb_physics import Simulation
//!
//! sim = Simulation(club_speed=50.0, pieces=3, premium=True)
//! for _ in range(1000):
//!     locked = sim.step()
//!     v = sim.center_of_mass_velocity()
//!     print(f"t={sim.time:.6f} v=({v.x:.2f}, {v.y:.2f}) locked={len(locked)}")
//!
//! print(sim.summary())
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use gb_core::config::SimulationConfig;
use gb_core::presets::PropertyTable;
use gb_core::simulation::Simulation as CoreSimulation;
use gb_core::types::{SpringRelation, Vec3 as CoreVec3};

/// 3D vector for positions, velocities, etc.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        CoreVec3::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for CoreVec3 {
    fn from(v: Vec3) -> Self {
        CoreVec3::new(v.x, v.y, v.z)
    }
}

fn tuple(v: CoreVec3) -> (f64, f64, f64) {
    (v.x, v.y, v.z)
}

/// Impact simulation of one ball and one club.
///
/// Owns the particle model and the clock; pacing and drawing are up to the
/// caller.
#[pyclass]
pub struct Simulation {
    inner: CoreSimulation,
}

impl Simulation {
    fn from_config(config: SimulationConfig) -> PyResult<Self> {
        let inner = CoreSimulation::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[pymethods]
impl Simulation {
    /// Create a simulation; omitted arguments take the engine defaults.
    #[new]
    #[pyo3(signature = (
        club_speed=None,
        loft_degrees=None,
        ball_radius=None,
        ball_mass=None,
        damping=None,
        timestep=None,
        pieces=None,
        premium=false,
        debug_checks=false
    ))]
    fn new(
        club_speed: Option<f64>,
        loft_degrees: Option<f64>,
        ball_radius: Option<f64>,
        ball_mass: Option<f64>,
        damping: Option<f64>,
        timestep: Option<f64>,
        pieces: Option<usize>,
        premium: bool,
        debug_checks: bool,
    ) -> PyResult<Self> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            club_speed: club_speed.unwrap_or(defaults.club_speed),
            loft_degrees: loft_degrees.unwrap_or(defaults.loft_degrees),
            ball_radius: ball_radius.unwrap_or(defaults.ball_radius),
            ball_mass: ball_mass.unwrap_or(defaults.ball_mass),
            damping: damping.unwrap_or(defaults.damping),
            timestep: timestep.unwrap_or(defaults.timestep),
            pieces: pieces.unwrap_or(defaults.pieces),
            property_table: if premium {
                PropertyTable::Premium
            } else {
                PropertyTable::Standard
            },
            debug_checks,
            ..defaults
        };
        Self::from_config(config)
    }

    /// Create a simulation from a YAML configuration file.
    #[staticmethod]
    fn from_yaml(path: &str) -> PyResult<Self> {
        let config = SimulationConfig::load(path).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Self::from_config(config)
    }

    /// Current simulation time in seconds.
    #[getter]
    fn time(&self) -> f64 {
        self.inner.time()
    }

    /// Fixed timestep in seconds.
    #[getter]
    fn timestep(&self) -> f64 {
        self.inner.config().timestep
    }

    /// Advance one timestep.
    ///
    /// Returns the indices of particles held by the club during the step.
    fn step(&mut self) -> PyResult<Vec<usize>> {
        let report = self
            .inner
            .advance()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(report.locked)
    }

    /// Run multiple steps at once (more efficient).
    fn step_n(&mut self, steps: usize) -> PyResult<()> {
        self.inner
            .run(steps)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(())
    }

    fn particle_count(&self) -> usize {
        self.inner.particles().len()
    }

    fn particle_positions(&self) -> Vec<(f64, f64, f64)> {
        self.inner.particles().iter().map(|p| tuple(p.position)).collect()
    }

    fn particle_velocities(&self) -> Vec<(f64, f64, f64)> {
        self.inner.particles().iter().map(|p| tuple(p.velocity)).collect()
    }

    /// Particle radius used for drawing.
    fn particle_radius(&self) -> f64 {
        self.inner.config().particle_radius()
    }

    /// Every spring as (source, target, relation) with relation
    /// "neighbor" or "nested".
    fn springs(&self) -> Vec<(usize, usize, &'static str)> {
        self.inner
            .particles()
            .iter()
            .enumerate()
            .flat_map(|(source, particle)| {
                particle.springs.iter().map(move |spring| {
                    let relation = match spring.relation {
                        SpringRelation::Neighbor => "neighbor",
                        SpringRelation::Nested => "nested",
                    };
                    (source, spring.target, relation)
                })
            })
            .collect()
    }

    /// Shell index ranges as (start, end), outermost first.
    fn shells(&self) -> Vec<(usize, usize)> {
        self.inner.shells().iter().map(|s| (s.start, s.end)).collect()
    }

    fn club_position(&self) -> Vec3 {
        self.inner.club().position.into()
    }

    fn club_normal(&self) -> Vec3 {
        self.inner.club().normal.into()
    }

    /// Club box as (depth, side length) for drawing.
    fn club_dimensions(&self) -> (f64, f64) {
        (self.inner.club().depth, self.inner.club().side)
    }

    fn center_of_mass(&self) -> Vec3 {
        self.inner.center_of_mass().0.into()
    }

    fn center_of_mass_velocity(&self) -> Vec3 {
        self.inner.center_of_mass().1.into()
    }

    fn center_velocity(&self) -> Vec3 {
        self.inner.center().velocity.into()
    }

    /// Spin rate in rad/s from the last step, if it is being sampled yet.
    fn spin_rate(&self) -> Option<f64> {
        self.inner.latest().and_then(|m| m.spin_rate)
    }

    /// Times at which the center particle's speed changed direction.
    fn collision_events(&self) -> Vec<f64> {
        self.inner.telemetry().collision_events().to_vec()
    }

    fn kinetic_energy(&self) -> f64 {
        self.inner.kinetic_energy()
    }

    /// Contact duration, oscillation period and mean spin, where known.
    fn summary(&self) -> PyResult<PyObject> {
        let summary = self.inner.summary();
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("contact_duration", summary.contact_duration)?;
            dict.set_item("oscillation_period", summary.oscillation_period)?;
            dict.set_item("mean_spin", summary.mean_spin)?;
            Ok(dict.into())
        })
    }

    /// Get current state as dict for easy inspection.
    fn state_dict(&self) -> PyResult<PyObject> {
        let (com, com_velocity) = self.inner.center_of_mass();
        let club = self.inner.club();
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("time", self.inner.time())?;
            dict.set_item("steps", self.inner.steps())?;
            dict.set_item("com_x", com.x)?;
            dict.set_item("com_y", com.y)?;
            dict.set_item("com_z", com.z)?;
            dict.set_item("com_vx", com_velocity.x)?;
            dict.set_item("com_vy", com_velocity.y)?;
            dict.set_item("com_vz", com_velocity.z)?;
            dict.set_item("com_speed", com_velocity.magnitude())?;
            dict.set_item("center_speed", self.inner.center().velocity.magnitude())?;
            dict.set_item("club_x", club.position.x)?;
            dict.set_item("club_y", club.position.y)?;
            dict.set_item("spin_rate", self.spin_rate())?;
            dict.set_item("collision_events", self.inner.telemetry().collision_events().len())?;
            Ok(dict.into())
        })
    }
}

/// Python module definition.
#[pymodule]
fn gb_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<Simulation>()?;
    Ok(())
}
