//! # GB Core
//!
//! A mass-spring engine for the deformation of a golf ball struck by a club.
//!
//! The ball is a set of concentric geodesic shells of point masses joined by
//! Hookean springs; the club is a translating plane that locks particles to
//! itself while they are behind it.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, particles, springs, shells)
//! - `geodesic`: Class-I geodesic subdivision of the icosahedron
//! - `config`: Simulation configuration (YAML via serde)
//! - `presets`: Per-shell radii and spring moduli, built in or from YAML
//! - `shell`: Particle/spring graph construction
//! - `club`: The club face as an oriented plane
//! - `forces`: Damped spring forces
//! - `integrator`: Two-phase decide/apply stepping with symplectic Euler
//! - `collision`: Lookahead contact detection and rigid club coupling
//! - `measurement`: Center of mass, spin and collision-event telemetry
//! - `simulation`: Main orchestrator
//!
//! ## Example
//!
//! ```no_run
//! use gb_core::config::SimulationConfig;
//! use gb_core::simulation::Simulation;
//!
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! sim.run(1000)?;
//! println!("{:?}", sim.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod club;
pub mod collision;
pub mod config;
pub mod error;
pub mod forces;
pub mod geodesic;
pub mod integrator;
pub mod measurement;
pub mod presets;
pub mod shell;
pub mod simulation;
pub mod types;
