//! Time stepping for the particle system.
//!
//! Each step runs in two phases so that no particle sees a neighbor that has
//! already moved:
//!
//! ```text
//! 1. decide   every particle: F = net spring force,
//!             mode = ClubLocked if the lookahead lands behind the face,
//!                    FreeBody(F) otherwise
//! 2. apply    every particle: FreeBody  → symplectic Euler with F
//!                             ClubLocked → snap to face, take club velocity
//! 3. advance  the club by v·dt
//! ```
//!
//! Modes are reset to `Unset` as they are consumed, so they never leak from
//! one step into the next.
//!
//! ## Symplectic Euler
//!
//! Momentum is the integrated variable; velocity is derived from it and the
//! position update uses the new velocity:
//!
//! ```text
//! p_new = p + F·dt
//! v_new = p_new / m
//! x_new = x + v_new·dt
//! ```

use tracing::{trace, warn};

use crate::club::ClubState;
use crate::collision::{ContactDetector, ContactResolver};
use crate::config::SimulationConfig;
use crate::error::StepError;
use crate::forces::SpringForces;
use crate::types::{Particle, UpdateMode, Vec3};

/// Trait for computing the net force on one particle.
///
/// Implementations read the whole particle slice but must not depend on any
/// state other than positions and springs as they were before the step.
pub trait ForceModel {
    fn net_force(&self, index: usize, particles: &[Particle]) -> Vec3;
}

/// Semi-implicit Euler update of a single free particle.
pub struct SymplecticEuler;

impl SymplecticEuler {
    /// Advance a particle under a constant force for one step.
    pub fn advance(particle: &mut Particle, force: Vec3, dt: f64) {
        particle.momentum += force * dt;
        particle.velocity = particle.momentum / particle.mass;
        particle.position += particle.velocity * dt;
    }

    /// Position [`advance`](Self::advance) would produce, without mutating.
    pub fn predict_position(particle: &Particle, force: Vec3, dt: f64) -> Vec3 {
        let momentum = particle.momentum + force * dt;
        particle.position + momentum / particle.mass * dt
    }
}

/// What happened during one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Indices of particles coupled to the club face this step
    pub locked: Vec<usize>,
}

impl StepReport {
    pub fn in_contact(&self) -> bool {
        !self.locked.is_empty()
    }
}

/// Two-phase stepper for the ball and club.
pub struct Integrator<F: ForceModel = SpringForces> {
    pub forces: F,
    pub detector: ContactDetector,
    /// Report particles without a mode instead of skipping them
    pub debug_checks: bool,
}

impl Integrator<SpringForces> {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            SpringForces::from_config(config),
            ContactDetector::from_config(config),
            config.debug_checks,
        )
    }
}

impl<F: ForceModel> Integrator<F> {
    pub fn new(forces: F, detector: ContactDetector, debug_checks: bool) -> Self {
        Self {
            forces,
            detector,
            debug_checks,
        }
    }

    /// Phase one: assign every particle its mode for this step.
    ///
    /// Forces and lookahead are all computed from the same snapshot.
    pub fn decide(&self, particles: &mut [Particle], club: &ClubState, dt: f64) {
        let modes: Vec<UpdateMode> = (0..particles.len())
            .map(|index| {
                let force = self.forces.net_force(index, particles);
                self.detector.classify(&particles[index], force, club, dt)
            })
            .collect();

        for (particle, mode) in particles.iter_mut().zip(modes) {
            particle.mode = mode;
        }
    }

    /// Phase two: move every particle according to its mode.
    ///
    /// Locked particles snap to the face where it is now, before the club
    /// advances.
    pub fn apply(
        &self,
        particles: &mut [Particle],
        club: &ClubState,
        dt: f64,
    ) -> Result<StepReport, StepError> {
        if self.debug_checks {
            if let Some(index) = particles.iter().position(|p| p.mode == UpdateMode::Unset) {
                clear_modes(particles);
                return Err(StepError::UnsetUpdateMode { index });
            }
        }

        let mut report = StepReport::default();
        for (index, particle) in particles.iter_mut().enumerate() {
            match std::mem::take(&mut particle.mode) {
                UpdateMode::FreeBody(force) => SymplecticEuler::advance(particle, force, dt),
                UpdateMode::ClubLocked => {
                    ContactResolver::lock_to_club(particle, club);
                    report.locked.push(index);
                }
                UpdateMode::Unset => warn!(index, "particle without update mode left in place"),
            }
        }
        Ok(report)
    }

    /// Run one full step: decide, apply, then advance the club.
    pub fn step(
        &self,
        particles: &mut [Particle],
        club: &mut ClubState,
        dt: f64,
    ) -> Result<StepReport, StepError> {
        self.decide(particles, club, dt);
        let report = self.apply(particles, club, dt)?;
        club.advance(dt);

        trace!(locked = report.locked.len(), club_x = club.position.x, "step");
        Ok(report)
    }
}

fn clear_modes(particles: &mut [Particle]) {
    for particle in particles {
        particle.mode = UpdateMode::Unset;
    }
}

// =============================================================================
// Tests
// =============================================================================
