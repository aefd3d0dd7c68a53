//! Lookahead contact detection.
//!
//! Decides, before any particle moves, which particles would penetrate the
//! club face during the coming step.

use crate::club::ClubState;
use crate::config::SimulationConfig;
use crate::integrator::SymplecticEuler;
use crate::types::{constants, Particle, UpdateMode, Vec3};

/// Contact detector for the club face.
#[derive(Debug, Clone)]
pub struct ContactDetector {
    /// Multiplier on particle radius allowed as penetration before contact
    pub tolerance: f64,
}

impl Default for ContactDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactDetector {
    pub fn new() -> Self {
        Self {
            tolerance: constants::CONTACT_TOLERANCE,
        }
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::with_tolerance(config.contact_tolerance)
    }

    /// Signed distance of the particle from the face after one more step.
    ///
    /// Both the particle (under `net_force`) and the face are moved `dt`
    /// ahead; negative values are behind the face.
    pub fn lookahead_distance(
        &self,
        particle: &Particle,
        net_force: Vec3,
        club: &ClubState,
        dt: f64,
    ) -> f64 {
        let particle_ahead = SymplecticEuler::predict_position(particle, net_force, dt);
        let face_ahead = club.predicted_position(dt);
        (particle_ahead - face_ahead).dot(&club.normal) / club.normal.magnitude()
    }

    /// Choose how a particle is advanced this step.
    pub fn classify(
        &self,
        particle: &Particle,
        net_force: Vec3,
        club: &ClubState,
        dt: f64,
    ) -> UpdateMode {
        let threshold = particle.radius * self.tolerance;
        if self.lookahead_distance(particle, net_force, club, dt) < -threshold {
            UpdateMode::ClubLocked
        } else {
            UpdateMode::FreeBody(net_force)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn face_at_origin(speed: f64) -> ClubState {
        ClubState::with_normal(
            Vec3::ZERO,
            Vec3::new(speed, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            0.001,
            0.05,
        )
    }

    fn particle_at(x: f64) -> Particle {
        Particle::at_rest(Vec3::new(x, 0.0, 0.0), 1.0, 0.01, 0)
    }

    #[test]
    fn test_particle_in_front_is_free() {
        let detector = ContactDetector::new();
        let mode = detector.classify(&particle_at(0.5), Vec3::ZERO, &face_at_origin(1.0), 0.01);
        assert_eq!(mode, UpdateMode::FreeBody(Vec3::ZERO));
    }

    #[test]
    fn test_free_body_keeps_net_force() {
        let detector = ContactDetector::new();
        let force = Vec3::new(0.0, 3.0, 0.0);
        let mode = detector.classify(&particle_at(0.5), force, &face_at_origin(0.0), 0.01);
        assert_eq!(mode, UpdateMode::FreeBody(force));
    }

    #[test]
    fn test_face_overtaking_particle_locks_it() {
        let detector = ContactDetector::new();
        // Face reaches x = 0.1 after the step, particle stays at 0.05
        let mode = detector.classify(&particle_at(0.05), Vec3::ZERO, &face_at_origin(10.0), 0.01);
        assert_eq!(mode, UpdateMode::ClubLocked);
    }

    #[test]
    fn test_penetration_within_tolerance_is_free() {
        let detector = ContactDetector::new();
        // 0.011 behind a stationary face, tolerance is 0.01 * 1.15
        let mode = detector.classify(&particle_at(-0.011), Vec3::ZERO, &face_at_origin(0.0), 0.01);
        assert!(matches!(mode, UpdateMode::FreeBody(_)));

        let mode = detector.classify(&particle_at(-0.012), Vec3::ZERO, &face_at_origin(0.0), 0.01);
        assert_eq!(mode, UpdateMode::ClubLocked);
    }

    #[test]
    fn test_lookahead_includes_momentum_and_force() {
        let detector = ContactDetector::new();
        let mut particle = particle_at(0.0);
        particle.set_velocity(Vec3::new(-1.0, 0.0, 0.0));
        let force = Vec3::new(-100.0, 0.0, 0.0);

        // momentum after step: -1 + (-100 * 0.01) = -2, position: -0.02
        let distance = detector.lookahead_distance(&particle, force, &face_at_origin(0.0), 0.01);
        assert_abs_diff_eq!(distance, -0.02, epsilon = 1e-12);
    }
}
