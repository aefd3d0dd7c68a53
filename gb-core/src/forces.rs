//! Spring forces acting on each particle.
//!
//! Every particle sums Hookean forces from its own outgoing springs:
//!
//! ```text
//! F = -k · (|p - q| - rest) · (p - q)/|p - q|
//! ```
//!
//! A stretched spring pulls the particle toward its target, a compressed one
//! pushes it away. The sum is then scaled by a single damping factor that
//! stands in for internal losses of the ball material.
//!
//! Only outgoing springs contribute, so a particle feels a connection only if
//! it holds the spring itself.

use crate::config::SimulationConfig;
use crate::integrator::ForceModel;
use crate::types::{Particle, Spring, Vec3};

/// Net spring force model for the shell graph.
pub struct SpringForces {
    /// Scale applied to the summed spring force (default 0.78)
    pub damping: f64,
}

impl Default for SpringForces {
    fn default() -> Self {
        Self::new(0.78)
    }
}

impl SpringForces {
    pub fn new(damping: f64) -> Self {
        Self { damping }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.damping)
    }

    /// Force on `particle` from one spring to `target`.
    pub fn spring_force(particle: &Particle, target: &Particle, spring: &Spring) -> Vec3 {
        let offset = particle.position - target.position;
        let stretch = offset.magnitude() - spring.rest_length;
        offset.normalized() * (-spring.constant * stretch)
    }
}

impl ForceModel for SpringForces {
    fn net_force(&self, index: usize, particles: &[Particle]) -> Vec3 {
        let particle = &particles[index];
        let mut total = Vec3::ZERO;

        for spring in &particle.springs {
            total += Self::spring_force(particle, &particles[spring.target], spring);
        }

        total * self.damping
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpringRelation;
    use approx::assert_abs_diff_eq;

    /// Two particles on the x axis joined both ways by a spring of rest length 1
    fn pair(separation: f64, relation: SpringRelation) -> Vec<Particle> {
        let mut a = Particle::at_rest(Vec3::ZERO, 1.0, 0.01, 0);
        let mut b = Particle::at_rest(Vec3::new(separation, 0.0, 0.0), 1.0, 0.01, 0);
        a.springs.push(Spring::new(1, relation, 1.0, 100.0));
        b.springs.push(Spring::new(0, relation, 1.0, 100.0));
        vec![a, b]
    }

    #[test]
    fn test_stretched_spring_pulls_together() {
        let particles = pair(1.5, SpringRelation::Neighbor);
        let forces = SpringForces::new(1.0);

        let on_a = forces.net_force(0, &particles);
        // k = 100 * 1.0, stretch = 0.5
        assert_abs_diff_eq!(on_a.x, 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(on_a.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compressed_spring_pushes_apart() {
        let particles = pair(0.5, SpringRelation::Neighbor);
        let forces = SpringForces::new(1.0);

        assert!(forces.net_force(0, &particles).x < 0.0);
        assert!(forces.net_force(1, &particles).x > 0.0);
    }

    #[test]
    fn test_rest_length_gives_no_force() {
        let particles = pair(1.0, SpringRelation::Nested);
        let forces = SpringForces::default();
        assert_eq!(forces.net_force(0, &particles), Vec3::ZERO);
    }

    #[test]
    fn test_mirrored_springs_are_equal_and_opposite() {
        let particles = pair(1.3, SpringRelation::Nested);
        let forces = SpringForces::default();
        let sum = forces.net_force(0, &particles) + forces.net_force(1, &particles);
        assert_abs_diff_eq!(sum.magnitude(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_damping_scales_net_force() {
        let particles = pair(1.5, SpringRelation::Neighbor);
        let full = SpringForces::new(1.0).net_force(0, &particles);
        let damped = SpringForces::new(0.78).net_force(0, &particles);
        assert_abs_diff_eq!(damped.x, full.x * 0.78, epsilon = 1e-12);
    }

    #[test]
    fn test_only_outgoing_springs_count() {
        let mut particles = pair(1.5, SpringRelation::Neighbor);
        particles[1].springs.clear();
        let forces = SpringForces::new(1.0);

        assert!(forces.net_force(0, &particles).x > 0.0);
        assert_eq!(forces.net_force(1, &particles), Vec3::ZERO);
    }

    #[test]
    fn test_both_relations_contribute() {
        let mut particles = pair(1.5, SpringRelation::Neighbor);
        particles[0].springs.push(Spring::new(1, SpringRelation::Nested, 1.0, 100.0));
        let forces = SpringForces::new(1.0);

        // Two springs of k = 100 stretched by 0.5
        assert_abs_diff_eq!(forces.net_force(0, &particles).x, 100.0, epsilon = 1e-12);
    }
}
