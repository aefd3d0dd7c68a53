//! Contact resolution.
//!
//! A particle in contact is treated as part of the club for the step: it is
//! placed on the face plane and given the club's velocity exactly. No slip,
//! no bounce; separation happens when a later lookahead finds the particle
//! in front of the face again.

use crate::club::ClubState;
use crate::types::Particle;

/// Applies rigid coupling to the club face.
pub struct ContactResolver;

impl ContactResolver {
    /// Snap a particle onto the face and match the club's velocity.
    ///
    /// Uses the face where it is now, before the club advances this step.
    pub fn lock_to_club(particle: &mut Particle, club: &ClubState) {
        particle.position = club.nearest_point(particle.position);
        particle.set_velocity(club.velocity);
    }
}

// =============================================================================
// Tests
// =============================================================================
