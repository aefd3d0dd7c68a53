//! The club face as a translating plane.
//!
//! The face is drawn as a thin box but collides as an infinite plane through
//! `position` with unit `normal`. The normal is fixed when the club is
//! created; afterwards only the position advances.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::types::Vec3;

/// State of the club head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubState {
    /// Center of the face; a point on the contact plane
    pub position: Vec3,
    /// Constant translational velocity
    pub velocity: Vec3,
    /// Unit normal of the face
    pub normal: Vec3,
    /// Box thickness (display only)
    pub depth: f64,
    /// Box width and height (display only)
    pub side: f64,
}

impl ClubState {
    /// Club whose face orientation follows from its velocity and loft.
    pub fn new(position: Vec3, velocity: Vec3, loft_degrees: f64, depth: f64, side: f64) -> Self {
        Self::with_normal(position, velocity, face_normal(velocity, loft_degrees), depth, side)
    }

    /// Club with an explicit face normal.
    pub fn with_normal(position: Vec3, velocity: Vec3, normal: Vec3, depth: f64, side: f64) -> Self {
        Self {
            position,
            velocity,
            normal: normal.normalized(),
            depth,
            side,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.club_start(),
            config.club_velocity(),
            config.loft_degrees,
            config.club_depth(),
            config.club_side(),
        )
    }

    /// Closest point on the face plane to `point`.
    ///
    /// Solves `n · (point + t n) = n · position` for `t`.
    pub fn nearest_point(&self, point: Vec3) -> Vec3 {
        let d = self.normal.dot(&self.position);
        let t = (d - self.normal.dot(&point)) / self.normal.magnitude_squared();
        point + self.normal * t
    }

    /// Signed distance from the plane; negative behind the face.
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        (point - self.position).dot(&self.normal) / self.normal.magnitude()
    }

    /// Where the face will be after `dt`.
    pub fn predicted_position(&self, dt: f64) -> Vec3 {
        self.position + self.velocity * dt
    }

    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }
}

/// Face normal for a club moving with `velocity` and lofted by `loft_degrees`.
///
/// The normal lies in the XY plane, tilted from the direction of travel by
/// the loft. A club moving straight up or down has no defined travel angle;
/// its normal is `(cos(loft), sin(loft), 0)` taken on the raw loft value.
pub fn face_normal(velocity: Vec3, loft_degrees: f64) -> Vec3 {
    if velocity.x == 0.0 {
        return Vec3::new(loft_degrees.cos(), loft_degrees.sin(), 0.0);
    }

    let phi = (velocity.y / velocity.x).atan();
    Vec3::new(1.0, (loft_degrees.to_radians() - phi).tan(), 0.0).normalized()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn test_nearest_point_on_plane() {
        let club = ClubState::with_normal(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            0.001,
            0.04,
        );
        assert_vec_eq(club.nearest_point(Vec3::new(5.0, 3.0, 3.0)), Vec3::new(0.0, 3.0, 3.0));
    }

    #[test]
    fn test_nearest_point_follows_moving_plane() {
        let mut club = ClubState::with_normal(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            0.001,
            0.04,
        );
        club.advance(0.5);
        assert_vec_eq(club.position, Vec3::new(1.0, 0.0, 0.0));
        assert_vec_eq(club.nearest_point(Vec3::new(5.0, 3.0, 3.0)), Vec3::new(1.0, 3.0, 3.0));
        assert_vec_eq(club.normal, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_nearest_point_tilted_plane() {
        let normal = Vec3::new(1.0, 1.0, 0.0);
        let club = ClubState::with_normal(Vec3::ZERO, Vec3::ZERO, normal, 0.001, 0.04);
        let projected = club.nearest_point(Vec3::new(1.0, 1.0, 2.0));
        assert_vec_eq(projected, Vec3::new(0.0, 0.0, 2.0));
        assert_abs_diff_eq!(club.signed_distance(projected), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_distance() {
        let club = ClubState::with_normal(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            0.001,
            0.04,
        );
        assert_abs_diff_eq!(club.signed_distance(Vec3::new(3.0, 7.0, 0.0)), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(club.signed_distance(Vec3::new(0.5, 0.0, 0.0)), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_square_face_without_loft() {
        assert_vec_eq(face_normal(Vec3::new(64.82, 0.0, 0.0), 0.0), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_loft_tilts_face_upward() {
        let n = face_normal(Vec3::new(40.0, 0.0, 0.0), 45.0);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert_vec_eq(n, Vec3::new(h, h, 0.0));
        assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_swing_path_offsets_loft() {
        // Swing path 45° up cancels a 45° loft
        let n = face_normal(Vec3::new(10.0, 10.0, 0.0), 45.0);
        assert_vec_eq(n, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_vertical_swing_uses_loft_directly() {
        assert_vec_eq(face_normal(Vec3::new(0.0, 5.0, 0.0), 0.0), Vec3::new(1.0, 0.0, 0.0));

        // Loft value goes into cos/sin unconverted
        let n = face_normal(Vec3::new(0.0, 5.0, 0.0), 90.0);
        assert_abs_diff_eq!(n.x, -0.448_073_616_6, epsilon = 1e-9);
        assert_abs_diff_eq!(n.y, 0.893_996_663_6, epsilon = 1e-9);
        assert_abs_diff_eq!(n.z, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_config() {
        let config = SimulationConfig::default();
        let club = ClubState::from_config(&config);
        assert_eq!(club.position, config.club_start());
        assert_eq!(club.velocity, Vec3::new(64.82, 0.0, 0.0));
        assert_vec_eq(club.normal, Vec3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(club.predicted_position(1e-6).x, -0.0294 + 64.82e-6, epsilon = 1e-15);
    }
}
