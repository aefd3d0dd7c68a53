//! Core types for the mass-spring ball model.
//!
//! All units are SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Momentum: kilogram meters per second (kg·m/s)
//! - Mass: kilograms (kg)
//! - Force: Newtons (N)

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, velocities, momenta and forces.
///
/// Coordinate system:
/// - X: along the club's line of travel (positive toward the target)
/// - Y: vertical (positive upward)
/// - Z: horizontal, perpendicular to the swing plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).magnitude()
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Springs
// =============================================================================

/// Which pair of particles a spring joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpringRelation {
    /// Both ends lie on the same shell.
    Neighbor,
    /// The ends lie on adjacent shells.
    Nested,
}

/// A directed spring held by its source particle.
///
/// The target is referenced by index into the particle collection; the
/// reciprocal spring, if any, lives on the target particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub target: usize,
    pub relation: SpringRelation,
    pub rest_length: f64,
    pub constant: f64,
}

impl Spring {
    /// Stiffness is `modulus * rest_length`.
    pub fn new(target: usize, relation: SpringRelation, rest_length: f64, modulus: f64) -> Self {
        Self {
            target,
            relation,
            rest_length,
            constant: modulus * rest_length,
        }
    }
}

// =============================================================================
// Particles
// =============================================================================

/// How a particle is advanced in the step currently being computed.
///
/// `Unset` outside of a step. The net spring force travels with `FreeBody`
/// so it cannot be read for a particle that is coupled to the club.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum UpdateMode {
    #[default]
    Unset,
    FreeBody(Vec3),
    ClubLocked,
}

/// A point mass of the ball model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Integrated state variable; `velocity` is derived from it.
    pub momentum: Vec3,
    pub mass: f64,
    /// Used to size the contact tolerance.
    pub radius: f64,
    pub layer: usize,
    pub springs: Vec<Spring>,
    #[serde(skip)]
    pub mode: UpdateMode,
}

impl Particle {
    /// Particle at rest at a given position, with no springs.
    pub fn at_rest(position: Vec3, mass: f64, radius: f64, layer: usize) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            momentum: Vec3::ZERO,
            mass,
            radius,
            layer,
            springs: Vec::new(),
            mode: UpdateMode::Unset,
        }
    }

    /// Set velocity and keep momentum consistent with it.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.momentum = velocity * self.mass;
    }

    /// Kinetic energy of the particle
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }
}

// =============================================================================
// Shells
// =============================================================================

/// Half-open index range `[start, end)` of the particles forming one shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellRange {
    pub start: usize,
    pub end: usize,
}

impl ShellRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Constants of the ball model.
pub mod constants {
    /// Particle count of the full three-piece model; particle mass is
    /// always the ball mass divided by this, whatever the piece count.
    pub const FULL_MODEL_PARTICLES: f64 = 217.0;

    /// Vertices of the base icosahedron
    pub const ICOSAHEDRON_VERTICES: usize = 12;

    /// Index of the particle tracked for spin (last base vertex of the outer shell)
    pub const REFERENCE_PARTICLE: usize = 11;

    /// Default slack on neighbor distance when wiring springs
    pub const NEIGHBOR_TOLERANCE: f64 = 1.15;

    /// Default slack on particle radius when testing club penetration
    pub const CONTACT_TOLERANCE: f64 = 1.15;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-12;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a - b, Vec3::new(-3.0, -3.0, -3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(&b), 32.0); // 1*4 + 2*5 + 3*6 = 32
    }

    #[test]
    fn test_vec3_cross_product() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = x.cross(&y);
        assert!((z.x).abs() < 1e-10);
        assert!((z.y).abs() < 1e-10);
        assert!((z.z - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_vec3_normalized() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        let n = v.normalized();
        assert!((n.magnitude() - 1.0).abs() < 1e-10);
        assert!((n.x - 0.6).abs() < 1e-10);
        assert!((n.y - 0.8).abs() < 1e-10);
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_spring_constant_scales_with_rest_length() {
        let spring = Spring::new(3, SpringRelation::Neighbor, 0.01, 2.0e8);
        assert_eq!(spring.target, 3);
        assert!((spring.constant - 2.0e6).abs() < 1e-6);
    }

    #[test]
    fn test_particle_velocity_keeps_momentum() {
        let mut p = Particle::at_rest(Vec3::ZERO, 0.5, 0.001, 0);
        p.set_velocity(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(p.momentum, Vec3::new(1.0, 0.0, 0.0));
        assert!((p.kinetic_energy() - 1.0).abs() < 1e-12);
        assert_eq!(p.mode, UpdateMode::Unset);
    }

    #[test]
    fn test_shell_range() {
        let shell = ShellRange::new(42, 54);
        assert_eq!(shell.len(), 12);
        assert!(shell.contains(42));
        assert!(!shell.contains(54));
        assert_eq!(shell.indices().count(), 12);
    }
}
