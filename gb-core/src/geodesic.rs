//! Class-I geodesic point sets on the unit sphere.
//!
//! Each face of a regular icosahedron is divided into a triangular grid of
//! `frequency` steps per edge. Edge points are spaced by equal angle rather
//! than equal chord, so the points stay evenly spread once projected.
//!
//! ```text
//!            v2
//!            /\
//!           /  \          frequency = 3
//!          *----*         (i, j, k) grid coordinates with i + j + k = 3
//!         / \  / \
//!        *---*----*
//!       / \  / \  / \
//!     v0----*----*----v1
//! ```
//!
//! Points on an edge shared by two faces are emitted by exactly one of them,
//! chosen by comparing the edge's vertex indices. The 12 base vertices are
//! emitted once, up front. A frequency `f` therefore yields `10 f² + 2`
//! distinct points.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::types::Vec3;

/// Polyhedron the geodesic sphere is grown from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasePolyhedron {
    Tetrahedron,
    Octahedron,
    Icosahedron,
}

const X: f64 = 0.525_731_112_119_133_6;
const Z: f64 = 0.850_650_808_352_039_9;

/// Vertices of the unit icosahedron.
pub const ICOSAHEDRON_VERTICES: [Vec3; 12] = [
    Vec3::new(-X, 0.0, Z),
    Vec3::new(X, 0.0, Z),
    Vec3::new(-X, 0.0, -Z),
    Vec3::new(X, 0.0, -Z),
    Vec3::new(0.0, Z, X),
    Vec3::new(0.0, Z, -X),
    Vec3::new(0.0, -Z, X),
    Vec3::new(0.0, -Z, -X),
    Vec3::new(Z, X, 0.0),
    Vec3::new(-Z, X, 0.0),
    Vec3::new(Z, -X, 0.0),
    Vec3::new(-Z, -X, 0.0),
];

/// Faces of the unit icosahedron, as indices into [`ICOSAHEDRON_VERTICES`].
pub const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 4, 1],
    [0, 9, 4],
    [9, 5, 4],
    [4, 5, 8],
    [4, 8, 1],
    [8, 10, 1],
    [8, 3, 10],
    [5, 3, 8],
    [5, 2, 3],
    [2, 7, 3],
    [7, 10, 3],
    [7, 6, 10],
    [7, 11, 6],
    [11, 0, 6],
    [0, 1, 6],
    [6, 1, 10],
    [9, 0, 11],
    [9, 11, 2],
    [9, 2, 5],
    [7, 2, 11],
];

/// Number of points produced for a given frequency.
pub fn point_count(frequency: u32) -> usize {
    let f = frequency as usize;
    10 * f * f + 2
}

/// Generate a geodesic point set on the unit sphere from the icosahedron.
pub fn generate(frequency: u32) -> Result<Vec<Vec3>, GeometryError> {
    generate_from(BasePolyhedron::Icosahedron, frequency)
}

/// Generate a geodesic point set from a base polyhedron.
///
/// Only [`BasePolyhedron::Icosahedron`] is supported.
pub fn generate_from(base: BasePolyhedron, frequency: u32) -> Result<Vec<Vec3>, GeometryError> {
    if base != BasePolyhedron::Icosahedron {
        return Err(GeometryError::UnsupportedPolyhedron(base));
    }
    if frequency < 1 {
        return Err(GeometryError::InvalidFrequency(frequency));
    }

    let mut points = Vec::with_capacity(point_count(frequency));
    points.extend_from_slice(&ICOSAHEDRON_VERTICES);

    for face in &ICOSAHEDRON_FACES {
        points.extend(face_points(frequency as usize, face));
    }

    for point in &mut points {
        *point = *point / point.magnitude();
    }

    Ok(points)
}

/// Offsets from `from` toward `to`, one per grid step (index 0 is zero).
///
/// The offsets lie on the chord but their lengths are chosen so that, seen
/// from the sphere's center, consecutive offsets subtend equal angles.
fn edge_offsets(from: Vec3, to: Vec3, freq: usize) -> Vec<Vec3> {
    let edge = to - from;
    let chord = edge.magnitude();
    let angle = 2.0 * (chord / 2.0).asin();
    let unit = edge / chord;

    let mut offsets = Vec::with_capacity(freq + 1);
    offsets.push(Vec3::ZERO);
    for i in 1..=freq {
        let step = i as f64 * angle / freq as f64;
        let length = step.sin() / (std::f64::consts::FRAC_PI_2 + angle / 2.0 - step).sin();
        offsets.push(unit * length);
    }
    offsets
}

/// Grid points of one face that this face is responsible for emitting.
fn face_points(freq: usize, face: &[usize; 3]) -> Vec<Vec3> {
    let corners = [
        ICOSAHEDRON_VERTICES[face[0]],
        ICOSAHEDRON_VERTICES[face[1]],
        ICOSAHEDRON_VERTICES[face[2]],
    ];
    let offsets: [Vec<Vec3>; 3] =
        std::array::from_fn(|k| edge_offsets(corners[k], corners[(k + 1) % 3], freq));

    let mut points = Vec::new();
    for j in 0..=freq {
        for i in 0..=(freq - j) {
            let on_edge = [i == 0, j == 0, i + j == freq];
            if on_edge.iter().filter(|&&e| e).count() == 2 {
                continue; // base vertex
            }

            // Shared edges belong to the face that sees them in ascending order
            if (on_edge[0] && face[2] > face[0])
                || (on_edge[1] && face[0] > face[1])
                || (on_edge[2] && face[1] > face[2])
            {
                continue;
            }

            let n = [i, j, freq - i - j];
            let mut point = Vec3::ZERO;
            for k in 0..3 {
                let prev = (k + 2) % 3;
                let next = (k + 1) % 3;
                let delta =
                    offsets[k][n[k]] + (offsets[prev][freq - n[next]] - offsets[prev][freq]);
                point += corners[k] + delta;
            }
            points.push(point / 3.0);
        }
    }
    points
}

// =============================================================================
// Tests
// =============================================================================
