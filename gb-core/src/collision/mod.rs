//! Contact between particles and the club face.
//!
//! This module handles:
//! - **Detection**: Deciding, one step ahead, whether a particle would end up
//!   behind the face
//! - **Resolution**: Coupling such a particle rigidly to the face
//!
//! ## Lookahead
//!
//! Instead of testing where a particle is now, we test where it would be
//! after a free step against where the face will be after the same step.
//!
//! ```text
//!        face at t       face at t+dt
//!            |               |
//!            |     ● ────────|──●    predicted particle behind the face
//!            |  ─────→       |       by more than radius · tolerance
//!            |               |       → locked to the face this step
//! ```
//!
//! A locked particle is placed on the face and moves with it; there is no
//! penalty spring, so contact adds no stiffness to the system.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
