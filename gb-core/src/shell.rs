//! Concentric shell model of the ball.
//!
//! Shells are generated from the outside in. The outermost uses geodesic
//! frequency `2^(L-2)`, each following shell halves it down to the
//! icosahedron itself (frequency 1), and a single particle at the origin
//! closes the model:
//!
//! ```text
//! pieces = 2:   shell 0  f=2  42 particles  radius R
//!               shell 1  f=1  12 particles  radius R/2
//!               shell 2  center, 1 particle
//! ```
//!
//! Springs are wired as each shell is added: neighbor springs within the new
//! shell, then nested springs between it and the shell just outside it.

use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::ModelError;
use crate::geodesic;
use crate::presets::BallPreset;
use crate::types::{constants, Particle, ShellRange, Spring, SpringRelation, Vec3};

/// Particles of one model and the shells they form.
#[derive(Debug, Clone, PartialEq)]
pub struct BallModel {
    pub particles: Vec<Particle>,
    /// Outermost first; the last shell is the center particle.
    pub shells: Vec<ShellRange>,
}

impl BallModel {
    /// Index of the particle at the geometric center.
    pub fn center_index(&self) -> usize {
        self.particles.len() - 1
    }

    /// Total number of directed springs.
    pub fn spring_count(&self) -> usize {
        self.particles.iter().map(|p| p.springs.len()).sum()
    }

    /// Shell index containing a particle.
    pub fn shell_of(&self, index: usize) -> Option<usize> {
        self.shells.iter().position(|s| s.contains(index))
    }
}

/// Builds a [`BallModel`] from a configuration and a property table.
pub struct ShellBuilder<'a> {
    config: &'a SimulationConfig,
    preset: &'a BallPreset,
}

impl<'a> ShellBuilder<'a> {
    pub fn new(config: &'a SimulationConfig, preset: &'a BallPreset) -> Self {
        Self { config, preset }
    }

    pub fn build(&self) -> Result<BallModel, ModelError> {
        self.config.validate()?;
        let props = self.preset.resolve(self.config)?;
        let mass = self.config.particle_mass();
        let radius = self.config.particle_radius();

        let mut particles: Vec<Particle> = Vec::new();
        let mut shells: Vec<ShellRange> = Vec::new();
        let mut freq: u32 = 1 << (self.config.layers() - 2);
        let mut layer = 0;

        while freq >= 1 {
            let scale = props.radii[layer];
            let points = geodesic::generate(freq)?;

            let start = particles.len();
            particles.extend(
                points
                    .into_iter()
                    .map(|p| Particle::at_rest(p * scale, mass, radius, layer)),
            );
            let shell = ShellRange::new(start, particles.len());
            debug!(layer, frequency = freq, particles = shell.len(), radius = scale, "built shell");

            self.connect_neighbors(&mut particles, shell, props.neighbor_modulus[layer]);
            if let Some(&outer) = shells.last() {
                self.connect_layers(&mut particles, outer, shell, props.layer_modulus[layer - 1])?;
            }
            shells.push(shell);

            freq /= 2;
            layer += 1;
        }

        let start = particles.len();
        particles.push(Particle::at_rest(Vec3::ZERO, mass, radius, layer));
        let center = ShellRange::new(start, start + 1);
        if let Some(&outer) = shells.last() {
            self.connect_layers(&mut particles, outer, center, props.layer_modulus[layer - 1])?;
        }
        shells.push(center);

        Ok(BallModel { particles, shells })
    }

    /// Wire every ordered pair of nearby particles within a shell.
    ///
    /// Each evaluation adds one spring on the source particle only. Both
    /// orders of a pair are evaluated, so the reverse spring comes from the
    /// mirrored evaluation.
    fn connect_neighbors(&self, particles: &mut [Particle], shell: ShellRange, modulus: f64) {
        let tolerance = self.config.neighbor_tolerance;
        // Two base-vertex neighbors on a bare icosahedron, two grid neighbors otherwise
        let threshold = if shell.len() > 14 {
            let s = shell.start + constants::ICOSAHEDRON_VERTICES;
            particles[s + 1].position.distance(&particles[s].position) * tolerance
        } else {
            particles[shell.start + 5]
                .position
                .distance(&particles[shell.start + 4].position)
                * tolerance
        };

        let mut added = 0;
        for source in shell.indices() {
            for target in shell.indices() {
                if source == target {
                    continue;
                }
                let distance = particles[source].position.distance(&particles[target].position);
                if distance < threshold {
                    particles[source].springs.push(Spring::new(
                        target,
                        SpringRelation::Neighbor,
                        distance,
                        modulus,
                    ));
                    added += 1;
                }
            }
        }
        debug!(particles = shell.len(), springs = added, threshold, "connected neighbors");
    }

    /// Wire nearby particles of two adjacent shells, in both directions.
    fn connect_layers(
        &self,
        particles: &mut [Particle],
        outer: ShellRange,
        inner: ShellRange,
        modulus: f64,
    ) -> Result<(), ModelError> {
        let tolerance = self.config.neighbor_tolerance;
        let reference = if inner.len() >= constants::ICOSAHEDRON_VERTICES {
            outer.start + constants::ICOSAHEDRON_VERTICES
        } else {
            outer.start
        };
        let threshold =
            particles[reference].position.distance(&particles[inner.start].position) * tolerance;

        let mut pairs = 0;
        for a in inner.indices() {
            for b in outer.indices() {
                if a == b {
                    if self.config.debug_checks {
                        return Err(ModelError::SelfConnection { index: a });
                    }
                    continue;
                }
                let distance = particles[a].position.distance(&particles[b].position);
                if distance < threshold {
                    particles[a]
                        .springs
                        .push(Spring::new(b, SpringRelation::Nested, distance, modulus));
                    particles[b]
                        .springs
                        .push(Spring::new(a, SpringRelation::Nested, distance, modulus));
                    pairs += 1;
                }
            }
        }
        debug!(inner = inner.len(), outer = outer.len(), pairs, threshold, "connected layers");
        Ok(())
    }
}

/// Build the particle/spring graph for a configuration.
pub fn build_shells(
    config: &SimulationConfig,
    preset: &BallPreset,
) -> Result<BallModel, ModelError> {
    ShellBuilder::new(config, preset).build()
}

// =============================================================================
// Tests
// =============================================================================
