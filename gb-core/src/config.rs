//! Simulation configuration.
//!
//! A single immutable value passed into model construction and stepping.
//! It can be built in code, starting from [`SimulationConfig::default`], or
//! loaded from YAML:
//!
//! ```yaml
//! club_speed: 64.82
//! loft_degrees: 10.0
//! pieces: 3
//! property_table: premium
//! ```
//!
//! Omitted fields take their default values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::presets::PropertyTable;
use crate::types::{constants, Vec3};

/// Parameters of one impact simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Club speed along +X in m/s
    pub club_speed: f64,
    /// Club loft angle in degrees
    pub loft_degrees: f64,
    /// Outer radius of the ball in meters
    pub ball_radius: f64,
    /// Total ball mass in kg
    pub ball_mass: f64,
    /// Scale applied to every net spring force (0..=1)
    pub damping: f64,
    /// Fixed step in seconds
    pub timestep: f64,
    /// Number of ball pieces (1..=3); the model has `pieces + 1` shells
    pub pieces: usize,
    /// Which property table supplies shell radii and spring moduli
    pub property_table: PropertyTable,
    pub neighbor_tolerance: f64,
    pub contact_tolerance: f64,
    /// Turn engine consistency violations into errors
    pub debug_checks: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            club_speed: 64.82,
            loft_degrees: 0.0,
            ball_radius: 0.021,
            ball_mass: 0.04593,
            damping: 0.78,
            timestep: 1e-6,
            pieces: 2,
            property_table: PropertyTable::Standard,
            neighbor_tolerance: constants::NEIGHBOR_TOLERANCE,
            contact_tolerance: constants::CONTACT_TOLERANCE,
            debug_checks: false,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check that the configuration describes a non-degenerate model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=3).contains(&self.pieces) {
            return Err(invalid("pieces", format!("must be 1, 2 or 3, got {}", self.pieces)));
        }
        for (field, value) in [
            ("ball_radius", self.ball_radius),
            ("ball_mass", self.ball_mass),
            ("timestep", self.timestep),
            ("neighbor_tolerance", self.neighbor_tolerance),
            ("contact_tolerance", self.contact_tolerance),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(invalid(field, format!("must be positive, got {}", value)));
            }
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(invalid(
                "damping",
                format!("must be within [0, 1], got {}", self.damping),
            ));
        }
        if !self.club_speed.is_finite() || !self.loft_degrees.is_finite() {
            return Err(invalid("club", "speed and loft must be finite".to_string()));
        }
        Ok(())
    }

    /// Number of shells, including the single center particle.
    pub fn layers(&self) -> usize {
        self.pieces + 1
    }

    /// Mass of every particle.
    pub fn particle_mass(&self) -> f64 {
        self.ball_mass / constants::FULL_MODEL_PARTICLES
    }

    /// Radius of every particle.
    pub fn particle_radius(&self) -> f64 {
        self.ball_radius / 100.0
    }

    pub fn club_velocity(&self) -> Vec3 {
        Vec3::new(self.club_speed, 0.0, 0.0)
    }

    /// Initial club face position, behind and slightly below the ball.
    pub fn club_start(&self) -> Vec3 {
        Vec3::new(-self.ball_radius * 1.4, -self.ball_radius * 0.25, 0.0)
    }

    /// Thickness of the club head.
    pub fn club_depth(&self) -> f64 {
        5.0 * self.ball_radius / 1000.0
    }

    /// Width and height of the club face.
    pub fn club_side(&self) -> f64 {
        self.ball_radius * 2.2
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layers(), 3);
    }

    #[test]
    fn test_derived_quantities() {
        let config = SimulationConfig::default();
        assert!((config.particle_mass() - 0.04593 / 217.0).abs() < 1e-15);
        assert!((config.particle_radius() - 0.00021).abs() < 1e-15);
        assert_eq!(config.club_velocity(), Vec3::new(64.82, 0.0, 0.0));
        assert!((config.club_start().x + 0.0294).abs() < 1e-12);
        assert!((config.club_side() - 0.0462).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_piece_count() {
        let config = SimulationConfig {
            pieces: 4,
            ..SimulationConfig::default()
        };
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "pieces"),
            other => panic!("Expected invalid pieces, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_positive_timestep() {
        let config = SimulationConfig {
            timestep: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "timestep", .. })
        ));
    }

    #[test]
    fn test_rejects_damping_above_one() {
        let config = SimulationConfig {
            damping: 1.5,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let yaml = "club_speed: 50.0\npieces: 3\nproperty_table: premium\n";
        let config = SimulationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.club_speed, 50.0);
        assert_eq!(config.pieces, 3);
        assert_eq!(config.property_table, PropertyTable::Premium);
        assert_eq!(config.ball_radius, 0.021);
    }

    #[test]
    fn test_yaml_invalid_values_rejected() {
        let result = SimulationConfig::from_yaml_str("pieces: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_yaml_parse_error() {
        let result = SimulationConfig::from_yaml_str("pieces: [not, a, number]\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
