//! Simulation driver.
//!
//! The engine is exposed as three free functions:
//!
//! - [`build_model`]: particles, shells and club for a configuration
//! - [`step`]: advance particles and club by one timestep
//! - [`measure`](crate::measurement::measure): telemetry after a step
//!
//! [`Simulation`] composes them and keeps the clock. It is what the Python
//! bindings wrap; pacing, pausing and drawing are left to the caller.

use tracing::info;

use crate::club::ClubState;
use crate::config::SimulationConfig;
use crate::error::{ModelError, StepError};
use crate::integrator::{Integrator, StepReport};
use crate::measurement::{self, ImpactSummary, Measurement, Telemetry};
use crate::presets::BallPreset;
use crate::shell::{build_shells, BallModel};
use crate::types::{Particle, ShellRange, Vec3};

/// Build the ball and club for a configuration, using its property table.
pub fn build_model(config: &SimulationConfig) -> Result<(BallModel, ClubState), ModelError> {
    build_model_with(config, &BallPreset::for_table(config.property_table))
}

/// Build the ball and club with an explicit preset.
pub fn build_model_with(
    config: &SimulationConfig,
    preset: &BallPreset,
) -> Result<(BallModel, ClubState), ModelError> {
    let model = build_shells(config, preset)?;
    let club = ClubState::from_config(config);

    info!(
        preset = %preset.name,
        particles = model.particles.len(),
        shells = model.shells.len(),
        springs = model.spring_count(),
        "built ball model"
    );
    Ok((model, club))
}

/// Advance particles and club by one `config.timestep`.
pub fn step(
    particles: &mut [Particle],
    club: &mut ClubState,
    config: &SimulationConfig,
) -> Result<StepReport, StepError> {
    Integrator::from_config(config).step(particles, club, config.timestep)
}

/// A running impact simulation.
pub struct Simulation {
    config: SimulationConfig,
    model: BallModel,
    club: ClubState,
    integrator: Integrator,
    telemetry: Telemetry,
    steps: u64,
    latest: Option<Measurement>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ModelError> {
        let preset = BallPreset::for_table(config.property_table);
        Self::with_preset(config, &preset)
    }

    pub fn with_preset(config: SimulationConfig, preset: &BallPreset) -> Result<Self, ModelError> {
        let (model, club) = build_model_with(&config, preset)?;
        let integrator = Integrator::from_config(&config);
        Ok(Self {
            config,
            model,
            club,
            integrator,
            telemetry: Telemetry::new(),
            steps: 0,
            latest: None,
        })
    }

    /// Step once and measure the result.
    pub fn advance(&mut self) -> Result<StepReport, StepError> {
        let dt = self.config.timestep;
        let started = self.time();

        let report = self
            .integrator
            .step(&mut self.model.particles, &mut self.club, dt)?;
        let measured = measurement::measure(&self.model.particles, &mut self.telemetry, started, dt);

        self.steps += 1;
        self.latest = Some(measured);
        Ok(report)
    }

    /// Step `steps` times, stopping at the first error.
    pub fn run(&mut self, steps: usize) -> Result<Vec<StepReport>, StepError> {
        (0..steps).map(|_| self.advance()).collect()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn model(&self) -> &BallModel {
        &self.model
    }

    pub fn particles(&self) -> &[Particle] {
        &self.model.particles
    }

    pub fn shells(&self) -> &[ShellRange] {
        &self.model.shells
    }

    pub fn center(&self) -> &Particle {
        &self.model.particles[self.model.center_index()]
    }

    pub fn club(&self) -> &ClubState {
        &self.club
    }

    /// Simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.config.timestep
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Measurement taken after the most recent step.
    pub fn latest(&self) -> Option<&Measurement> {
        self.latest.as_ref()
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn summary(&self) -> ImpactSummary {
        self.telemetry.summary()
    }

    pub fn kinetic_energy(&self) -> f64 {
        measurement::kinetic_energy(&self.model.particles)
    }

    pub fn total_momentum(&self) -> Vec3 {
        measurement::total_momentum(&self.model.particles)
    }

    /// Center-of-mass position and velocity of the ball right now.
    pub fn center_of_mass(&self) -> (Vec3, Vec3) {
        measurement::center_of_mass(&self.model.particles)
    }
}

// =============================================================================
// Tests
// =============================================================================
