//! Telemetry derived from particle state after each step.
//!
//! Three quantities are tracked:
//! - **Center of mass**: mass-weighted position and velocity
//! - **Collision events**: times at which the slope of the center particle's
//!   speed reverses, bracketing contact and the oscillations after it
//! - **Spin**: signed rotation rate about +Z of the direction from the center
//!   of mass to a reference particle on the outer shell
//!
//! Spin is only sampled once more than five collision events have been seen;
//! before that the ball is still being compressed and the direction swings
//! for reasons that have nothing to do with rotation.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::{constants, Particle, Vec3};

/// Number of collision events that must have passed before spin is sampled.
const SPIN_SETTLING_EVENTS: usize = 5;

/// Telemetry for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Time at the start of the measured step
    pub time: f64,
    pub center_of_mass: Vec3,
    pub center_of_mass_velocity: Vec3,
    /// Speed of the center particle
    pub center_speed: f64,
    /// Rotation rate in rad/s, once sampling has started
    pub spin_rate: Option<f64>,
    /// Slope-reversal time recorded by this step, if any
    pub collision_event: Option<f64>,
    /// Number of slope reversals recorded so far
    pub collision_event_count: usize,
}

/// Post-run figures computed from the recorded telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// Time between the first two collision events
    pub contact_duration: Option<f64>,
    /// Mean spacing of the collision events after the first
    pub oscillation_period: Option<f64>,
    pub mean_spin: Option<f64>,
}

/// Running state carried between calls to [`measure`].
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    previous_direction: Option<Vec3>,
    center_speeds: VecDeque<f64>,
    collision_events: Vec<f64>,
    spin_samples: Vec<f64>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collision_events(&self) -> &[f64] {
        &self.collision_events
    }

    pub fn spin_samples(&self) -> &[f64] {
        &self.spin_samples
    }

    pub fn summary(&self) -> ImpactSummary {
        let events = &self.collision_events;

        let contact_duration = match events.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        };

        let spacings: Vec<f64> = events
            .iter()
            .skip(1)
            .zip(events.iter().skip(2))
            .map(|(a, b)| b - a)
            .collect();

        ImpactSummary {
            contact_duration,
            oscillation_period: mean(&spacings),
            mean_spin: mean(&self.spin_samples),
        }
    }

    /// Record the center particle's speed; returns true if its slope reversed.
    fn record_center_speed(&mut self, speed: f64) -> bool {
        self.center_speeds.push_back(speed);
        if self.center_speeds.len() > 3 {
            self.center_speeds.pop_front();
        }

        match (
            self.center_speeds.front(),
            self.center_speeds.get(1),
            self.center_speeds.get(2),
        ) {
            (Some(&a), Some(&b), Some(&c)) => slope_reversed(b - a, c - b),
            _ => false,
        }
    }

    /// Update the reference direction; returns the rotation rate if sampling.
    fn record_direction(&mut self, direction: Vec3, dt: f64) -> Option<f64> {
        let previous = self.previous_direction.replace(direction)?;
        if self.collision_events.len() <= SPIN_SETTLING_EVENTS {
            return None;
        }

        let mut angle = previous.dot(&direction).clamp(-1.0, 1.0).acos();
        if previous.cross(&direction).z < 0.0 {
            angle = -angle;
        }
        let omega = angle / dt;
        self.spin_samples.push(omega);
        Some(omega)
    }
}

/// Whether two successive slopes differ in sign.
///
/// Two positive or two negative slopes are a continuation, as is a flat
/// stretch followed by another flat stretch. Everything else, including a
/// slope that flattens out, counts as a reversal.
pub fn slope_reversed(previous: f64, current: f64) -> bool {
    let same_sign = (previous > 0.0 && current > 0.0) || (previous < 0.0 && current < 0.0);
    let both_flat = previous == 0.0 && current == 0.0;
    !(same_sign || both_flat)
}

/// Measure the particle system after a step that started at `time`.
pub fn measure(
    particles: &[Particle],
    telemetry: &mut Telemetry,
    time: f64,
    dt: f64,
) -> Measurement {
    let (center_of_mass, center_of_mass_velocity) = center_of_mass(particles);

    let spin_rate = particles
        .get(constants::REFERENCE_PARTICLE)
        .and_then(|reference| {
            let direction = (center_of_mass - reference.position).normalized();
            telemetry.record_direction(direction, dt)
        });

    let center_speed = particles.last().map_or(0.0, |p| p.velocity.magnitude());
    let collision_event = telemetry.record_center_speed(center_speed).then_some(time);
    if let Some(event) = collision_event {
        telemetry.collision_events.push(event);
    }

    Measurement {
        time,
        center_of_mass,
        center_of_mass_velocity,
        center_speed,
        spin_rate,
        collision_event,
        collision_event_count: telemetry.collision_events.len(),
    }
}

/// Mass-weighted mean position and velocity.
pub fn center_of_mass(particles: &[Particle]) -> (Vec3, Vec3) {
    let mut position = Vec3::ZERO;
    let mut velocity = Vec3::ZERO;
    let mut total_mass = 0.0;

    for particle in particles {
        position += particle.position * particle.mass;
        velocity += particle.velocity * particle.mass;
        total_mass += particle.mass;
    }

    if total_mass <= 0.0 {
        return (Vec3::ZERO, Vec3::ZERO);
    }
    (position / total_mass, velocity / total_mass)
}

pub fn total_momentum(particles: &[Particle]) -> Vec3 {
    particles.iter().fold(Vec3::ZERO, |acc, p| acc + p.momentum)
}

pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(Particle::kinetic_energy).sum()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

// =============================================================================
// Tests
// =============================================================================
