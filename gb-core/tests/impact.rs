//! End-to-end impact runs on the full ball model.

use approx::assert_abs_diff_eq;

use gb_core::config::SimulationConfig;
use gb_core::measurement::total_momentum;
use gb_core::simulation::{build_model, step, Simulation};
use gb_core::types::{constants, Vec3};

fn driver_config() -> SimulationConfig {
    SimulationConfig {
        club_speed: 64.82,
        loft_degrees: 0.0,
        ball_radius: 0.021,
        ball_mass: 0.04593,
        damping: 0.78,
        timestep: 1e-6,
        pieces: 2,
        ..SimulationConfig::default()
    }
}

#[test]
fn test_club_strikes_and_releases_ball() {
    let mut sim = Simulation::new(driver_config()).unwrap();
    let reports = sim.run(1000).unwrap();

    let first_contact = reports.iter().position(|r| r.in_contact());
    let last_contact = reports.iter().rposition(|r| r.in_contact());
    assert!(first_contact.is_some(), "Club never touched the ball");
    assert!(
        last_contact.unwrap() < reports.len() - 1,
        "Ball still on the face after {} steps",
        reports.len()
    );

    // The reference particle on the outer shell is carried by the face, then let go
    let reference_locked = reports
        .iter()
        .rposition(|r| r.locked.contains(&constants::REFERENCE_PARTICLE));
    assert!(reference_locked.is_some());
    let reference = &sim.particles()[constants::REFERENCE_PARTICLE];
    assert!(sim.club().signed_distance(reference.position) > 0.0);
}

#[test]
fn test_ball_leaves_ahead_of_club() {
    let mut sim = Simulation::new(driver_config()).unwrap();
    let reports = sim.run(1000).unwrap();

    // The face only ever holds outer-shell particles; the center is pushed by springs
    let center = sim.model().center_index();
    assert!(reports.iter().all(|r| !r.locked.contains(&center)));

    // Ball leaves faster than the club
    let center_speed = sim.center().velocity.magnitude();
    assert_abs_diff_eq!(center_speed, 123.7189, epsilon = 1e-3);

    let (_, com_velocity) = sim.center_of_mass();
    assert_abs_diff_eq!(com_velocity.magnitude(), 118.6065, epsilon = 1e-3);
    assert!(com_velocity.x > 0.0, "Ball moving backwards: {:?}", com_velocity);
    assert!(
        sim.center().position.x > sim.club().position.x,
        "Center at {} behind club at {}",
        sim.center().position.x,
        sim.club().position.x
    );
}

#[test]
fn test_collision_events_recorded() {
    let mut sim = Simulation::new(driver_config()).unwrap();
    sim.run(1000).unwrap();

    let events = sim.telemetry().collision_events();
    assert!(events.len() >= 2, "Collision events: {:?}", events);
    assert_abs_diff_eq!(events[0], 1.35e-4, epsilon = 1e-12);
    assert_abs_diff_eq!(events[1], 2.97e-4, epsilon = 1e-12);
    assert!(events.windows(2).all(|w| w[0] < w[1]));

    let summary = sim.summary();
    assert_abs_diff_eq!(summary.contact_duration.unwrap(), 1.62e-4, epsilon = 1e-12);
}

#[test]
fn test_momentum_conserved_away_from_club() {
    let config = driver_config();
    let (mut model, mut club) = build_model(&config).unwrap();
    club.position = Vec3::new(-10.0, 0.0, 0.0);

    for (i, particle) in model.particles.iter_mut().enumerate() {
        let k = i as f64;
        particle.set_velocity(Vec3::new((0.3 * k).sin(), (0.7 * k).cos(), 0.1 * (k % 3.0)));
    }
    let initial = total_momentum(&model.particles);

    for _ in 0..200 {
        let report = step(&mut model.particles, &mut club, &config).unwrap();
        assert!(!report.in_contact());
    }

    let drift = (total_momentum(&model.particles) - initial).magnitude();
    assert!(drift < 1e-10, "Momentum drifted by {}", drift);
}

#[test]
fn test_debug_checks_pass_on_full_model() {
    let config = SimulationConfig {
        pieces: 3,
        debug_checks: true,
        ..driver_config()
    };
    let mut sim = Simulation::new(config).unwrap();
    assert_eq!(sim.particles().len(), 217);
    sim.run(200).unwrap();
    assert!(sim.time() > 0.0);
}
