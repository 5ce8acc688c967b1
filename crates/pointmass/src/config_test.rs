use crate::config::{ModeConfig, SimulationConfig};
use crate::error::Error;
use crate::spawn::Interval;

#[test]
fn test_black_hole_preset() {
    let config = SimulationConfig::black_hole();

    assert_eq!(config.domain.width, 1000.0);
    assert_eq!(config.domain.height, 700.0);
    assert_eq!(config.base_dt, 1.0 / 60.0);
    assert_eq!(config.speed_range.min, 0.125);
    assert_eq!(config.speed_range.max, 8.0);
    assert_eq!(config.initial_count, 80);
    assert_eq!(
        config.mode,
        ModeConfig::Attractor {
            g: 10.0,
            mass: 40.0,
            min_mass: 1.0,
            softening: 6.0,
        }
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_container_preset() {
    let config = SimulationConfig::container();

    assert_eq!(config.domain.width, 800.0);
    assert_eq!(config.base_dt, 0.016);
    assert_eq!(config.trail_length, 0);
    assert_eq!(config.speed_step.up, 1.1);
    assert_eq!(config.speed_step.down, 0.9);
    assert_eq!(config.mode.name(), "container");
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_is_black_hole() {
    assert_eq!(SimulationConfig::default(), SimulationConfig::black_hole());
}

#[test]
fn test_rejects_non_positive_domain() {
    let mut config = SimulationConfig::container();
    config.domain.width = 0.0;

    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_rejects_zero_speed_minimum() {
    let mut config = SimulationConfig::black_hole();
    config.speed_range.min = 0.0;

    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_inverted_speed_range() {
    let mut config = SimulationConfig::black_hole();
    config.speed_range.min = 4.0;
    config.speed_range.max = 2.0;

    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_zero_softening() {
    let mut config = SimulationConfig::black_hole();
    config.mode = ModeConfig::Attractor {
        g: 10.0,
        mass: 40.0,
        min_mass: 1.0,
        softening: 0.0,
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_non_positive_mass() {
    let mut config = SimulationConfig::black_hole();
    config.mode = ModeConfig::Attractor {
        g: 10.0,
        mass: -1.0,
        min_mass: 1.0,
        softening: 6.0,
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_inverted_spawn_interval() {
    let mut config = SimulationConfig::black_hole();
    config.spawn.cloud_radius = Interval::new(320.0, 120.0);

    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_non_finite_spawn_scalars() {
    let mut config = SimulationConfig::container();
    config.spawn.fill_speed = f64::INFINITY;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

    let mut config = SimulationConfig::black_hole();
    config.spawn.drift_speed = f64::NAN;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

    let mut config = SimulationConfig::black_hole();
    config.spawn.min_orbit_radius = f64::NEG_INFINITY;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_negative_spawn_scalars() {
    let tweaks: [fn(&mut SimulationConfig); 3] = [
        |c| c.spawn.cloud_perturbation = -0.05,
        |c| c.spawn.fling_threshold = -1.0,
        |c| c.spawn.fling_scale = -0.06,
    ];
    for tweak in tweaks {
        let mut config = SimulationConfig::black_hole();
        tweak(&mut config);
        assert!(config.validate().is_err());
    }
}

#[test]
fn test_out_of_range_restitution_is_not_an_error() {
    let mut config = SimulationConfig::container();
    config.mode = ModeConfig::Container {
        gravity: 200.0,
        restitution: 1.4,
        damping: 1.0,
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_fills_defaults() {
    let json = r#"{
        "seed": 7,
        "trailLength": 12,
        "mode": { "kind": "container", "gravity": 0.0, "restitution": 1.0, "damping": 1.0 }
    }"#;

    let config: SimulationConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.seed, 7);
    assert_eq!(config.trail_length, 12);
    assert_eq!(config.domain.width, 1000.0);
    assert_eq!(
        config.mode,
        ModeConfig::Container {
            gravity: 0.0,
            restitution: 1.0,
            damping: 1.0,
        }
    );
}

#[test]
fn test_attractor_mode_json_uses_camel_case_fields() {
    let json = serde_json::to_value(SimulationConfig::black_hole().mode).unwrap();

    assert_eq!(json["kind"], "attractor");
    assert_eq!(json["minMass"], 1.0);
}
