use approx::assert_relative_eq;

use crate::error::Error;
use crate::params::{Parameter, Parameters, SpeedRange};

fn black_hole_params() -> Parameters {
    Parameters::new(1.0 / 60.0, SpeedRange::new(0.125, 8.0))
}

#[test]
fn test_defaults() {
    let params = black_hole_params();

    assert_eq!(params.speed(), 1.0);
    assert_eq!(params.restitution(), 1.0);
    assert_eq!(params.damping(), 1.0);
    assert!(params.trails_enabled);
    assert_relative_eq!(params.dt(), 1.0 / 60.0);
}

#[test]
fn test_initial_speed_clamped_into_range() {
    let params = Parameters::new(0.016, SpeedRange::new(2.0, 4.0));

    assert_eq!(params.speed(), 2.0);
}

#[test]
fn test_speed_clamps_both_ends() {
    let mut params = black_hole_params();

    assert_eq!(params.set_speed(0.0), 0.125);
    assert_eq!(params.set_speed(-3.0), 0.125);
    assert_eq!(params.set_speed(100.0), 8.0);
    assert_eq!(params.set_speed(2.0), 2.0);
    assert_relative_eq!(params.dt(), 2.0 / 60.0);
}

#[test]
fn test_dt_never_zero() {
    let mut params = black_hole_params();
    params.set_speed(0.0);

    assert!(params.dt() > 0.0);
}

#[test]
fn test_restitution_and_damping_clamp_to_unit_interval() {
    let mut params = black_hole_params();

    assert_eq!(params.set_restitution(1.5), 1.0);
    assert_eq!(params.set_restitution(-0.2), 0.0);
    assert_eq!(params.set_restitution(0.95), 0.95);
    assert_eq!(params.set_damping(2.0), 1.0);
    assert_eq!(params.set_damping(0.99), 0.99);
}

#[test]
fn test_attractor_mass_floor() {
    let params = black_hole_params();

    assert_eq!(params.clamp_attractor_mass(0.2), 1.0);
    assert_eq!(params.clamp_attractor_mass(-5.0), 1.0);
    assert_eq!(params.clamp_attractor_mass(44.0), 44.0);
}

#[test]
fn test_parameter_aliases() {
    assert_eq!(Parameter::from_name("mass", 5.0), Ok(Parameter::AttractorMass(5.0)));
    assert_eq!(
        Parameter::from_name("attractor_mass", 5.0),
        Ok(Parameter::AttractorMass(5.0))
    );
    assert_eq!(
        Parameter::from_name("speed_multiplier", 0.5),
        Ok(Parameter::SpeedMultiplier(0.5))
    );
    assert_eq!(Parameter::from_name("friction", 0.99), Ok(Parameter::Damping(0.99)));
    assert_eq!(
        Parameter::from_name("trails_enabled", 1.0),
        Ok(Parameter::TrailsEnabled(true))
    );
}

#[test]
fn test_unknown_parameter() {
    assert_eq!(
        Parameter::from_name("gravity", 1.0),
        Err(Error::UnknownParameter("gravity".to_string()))
    );
}

#[test]
fn test_non_finite_value_rejected() {
    assert!(matches!(
        Parameter::from_name("speed", f64::NAN),
        Err(Error::NonFiniteInput(_))
    ));
    assert!(Parameter::SpeedMultiplier(f64::INFINITY).validate().is_err());
    assert!(Parameter::TrailsEnabled(false).validate().is_ok());
}

#[test]
fn test_parameter_serde_shape() {
    let json = serde_json::to_string(&Parameter::Restitution(0.5)).unwrap();

    assert_eq!(json, r#"{"name":"restitution","value":0.5}"#);
}
