use quadrature::QuadratureRule;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use units::GRAVITATIONAL_CONSTANT;

use crate::body::Integration;
use crate::collisions::{CollisionMode, DetectionPolicy, PixelProjection};
use crate::config::{DEFAULT_ESCAPE_DISTANCE, DEFAULT_TIME_STEP, IntegrationKind, SimulationConfig};
use crate::error::SimError;
use crate::forces::ChargeConvention;

#[test]
fn test_defaults() {
    let config = SimulationConfig::default();

    assert_eq!(config.gravitational_constant, GRAVITATIONAL_CONSTANT);
    assert_eq!(config.time_step, DEFAULT_TIME_STEP);
    assert_eq!(config.escape_distance, DEFAULT_ESCAPE_DISTANCE);
    assert_eq!(config.integration, IntegrationKind::Euler);
    assert_eq!(config.collision_mode, CollisionMode::Inelastic);
    assert_eq!(config.detection, DetectionPolicy::Physical);
    assert_eq!(config.charge_convention, ChargeConvention::Inherited);
    assert!(config.collisions);
    assert!(!config.electrostatics);
    assert!(config.seed.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_yaml_keeps_defaults() {
    let yaml = "\
electrostatics: true
charge_convention: physical
collision_mode: elastic
seed: 42
";
    let config = SimulationConfig::from_yaml_str(yaml).unwrap();

    assert!(config.electrostatics);
    assert_eq!(config.charge_convention, ChargeConvention::Physical);
    assert_eq!(config.collision_mode, CollisionMode::Elastic);
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.time_step, DEFAULT_TIME_STEP);
}

#[test]
fn test_reader_matches_str() {
    let yaml = "time_step: 60.0\nintegration: simpson\n";
    let from_reader = SimulationConfig::from_yaml_reader(yaml.as_bytes()).unwrap();
    let from_str = SimulationConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(from_reader, from_str);
}

#[test]
fn test_rejects_zero_time_step() {
    let result = SimulationConfig::from_yaml_str("time_step: 0.0\n");
    assert!(matches!(result, Err(SimError::InvalidTimeStep(_))));
}

#[test]
fn test_rejects_negative_constant() {
    let result = SimulationConfig::from_yaml_str("gravitational_constant: -1.0\n");
    assert!(matches!(result, Err(SimError::InvalidConfig(_))));
}

#[test]
fn test_rejects_bad_escape_distance() {
    let config = SimulationConfig {
        escape_distance: f64::NAN,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
}

#[test]
fn test_rejects_degenerate_projection() {
    let config = SimulationConfig {
        detection: DetectionPolicy::Pixel(PixelProjection::new(0.0, nalgebra::Point2::origin())),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_malformed_yaml() {
    let result = SimulationConfig::from_yaml_str("time_step: [oops");
    assert!(matches!(result, Err(SimError::Yaml(_))));
}

#[test]
fn test_yaml_round_trip() {
    let config = SimulationConfig {
        integration: IntegrationKind::Trapezoid,
        collision_mode: CollisionMode::Elastic,
        seed: Some(7),
        ..Default::default()
    };
    let yaml = config.to_yaml().unwrap();
    assert_eq!(SimulationConfig::from_yaml_str(&yaml).unwrap(), config);
}

#[test]
fn test_integration_kind_build() {
    let mut rng = ChaChaRng::seed_from_u64(3);

    assert_eq!(IntegrationKind::Euler.build(&mut rng), Integration::Euler);
    assert_eq!(
        IntegrationKind::Midpoint.build(&mut rng),
        Integration::Quadrature(QuadratureRule::Midpoint)
    );
    assert!(matches!(
        IntegrationKind::Random.build(&mut rng),
        Integration::Quadrature(QuadratureRule::Random { .. })
    ));
}
