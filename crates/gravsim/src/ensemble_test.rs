use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use units::EARTH_ORBIT_M;

use crate::body::{Body, BodyId};
use crate::ensemble::{
    ClusterMode, ClusterSpec, Ensemble, SATELLITE_MASS, Slot, barycenter, locate, pair_mut,
};
use crate::error::SimError;

fn body(id: u64, x: f64, y: f64, mass: f64) -> Body {
    let mut body = Body::new(Point2::new(x, y), Vector2::zeros(), mass, 1.0).unwrap();
    body.id = BodyId(id);
    body
}

fn generated(seed: u64, mode: ClusterMode) -> (ClusterSpec, Ensemble) {
    let spec = ClusterSpec::new("test", 30, 1.5e11, Point2::new(2e11, -1e11))
        .with_velocity(Vector2::new(1_000.0, 0.0))
        .with_mode(mode);
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let ensemble = Ensemble::generate(&spec, &mut rng).unwrap();
    (spec, ensemble)
}

#[test]
fn test_dominant_index_picks_heaviest() {
    let mut group = Ensemble::new("group", Point2::origin(), 1.0);
    group.push(body(0, 0.0, 0.0, 1.0));
    group.push(body(1, 1.0, 0.0, 5.0));
    group.push(body(2, 2.0, 0.0, 5.0));

    assert_eq!(group.dominant_index(), Some(1));
    assert_eq!(Ensemble::new("empty", Point2::origin(), 1.0).dominant_index(), None);
}

#[test]
fn test_totals() {
    let mut group = Ensemble::new("group", Point2::origin(), 1.0);
    group.push(body(0, 0.0, 0.0, 3.0));
    group.push(body(1, 4.0, 0.0, 1.0));
    group.bodies[1].velocity = Vector2::new(0.0, 2.0);

    assert_relative_eq!(group.total_mass(), 4.0);
    assert_eq!(group.total_momentum(), Vector2::new(0.0, 2.0));
    assert_eq!(group.center_of_mass(), Some(Point2::new(1.0, 0.0)));
}

#[test]
fn test_center_of_mass_of_massless_group() {
    let mut group = Ensemble::new("markers", Point2::origin(), 1.0);
    group.push(Body::placeholder(Point2::new(1.0, 1.0)));
    assert_eq!(group.center_of_mass(), None);
}

#[test]
fn test_translate_moves_everything() {
    let mut group = Ensemble::new("group", Point2::new(1.0, 1.0), 1.0);
    group.push(body(0, 0.0, 0.0, 1.0));
    group.push(body(1, 2.0, 3.0, 1.0));

    group.translate(Vector2::new(10.0, -5.0));

    assert_eq!(group.center, Point2::new(11.0, -4.0));
    assert_eq!(group.bodies[0].position, Point2::new(10.0, -5.0));
    assert_eq!(group.bodies[1].position, Point2::new(12.0, -2.0));
}

#[test]
fn test_set_center_velocity() {
    let mut group = Ensemble::new("group", Point2::origin(), 1.0);
    group.set_center_velocity(Vector2::new(1.0, 1.0));

    group.push(body(0, 0.0, 0.0, 1.0));
    group.push(body(1, 1.0, 0.0, 1.0));
    group.set_center_velocity(Vector2::new(0.0, 7.0));

    assert_eq!(group.bodies[0].velocity, Vector2::new(0.0, 7.0));
    assert_eq!(group.bodies[1].velocity, Vector2::zeros());
}

#[test]
fn test_generated_cluster_layout() {
    let (spec, cluster) = generated(5, ClusterMode::Orbit);

    assert_eq!(cluster.len(), 30);
    assert_eq!(cluster.dominant_index(), Some(0));
    assert_relative_eq!(cluster.bodies[0].mass(), 1e33);
    assert_eq!(cluster.bodies[0].position, spec.center);
    assert_eq!(cluster.bodies[0].velocity, spec.center_velocity);

    for satellite in &cluster.bodies[1..] {
        assert_eq!(satellite.mass(), SATELLITE_MASS);
        let offset = satellite.position - spec.center;
        assert!(offset.magnitude() <= spec.radius * (1.0 + 1e-12));
    }
}

#[test]
fn test_orbit_mode_launches_tangentially() {
    let (spec, cluster) = generated(8, ClusterMode::Orbit);

    for satellite in &cluster.bodies[1..] {
        let offset = satellite.position - spec.center;
        let own = satellite.velocity - spec.center_velocity;
        let d = offset.magnitude();

        assert_relative_eq!(own.magnitude(), 8e4 * d / EARTH_ORBIT_M, max_relative = 1e-9);
        assert!(offset.dot(&own).abs() <= 1e-9 * d * own.magnitude());
    }
}

#[test]
fn test_condense_mode_tilts_inward() {
    let (spec, cluster) = generated(8, ClusterMode::Condense);
    assert_relative_eq!(cluster.bodies[0].mass(), 1e38);

    for satellite in &cluster.bodies[1..] {
        let inward = spec.center - satellite.position;
        let own = satellite.velocity - spec.center_velocity;
        let cos = inward.dot(&own) / (inward.magnitude() * own.magnitude());

        assert_relative_eq!(cos, 80.0_f64.to_radians().cos(), epsilon = 1e-9);
    }
}

#[test]
fn test_generation_is_reproducible() {
    let (_, a) = generated(21, ClusterMode::Orbit);
    let (_, b) = generated(21, ClusterMode::Orbit);
    let (_, c) = generated(22, ClusterMode::Orbit);

    let positions = |e: &Ensemble| e.bodies.iter().map(|b| b.position).collect::<Vec<_>>();
    assert_eq!(positions(&a), positions(&b));
    assert_ne!(positions(&a), positions(&c));
}

#[test]
fn test_generate_rejects_bad_input() {
    let mut rng = ChaChaRng::seed_from_u64(0);

    let bad_radius = ClusterSpec::new("x", 3, 0.0, Point2::origin());
    assert!(matches!(
        Ensemble::generate(&bad_radius, &mut rng),
        Err(SimError::InvalidConfig(_))
    ));

    let bad_step = ClusterSpec::new("x", 3, 1.0, Point2::origin()).with_time_step(-1.0);
    assert!(matches!(
        Ensemble::generate(&bad_step, &mut rng),
        Err(SimError::InvalidTimeStep(_))
    ));
}

#[test]
fn test_generate_small_counts() {
    let mut rng = ChaChaRng::seed_from_u64(0);
    let empty = ClusterSpec::new("x", 0, 1.0, Point2::origin());
    let lone = ClusterSpec::new("x", 1, 1.0, Point2::origin());

    assert!(Ensemble::generate(&empty, &mut rng).unwrap().is_empty());
    assert_eq!(Ensemble::generate(&lone, &mut rng).unwrap().len(), 1);
}

#[test]
fn test_remove_escapees() {
    let mut group = Ensemble::new("group", Point2::origin(), 1.0);
    group.push(body(0, 5.0, 0.0, 1.0));
    group.push(body(1, 0.0, 0.0, 100.0));
    group.push(body(2, 2_000.0, 0.0, 1.0));
    let mut lost = body(3, 0.0, 0.0, 1.0);
    lost.position = Point2::new(f64::NAN, 0.0);
    group.push(lost);

    let removed = group.remove_escapees(1_000.0);

    assert_eq!(removed, vec![BodyId(2), BodyId(3)]);
    let ids: Vec<BodyId> = group.bodies.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![BodyId(0), BodyId(1)]);
}

#[test]
fn test_locate_and_pair_mut() {
    let mut first = Ensemble::new("first", Point2::origin(), 1.0);
    first.push(body(0, 0.0, 0.0, 1.0));
    first.push(body(1, 1.0, 0.0, 1.0));
    let mut second = Ensemble::new("second", Point2::origin(), 1.0);
    second.push(body(2, 2.0, 0.0, 1.0));
    let mut ensembles = vec![first, second];

    let s0 = locate(&ensembles, BodyId(0)).unwrap();
    let s1 = locate(&ensembles, BodyId(1)).unwrap();
    let s2 = locate(&ensembles, BodyId(2)).unwrap();
    assert_eq!(s2, Slot { ensemble: 1, index: 0 });
    assert_eq!(locate(&ensembles, BodyId(9)), None);

    let (a, b) = pair_mut(&mut ensembles, s1, s0).unwrap();
    assert_eq!((a.id, b.id), (BodyId(1), BodyId(0)));

    let (a, b) = pair_mut(&mut ensembles, s2, s0).unwrap();
    assert_eq!((a.id, b.id), (BodyId(2), BodyId(0)));
    a.velocity.x = 3.0;
    assert_eq!(ensembles[1].bodies[0].velocity.x, 3.0);

    assert!(pair_mut(&mut ensembles, s0, s0).is_none());
    assert!(pair_mut(&mut ensembles, s0, Slot { ensemble: 0, index: 5 }).is_none());
    assert!(pair_mut(&mut ensembles, s0, Slot { ensemble: 4, index: 0 }).is_none());
}

#[test]
fn test_barycenter() {
    let heavy = body(0, 0.0, 0.0, 3.0);
    let light = body(1, 4.0, 8.0, 1.0);
    assert_eq!(barycenter(&heavy, &light), Point2::new(1.0, 2.0));
}
