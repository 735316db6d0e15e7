mod common;

use std::thread;

use campusnav_lib::routing::DEFAULT_ORIGIN;
use campusnav_lib::{plan_route, Error, Granularity, RouteAlgorithm, RouteRequest};

use common::{builtin_campus, fixture_campus};

#[test]
fn room_to_room_across_buildings() {
    let campus = builtin_campus();
    let plan = plan_route(&campus, &RouteRequest::new("1a37", "2b5")).expect("route exists");

    assert_eq!(plan.algorithm, RouteAlgorithm::Dijkstra);
    assert_eq!(plan.from.building, "building1");
    assert_eq!(plan.from.floor.as_deref(), Some("floor1ground"));
    assert_eq!(plan.to.building, "building2");
    assert_eq!(plan.to.room.as_deref(), Some("2b5"));
    assert_eq!(plan.steps.first(), Some(&plan.from.node));
    assert_eq!(plan.steps.last(), Some(&plan.to.node));
    assert!(plan.hop_count() >= 1);
    assert!(plan.distance > 0.0);
    assert_eq!(
        plan.directions.steps().last().map(String::as_str),
        Some("Locate 2b5")
    );
}

#[test]
fn blank_origin_starts_at_main_gate() {
    let campus = builtin_campus();
    let plan = plan_route(&campus, &RouteRequest::new("", "building47")).expect("route exists");

    assert_eq!(plan.from.location, DEFAULT_ORIGIN);
    assert_eq!(plan.from.granularity, Granularity::Gate);
    assert_eq!(plan.from.floor.as_deref(), Some("floorGateGround"));
    assert_eq!(plan.to.granularity, Granularity::Building);
}

#[test]
fn inputs_are_trimmed_and_case_insensitive() {
    let campus = builtin_campus();
    let plan = plan_route(&campus, &RouteRequest::new("  1A37 ", "LAB A")).expect("route exists");
    assert_eq!(plan.from.location, "1a37");
    assert_eq!(plan.to.location, "lab a");
}

#[test]
fn building_labels_can_be_used_as_endpoints() {
    let campus = builtin_campus();
    let request = RouteRequest::new(
        "Faculty of Engineering and Computing",
        "school of computing and information technology",
    );
    let plan = plan_route(&campus, &request).expect("route exists");
    assert_eq!(plan.from.graph_key, "building1");
    assert_eq!(plan.to.graph_key, "building2");
}

#[test]
fn unknown_location_includes_suggestions() {
    let campus = builtin_campus();
    let err = plan_route(&campus, &RouteRequest::new("1a37", "2b55")).expect_err("unknown room");

    let message = err.to_string();
    assert!(message.contains("unknown location: 2b55"));
    assert!(message.contains("Did you mean"), "{message}");
    match err {
        Error::UnknownLocation { suggestions, .. } => {
            assert!(suggestions.len() <= 3);
            assert!(suggestions.iter().any(|s| s.starts_with("2b")));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn same_location_is_rejected() {
    let campus = builtin_campus();
    let err = plan_route(&campus, &RouteRequest::new("1a37", " 1A37")).expect_err("same room");
    assert!(matches!(err, Error::SameLocation { name } if name == "1a37"));
}

#[test]
fn empty_destination_is_rejected() {
    let campus = builtin_campus();
    let err = plan_route(&campus, &RouteRequest::new("1a37", "  ")).expect_err("no destination");
    assert!(matches!(err, Error::EmptyDestination));
}

#[test]
fn rooms_in_one_building_share_a_single_node() {
    let campus = builtin_campus();
    let plan = plan_route(&campus, &RouteRequest::new("1a37", "1b2")).expect("route exists");

    assert_eq!(plan.steps, vec![plan.from.node]);
    assert_eq!(plan.hop_count(), 0);
    assert_eq!(plan.distance, 0.0);
    assert!(plan
        .directions
        .steps()
        .iter()
        .any(|line| line == "Navigate from floor1ground to floor1b"));
}

#[test]
fn buildings_missing_from_the_graph_are_unroutable() {
    let campus = fixture_campus();
    let err = plan_route(&campus, &RouteRequest::new("ax1", "2a1")).expect_err("annex unroutable");
    assert!(matches!(err, Error::UnroutableLocation { name } if name == "ax1"));
}

#[test]
fn a_star_plans_the_same_distance() {
    let campus = builtin_campus();
    let dijkstra = plan_route(&campus, &RouteRequest::new("back gate", "lt4")).unwrap();
    let a_star = plan_route(
        &campus,
        &RouteRequest::new("back gate", "lt4").with_algorithm(RouteAlgorithm::AStar),
    )
    .unwrap();

    assert_eq!(a_star.algorithm, RouteAlgorithm::AStar);
    assert!((dijkstra.distance - a_star.distance).abs() < 1e-9);
}

#[test]
fn fixture_route_uses_the_walkway() {
    let campus = fixture_campus();
    let plan = plan_route(&campus, &RouteRequest::new("1a1", "2a1")).expect("route exists");
    let names: Vec<_> = plan
        .steps
        .iter()
        .map(|&id| campus.graph.node(id).unwrap().identifier())
        .collect();
    assert_eq!(names, vec!["building1", "walkway2", "building2"]);
}

#[test]
fn concurrent_queries_share_one_campus() {
    let campus = builtin_campus();
    let pairs = [
        ("1a37", "2b5"),
        ("main gate", "building50"),
        ("back gate", "lt4"),
        ("walkin gate", "building22"),
    ];
    let sequential: Vec<f64> = pairs
        .iter()
        .map(|(from, to)| plan_route(&campus, &RouteRequest::new(*from, *to)).unwrap().distance)
        .collect();

    let concurrent: Vec<f64> = thread::scope(|scope| {
        let handles: Vec<_> = pairs
            .iter()
            .map(|(from, to)| {
                let campus = &campus;
                scope.spawn(move || {
                    plan_route(campus, &RouteRequest::new(*from, *to))
                        .unwrap()
                        .distance
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker finished"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
}
