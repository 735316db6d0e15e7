use campusnav_lib::{find_path, plan_route, Campus, RouteAlgorithm, RouteRequest};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;

static CAMPUS: Lazy<Campus> = Lazy::new(|| Campus::builtin().expect("builtin campus loads"));
static DIJKSTRA_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::new("back gate", "2b5"));
static ASTAR_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new("back gate", "2b5").with_algorithm(RouteAlgorithm::AStar)
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let campus = &*CAMPUS;

    c.bench_function("dijkstra_back_gate_2b5", |b| {
        let request = &*DIJKSTRA_REQUEST;
        b.iter(|| {
            let plan = plan_route(campus, request).expect("route exists");
            black_box(plan.distance)
        });
    });

    c.bench_function("astar_back_gate_2b5", |b| {
        let request = &*ASTAR_REQUEST;
        b.iter(|| {
            let plan = plan_route(campus, request).expect("route exists");
            black_box(plan.steps.len())
        });
    });

    c.bench_function("dijkstra_all_building_pairs", |b| {
        let graph = &campus.graph;
        let ids: Vec<_> = graph
            .nodes_of_kind(campusnav_lib::NodeKind::Building)
            .iter()
            .map(|node| node.id())
            .collect();
        b.iter(|| {
            let mut hops = 0usize;
            for &from in &ids {
                for &to in &ids {
                    hops += find_path(graph, from, to).map(|p| p.len()).unwrap_or(0);
                }
            }
            black_box(hops)
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
