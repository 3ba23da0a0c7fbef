use kshortest::graph::Graph;
use kshortest::{Error, Path, SearchState, ShortestPathEngine, VertexId, YenKShortestPaths};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn graph(n: usize, edges: &[(VertexId, VertexId, f64)]) -> Graph {
    let mut g = Graph::with_vertices(n);
    for &(from, to, weight) in edges {
        g.add_edge(from, to, weight).unwrap();
    }
    g
}

// Nine loopless 4 -> 5 routes, with a back edge 3 -> 0.
fn six_vertex_graph() -> Graph {
    graph(
        6,
        &[
            (4, 0, 1.0),
            (4, 1, 3.0),
            (0, 1, 1.0),
            (0, 2, 4.0),
            (1, 2, 1.0),
            (1, 3, 5.0),
            (2, 3, 1.0),
            (2, 5, 6.0),
            (3, 5, 2.0),
            (3, 0, 1.0),
        ],
    )
}

fn random_graph(rng: &mut StdRng, n: usize, density: f64) -> Graph {
    let mut g = Graph::with_vertices(n);
    for from in 0..n {
        for to in 0..n {
            if from != to && rng.gen_bool(density) {
                // Small integers keep path sums exact regardless of summation order.
                let weight = rng.gen_range(0..=9) as f64;
                g.add_edge(from, to, weight).unwrap();
            }
        }
    }
    g
}

/// Every loopless `source -> target` path, by exhaustive depth-first search.
fn all_simple_paths(g: &Graph, source: VertexId, target: VertexId) -> Vec<Path> {
    fn walk(g: &Graph, target: VertexId, stack: &mut Vec<VertexId>, out: &mut Vec<Path>) {
        let Some(&cur) = stack.last() else {
            return;
        };
        if cur == target {
            out.push(Path::new(stack.clone(), path_weight(g, stack)));
            return;
        }
        for &next in g.adjacent_vertices(cur) {
            if !stack.contains(&next) {
                stack.push(next);
                walk(g, target, stack, out);
                stack.pop();
            }
        }
    }

    let mut out = Vec::new();
    walk(g, target, &mut vec![source], &mut out);
    out
}

fn path_weight(g: &Graph, vertices: &[VertexId]) -> f64 {
    vertices
        .windows(2)
        .map(|pair| g.edge_weight(pair[0], pair[1]))
        .sum()
}

fn sorted_weights(paths: &[Path]) -> Vec<f64> {
    let mut weights: Vec<f64> = paths.iter().map(Path::weight).collect();
    weights.sort_by(f64::total_cmp);
    weights
}

fn assert_well_formed(g: &Graph, source: VertexId, target: VertexId, paths: &[Path]) {
    let mut seen = HashSet::new();
    for (i, p) in paths.iter().enumerate() {
        assert_eq!(p.source(), Some(source), "path {i}: {p}");
        assert_eq!(p.target(), Some(target), "path {i}: {p}");

        let distinct: HashSet<VertexId> = p.vertices().iter().copied().collect();
        assert_eq!(distinct.len(), p.len(), "path {i} repeats a vertex: {p}");
        for (from, to) in p.edges() {
            assert!(g.has_edge(from, to), "path {i} uses missing edge {from}->{to}");
        }
        assert_eq!(p.weight(), path_weight(g, p.vertices()), "path {i}: {p}");

        assert!(seen.insert(p.vertices().to_vec()), "path {i} emitted twice: {p}");
        if i > 0 {
            assert!(paths[i - 1].weight() <= p.weight(), "weights decrease at {i}");
        }
    }
}

#[test]
fn yen_enumerates_every_loopless_path_in_weight_order() {
    let g = six_vertex_graph();
    let mut search = YenKShortestPaths::new(&g);
    let paths = search.shortest_paths(4, 5, 100).unwrap().to_vec();

    assert_eq!(paths.len(), 9);
    assert_well_formed(&g, 4, 5, &paths);
    assert_eq!(
        sorted_weights(&paths),
        vec![6.0, 7.0, 8.0, 9.0, 9.0, 10.0, 10.0, 11.0, 19.0]
    );

    let expected: HashSet<Vec<VertexId>> = [
        vec![4, 0, 1, 2, 3, 5],
        vec![4, 1, 2, 3, 5],
        vec![4, 0, 2, 3, 5],
        vec![4, 0, 1, 2, 5],
        vec![4, 0, 1, 3, 5],
        vec![4, 1, 2, 5],
        vec![4, 1, 3, 5],
        vec![4, 0, 2, 5],
        vec![4, 1, 3, 0, 2, 5],
    ]
    .into_iter()
    .collect();
    let actual: HashSet<Vec<VertexId>> = paths.iter().map(|p| p.vertices().to_vec()).collect();
    assert_eq!(actual, expected);

    assert!(!search.has_next());
    assert_eq!(search.state(), SearchState::Exhausted);
    assert_eq!(search.candidate_count(), 9);
    assert!(search.generated_path_count() >= 8);
}

#[test]
fn yen_first_paths_with_distinct_weights() {
    let g = six_vertex_graph();
    let mut search = YenKShortestPaths::new(&g);
    let paths = search.shortest_paths(4, 5, 3).unwrap();

    let vertices: Vec<&[VertexId]> = paths.iter().map(Path::vertices).collect();
    assert_eq!(
        vertices,
        vec![&[4, 0, 1, 2, 3, 5][..], &[4, 1, 2, 3, 5][..], &[4, 0, 2, 3, 5][..]]
    );
    assert!(search.has_next());
    assert_eq!(search.state(), SearchState::Iterating);
}

#[test]
fn yen_first_path_is_the_dijkstra_path() {
    let g = six_vertex_graph();
    let expected = ShortestPathEngine::new().shortest_path(&g, 4, 5).unwrap();

    let mut search = YenKShortestPaths::with_endpoints(&g, 4, 5).unwrap();
    assert_eq!(search.shortest_path(4, 5).unwrap(), expected);
    let first = search.next_path().unwrap();
    assert_eq!(first, expected);
    assert_eq!(first.weight(), expected.weight());
}

#[test]
fn yen_leaves_the_working_graph_untouched_between_calls() {
    let g = six_vertex_graph();
    let mut search = YenKShortestPaths::with_endpoints(&g, 4, 5).unwrap();
    while search.next_path().is_some() {
        assert_eq!(search.working_graph().deleted_vertex_count(), 0);
        assert_eq!(search.working_graph().deleted_edge_count(), 0);
    }
    assert_eq!(search.results().len(), 9);
}

#[test]
fn yen_disconnected_target_yields_nothing() {
    let mut g = six_vertex_graph();
    let island = g.add_vertex();

    let mut search = YenKShortestPaths::with_endpoints(&g, 4, island).unwrap();
    assert_eq!(search.state(), SearchState::Exhausted);
    assert!(!search.has_next());
    assert_eq!(search.next_path(), None);
    assert!(search.shortest_paths(4, island, 5).unwrap().is_empty());
    assert_eq!(search.candidate_count(), 0);
}

#[test]
fn yen_source_equal_to_target_yields_the_trivial_path() {
    let g = six_vertex_graph();
    let mut search = YenKShortestPaths::new(&g);
    let paths = search.shortest_paths(2, 2, 10).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].vertices(), &[2]);
    assert_eq!(paths[0].weight(), 0.0);
    assert!(!search.has_next());
}

#[test]
fn yen_rejects_unknown_endpoints() {
    let g = six_vertex_graph();
    let err = YenKShortestPaths::with_endpoints(&g, 4, 99).unwrap_err();
    assert!(matches!(err, Error::UnknownVertex { id: 99, .. }));

    let mut search = YenKShortestPaths::new(&g);
    assert!(search.shortest_paths(99, 5, 3).is_err());
    assert_eq!(search.state(), SearchState::Uninitialized);
    assert_eq!(search.endpoints(), None);
}

#[test]
fn yen_state_transitions() {
    let g = graph(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 3.0)]);
    let mut search = YenKShortestPaths::new(&g);
    assert_eq!(search.state(), SearchState::Uninitialized);
    assert!(!search.has_next());
    assert_eq!(search.next_path(), None);
    assert_eq!(search.state(), SearchState::Uninitialized);

    search.seed(0, 2).unwrap();
    assert_eq!(search.state(), SearchState::Seeded);
    assert_eq!(search.endpoints(), Some((0, 2)));
    assert_eq!(search.pending_count(), 1);

    assert_eq!(search.next_path().unwrap().vertices(), &[0, 1, 2]);
    assert_eq!(search.state(), SearchState::Iterating);

    assert_eq!(search.next_path().unwrap().vertices(), &[0, 2]);
    assert_eq!(search.state(), SearchState::Exhausted);
    assert_eq!(search.next_path(), None);

    search.clear();
    assert_eq!(search.state(), SearchState::Uninitialized);
    assert!(search.results().is_empty());
    assert_eq!(search.generated_path_count(), 0);
}

#[test]
fn yen_reseeding_discards_previous_results() {
    let g = six_vertex_graph();
    let mut search = YenKShortestPaths::new(&g);
    assert_eq!(search.shortest_paths(4, 5, 100).unwrap().len(), 9);

    let again = search.shortest_paths(0, 5, 100).unwrap().to_vec();
    let fresh = YenKShortestPaths::with_endpoints(&g, 0, 5)
        .unwrap()
        .collect::<Vec<_>>();
    assert_eq!(again, fresh);
    assert!(again.iter().all(|p| p.source() == Some(0)));
    assert_eq!(search.candidate_count(), fresh.len());
}

#[test]
fn yen_is_an_iterator() {
    let g = six_vertex_graph();
    let search = YenKShortestPaths::with_endpoints(&g, 4, 5).unwrap();
    let weights: Vec<f64> = search.take(3).map(|p| p.weight()).collect();
    assert_eq!(weights, vec![6.0, 7.0, 8.0]);

    let mut search = YenKShortestPaths::with_endpoints(&g, 4, 5).unwrap();
    assert_eq!(search.by_ref().count(), 9);
    assert_eq!(search.next(), None);
}

#[test]
fn yen_matches_brute_force_on_random_graphs() {
    for seed in 0..40u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.gen_range(4..=8);
        let g = random_graph(&mut rng, n, 0.4);
        let source = rng.gen_range(0..n);
        let target = rng.gen_range(0..n);

        let expected = all_simple_paths(&g, source, target);
        let mut search = YenKShortestPaths::new(&g);
        let actual = search.shortest_paths(source, target, usize::MAX).unwrap().to_vec();

        assert_eq!(
            actual.len(),
            expected.len(),
            "seed {seed}: {source} -> {target} on {n} vertices"
        );
        assert_well_formed(&g, source, target, &actual);
        assert_eq!(sorted_weights(&actual), sorted_weights(&expected), "seed {seed}");

        let expected: HashSet<Path> = expected.into_iter().collect();
        let actual_set: HashSet<Path> = actual.iter().cloned().collect();
        assert_eq!(actual_set, expected, "seed {seed}");

        if let Some(first) = actual.first() {
            let dijkstra = ShortestPathEngine::new()
                .shortest_path(&g, source, target)
                .unwrap();
            assert_eq!(first.weight(), dijkstra.weight(), "seed {seed}");
        }
    }
}

#[test]
fn yen_truncates_at_k_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(7);
    let g = random_graph(&mut rng, 8, 0.5);
    let total = all_simple_paths(&g, 0, 7).len();

    for k in [0, 1, 2, 5, total, total + 3] {
        let mut search = YenKShortestPaths::new(&g);
        let paths = search.shortest_paths(0, 7, k).unwrap();
        assert_eq!(paths.len(), k.min(total), "k = {k}");
    }
}

#[test]
fn independent_searches_share_one_graph_across_threads() {
    let g = six_vertex_graph();
    let expected: Vec<Path> = YenKShortestPaths::with_endpoints(&g, 4, 5)
        .unwrap()
        .collect();

    let g = &g;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    YenKShortestPaths::with_endpoints(g, 4, 5)
                        .unwrap()
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
