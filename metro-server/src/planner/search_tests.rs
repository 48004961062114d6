//! Tests for route search over whole networks.

use super::*;
use crate::domain::StationId;
use crate::network::{
    LineDef, MatrixCell, Network, NetworkDefinition, NetworkSource, SourceData,
};

fn cell(o: &str, d: &str, raw: &str) -> MatrixCell {
    MatrixCell {
        origin: o.to_string(),
        destination: d.to_string(),
        raw: raw.to_string(),
    }
}

fn network(
    lines: &[(&str, &[&str])],
    interchanges: &[(&str, &str)],
    fares: Vec<MatrixCell>,
) -> Network {
    let definition = NetworkDefinition {
        lines: lines
            .iter()
            .map(|(name, stations)| LineDef {
                name: name.to_string(),
                stations: stations.iter().map(|s| s.to_string()).collect(),
            })
            .collect(),
        interchanges: interchanges
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect(),
        ..NetworkDefinition::default()
    };
    Network::build(
        SourceData {
            definition,
            fares,
            times: Vec::new(),
        },
        0,
    )
    .0
}

fn abcd() -> Network {
    network(
        &[("Red", &["A", "B", "C", "D"])],
        &[],
        vec![
            cell("A", "B", "1.0"),
            cell("B", "C", "1.5"),
            cell("C", "D", "2.0"),
        ],
    )
}

fn names(net: &Network, path: &[StationId]) -> Vec<String> {
    net.catalog().names(path)
}

#[test]
fn end_to_end_forward() {
    let net = abcd();
    let route = Router::new(&net).route("A", "D").unwrap();
    assert_eq!(names(&net, &route.path), vec!["A", "B", "C", "D"]);
    assert_eq!(route.fare.total_fare, 4.5);
    assert_eq!(route.hops(), 3);
    assert_eq!(route.strategy, Strategy::SameLine);
}

#[test]
fn end_to_end_reverse() {
    let net = abcd();
    let router = Router::new(&net);
    let forward = router.route("A", "D").unwrap();
    let backward = router.route("D", "A").unwrap();
    assert_eq!(names(&net, &backward.path), vec!["D", "C", "B", "A"]);
    assert_eq!(backward.fare.total_fare, forward.fare.total_fare);
}

#[test]
fn end_to_end_identity() {
    let net = abcd();
    let route = Router::new(&net).route("A", "A").unwrap();
    assert_eq!(names(&net, &route.path), vec!["A"]);
    assert_eq!(route.fare.total_fare, 0.0);
    assert_eq!(route.fare.total_minutes, 0);
    assert_eq!(route.strategy, Strategy::Identity);
    assert!(route.segments.is_empty());
}

#[test]
fn end_to_end_unknown_station() {
    let net = abcd();
    let err = Router::new(&net).route("A", "Z").unwrap_err();
    assert_eq!(err, RouteError::UnknownStation("Z".to_string()));

    let err = Router::new(&net).route("Z", "A").unwrap_err();
    assert_eq!(err, RouteError::UnknownStation("Z".to_string()));
}

#[test]
fn names_are_normalized() {
    let net = abcd();
    let route = Router::new(&net).route("  a ", "d").unwrap();
    assert_eq!(names(&net, &route.path), vec!["A", "B", "C", "D"]);
}

#[test]
fn disconnected_is_no_path() {
    let net = network(&[("Red", &["A", "B"]), ("Blue", &["X", "Y"])], &[], Vec::new());
    let err = Router::new(&net).route("A", "Y").unwrap_err();
    assert_eq!(
        err,
        RouteError::NoPath {
            origin: "A".to_string(),
            destination: "Y".to_string(),
        }
    );
}

#[test]
fn missing_fares_give_partial_total() {
    let net = network(
        &[("Red", &["A", "B", "C"])],
        &[],
        vec![cell("A", "B", "1.10")],
    );
    let route = Router::new(&net).route("A", "C").unwrap();
    assert_eq!(route.fare.total_fare, 1.1);
    assert_eq!(route.fare.missing.len(), 2);
    assert!(!route.fare.is_complete());
}

#[test]
fn direct_fare_reported_when_present() {
    let net = network(
        &[("Red", &["A", "B", "C"])],
        &[],
        vec![
            cell("A", "B", "1.00"),
            cell("B", "C", "1.00"),
            cell("A", "C", "1.60"),
        ],
    );
    let route = Router::new(&net).route("C", "A").unwrap();
    assert_eq!(route.fare.total_fare, 2.0);
    assert_eq!(route.direct_fare, Some(1.6));
}

#[test]
fn cross_line_route_through_interchange() {
    let net = network(
        &[
            ("Red", &["A", "B", "C", "D"]),
            ("Blue", &["P", "Q", "R", "S"]),
        ],
        &[("C", "Q")],
        Vec::new(),
    );
    let route = Router::new(&net).route("A", "S").unwrap();
    assert_eq!(names(&net, &route.path), vec!["A", "B", "C", "Q", "R", "S"]);
    assert_eq!(route.strategy, Strategy::CrossLine);
    assert_eq!(route.segments.len(), 3);
}

#[test]
fn falls_back_to_search_when_line_path_is_longer() {
    // Red runs the long way round; the interchange B-E is a shortcut.
    let net = network(
        &[("Red", &["A", "B", "C", "D", "E", "F"])],
        &[("B", "E")],
        Vec::new(),
    );
    let route = Router::new(&net).route("A", "F").unwrap();
    assert_eq!(names(&net, &route.path), vec!["A", "B", "E", "F"]);
    assert_eq!(route.strategy, Strategy::Search);
}

#[test]
fn equal_length_line_path_does_not_override_bfs_order() {
    // Two 3-hop routes O-P-M-D and O-P-Q-D; Green's P-M edge comes before
    // the P-Q interchange in P's neighbours, so BFS reaches D through M.
    let net = network(
        &[
            ("Red", &["O", "P"]),
            ("Blue", &["Q", "D"]),
            ("Green", &["P", "M", "D"]),
        ],
        &[("P", "Q")],
        Vec::new(),
    );
    let o = net.station("O").unwrap();
    let d = net.station("D").unwrap();
    let bfs = crate::planner::bfs::find_path(net.graph(), o, d).unwrap();
    assert_eq!(names(&net, &bfs), vec!["O", "P", "M", "D"]);

    let route = Router::new(&net).route_ids(o, d).unwrap();
    assert_eq!(route.path, bfs);
    assert_eq!(route.strategy, Strategy::Search);
}

#[test]
fn three_lines_need_search() {
    let net = network(
        &[
            ("Red", &["A", "B"]),
            ("Green", &["M", "N"]),
            ("Blue", &["X", "Y"]),
        ],
        &[("B", "M"), ("N", "X")],
        Vec::new(),
    );
    let route = Router::new(&net).route("A", "Y").unwrap();
    assert_eq!(names(&net, &route.path), vec!["A", "B", "M", "N", "X", "Y"]);
    assert_eq!(route.strategy, Strategy::Search);
}

#[test]
fn builtin_routes_between_lines() {
    let (net, _) = Network::load(&NetworkSource::builtin(), 0).unwrap();
    let router = Router::new(&net);

    let route = router.route("Kajang", "Gombak").unwrap();
    assert_eq!(net.catalog().name(route.path[0]), "Kajang");
    assert_eq!(net.catalog().name(*route.path.last().unwrap()), "Gombak");
    assert_eq!(route.strategy, Strategy::CrossLine);

    let back = router.route("Gombak", "Kajang").unwrap();
    assert_eq!(back.hops(), route.hops());

    // Kajang to Pasar Seni (SBK) is 17 stops down the Kajang line.
    let route = router.route("kajang", "Pasar Seni (SBK)").unwrap();
    assert_eq!(route.hops(), 17);
    assert_eq!(route.strategy, Strategy::SameLine);
}

#[test]
fn builtin_every_pair_is_routable() {
    let (net, _) = Network::load(&NetworkSource::builtin(), 0).unwrap();
    let router = Router::new(&net);
    let stations: Vec<StationId> = net.graph().stations().collect();
    for &a in &stations {
        for &b in &stations {
            let route = router.route_ids(a, b).unwrap();
            assert_eq!(route.path.first(), Some(&a));
            assert_eq!(route.path.last(), Some(&b));
        }
    }
}

mod proptests {
    use super::*;
    use crate::planner::lines::same_line_path;
    use proptest::prelude::*;

    /// A single line of `len` stations named S0..S{len-1}.
    fn single_line(len: usize) -> Network {
        let stations: Vec<String> = (0..len).map(|i| format!("S{i}")).collect();
        let refs: Vec<&str> = stations.iter().map(String::as_str).collect();
        network(&[("Only", refs.as_slice())], &[], Vec::new())
    }

    proptest! {
        /// On one line, the line slice is exactly the BFS path
        #[test]
        fn line_slice_matches_bfs(len in 2usize..30, i in 0usize..30, j in 0usize..30) {
            let i = i % len;
            let j = j % len;
            let net = single_line(len);
            let a = net.station(&format!("S{i}")).unwrap();
            let b = net.station(&format!("S{j}")).unwrap();

            let bfs = crate::planner::bfs::find_path(net.graph(), a, b).unwrap();
            let slice = same_line_path(&net, a, b).unwrap();
            prop_assert_eq!(&slice, &bfs);
            prop_assert_eq!(slice.len(), i.abs_diff(j) + 1);

            let route = Router::new(&net).route_ids(a, b).unwrap();
            prop_assert_eq!(route.path, bfs);
        }

        /// Every station routes to itself with zero cost
        #[test]
        fn identity_everywhere(len in 1usize..20, i in 0usize..20) {
            let i = i % len;
            let net = single_line(len.max(2));
            let id = net.station(&format!("S{i}")).unwrap();
            let route = Router::new(&net).route_ids(id, id).unwrap();
            prop_assert_eq!(route.path, vec![id]);
            prop_assert_eq!(route.fare.total_fare, 0.0);
            prop_assert_eq!(route.fare.total_minutes, 0);
        }
    }
}
