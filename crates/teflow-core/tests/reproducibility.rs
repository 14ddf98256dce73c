use teflow_core::demand::{build_commodities, random_host_pairs};
use teflow_core::topology::fat_tree;
use teflow_core::{optimize, Commodity, IterationRecord, Network, NodeId, Path, SplitOptions};

fn shared_bottleneck_instance() -> (Network, Vec<Commodity>) {
    let mut network = Network::new();
    let ab = network.add_link(NodeId(0), NodeId(1), 5.0).unwrap();
    let ad = network.add_link(NodeId(0), NodeId(3), 3.0).unwrap();
    let ac = network.add_link(NodeId(0), NodeId(2), 4.0).unwrap();
    let bd = network.add_link(NodeId(1), NodeId(3), 3.0).unwrap();
    let cd = network.add_link(NodeId(2), NodeId(3), 1.0).unwrap();

    let mut first = Commodity::new(NodeId(0), NodeId(3), 4.0);
    first.add_path(Path::new(vec![ab, bd]));
    first.add_path(Path::new(vec![ad]));
    first.add_path(Path::new(vec![ac, cd]));

    let mut second = Commodity::new(NodeId(1), NodeId(3), 3.0);
    second.add_path(Path::new(vec![bd]));
    second.add_path(Path::new(vec![ab, ad]));
    second.add_path(Path::new(vec![ab, ac, cd]));

    (network, vec![first, second])
}

fn assert_identical(left: &[IterationRecord], right: &[IterationRecord]) {
    assert_eq!(left.len(), right.len());
    for (a, b) in left.iter().zip(right.iter()) {
        assert_eq!(a.link_flow, b.link_flow);
        assert_eq!(a.path_costs, b.path_costs);
        assert_eq!(a.beta, b.beta);
        assert_eq!(a.shortfalls, b.shortfalls);
        assert_eq!(a.zero_curvature, b.zero_curvature);
    }
}

#[test]
fn identical_inputs_produce_identical_trajectories() {
    let (network, template) = shared_bottleneck_instance();
    let opts = SplitOptions::default();

    let mut first = template.clone();
    let mut second = template.clone();
    let history_a = optimize(&network, &mut first, &opts).unwrap();
    let history_b = optimize(&network, &mut second, &opts).unwrap();

    assert_identical(&history_a, &history_b);
    for (a, b) in first.iter().zip(second.iter()) {
        for (pa, pb) in a.paths.iter().zip(b.paths.iter()) {
            assert_eq!(pa.traffic, pb.traffic);
        }
    }
}

#[test]
fn shared_bottleneck_instance_reaches_equalized_costs() {
    let (network, mut commodities) = shared_bottleneck_instance();
    let history = optimize(&network, &mut commodities, &SplitOptions::default()).unwrap();

    let last = history.last().unwrap();
    assert_eq!(last.beta, vec![1, 0]);

    // converged split, pinned against an independent evaluation of the rule
    let expected_first = [0.656_006_416_514_711_5, 2.685_941_688_124_777_7, 0.658_051_895_360_510_6];
    let expected_second = [2.352_663_137_784_181, 0.322_708_835_115_282_87, 0.324_628_027_100_536_2];
    for (path, expected) in commodities[0].paths.iter().zip(expected_first) {
        assert!((path.traffic - expected).abs() < 1e-4);
    }
    for (path, expected) in commodities[1].paths.iter().zip(expected_second) {
        assert!((path.traffic - expected).abs() < 1e-4);
    }

    for (idx, commodity) in commodities.iter().enumerate() {
        assert!((commodity.total_traffic() - commodity.requirement).abs() < 1e-6);
        let costs = &last.path_costs[idx];
        let best = costs[last.beta[idx]];
        for &cost in costs {
            assert!(cost >= best - 1e-9);
        }
    }
}

#[test]
fn full_pipeline_is_reproducible_from_a_seed() {
    let run = || {
        let (network, layout) = fat_tree(4, 100.0).unwrap();
        let pairs = random_host_pairs(layout.host_count(), 8, 42);
        let mut commodities = build_commodities(&network, &pairs, 30.0, 3, None);
        let opts = SplitOptions {
            iterations: 60,
            ..SplitOptions::default()
        };
        let history = optimize(&network, &mut commodities, &opts).unwrap();
        (history, commodities)
    };

    let (history_a, commodities_a) = run();
    let (history_b, commodities_b) = run();
    assert_identical(&history_a, &history_b);
    assert_eq!(commodities_a.len(), commodities_b.len());
    for (a, b) in commodities_a.iter().zip(commodities_b.iter()) {
        assert_eq!(a.source, b.source);
        assert_eq!(a.target, b.target);
        for (pa, pb) in a.paths.iter().zip(b.paths.iter()) {
            assert_eq!(pa.links, pb.links);
            assert_eq!(pa.traffic, pb.traffic);
        }
    }
}
