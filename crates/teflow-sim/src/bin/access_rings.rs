//! Access-network simulator: hierarchical ring/aggregation topology driven to
//! the access layer's aggregate capacity, with a per-layer utilization report.

use teflow_core::demand::{build_commodities, ring_pairs};
use teflow_core::numerics::CONSERVATION_EPSILON;
use teflow_core::report::{check_conservation, top_loaded, utilization, UtilizationSummary};
use teflow_core::topology::{access_aggregation, AccessParams, LinkLayer};
use teflow_core::{optimize, Network, SplitOptions, TeError};

const COMMODITIES: usize = 100;
const INTRA_RING_RATIO: f64 = 0.5;
const PATHS_PER_COMMODITY: usize = 3;
const MAX_PATH_LENGTH: usize = 10;
const SEED: u64 = 42;

fn print_layer(name: &str, summary: &UtilizationSummary) {
    println!(
        "  {name}: {} links, utilization mean {:.1}%, max {:.1}%, min {:.1}%",
        summary.links,
        summary.mean * 100.0,
        summary.max * 100.0,
        summary.min * 100.0
    );
}

fn run() -> Result<(), TeError> {
    let params = AccessParams {
        rings: 20,
        nodes_per_ring: 10,
        aggregation_nodes: 30,
        access_capacity: 50.0,
        uplink_capacity: 100.0,
        aggregation_capacity: 200.0,
        uplinks_per_ring: 2,
    };

    // spread the access layer's aggregate capacity across the demand set
    let access_links = params.rings * params.nodes_per_ring;
    let requirement = access_links as f64 * params.access_capacity / COMMODITIES as f64;

    println!(
        "access network: {} rings x {} nodes, {} aggregation nodes",
        params.rings, params.nodes_per_ring, params.aggregation_nodes
    );
    println!(
        "demand: {COMMODITIES} commodities, requirement {requirement:.2}, {:.0}% intra-ring",
        INTRA_RING_RATIO * 100.0
    );

    let (network, layout) = access_aggregation(&params)?;
    println!(
        "generated {} nodes and {} links",
        network.node_count(),
        network.link_count()
    );

    let pairs = ring_pairs(&layout, COMMODITIES, INTRA_RING_RATIO, SEED);
    let intra = pairs
        .iter()
        .filter(|(s, t)| layout.ring_of(*s) == layout.ring_of(*t))
        .count();
    println!(
        "pairs: {} total, {} intra-ring, {} inter-ring",
        pairs.len(),
        intra,
        pairs.len() - intra
    );

    let mut commodities = build_commodities(
        &network,
        &pairs,
        requirement,
        PATHS_PER_COMMODITY,
        Some(MAX_PATH_LENGTH),
    );
    println!("resolved {} commodities with routes", commodities.len());

    let history = optimize(&network, &mut commodities, &SplitOptions::default())?;
    let last = &history[history.len() - 1];

    println!("\nutilization by layer:");
    for (name, layer) in [
        ("access", LinkLayer::Access),
        ("uplink", LinkLayer::Uplink),
        ("aggregation", LinkLayer::Aggregation),
    ] {
        let summary = utilization(&network, &last.link_flow, |_, link| {
            layout.layer(link) == layer
        });
        print_layer(name, &summary);
    }

    print_busiest_access_links(&network, &layout, &last.link_flow);

    let shortfall_rounds = history
        .iter()
        .filter(|record| !record.shortfalls.is_empty())
        .count();
    if shortfall_rounds > 0 {
        println!("\nrounds with unsatisfiable residuals: {shortfall_rounds}");
    }

    let report = check_conservation(&commodities, CONSERVATION_EPSILON);
    if report.all_satisfied() {
        println!(
            "\nall {} commodities satisfy their requirement",
            report.commodities
        );
    } else {
        println!(
            "\n{} of {} commodities miss their requirement:",
            report.violations.len(),
            report.commodities
        );
        for (idx, achieved) in report.violations.iter().take(5) {
            println!(
                "  commodity {}: {:.4} of {:.4}",
                idx, achieved, commodities[*idx].requirement
            );
        }
    }
    Ok(())
}

fn print_busiest_access_links(
    network: &Network,
    layout: &teflow_core::topology::AccessLayout,
    flow: &[f64],
) {
    println!("\ntop 10 access links by utilization:");
    let ranked = top_loaded(network, flow, network.link_count());
    let mut shown = 0;
    for (id, link_flow, ratio) in ranked {
        let link = network.link(id);
        if layout.layer(link) != LinkLayer::Access {
            continue;
        }
        shown += 1;
        println!(
            "  {:2}. {} -> {}: {:.2} / {:.2} ({:.1}%)",
            shown,
            link.source.0,
            link.target.0,
            link_flow,
            link.capacity,
            ratio * 100.0
        );
        if shown == 10 {
            break;
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
