//! Fat-tree simulator: 100 random flows over a k=8 fat tree, three candidate
//! paths per flow, followed by a utilization and conservation analysis.

use teflow_core::demand::{build_commodities, random_host_pairs};
use teflow_core::numerics::CONSERVATION_EPSILON;
use teflow_core::report::{check_conservation, cost_stats, top_loaded};
use teflow_core::topology::fat_tree;
use teflow_core::{optimize, SplitOptions, TeError};

const ARITY: usize = 8;
const LINK_CAPACITY: f64 = 100.0;
const FLOWS: usize = 100;
const FLOW_REQUIREMENT: f64 = 50.0;
const PATHS_PER_FLOW: usize = 3;
const SEED: u64 = 42;

fn run() -> Result<(), TeError> {
    println!("fat tree simulation: k={ARITY}, {FLOWS} flows");

    let (network, layout) = fat_tree(ARITY, LINK_CAPACITY)?;
    println!(
        "topology: {} hosts, {} edge, {} aggregation, {} core, {} links",
        layout.hosts.len(),
        layout.edge.len(),
        layout.aggregation.len(),
        layout.core.len(),
        network.link_count()
    );

    let pairs = random_host_pairs(layout.host_count(), FLOWS, SEED);
    let mut commodities =
        build_commodities(&network, &pairs, FLOW_REQUIREMENT, PATHS_PER_FLOW, None);
    let commodity_count = commodities.len();
    let total_paths: usize = commodities.iter().map(|c| c.paths.len()).sum();
    println!(
        "demand: {} commodities, {} paths ({:.2} per commodity), requirement {}",
        commodity_count,
        total_paths,
        total_paths as f64 / commodity_count as f64,
        FLOW_REQUIREMENT
    );

    let history = optimize(&network, &mut commodities, &SplitOptions::default())?;
    let last = &history[history.len() - 1];

    println!("\ntop 10 links by utilization:");
    for (rank, (id, flow, ratio)) in top_loaded(&network, &last.link_flow, 10).iter().enumerate() {
        let link = network.link(*id);
        println!(
            "  {:2}. {} -> {}: {:.2} / {:.2} ({:.1}%)",
            rank + 1,
            link.source.0,
            link.target.0,
            flow,
            link.capacity,
            ratio * 100.0
        );
    }

    if let Some(stats) = cost_stats(last) {
        println!(
            "\npath costs: min {:.4}, max {:.4}, mean {:.4}",
            stats.min, stats.max, stats.mean
        );
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

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
