//! Minimal two-commodity instance over five links, printed in full.

use teflow_core::{optimize, Commodity, Network, NodeId, Path, SplitOptions, TeError};

fn run() -> Result<(), TeError> {
    let mut network = Network::new();
    let e1 = network.add_link(NodeId(1), NodeId(2), 5.0)?;
    let e2 = network.add_link(NodeId(1), NodeId(4), 3.0)?;
    let e3 = network.add_link(NodeId(1), NodeId(3), 4.0)?;
    let e4 = network.add_link(NodeId(2), NodeId(4), 3.0)?;
    let e5 = network.add_link(NodeId(3), NodeId(4), 1.0)?;

    let mut first = Commodity::new(NodeId(1), NodeId(4), 4.0);
    first.add_path(Path::new(vec![e1, e4]));
    first.add_path(Path::new(vec![e2]));
    first.add_path(Path::new(vec![e3, e5]));

    let mut second = Commodity::new(NodeId(2), NodeId(4), 3.0);
    second.add_path(Path::new(vec![e4]));
    second.add_path(Path::new(vec![e1, e2]));
    second.add_path(Path::new(vec![e1, e3, e5]));

    let mut commodities = vec![first, second];
    let history = optimize(&network, &mut commodities, &SplitOptions::default())?;
    let last = &history[history.len() - 1];

    println!("final flow per link:");
    for (id, link) in network.links() {
        println!(
            "  {} -> {}: {:.4} / {:.2}",
            link.source.0, link.target.0, last.link_flow[id.0], link.capacity
        );
    }

    println!("\nfinal traffic per path:");
    for (idx, commodity) in commodities.iter().enumerate() {
        println!(
            "commodity {} ({} -> {}), requirement {:.2}:",
            idx, commodity.source.0, commodity.target.0, commodity.requirement
        );
        for (path_idx, path) in commodity.paths.iter().enumerate() {
            let marker = if last.beta[idx] == path_idx { " (beta)" } else { "" };
            println!(
                "  path {}: traffic {:.4}, cost {:.4}{}",
                path_idx, path.traffic, last.path_costs[idx][path_idx], marker
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
