use crate::network::{Commodity, LinkId, Network};
use crate::numerics::marginal_cost;

/// Total flow per link, indexed by `LinkId`, summed over every referencing
/// path across all commodities. Pure function of the traffic snapshot;
/// links no path uses stay at zero.
pub fn aggregate_flow(network: &Network, commodities: &[Commodity]) -> Vec<f64> {
    let mut flow = vec![0.0; network.link_count()];
    for commodity in commodities {
        for path in &commodity.paths {
            for link in &path.links {
                flow[link.0] += path.traffic;
            }
        }
    }
    flow
}

/// Marginal cost of routing one extra unit along `links`, given the frozen
/// flow snapshot. Each distinct link counts once.
pub fn path_cost(network: &Network, links: &[LinkId], flow: &[f64], saturation: f64) -> f64 {
    let mut cost = 0.0;
    for (pos, link) in links.iter().enumerate() {
        if links[..pos].contains(link) {
            continue;
        }
        cost += marginal_cost(network.link(*link).capacity, flow[link.0], saturation);
    }
    cost
}

/// Scalar congestion measure `sum(flow * marginal_cost)` over all links.
pub fn network_cost(network: &Network, flow: &[f64], saturation: f64) -> f64 {
    network
        .links()
        .map(|(id, link)| flow[id.0] * marginal_cost(link.capacity, flow[id.0], saturation))
        .sum()
}
