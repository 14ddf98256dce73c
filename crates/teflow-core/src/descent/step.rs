use crate::network::{LinkId, Network};
use crate::numerics::curvature;

/// Index of the minimum-cost path; ties go to the lowest index, so the
/// commodity's path insertion order decides.
pub fn min_cost_path(costs: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &cost) in costs.iter().enumerate().skip(1) {
        if cost < costs[best] {
            best = idx;
        }
    }
    best
}

fn one_sided(
    network: &Network,
    links: &[LinkId],
    excluded: &[LinkId],
    flow: &[f64],
    saturation: f64,
) -> f64 {
    let mut sum = 0.0;
    for (pos, link) in links.iter().enumerate() {
        if links[..pos].contains(link) || excluded.contains(link) {
            continue;
        }
        sum += curvature(network.link(*link).capacity, flow[link.0], saturation);
    }
    sum
}

/// Curvature summed over the symmetric difference of the two paths' link
/// sets. Links common to both paths cancel in the cost difference between
/// them, so only links unique to one side enter the step size.
pub fn curvature_sum(
    network: &Network,
    path: &[LinkId],
    beta: &[LinkId],
    flow: &[f64],
    saturation: f64,
) -> f64 {
    one_sided(network, path, beta, flow, saturation)
        + one_sided(network, beta, path, flow, saturation)
}
