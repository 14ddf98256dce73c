use std::cmp::Ordering;

use crate::network::{Commodity, Link, LinkId, Network};
use crate::solver::IterationRecord;

/// Utilization statistics over a subset of links.
#[derive(Debug, Clone, Default)]
pub struct UtilizationSummary {
    pub links: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

pub fn utilization<F>(network: &Network, flow: &[f64], mut filter: F) -> UtilizationSummary
where
    F: FnMut(LinkId, &Link) -> bool,
{
    let mut summary = UtilizationSummary {
        min: f64::INFINITY,
        ..UtilizationSummary::default()
    };
    let mut total = 0.0;
    for (id, link) in network.links() {
        if !filter(id, link) {
            continue;
        }
        let ratio = flow[id.0] / link.capacity;
        summary.links += 1;
        total += ratio;
        summary.max = summary.max.max(ratio);
        summary.min = summary.min.min(ratio);
    }
    if summary.links == 0 {
        return UtilizationSummary::default();
    }
    summary.mean = total / summary.links as f64;
    summary
}

/// The `n` most utilized links as `(id, flow, utilization)`, descending.
pub fn top_loaded(network: &Network, flow: &[f64], n: usize) -> Vec<(LinkId, f64, f64)> {
    let mut loaded: Vec<(LinkId, f64, f64)> = network
        .links()
        .map(|(id, link)| (id, flow[id.0], flow[id.0] / link.capacity))
        .collect();
    loaded.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));
    loaded.truncate(n);
    loaded
}

#[derive(Debug, Clone, Copy)]
pub struct CostStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Min/max/mean over every recorded path cost of one iteration. `None` when
/// the record holds no paths.
pub fn cost_stats(record: &IterationRecord) -> Option<CostStats> {
    let mut count = 0usize;
    let mut total = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for cost in record.path_costs.iter().flatten() {
        count += 1;
        total += cost;
        min = min.min(*cost);
        max = max.max(*cost);
    }
    (count > 0).then(|| CostStats {
        min,
        max,
        mean: total / count as f64,
    })
}

/// Commodities whose final traffic misses their requirement.
#[derive(Debug, Clone)]
pub struct ConservationReport {
    pub commodities: usize,
    /// `(commodity index, achieved total)` for each violation.
    pub violations: Vec<(usize, f64)>,
}

impl ConservationReport {
    pub fn all_satisfied(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn check_conservation(commodities: &[Commodity], tolerance: f64) -> ConservationReport {
    let violations = commodities
        .iter()
        .enumerate()
        .filter_map(|(idx, commodity)| {
            let achieved = commodity.total_traffic();
            ((achieved - commodity.requirement).abs() >= tolerance).then_some((idx, achieved))
        })
        .collect();
    ConservationReport {
        commodities: commodities.len(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NodeId, Path};
    use approx::assert_relative_eq;

    fn two_link_network() -> Network {
        let mut network = Network::new();
        network.add_link(NodeId(0), NodeId(1), 10.0).unwrap();
        network.add_link(NodeId(0), NodeId(1), 20.0).unwrap();
        network
    }

    #[test]
    fn utilization_over_a_filtered_subset() {
        let network = two_link_network();
        let flow = vec![5.0, 5.0];
        let all = utilization(&network, &flow, |_, _| true);
        assert_eq!(all.links, 2);
        assert_relative_eq!(all.max, 0.5);
        assert_relative_eq!(all.min, 0.25);
        assert_relative_eq!(all.mean, 0.375);

        let none = utilization(&network, &flow, |_, _| false);
        assert_eq!(none.links, 0);
        assert_eq!(none.mean, 0.0);
    }

    #[test]
    fn top_loaded_sorts_by_utilization() {
        let network = two_link_network();
        let flow = vec![2.0, 18.0];
        let ranked = top_loaded(&network, &flow, 2);
        assert_eq!(ranked[0].0, LinkId(1));
        assert_relative_eq!(ranked[0].2, 0.9);
        assert_eq!(ranked[1].0, LinkId(0));
    }

    #[test]
    fn conservation_report_flags_misses() {
        let mut network = Network::new();
        let link = network.add_link(NodeId(0), NodeId(1), 10.0).unwrap();
        let mut good = Commodity::new(NodeId(0), NodeId(1), 5.0);
        good.add_path(Path::new(vec![link]));
        good.paths[0].traffic = 5.0;
        let mut short = Commodity::new(NodeId(0), NodeId(1), 5.0);
        short.add_path(Path::new(vec![link]));
        short.paths[0].traffic = 3.0;

        let report = check_conservation(&[good, short], 1e-6);
        assert_eq!(report.commodities, 2);
        assert_eq!(report.violations, vec![(1, 3.0)]);
        assert!(!report.all_satisfied());
    }
}
