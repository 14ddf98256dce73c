use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::{Commodity, Network, NodeId, Path};
use crate::routing::k_shortest_paths;
use crate::topology::AccessLayout;

/// Bounded-retry budget: give up on finding further distinct pairs after
/// 100 attempts per requested pair.
const ATTEMPTS_PER_PAIR: usize = 100;

/// Distinct ordered pairs of distinct hosts `0..hosts`, seeded and
/// reproducible. May return fewer than `count` pairs when the host space is
/// too small for the request.
pub fn random_host_pairs(hosts: usize, count: usize, seed: u64) -> Vec<(NodeId, NodeId)> {
    if hosts < 2 || count == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs = Vec::new();
    let budget = count.saturating_mul(ATTEMPTS_PER_PAIR);
    let mut attempts = 0;
    while pairs.len() < count && attempts < budget {
        let source = NodeId(rng.gen_range(0..hosts));
        let target = NodeId(rng.gen_range(0..hosts));
        if source != target && !pairs.contains(&(source, target)) {
            pairs.push((source, target));
        }
        attempts += 1;
    }
    pairs
}

/// Strategic access-network pairs: roughly `count * intra_ratio` demands
/// inside a single ring, the rest across ring boundaries.
pub fn ring_pairs(
    layout: &AccessLayout,
    count: usize,
    intra_ratio: f64,
    seed: u64,
) -> Vec<(NodeId, NodeId)> {
    if count == 0 || layout.rings == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs = Vec::new();
    let intra_target = (count as f64 * intra_ratio) as usize;
    let nodes = layout.nodes_per_ring;

    let mut attempts = 0;
    let budget = intra_target.saturating_mul(ATTEMPTS_PER_PAIR);
    while pairs.len() < intra_target && attempts < budget {
        let ring = rng.gen_range(0..layout.rings);
        let start = ring * nodes;
        let source = NodeId(rng.gen_range(start..start + nodes));
        let target = NodeId(rng.gen_range(start..start + nodes));
        if source != target && !pairs.contains(&(source, target)) {
            pairs.push((source, target));
        }
        attempts += 1;
    }

    let mut attempts = 0;
    let budget = count.saturating_mul(ATTEMPTS_PER_PAIR);
    while pairs.len() < count && attempts < budget && layout.rings > 1 {
        let first = rng.gen_range(0..layout.rings);
        let second = rng.gen_range(0..layout.rings);
        attempts += 1;
        if first == second {
            continue;
        }
        let source = NodeId(rng.gen_range(first * nodes..(first + 1) * nodes));
        let target = NodeId(rng.gen_range(second * nodes..(second + 1) * nodes));
        if !pairs.contains(&(source, target)) {
            pairs.push((source, target));
        }
    }
    pairs
}

/// Resolves each demand pair to up to `paths_per_pair` candidate routes and
/// wraps them as commodities. Pairs with no route are skipped.
pub fn build_commodities(
    network: &Network,
    pairs: &[(NodeId, NodeId)],
    requirement: f64,
    paths_per_pair: usize,
    max_length: Option<usize>,
) -> Vec<Commodity> {
    let mut commodities = Vec::with_capacity(pairs.len());
    for &(source, target) in pairs {
        let routes = k_shortest_paths(network, source, target, paths_per_pair, max_length);
        if routes.is_empty() {
            continue;
        }
        let mut commodity = Commodity::new(source, target, requirement);
        for links in routes {
            commodity.add_path(Path::new(links));
        }
        commodities.push(commodity);
    }
    commodities
}
