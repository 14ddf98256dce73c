use std::ops::Range;

use crate::network::{Link, Network, NodeId};
use crate::TeError;

#[derive(Debug, Clone)]
pub struct AccessParams {
    pub rings: usize,
    pub nodes_per_ring: usize,
    pub aggregation_nodes: usize,
    pub access_capacity: f64,
    pub uplink_capacity: f64,
    pub aggregation_capacity: f64,
    /// How many aggregation nodes each ring's gateway is homed to.
    pub uplinks_per_ring: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLayer {
    Access,
    Uplink,
    Aggregation,
}

/// Node numbering of the generated access network: ring nodes first
/// (ring-major), aggregation nodes after.
#[derive(Debug, Clone)]
pub struct AccessLayout {
    pub rings: usize,
    pub nodes_per_ring: usize,
    pub access_nodes: Range<usize>,
    pub aggregation_nodes: Range<usize>,
}

impl AccessLayout {
    pub fn ring_of(&self, node: NodeId) -> Option<usize> {
        self.access_nodes
            .contains(&node.0)
            .then(|| node.0 / self.nodes_per_ring)
    }

    /// First node of the ring; uplinks attach here.
    pub fn gateway(&self, ring: usize) -> NodeId {
        NodeId(ring * self.nodes_per_ring)
    }

    pub fn layer(&self, link: &Link) -> LinkLayer {
        let source_access = self.access_nodes.contains(&link.source.0);
        let target_access = self.access_nodes.contains(&link.target.0);
        match (source_access, target_access) {
            (true, true) => LinkLayer::Access,
            (false, false) => LinkLayer::Aggregation,
            _ => LinkLayer::Uplink,
        }
    }
}

/// Generates a hierarchical access network: `rings` bidirectional access
/// rings, each ring's gateway dual-homed to aggregation nodes round-robin,
/// and a full mesh across the aggregation layer.
pub fn access_aggregation(params: &AccessParams) -> Result<(Network, AccessLayout), TeError> {
    if params.rings == 0 {
        return Err(TeError::InvalidInput("at least one access ring".to_string()));
    }
    if params.nodes_per_ring < 3 {
        return Err(TeError::InvalidInput(format!(
            "a ring needs at least three nodes, got {}",
            params.nodes_per_ring
        )));
    }
    if params.aggregation_nodes == 0 && params.uplinks_per_ring > 0 {
        return Err(TeError::InvalidInput(
            "uplinks requested but no aggregation nodes".to_string(),
        ));
    }

    let access_total = params.rings * params.nodes_per_ring;
    let layout = AccessLayout {
        rings: params.rings,
        nodes_per_ring: params.nodes_per_ring,
        access_nodes: 0..access_total,
        aggregation_nodes: access_total..access_total + params.aggregation_nodes,
    };
    let mut network = Network::new();

    for ring in 0..params.rings {
        let offset = ring * params.nodes_per_ring;
        for i in 0..params.nodes_per_ring {
            let here = NodeId(offset + i);
            let next = NodeId(offset + (i + 1) % params.nodes_per_ring);
            network.add_duplex(here, next, params.access_capacity)?;
        }
    }

    for ring in 0..params.rings {
        let gateway = layout.gateway(ring);
        for i in 0..params.uplinks_per_ring {
            let slot = (ring * params.uplinks_per_ring + i) % params.aggregation_nodes;
            let aggregation = NodeId(layout.aggregation_nodes.start + slot);
            network.add_duplex(gateway, aggregation, params.uplink_capacity)?;
        }
    }

    for i in layout.aggregation_nodes.clone() {
        for j in i + 1..layout.aggregation_nodes.end {
            network.add_duplex(NodeId(i), NodeId(j), params.aggregation_capacity)?;
        }
    }

    Ok((network, layout))
}
