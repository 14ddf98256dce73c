use std::ops::Range;

use crate::network::{Network, NodeId};
use crate::TeError;

/// Node numbering of a k-ary fat tree: hosts first, then edge, aggregation
/// and core switches, each layer contiguous.
#[derive(Debug, Clone)]
pub struct FatTreeLayout {
    pub k: usize,
    pub hosts: Range<usize>,
    pub edge: Range<usize>,
    pub aggregation: Range<usize>,
    pub core: Range<usize>,
}

impl FatTreeLayout {
    fn new(k: usize) -> Self {
        let hosts = k * k * k / 4;
        let edge = k * k / 2;
        let aggregation = k * k / 2;
        let core = k * k / 4;
        Self {
            k,
            hosts: 0..hosts,
            edge: hosts..hosts + edge,
            aggregation: hosts + edge..hosts + edge + aggregation,
            core: hosts + edge + aggregation..hosts + edge + aggregation + core,
        }
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn node_count(&self) -> usize {
        self.core.end
    }
}

/// Generates a k-ary fat tree with uniform link capacity: k pods of k/2 edge
/// and k/2 aggregation switches, k/2 hosts per edge switch, a full bipartite
/// edge/aggregation mesh inside each pod, and each pod's j-th aggregation
/// switch wired to core switches `j*k/2 .. (j+1)*k/2`. Every connection is a
/// duplex link pair.
pub fn fat_tree(k: usize, capacity: f64) -> Result<(Network, FatTreeLayout), TeError> {
    if k == 0 || k % 2 != 0 {
        return Err(TeError::InvalidInput(format!(
            "fat tree arity must be positive and even, got {k}"
        )));
    }

    let layout = FatTreeLayout::new(k);
    let mut network = Network::new();
    let half = k / 2;

    for pod in 0..k {
        let pod_edge = layout.edge.start + pod * half;
        let pod_agg = layout.aggregation.start + pod * half;

        for i in 0..half {
            let edge_switch = NodeId(pod_edge + i);
            for j in 0..half {
                let host = NodeId(pod * half * half + i * half + j);
                network.add_duplex(host, edge_switch, capacity)?;
            }
        }

        for i in 0..half {
            let edge_switch = NodeId(pod_edge + i);
            for j in 0..half {
                let agg_switch = NodeId(pod_agg + j);
                network.add_duplex(edge_switch, agg_switch, capacity)?;
            }
        }
    }

    for pod in 0..k {
        for j in 0..half {
            let agg_switch = NodeId(layout.aggregation.start + pod * half + j);
            for c in j * half..(j + 1) * half {
                let core_switch = NodeId(layout.core.start + c);
                network.add_duplex(agg_switch, core_switch, capacity)?;
            }
        }
    }

    Ok((network, layout))
}
