use crate::TeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);

/// A capacitated directed edge. Links carry no flow state of their own;
/// flow is always derived from the current path traffic snapshot.
#[derive(Debug, Clone)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub capacity: f64,
}

/// Registry of links, addressed by `LinkId`. Paths reference links through
/// ids rather than owning them, so a link shared by many paths has exactly
/// one capacity record.
#[derive(Debug, Clone, Default)]
pub struct Network {
    links: Vec<Link>,
    node_span: usize,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_link(
        &mut self,
        source: NodeId,
        target: NodeId,
        capacity: f64,
    ) -> Result<LinkId, TeError> {
        if !(capacity > 0.0) {
            return Err(TeError::InvalidInput(format!(
                "link {} -> {} has non-positive capacity {capacity}",
                source.0, target.0
            )));
        }
        let link_id = LinkId(self.links.len());
        self.node_span = self.node_span.max(source.0 + 1).max(target.0 + 1);
        self.links.push(Link {
            source,
            target,
            capacity,
        });
        Ok(link_id)
    }

    /// Adds one link in each direction between `a` and `b`.
    pub fn add_duplex(
        &mut self,
        a: NodeId,
        b: NodeId,
        capacity: f64,
    ) -> Result<(LinkId, LinkId), TeError> {
        let forward = self.add_link(a, b, capacity)?;
        let reverse = self.add_link(b, a, capacity)?;
        Ok((forward, reverse))
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> {
        self.links
            .iter()
            .enumerate()
            .map(|(idx, link)| (LinkId(idx), link))
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// One past the highest node id referenced by any link.
    pub fn node_count(&self) -> usize {
        self.node_span
    }

    /// Minimum capacity along a link sequence.
    pub fn bottleneck(&self, links: &[LinkId]) -> f64 {
        links
            .iter()
            .map(|id| self.links[id.0].capacity)
            .fold(f64::INFINITY, f64::min)
    }
}

/// One candidate route of a commodity. The link sequence is fixed for the
/// run; only `traffic` mutates, once per iteration.
#[derive(Debug, Clone)]
pub struct Path {
    pub links: Vec<LinkId>,
    pub traffic: f64,
}

impl Path {
    pub fn new(links: Vec<LinkId>) -> Self {
        Self {
            links,
            traffic: 0.0,
        }
    }
}

/// A traffic demand between two nodes, with its fixed candidate path set.
/// Path insertion order defines tie-break precedence.
#[derive(Debug, Clone)]
pub struct Commodity {
    pub source: NodeId,
    pub target: NodeId,
    pub requirement: f64,
    pub paths: Vec<Path>,
}

impl Commodity {
    pub fn new(source: NodeId, target: NodeId, requirement: f64) -> Self {
        Self {
            source,
            target,
            requirement,
            paths: Vec::new(),
        }
    }

    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
    }

    pub fn total_traffic(&self) -> f64 {
        self.paths.iter().map(|path| path.traffic).sum()
    }

    /// Sets every path to `requirement / path_count`, the initial feasible
    /// point of the optimization.
    pub fn split_uniformly(&mut self) {
        let share = self.requirement / self.paths.len() as f64;
        for path in &mut self.paths {
            path.traffic = share;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_capacity() {
        let mut network = Network::new();
        assert!(network.add_link(NodeId(0), NodeId(1), 0.0).is_err());
        assert!(network.add_link(NodeId(0), NodeId(1), -3.0).is_err());
        assert!(network.add_link(NodeId(0), NodeId(1), f64::NAN).is_err());
        assert_eq!(network.link_count(), 0);
    }

    #[test]
    fn duplex_adds_both_directions() {
        let mut network = Network::new();
        let (forward, reverse) = network.add_duplex(NodeId(2), NodeId(5), 10.0).unwrap();
        assert_eq!(network.link(forward).source, NodeId(2));
        assert_eq!(network.link(reverse).source, NodeId(5));
        assert_eq!(network.node_count(), 6);
    }

    #[test]
    fn bottleneck_is_minimum_capacity() {
        let mut network = Network::new();
        let a = network.add_link(NodeId(0), NodeId(1), 10.0).unwrap();
        let b = network.add_link(NodeId(1), NodeId(2), 3.0).unwrap();
        let c = network.add_link(NodeId(2), NodeId(3), 7.0).unwrap();
        assert_eq!(network.bottleneck(&[a, b, c]), 3.0);
    }

    #[test]
    fn uniform_split_preserves_requirement() {
        let mut commodity = Commodity::new(NodeId(0), NodeId(1), 9.0);
        commodity.add_path(Path::new(vec![LinkId(0)]));
        commodity.add_path(Path::new(vec![LinkId(1)]));
        commodity.add_path(Path::new(vec![LinkId(2)]));
        commodity.split_uniformly();
        assert_eq!(commodity.total_traffic(), 9.0);
        assert_eq!(commodity.paths[0].traffic, 3.0);
    }
}
