use std::collections::VecDeque;

use crate::network::{LinkId, Network, NodeId};

/// Extra hops beyond the shortest distance the path enumeration explores
/// when no explicit length bound is given.
pub const DEFAULT_SLACK: usize = 2;

fn adjacency(network: &Network) -> Vec<Vec<(usize, LinkId)>> {
    let mut adjacency = vec![Vec::new(); network.node_count()];
    for (id, link) in network.links() {
        adjacency[link.source.0].push((link.target.0, id));
    }
    adjacency
}

fn reverse_adjacency(network: &Network) -> Vec<Vec<(usize, LinkId)>> {
    let mut adjacency = vec![Vec::new(); network.node_count()];
    for (id, link) in network.links() {
        adjacency[link.target.0].push((link.source.0, id));
    }
    adjacency
}

fn bfs_distance(adjacency: &[Vec<(usize, LinkId)>], source: usize) -> Vec<Option<usize>> {
    let mut distance = vec![None; adjacency.len()];
    distance[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        let next_distance = distance[node].unwrap_or(0) + 1;
        for &(neighbor, _) in &adjacency[node] {
            if distance[neighbor].is_none() {
                distance[neighbor] = Some(next_distance);
                queue.push_back(neighbor);
            }
        }
    }
    distance
}

struct Enumeration<'a> {
    adjacency: &'a [Vec<(usize, LinkId)>],
    /// Hop distance from each node to the target, for pruning prefixes that
    /// can no longer finish within the length bound.
    to_target: &'a [Option<usize>],
    target: usize,
    limit: usize,
}

impl Enumeration<'_> {
    fn walk(
        &self,
        node: usize,
        visited: &mut [bool],
        current: &mut Vec<LinkId>,
        found: &mut Vec<Vec<LinkId>>,
    ) {
        if node == self.target {
            found.push(current.clone());
            return;
        }
        match self.to_target[node] {
            Some(remaining) if current.len() + remaining <= self.limit => {}
            _ => return,
        }
        for &(neighbor, link) in &self.adjacency[node] {
            if visited[neighbor] {
                continue;
            }
            visited[neighbor] = true;
            current.push(link);
            self.walk(neighbor, visited, current, found);
            current.pop();
            visited[neighbor] = false;
        }
    }
}

/// Up to `k` shortest simple paths from `source` to `target`, as link id
/// sequences, shortest first. A breadth-first pass finds the minimum hop
/// distance; a depth-bounded enumeration then collects every simple path up
/// to `max_length` hops (default: minimum distance plus `DEFAULT_SLACK`).
/// Deterministic given the network's link insertion order. Returns an empty
/// vector when the target is unreachable, and a single empty path when
/// `source == target`.
pub fn k_shortest_paths(
    network: &Network,
    source: NodeId,
    target: NodeId,
    k: usize,
    max_length: Option<usize>,
) -> Vec<Vec<LinkId>> {
    if source == target {
        return vec![Vec::new()];
    }
    let adjacency = adjacency(network);
    if source.0 >= adjacency.len() || target.0 >= adjacency.len() {
        return Vec::new();
    }

    let distance = bfs_distance(&adjacency, source.0);
    let Some(shortest) = distance[target.0] else {
        return Vec::new();
    };
    let limit = max_length.unwrap_or(shortest + DEFAULT_SLACK);

    let reverse = reverse_adjacency(network);
    let to_target = bfs_distance(&reverse, target.0);

    let enumeration = Enumeration {
        adjacency: &adjacency,
        to_target: &to_target,
        target: target.0,
        limit,
    };
    let mut found = Vec::new();
    let mut visited = vec![false; adjacency.len()];
    visited[source.0] = true;
    let mut current = Vec::new();
    enumeration.walk(source.0, &mut visited, &mut current, &mut found);

    found.sort_by_key(|path| path.len());
    found.truncate(k);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 -> 1 -> 3 and 0 -> 2 -> 3, plus a direct 0 -> 3 shortcut.
    fn diamond() -> Network {
        let mut network = Network::new();
        network.add_link(NodeId(0), NodeId(1), 10.0).unwrap();
        network.add_link(NodeId(0), NodeId(2), 10.0).unwrap();
        network.add_link(NodeId(1), NodeId(3), 10.0).unwrap();
        network.add_link(NodeId(2), NodeId(3), 10.0).unwrap();
        network.add_link(NodeId(0), NodeId(3), 10.0).unwrap();
        network
    }

    #[test]
    fn shortest_path_comes_first() {
        let network = diamond();
        let paths = k_shortest_paths(&network, NodeId(0), NodeId(3), 3, None);
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], vec![LinkId(4)]);
        assert_eq!(paths[1].len(), 2);
        assert_eq!(paths[2].len(), 2);
    }

    #[test]
    fn k_truncates_the_candidate_list() {
        let network = diamond();
        let paths = k_shortest_paths(&network, NodeId(0), NodeId(3), 1, None);
        assert_eq!(paths, vec![vec![LinkId(4)]]);
    }

    #[test]
    fn unreachable_target_yields_nothing() {
        let mut network = Network::new();
        network.add_link(NodeId(0), NodeId(1), 10.0).unwrap();
        network.add_link(NodeId(3), NodeId(2), 10.0).unwrap();
        assert!(k_shortest_paths(&network, NodeId(0), NodeId(2), 3, None).is_empty());
    }

    #[test]
    fn same_endpoints_give_one_empty_path() {
        let network = diamond();
        let paths = k_shortest_paths(&network, NodeId(2), NodeId(2), 3, None);
        assert_eq!(paths, vec![Vec::new()]);
    }

    #[test]
    fn length_bound_excludes_detours() {
        let network = diamond();
        let paths = k_shortest_paths(&network, NodeId(0), NodeId(3), 10, Some(1));
        assert_eq!(paths, vec![vec![LinkId(4)]]);
    }

    #[test]
    fn enumeration_is_stable_across_runs() {
        let network = diamond();
        let first = k_shortest_paths(&network, NodeId(0), NodeId(3), 3, None);
        let second = k_shortest_paths(&network, NodeId(0), NodeId(3), 3, None);
        assert_eq!(first, second);
    }
}
