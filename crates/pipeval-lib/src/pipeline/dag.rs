//! Acyclicity check for pipeline graphs using Kahn's algorithm

use std::collections::{HashMap, HashSet, VecDeque};
use tracing::trace;

use super::{Edge, Node};

/// Check whether the nodes and edges form a directed acyclic graph.
///
/// Edges with an endpoint outside the node set are skipped. Duplicate node
/// identifiers collapse into a single vertex. An empty node set is acyclic.
pub fn is_dag(nodes: &[Node], edges: &[Edge]) -> bool {
    if nodes.is_empty() {
        return true;
    }

    let node_ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();

    // Every known id gets an entry before any edge is considered
    let mut in_degree: HashMap<&str, usize> = node_ids.iter().map(|&id| (id, 0)).collect();
    let mut adjacency: HashMap<&str, Vec<&str>> =
        node_ids.iter().map(|&id| (id, Vec::new())).collect();

    for edge in edges {
        let (source, target) = (edge.source.as_str(), edge.target.as_str());
        if !node_ids.contains(source) || !node_ids.contains(target) {
            trace!(edge = %edge.id, source, target, "Skipping dangling edge");
            continue;
        }

        if let Some(neighbors) = adjacency.get_mut(source) {
            neighbors.push(target);
        }
        if let Some(degree) = in_degree.get_mut(target) {
            *degree += 1;
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut processed = 0;

    while let Some(current) = queue.pop_front() {
        processed += 1;

        for &neighbor in &adjacency[current] {
            if let Some(degree) = in_degree.get_mut(neighbor) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    trace!(processed, total = node_ids.len(), "Topological pass finished");
    processed == node_ids.len()
}

#[cfg(test)]
mod tests {
    include!("dag.test.rs");
}
