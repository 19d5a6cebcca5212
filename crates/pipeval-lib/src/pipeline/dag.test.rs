// Tests for pipeline cycle detection

use super::*;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;

// ============================================================================
// Test Utilities
// ============================================================================

fn nodes(ids: &[&str]) -> Vec<Node> {
    ids.iter().map(|id| Node::new(*id, "customInput")).collect()
}

fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs
        .iter()
        .map(|(source, target)| Edge::new(*source, *target))
        .collect()
}

/// Deterministic xorshift generator so graph shapes are reproducible
struct Shapes(u64);

impl Shapes {
    fn next(&mut self, bound: usize) -> usize {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 % bound as u64) as usize
    }
}

// ============================================================================
// Acyclic Graphs
// ============================================================================

#[test]
fn test_empty_graph_is_dag() {
    assert!(is_dag(&[], &[]));
}

#[test]
fn test_empty_graph_ignores_dangling_edges() {
    assert!(is_dag(&[], &edges(&[("a", "b"), ("b", "a")])));
}

#[test]
fn test_nodes_without_edges_are_dag() {
    assert!(is_dag(&nodes(&["a", "b", "c"]), &[]));
}

#[test]
fn test_chain_is_dag() {
    let graph = nodes(&["a", "b", "c", "d"]);
    assert!(is_dag(&graph, &edges(&[("a", "b"), ("b", "c"), ("c", "d")])));
}

#[test]
fn test_diamond_is_dag() {
    let graph = nodes(&["a", "b", "c", "d"]);
    let links = edges(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
    assert!(is_dag(&graph, &links));
}

#[test]
fn test_parallel_edges_are_dag() {
    // Two handles connecting the same pair of nodes
    let graph = nodes(&["llm", "out"]);
    let links = vec![
        Edge::new("llm", "out").with_handles("llm-response", "out-value"),
        Edge::new("llm", "out").with_handles("llm-system", "out-value"),
    ];
    assert!(is_dag(&graph, &links));
}

#[test]
fn test_disconnected_components_are_dag() {
    let graph = nodes(&["a", "b", "x", "y", "lonely"]);
    assert!(is_dag(&graph, &edges(&[("a", "b"), ("x", "y")])));
}

// ============================================================================
// Cyclic Graphs
// ============================================================================

#[test]
fn test_self_loop_is_not_dag() {
    assert!(!is_dag(&nodes(&["a"]), &edges(&[("a", "a")])));
}

#[test]
fn test_closing_chain_into_ring_is_not_dag() {
    let graph = nodes(&["a", "b", "c", "d"]);
    let links = edges(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);
    assert!(!is_dag(&graph, &links));
}

#[test]
fn test_two_node_cycle_is_not_dag() {
    assert!(!is_dag(&nodes(&["a", "b"]), &edges(&[("a", "b"), ("b", "a")])));
}

#[test]
fn test_cycle_downstream_of_acyclic_prefix_is_not_dag() {
    let graph = nodes(&["src", "a", "b", "sink"]);
    let links = edges(&[("src", "a"), ("a", "b"), ("b", "a"), ("b", "sink")]);
    assert!(!is_dag(&graph, &links));
}

#[test]
fn test_self_loop_in_otherwise_valid_graph_is_not_dag() {
    let graph = nodes(&["a", "b", "c"]);
    let links = edges(&[("a", "b"), ("b", "c"), ("c", "c")]);
    assert!(!is_dag(&graph, &links));
}

// ============================================================================
// Dangling Edges And Duplicates
// ============================================================================

#[test]
fn test_edge_to_unknown_node_is_ignored() {
    let graph = nodes(&["a", "b"]);
    assert!(is_dag(&graph, &edges(&[("a", "b"), ("a", "ghost")])));
}

#[test]
fn test_cycle_through_unknown_node_is_ignored() {
    // a -> ghost -> a would be a cycle if ghost existed
    let graph = nodes(&["a", "b"]);
    assert!(is_dag(&graph, &edges(&[("a", "ghost"), ("ghost", "a")])));
}

#[test]
fn test_duplicate_node_ids_collapse_into_one_vertex() {
    let graph = nodes(&["a", "a", "b"]);
    assert!(is_dag(&graph, &edges(&[("a", "b")])));
}

#[test]
fn test_duplicate_node_ids_still_detect_cycles() {
    let graph = nodes(&["a", "b", "b"]);
    assert!(!is_dag(&graph, &edges(&[("a", "b"), ("b", "a")])));
}

#[test]
fn test_node_payload_does_not_affect_result() {
    let graph = vec![
        Node::new("text-1", "text")
            .at(120.0, -40.5)
            .with_data("text", "{{input}}"),
        Node::new("llm-1", "llm").with_data("model", "gpt-4"),
    ];
    assert!(is_dag(&graph, &edges(&[("text-1", "llm-1")])));
}

// ============================================================================
// Cross-check Against petgraph
// ============================================================================

#[test]
fn test_agrees_with_petgraph_on_generated_graphs() {
    let mut shapes = Shapes(0x9E37_79B9_7F4A_7C15);

    for round in 0..200 {
        let node_count = 1 + shapes.next(12);
        let edge_count = shapes.next(node_count * 2 + 1);

        let ids: Vec<String> = (0..node_count).map(|i| format!("n{}", i)).collect();
        let graph: Vec<Node> = ids.iter().map(|id| Node::new(id.as_str(), "llm")).collect();

        let mut oracle = DiGraph::<(), ()>::new();
        let indices: Vec<_> = (0..node_count).map(|_| oracle.add_node(())).collect();

        let mut links = Vec::with_capacity(edge_count);
        for _ in 0..edge_count {
            let (from, to) = (shapes.next(node_count), shapes.next(node_count));
            oracle.add_edge(indices[from], indices[to], ());
            links.push(Edge::new(ids[from].as_str(), ids[to].as_str()));
        }

        assert_eq!(
            is_dag(&graph, &links),
            !is_cyclic_directed(&oracle),
            "round {} disagreed for edges {:?}",
            round,
            links
                .iter()
                .map(|e| (e.source.as_str(), e.target.as_str()))
                .collect::<Vec<_>>()
        );
    }
}
