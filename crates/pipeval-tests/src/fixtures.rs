//! Pipeline fixtures shaped like the editor's submissions

use pipeval_lib::{Edge, Node, Pipeline};

/// Fluent builder for pipelines in tests
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node of the given kind, laid out left to right
    pub fn node(mut self, id: &str, kind: &str) -> Self {
        let column = self.nodes.len() as f64;
        self.nodes.push(
            Node::new(id, kind)
                .at(column * 250.0, 100.0)
                .with_data("id", id)
                .with_data("nodeType", kind),
        );
        self
    }

    /// Add several `text` nodes
    pub fn nodes(self, ids: &[&str]) -> Self {
        ids.iter().fold(self, |builder, id| builder.node(id, "text"))
    }

    /// Connect two nodes through their default handles
    pub fn edge(mut self, source: &str, target: &str) -> Self {
        self.edges.push(
            Edge::new(source, target)
                .with_handles(format!("{}-output", source), format!("{}-input", target)),
        );
        self
    }

    /// Connect consecutive ids
    pub fn chain(self, ids: &[&str]) -> Self {
        ids.windows(2)
            .fold(self, |builder, pair| builder.edge(pair[0], pair[1]))
    }

    pub fn build(self) -> Pipeline {
        Pipeline::new(self.nodes, self.edges)
    }
}

/// Input -> LLM -> Output, the editor's starter pipeline
pub fn starter_pipeline() -> Pipeline {
    PipelineBuilder::new()
        .node("customInput-1", "customInput")
        .node("llm-1", "llm")
        .node("customOutput-1", "customOutput")
        .chain(&["customInput-1", "llm-1", "customOutput-1"])
        .build()
}

/// Conditional routing that feeds its own result back into the condition
pub fn feedback_pipeline() -> Pipeline {
    PipelineBuilder::new()
        .node("api-1", "api")
        .node("conditional-1", "conditional")
        .node("transform-1", "transform")
        .node("filter-1", "filter")
        .chain(&["api-1", "conditional-1", "transform-1", "filter-1"])
        .edge("filter-1", "conditional-1")
        .build()
}
