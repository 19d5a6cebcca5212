use super::*;
use serde_json::json;
use tempfile::TempDir;

fn chain(ids: &[&str]) -> Pipeline {
    let nodes = ids.iter().map(|id| Node::new(*id, "text")).collect();
    let edges = ids
        .windows(2)
        .map(|pair| Edge::new(pair[0], pair[1]))
        .collect();
    Pipeline::new(nodes, edges)
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summary_of_empty_pipeline() {
    let summary = Pipeline::default().summarize();
    assert_eq!(
        summary,
        PipelineSummary {
            num_nodes: 0,
            num_edges: 0,
            is_dag: true,
        }
    );
}

#[test]
fn test_summary_counts_match_input_lengths() {
    let mut pipeline = chain(&["a", "b", "c", "d"]);
    let summary = pipeline.summarize();
    assert_eq!(summary.num_nodes, 4);
    assert_eq!(summary.num_edges, 3);
    assert!(summary.is_dag);

    pipeline.edges.push(Edge::new("d", "a"));
    let summary = pipeline.summarize();
    assert_eq!(summary.num_nodes, 4);
    assert_eq!(summary.num_edges, 4);
    assert!(!summary.is_dag);
}

#[test]
fn test_summary_counts_dangling_edges() {
    let pipeline = Pipeline::new(
        vec![Node::new("a", "text"), Node::new("b", "text")],
        vec![Edge::new("a", "b"), Edge::new("a", "ghost")],
    );
    let summary = pipeline.summarize();
    assert_eq!(summary.num_edges, 2);
    assert!(summary.is_dag);
}

#[test]
fn test_summary_counts_duplicate_nodes_literally() {
    let pipeline = Pipeline::new(
        vec![Node::new("a", "text"), Node::new("a", "llm")],
        Vec::new(),
    );
    let summary = pipeline.summarize();
    assert_eq!(summary.num_nodes, 2);
    assert!(summary.is_dag);
}

// ============================================================================
// Wire Format
// ============================================================================

#[test]
fn test_deserialize_editor_payload() {
    let payload = json!({
        "nodes": [
            {
                "id": "customInput-1",
                "type": "customInput",
                "position": { "x": 100.0, "y": 200.0 },
                "data": { "id": "customInput-1", "nodeType": "customInput", "inputName": "input_1" },
                "width": 220,
                "height": 94,
                "selected": false,
                "dragging": false
            },
            {
                "id": "llm-1",
                "type": "llm",
                "position": { "x": 400, "y": 180 },
                "data": {}
            }
        ],
        "edges": [
            {
                "id": "reactflow__edge-customInput-1customInput-1-value-llm-1llm-1-prompt",
                "source": "customInput-1",
                "sourceHandle": "customInput-1-value",
                "target": "llm-1",
                "targetHandle": "llm-1-prompt",
                "type": "smoothstep",
                "animated": true
            }
        ]
    });

    let pipeline: Pipeline = serde_json::from_value(payload).unwrap();
    assert_eq!(pipeline.nodes.len(), 2);
    assert_eq!(pipeline.nodes[0].kind, "customInput");
    assert_eq!(pipeline.nodes[0].position, Position { x: 100.0, y: 200.0 });
    assert_eq!(pipeline.nodes[0].data["inputName"], "input_1");
    assert_eq!(
        pipeline.edges[0].source_handle.as_deref(),
        Some("customInput-1-value")
    );
    assert_eq!(pipeline.edges[0].target_handle.as_deref(), Some("llm-1-prompt"));
}

#[test]
fn test_edge_handles_are_optional() {
    let missing: Edge = serde_json::from_value(json!({
        "id": "e1", "source": "a", "target": "b"
    }))
    .unwrap();
    assert_eq!(missing.source_handle, None);

    let null: Edge = serde_json::from_value(json!({
        "id": "e1", "source": "a", "target": "b", "sourceHandle": null, "targetHandle": null
    }))
    .unwrap();
    assert_eq!(null.target_handle, None);
}

#[test]
fn test_node_requires_identifier() {
    let result: Result<Node, _> = serde_json::from_value(json!({
        "type": "llm",
        "position": { "x": 0, "y": 0 },
        "data": {}
    }));
    assert!(result.is_err());
}

#[test]
fn test_summary_serializes_with_wire_field_names() {
    let summary = PipelineSummary {
        num_nodes: 3,
        num_edges: 2,
        is_dag: false,
    };
    assert_eq!(
        serde_json::to_value(summary).unwrap(),
        json!({ "num_nodes": 3, "num_edges": 2, "is_dag": false })
    );
}

// ============================================================================
// File Loading
// ============================================================================

#[tokio::test]
async fn test_from_json_file_reads_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pipeline.json");
    let pipeline = chain(&["in", "llm", "out"]);
    std::fs::write(&path, serde_json::to_string(&pipeline).unwrap()).unwrap();

    let loaded = Pipeline::from_json_file(&path).await.unwrap();
    assert_eq!(loaded, pipeline);
}

#[tokio::test]
async fn test_from_json_file_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    let err = Pipeline::from_json_file(&path).await.unwrap_err();
    assert!(matches!(err, PipelineError::FileReadError { .. }));
}

#[tokio::test]
async fn test_from_json_file_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, r#"{"nodes": [}"#).unwrap();

    let err = Pipeline::from_json_file(&path).await.unwrap_err();
    assert!(matches!(err, PipelineError::JsonParseError { .. }));
    assert!(err.to_string().contains("broken.json"));
}
