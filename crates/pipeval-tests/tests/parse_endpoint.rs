//! Router-level tests for the pipeline parse endpoint
//!
//! These drive the axum router in-process with `oneshot`, covering the
//! documented acyclicity properties through the HTTP surface.

use anyhow::Result;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pipeval_lib::{AppConfig, Pipeline, PipelineSummary, router};
use pipeval_tests::PipelineBuilder;
use pipeval_tests::fixtures::{feedback_pipeline, starter_pipeline};
use tower::ServiceExt;

async fn parse(pipeline: &Pipeline) -> Result<PipelineSummary> {
    let app = router(&AppConfig::default())?;
    let request = Request::post("/pipelines/parse")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(pipeline)?))?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_starter_pipeline_is_dag() -> Result<()> {
    let summary = parse(&starter_pipeline()).await?;
    assert_eq!(
        summary,
        PipelineSummary {
            num_nodes: 3,
            num_edges: 2,
            is_dag: true,
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_feedback_loop_is_not_dag() -> Result<()> {
    let summary = parse(&feedback_pipeline()).await?;
    assert_eq!(summary.num_nodes, 4);
    assert_eq!(summary.num_edges, 4);
    assert!(!summary.is_dag);
    Ok(())
}

#[tokio::test]
async fn test_empty_pipeline_with_dangling_edges() -> Result<()> {
    let pipeline = PipelineBuilder::new().edge("ghost-a", "ghost-b").build();
    let summary = parse(&pipeline).await?;
    assert_eq!(summary.num_nodes, 0);
    assert_eq!(summary.num_edges, 1);
    assert!(summary.is_dag);
    Ok(())
}

#[tokio::test]
async fn test_chain_then_closing_edge() -> Result<()> {
    let ids = ["a", "b", "c", "d"];
    let chain = PipelineBuilder::new().nodes(&ids).chain(&ids);
    assert!(parse(&chain.build()).await?.is_dag);

    let ring = PipelineBuilder::new()
        .nodes(&ids)
        .chain(&ids)
        .edge("d", "a")
        .build();
    assert!(!parse(&ring).await?.is_dag);
    Ok(())
}

#[tokio::test]
async fn test_diamond_is_dag() -> Result<()> {
    let pipeline = PipelineBuilder::new()
        .nodes(&["a", "b", "c", "d"])
        .edge("a", "b")
        .edge("a", "c")
        .edge("b", "d")
        .edge("c", "d")
        .build();
    assert!(parse(&pipeline).await?.is_dag);
    Ok(())
}

#[tokio::test]
async fn test_ghost_edge_is_counted_but_ignored() -> Result<()> {
    let pipeline = PipelineBuilder::new()
        .nodes(&["a", "b"])
        .edge("a", "b")
        .edge("a", "ghost")
        .build();
    let summary = parse(&pipeline).await?;
    assert_eq!(summary.num_edges, 2);
    assert!(summary.is_dag);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_ids_collapse() -> Result<()> {
    // Both "a" nodes are the same vertex, so a -> b -> a is still a cycle
    let pipeline = PipelineBuilder::new()
        .nodes(&["a", "a", "b"])
        .edge("a", "b")
        .edge("b", "a")
        .build();
    let summary = parse(&pipeline).await?;
    assert_eq!(summary.num_nodes, 3);
    assert!(!summary.is_dag);
    Ok(())
}

#[tokio::test]
async fn test_self_loop_rejected() -> Result<()> {
    let pipeline = PipelineBuilder::new().nodes(&["solo"]).edge("solo", "solo").build();
    assert!(!parse(&pipeline).await?.is_dag);
    Ok(())
}
