//! E2E tests for the check command
//!
//! Pipelines are written to a temp dir the way the editor would export
//! them, then summarized without a server.

use anyhow::Result;
use pipeval_lib::application::cli::{CliConfig, Commands};
use pipeval_lib::application::commands::handle_check;
use pipeval_lib::{AppConfig, PipelineSummary, execute_command};
use pipeval_tests::fixtures::{feedback_pipeline, starter_pipeline};
use tempfile::TempDir;

#[tokio::test]
async fn test_check_exported_pipelines() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let starter = temp_dir.path().join("starter.json");
    std::fs::write(&starter, serde_json::to_string_pretty(&starter_pipeline())?)?;
    assert_eq!(
        handle_check(&starter).await?,
        PipelineSummary {
            num_nodes: 3,
            num_edges: 2,
            is_dag: true,
        }
    );

    let feedback = temp_dir.path().join("feedback.json");
    std::fs::write(&feedback, serde_json::to_string(&feedback_pipeline())?)?;
    assert!(!handle_check(&feedback).await?.is_dag);

    Ok(())
}

#[tokio::test]
async fn test_check_rejects_non_pipeline_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("notes.json");
    std::fs::write(&path, r#"{"title": "not a pipeline"}"#)?;

    let err = handle_check(&path).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("notes.json"));
    assert!(message.contains("nodes"));

    Ok(())
}

#[tokio::test]
async fn test_execute_check_command() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("pipeline.json");
    std::fs::write(&path, serde_json::to_string(&starter_pipeline())?)?;

    let config = CliConfig {
        app_config: AppConfig::default(),
        command: Some(Commands::Check { file: path }),
    };

    execute_command(config).await
}
