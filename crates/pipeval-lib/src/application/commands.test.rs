use super::*;
use crate::pipeline::{Edge, Node};
use tempfile::TempDir;

fn write_pipeline(dir: &Path, name: &str, pipeline: &Pipeline) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(pipeline).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn test_check_reports_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(
        vec![Node::new("a", "llm"), Node::new("b", "llm")],
        vec![Edge::new("a", "b"), Edge::new("b", "a")],
    );
    let path = write_pipeline(temp_dir.path(), "cyclic.json", &pipeline);

    let summary = handle_check(&path).await.unwrap();
    assert_eq!(
        summary,
        PipelineSummary {
            num_nodes: 2,
            num_edges: 2,
            is_dag: false,
        }
    );
}

#[tokio::test]
async fn test_check_error_names_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");

    let err = handle_check(&path).await.unwrap_err();
    assert!(format!("{:#}", err).contains("missing.json"));
}

#[tokio::test]
async fn test_version_command_runs_without_logger() {
    let config = CliConfig {
        app_config: AppConfig::default(),
        command: Some(Commands::Version),
    };
    execute_command(config).await.unwrap();
}

#[test]
fn test_check_logs_never_share_stdout_with_summary() {
    let app_config = AppConfig {
        log_output: LogOutput::Stdout,
        ..AppConfig::default()
    };

    let check = Commands::Check {
        file: std::path::PathBuf::from("pipeline.json"),
    };
    assert_eq!(
        logger_config_for(&check, &app_config).output,
        LogOutput::Stderr
    );
    assert_eq!(
        logger_config_for(&Commands::Serve, &app_config).output,
        LogOutput::Stdout
    );
}
