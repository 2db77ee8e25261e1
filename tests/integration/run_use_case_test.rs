// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{url_set, FakeDownloader, FakeRenderer, TestWorkspace};
use std::sync::Arc;
use tv_downloader::application::use_cases::run_use_case::RunState;
use tv_downloader::utils::errors::{DownloadError, PipelineError, ResolutionError, StorageError};

const EP1: &str = "https://tver.jp/episodes/ep1";
const EP2: &str = "https://tver.jp/episodes/ep2";
const EP3: &str = "https://tver.jp/episodes/ep3";
const OLD: &str = "https://tver.jp/episodes/old";

#[tokio::test]
async fn test_successful_run_commits_new_downloads() {
    let ws = TestWorkspace::new();
    ws.seed(&[OLD]).await;

    let renderer = Arc::new(FakeRenderer::with_episodes(&[EP1, EP2]));
    let downloader = Arc::new(FakeDownloader::default());
    let report = ws.run(renderer.clone(), downloader.clone()).await;

    assert_eq!(report.state, RunState::Committed);
    assert_eq!(report.exit_status(), 0);
    assert!(report.error.is_none());
    assert_eq!(report.candidates, 2);
    assert_eq!(report.recorded, vec![EP1.to_string(), EP2.to_string()]);

    assert_eq!(renderer.request_count(), 1);
    assert_eq!(downloader.calls(), vec![EP1.to_string(), EP2.to_string()]);
    assert!(ws.out_dir().is_dir());
    assert_eq!(ws.committed().await, url_set(&[OLD, EP1, EP2]));
}

#[tokio::test]
async fn test_known_urls_are_not_downloaded_again() {
    let ws = TestWorkspace::new();
    ws.seed(&[EP2]).await;

    let renderer = Arc::new(FakeRenderer::with_episodes(&[EP1, EP2, EP3]));
    let downloader = Arc::new(FakeDownloader::default());
    let report = ws.run(renderer, downloader.clone()).await;

    assert!(report.is_committed());
    assert_eq!(report.candidates, 3);
    assert_eq!(report.planned, 2);
    assert_eq!(downloader.calls(), vec![EP1.to_string(), EP3.to_string()]);
    assert_eq!(ws.committed().await, url_set(&[EP1, EP2, EP3]));
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let ws = TestWorkspace::new();

    let first = ws
        .run(
            Arc::new(FakeRenderer::with_episodes(&[EP1, EP2])),
            Arc::new(FakeDownloader::default()),
        )
        .await;
    assert!(first.is_committed());

    let downloader = Arc::new(FakeDownloader::default());
    let second = ws
        .run(
            Arc::new(FakeRenderer::with_episodes(&[EP1, EP2])),
            downloader.clone(),
        )
        .await;

    assert!(second.is_committed());
    assert_eq!(second.planned, 0);
    assert!(second.recorded.is_empty());
    assert!(downloader.calls().is_empty());
    assert_eq!(ws.committed().await, url_set(&[EP1, EP2]));
}

#[tokio::test]
async fn test_download_failure_rolls_back_whole_run() {
    let ws = TestWorkspace::new();
    ws.seed(&[OLD]).await;

    let downloader = Arc::new(FakeDownloader::failing_on(EP2));
    let report = ws
        .run(
            Arc::new(FakeRenderer::with_episodes(&[EP1, EP2, EP3])),
            downloader.clone(),
        )
        .await;

    assert_eq!(report.state, RunState::RolledBack);
    assert_eq!(report.failed_in, Some(RunState::Crawling));
    assert_eq!(report.exit_status(), 1);
    assert!(matches!(
        report.error,
        Some(PipelineError::Download(DownloadError::Failed { ref url, .. })) if url == EP2
    ));

    // ep1 was downloaded and recorded inside the transaction, ep3 never attempted
    assert_eq!(report.recorded, vec![EP1.to_string()]);
    assert_eq!(downloader.calls(), vec![EP1.to_string(), EP2.to_string()]);
    assert_eq!(ws.committed().await, url_set(&[OLD]));
}

#[tokio::test]
async fn test_retry_after_failure_downloads_everything_again() {
    let ws = TestWorkspace::new();

    let failed = ws
        .run(
            Arc::new(FakeRenderer::with_episodes(&[EP1, EP2])),
            Arc::new(FakeDownloader::failing_on(EP2)),
        )
        .await;
    assert!(!failed.is_committed());

    let downloader = Arc::new(FakeDownloader::default());
    let retried = ws
        .run(
            Arc::new(FakeRenderer::with_episodes(&[EP1, EP2])),
            downloader.clone(),
        )
        .await;

    assert!(retried.is_committed());
    assert_eq!(downloader.calls(), vec![EP1.to_string(), EP2.to_string()]);
    assert_eq!(ws.committed().await, url_set(&[EP1, EP2]));
}

#[tokio::test]
async fn test_missing_results_container_rolls_back() {
    let ws = TestWorkspace::new();
    ws.seed(&[OLD]).await;

    let downloader = Arc::new(FakeDownloader::default());
    let report = ws
        .run(Arc::new(FakeRenderer::without_container()), downloader.clone())
        .await;

    assert_eq!(report.state, RunState::RolledBack);
    assert_eq!(report.failed_in, Some(RunState::Resolving));
    assert!(matches!(
        report.error,
        Some(PipelineError::Resolution(ResolutionError::ContainerNotFound { .. }))
    ));
    assert!(downloader.calls().is_empty());
    assert!(!ws.out_dir().exists());
    assert_eq!(ws.committed().await, url_set(&[OLD]));
}

#[tokio::test]
async fn test_empty_results_commit_without_output_dir() {
    let ws = TestWorkspace::new();

    let report = ws
        .run(
            Arc::new(FakeRenderer::with_episodes(&[])),
            Arc::new(FakeDownloader::default()),
        )
        .await;

    assert!(report.is_committed());
    assert_eq!(report.candidates, 0);
    assert!(!ws.out_dir().exists());
    assert!(ws.committed().await.is_empty());
}

#[tokio::test]
async fn test_unreadable_schema_fails_before_search() {
    let mut ws = TestWorkspace::new();
    ws.settings.database.ddl_path = ws.dir.path().join("missing.sql");

    let renderer = Arc::new(FakeRenderer::with_episodes(&[EP1]));
    let downloader = Arc::new(FakeDownloader::default());
    let report = ws.run(renderer.clone(), downloader.clone()).await;

    assert_eq!(report.state, RunState::RolledBack);
    assert_eq!(report.failed_in, Some(RunState::Init));
    assert_eq!(report.exit_status(), 1);
    assert!(matches!(
        report.error,
        Some(PipelineError::Storage(StorageError::SchemaUnreadable { .. }))
    ));
    assert_eq!(renderer.request_count(), 0);
    assert!(downloader.calls().is_empty());
}
