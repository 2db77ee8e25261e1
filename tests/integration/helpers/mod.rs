// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tv_downloader::application::dto::run_request::RunRequest;
use tv_downloader::application::use_cases::run_use_case::{RunReport, RunUseCase};
use tv_downloader::config::settings::{DatabaseSettings, Settings};
use tv_downloader::domain::models::url_record::UrlRecord;
use tv_downloader::domain::repositories::ledger_repository::LedgerRepository;
use tv_downloader::domain::services::crawl_service::CrawlService;
use tv_downloader::domain::services::search_service::SearchService;
use tv_downloader::engines::traits::{MediaDownloader, PageRenderer, RenderedPage};
use tv_downloader::infrastructure::repositories::ledger_repo_impl::LedgerRepositoryImpl;
use tv_downloader::utils::errors::{DownloadError, ResolutionError};

/// 渲染一个固定的搜索结果页
pub struct FakeRenderer {
    episodes: Vec<String>,
    with_container: bool,
    pub requests: Mutex<Vec<String>>,
}

impl FakeRenderer {
    pub fn with_episodes(episodes: &[&str]) -> Self {
        Self {
            episodes: episodes.iter().map(|s| s.to_string()).collect(),
            with_container: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 页面里没有结果容器
    pub fn without_container() -> Self {
        Self {
            episodes: Vec::new(),
            with_container: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn html(&self) -> String {
        if !self.with_container {
            return r#"<html><body><div class="error-page">Not found</div></body></html>"#
                .to_string();
        }

        let anchors: String = self
            .episodes
            .iter()
            .map(|url| format!(r#"<a class="episode-pattern-c_item" href="{}">ep</a>"#, url))
            .collect();
        format!(
            r#"<html><body><div class="search-page-main_content__list">{}</div></body></html>"#,
            anchors
        )
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn render(
        &self,
        url: &str,
        _ready_selector: &str,
    ) -> Result<RenderedPage, ResolutionError> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(RenderedPage {
            url: url.to_string(),
            html: self.html(),
        })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// 记录调用的下载器，可指定在某个URL上失败
#[derive(Default)]
pub struct FakeDownloader {
    fail_on: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDownloader {
    pub fn failing_on(url: &str) -> Self {
        Self {
            fail_on: Some(url.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaDownloader for FakeDownloader {
    async fn download(&self, url: &str, _output_template: &Path) -> Result<(), DownloadError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail_on.as_deref() == Some(url) {
            return Err(DownloadError::Failed {
                url: url.to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// 一个临时工作目录，内含台账数据库和输出目录
pub struct TestWorkspace {
    pub dir: TempDir,
    pub settings: Settings,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::with_defaults().unwrap();
        settings.database = DatabaseSettings {
            path: dir.path().join("db.sqlite3"),
            ddl_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sql/ddl.sql"),
        };
        settings.download.out_dir = dir.path().join("out");
        Self { dir, settings }
    }

    pub fn out_dir(&self) -> PathBuf {
        self.settings.download.out_dir.clone()
    }

    /// 直接写入并提交若干记录
    pub async fn seed(&self, urls: &[&str]) {
        let mut ledger = LedgerRepositoryImpl::new(&self.settings.database, false);
        ledger.initialize().await.unwrap();
        for url in urls {
            ledger.record(&UrlRecord::new(*url)).await.unwrap();
        }
        ledger.commit().await.unwrap();
    }

    /// 读取已提交的记录
    pub async fn committed(&self) -> HashSet<String> {
        let mut ledger = LedgerRepositoryImpl::new(&self.settings.database, false);
        ledger.initialize().await.unwrap();
        let urls = ledger.list_known_urls().await.unwrap();
        ledger.rollback().await.unwrap();
        urls
    }

    /// 用给定的渲染器和下载器执行一次运行
    pub async fn run(
        &self,
        renderer: Arc<FakeRenderer>,
        downloader: Arc<FakeDownloader>,
    ) -> RunReport {
        let ledger = Box::new(LedgerRepositoryImpl::new(&self.settings.database, false));
        let search = SearchService::new(renderer, &self.settings.search);
        let crawler = CrawlService::new(downloader, self.settings.download.output_template.clone());
        let request = RunRequest::new(vec!["news".to_string()], self.out_dir());

        RunUseCase::new(ledger, search, crawler)
            .execute(&request)
            .await
    }
}

pub fn url_set(urls: &[&str]) -> HashSet<String> {
    urls.iter().map(|s| s.to_string()).collect()
}
