// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tv_downloader::application::use_cases::run_use_case::RunUseCase;
use tv_downloader::config::settings::Settings;
use tv_downloader::domain::services::crawl_service::CrawlService;
use tv_downloader::domain::services::search_service::SearchService;
use tv_downloader::engines::browser_engine::BrowserEngine;
use tv_downloader::engines::ytdlp_engine::YtDlpEngine;
use tv_downloader::infrastructure::repositories::ledger_repo_impl::LedgerRepositoryImpl;
use tv_downloader::presentation::cli::{report_failure, Cli};
use tv_downloader::utils::telemetry;

/// 主函数
///
/// 解析参数、加载配置并执行一次运行。提交返回 0，回滚返回 1。
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Load configuration
    let mut settings = Settings::new(cli.config.as_deref())?;
    cli.apply(&mut settings);

    // 2. Initialize logging
    telemetry::init_telemetry(settings.debug);
    info!("Starting tv-downloader...");

    // 3. Initialize components
    let ledger = Box::new(LedgerRepositoryImpl::new(&settings.database, settings.debug));
    let renderer = Arc::new(BrowserEngine::new(&settings));
    let downloader = Arc::new(YtDlpEngine::new(&settings.download));
    let search = SearchService::new(renderer, &settings.search);
    let crawler = CrawlService::new(downloader, settings.download.output_template.clone());

    // 4. Run
    let request = cli.into_request(&settings);
    let report = RunUseCase::new(ledger, search, crawler)
        .execute(&request)
        .await;

    report_failure(&mut std::io::stderr().lock(), &report)?;

    Ok(report.exit_code())
}
