// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::run_request::RunRequest;
use crate::domain::models::candidate::{CandidateSet, Worklist};
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::domain::services::crawl_service::{CrawlReport, CrawlService};
use crate::domain::services::filter_service;
use crate::domain::services::search_service::SearchService;
use crate::utils::errors::PipelineError;
use std::fmt;
use std::process::ExitCode;

/// 运行状态
///
/// 成功路径：Init → Resolving → Filtering → Crawling → Committed；
/// 台账打开后任何阶段出错都进入 RolledBack。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Resolving,
    Filtering,
    Crawling,
    Committed,
    RolledBack,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Committed | RunState::RolledBack)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Init => "init",
            RunState::Resolving => "resolving",
            RunState::Filtering => "filtering",
            RunState::Crawling => "crawling",
            RunState::Committed => "committed",
            RunState::RolledBack => "rolled-back",
        };
        f.write_str(name)
    }
}

/// 运行结果
#[derive(Debug)]
pub struct RunReport {
    /// 终止状态
    pub state: RunState,
    /// 出错时所在的阶段
    pub failed_in: Option<RunState>,
    /// 搜索得到的候选数量
    pub candidates: usize,
    /// 下载列表长度
    pub planned: usize,
    /// 本次下载成功的URL；回滚时这些记录已被丢弃
    pub recorded: Vec<String>,
    /// 导致回滚的错误
    pub error: Option<PipelineError>,
}

impl RunReport {
    pub fn is_committed(&self) -> bool {
        self.state == RunState::Committed
    }

    /// 进程退出状态：提交为 0，回滚为 1
    pub fn exit_status(&self) -> u8 {
        if self.is_committed() {
            0
        } else {
            1
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// 各阶段之间传递的数据
#[derive(Default)]
struct RunContext {
    candidates: CandidateSet,
    worklist: Worklist,
    crawl: CrawlReport,
}

/// 运行用例（编排器）
///
/// 独占台账事务，依次驱动搜索、过滤和下载，最后提交或回滚
pub struct RunUseCase {
    ledger: Box<dyn LedgerRepository>,
    search: SearchService,
    crawler: CrawlService,
    state: RunState,
}

impl RunUseCase {
    pub fn new(
        ledger: Box<dyn LedgerRepository>,
        search: SearchService,
        crawler: CrawlService,
    ) -> Self {
        Self {
            ledger,
            search,
            crawler,
            state: RunState::Init,
        }
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!("{} -> {}", self.state, next);
        self.state = next;
    }

    /// 执行一个阶段，返回下一个状态
    async fn step(
        &mut self,
        request: &RunRequest,
        ctx: &mut RunContext,
    ) -> Result<RunState, PipelineError> {
        match self.state {
            RunState::Init => {
                tracing::info!("Initializing ledger");
                self.ledger.initialize().await?;
                Ok(RunState::Resolving)
            }
            RunState::Resolving => {
                tracing::info!("Searching for {:?}", request.keywords.join(" "));
                ctx.candidates = self.search.resolve(&request.keywords).await?;
                tracing::info!("Found {} episode link(s)", ctx.candidates.len());
                Ok(RunState::Filtering)
            }
            RunState::Filtering => {
                tracing::info!("Filtering against ledger");
                let known = self.ledger.list_known_urls().await?;
                ctx.worklist = filter_service::filter(&ctx.candidates, &known);
                tracing::debug!("url_web[{:?}]", ctx.worklist);
                tracing::info!(
                    "{} new episode(s), {} already downloaded",
                    ctx.worklist.len(),
                    ctx.candidates.len() - ctx.worklist.len()
                );
                Ok(RunState::Crawling)
            }
            RunState::Crawling => {
                tracing::info!("Downloading to {}", request.out_dir.display());
                self.crawler
                    .crawl(&ctx.worklist, &request.out_dir, self.ledger.as_ref(), &mut ctx.crawl)
                    .await?;
                self.ledger.commit().await?;
                Ok(RunState::Committed)
            }
            terminal => Ok(terminal),
        }
    }

    /// 执行一次完整运行
    ///
    /// 不会返回 `Err`：所有错误都在这里被捕获，台账随即回滚，
    /// 错误放在 `RunReport::error` 中交给调用方报告。
    pub async fn execute(mut self, request: &RunRequest) -> RunReport {
        let mut ctx = RunContext::default();
        let mut failure = None;

        while !self.state.is_terminal() {
            match self.step(request, &mut ctx).await {
                Ok(next) => self.transition(next),
                Err(e) => {
                    tracing::error!(
                        kind = e.kind(),
                        stage = %self.state,
                        "Stage failed, rolling back"
                    );
                    tracing::debug!("{:?}", e);
                    failure = Some((self.state, e));
                    if let Err(rollback_err) = self.ledger.rollback().await {
                        tracing::warn!("Rollback failed: {}", rollback_err);
                    }
                    self.transition(RunState::RolledBack);
                }
            }
        }

        let (failed_in, error) = match failure {
            Some((stage, e)) => (Some(stage), Some(e)),
            None => (None, None),
        };

        if self.state == RunState::Committed {
            tracing::info!(
                "Recorded {} of {} new episode(s)",
                ctx.crawl.recorded.len(),
                ctx.crawl.planned
            );
        } else if !ctx.crawl.recorded.is_empty() {
            tracing::warn!(
                "{} episode(s) were downloaded but not recorded because the run was rolled back",
                ctx.crawl.recorded.len()
            );
        }

        RunReport {
            state: self.state,
            failed_in,
            candidates: ctx.candidates.len(),
            planned: ctx.crawl.planned,
            recorded: ctx.crawl.recorded,
            error,
        }
    }
}
