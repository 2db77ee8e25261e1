// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::url_record::UrlRecord;
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::engines::traits::MediaDownloader;
use crate::utils::errors::{DownloadError, PipelineError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 一次下载过程的进度
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// 下载列表长度
    pub planned: usize,
    /// 已下载并写入台账（尚未提交）的URL
    pub recorded: Vec<String>,
}

/// 爬取服务
///
/// 逐个下载列表中的URL，每下载成功一个就写入台账
pub struct CrawlService {
    /// 下载引擎
    downloader: Arc<dyn MediaDownloader>,
    /// 输出文件名模板（相对于输出目录）
    output_template: String,
}

impl CrawlService {
    /// 创建新的爬取服务实例
    ///
    /// # 参数
    ///
    /// * `downloader` - 下载引擎
    /// * `output_template` - 输出文件名模板，例如 `%(title)s.%(ext)s`
    pub fn new(downloader: Arc<dyn MediaDownloader>, output_template: impl Into<String>) -> Self {
        Self {
            downloader,
            output_template: output_template.into(),
        }
    }

    /// 输出路径模板，以输出目录为根
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.output_template)
    }

    /// 顺序下载并记录
    ///
    /// 任何一个下载失败都会立即返回，后面的URL不再尝试；已写入的记录
    /// 留在未提交的事务里，由调用方决定回滚。
    ///
    /// # 参数
    ///
    /// * `worklist` - 下载列表
    /// * `output_dir` - 输出目录
    /// * `ledger` - 已开启事务的台账
    /// * `report` - 进度，失败时也保留已完成的部分
    pub async fn crawl(
        &self,
        worklist: &[String],
        output_dir: &Path,
        ledger: &dyn LedgerRepository,
        report: &mut CrawlReport,
    ) -> Result<(), PipelineError> {
        report.planned = worklist.len();
        if worklist.is_empty() {
            return Ok(());
        }

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| DownloadError::OutputDir {
                path: output_dir.display().to_string(),
                source,
            })?;

        let output_path = self.output_path(output_dir);

        for (index, url) in worklist.iter().enumerate() {
            tracing::info!(
                "[{}/{}] Downloading {} via {}",
                index + 1,
                worklist.len(),
                url,
                self.downloader.name()
            );
            self.downloader.download(url, &output_path).await?;
            ledger.record(&UrlRecord::new(url.as_str())).await?;
            report.recorded.push(url.clone());
        }

        Ok(())
    }
}
