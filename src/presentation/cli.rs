// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::run_request::RunRequest;
use crate::application::use_cases::run_use_case::RunReport;
use crate::config::settings::Settings;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// 回滚时先于错误输出的固定提示
pub const FAILURE_CONTEXT: &str = "Run failed; no downloads were recorded.";

/// 命令行参数
#[derive(Parser, Debug)]
#[command(
    name = "tv-downloader",
    version,
    about = "Search for episodes and download the ones not fetched yet"
)]
pub struct Cli {
    /// Search keywords, joined with a single space
    #[arg(required = true, num_args = 1..)]
    pub keyword: Vec<String>,

    /// Output directory for downloaded media
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Ledger database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Extra configuration file layered over the defaults
    #[arg(long)]
    pub config: Option<String>,
}

impl Cli {
    /// 把命令行中的覆盖项写入配置
    pub fn apply(&self, settings: &mut Settings) {
        if self.debug {
            settings.debug = true;
        }
        if let Some(db) = &self.db {
            settings.database.path = db.clone();
        }
        if let Some(out) = &self.out {
            settings.download.out_dir = out.clone();
        }
    }

    /// 生成本次运行的参数
    pub fn into_request(self, settings: &Settings) -> RunRequest {
        let out_dir = self.out.unwrap_or_else(|| settings.download.out_dir.clone());
        RunRequest::new(self.keyword, out_dir)
    }
}

/// 输出运行失败信息：固定提示一行，错误一行。运行成功时不输出任何内容
pub fn report_failure(w: &mut impl Write, report: &RunReport) -> io::Result<()> {
    if let Some(err) = &report.error {
        writeln!(w, "{}", FAILURE_CONTEXT)?;
        writeln!(w, "{}", err)?;
    }
    Ok(())
}
