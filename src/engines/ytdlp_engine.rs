// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DownloadSettings;
use crate::engines::traits::MediaDownloader;
use crate::utils::errors::DownloadError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;

/// yt-dlp 下载引擎
///
/// 以子进程方式调用 yt-dlp，进度输出直接继承到终端
pub struct YtDlpEngine {
    binary: String,
    extra_args: Vec<String>,
}

impl YtDlpEngine {
    pub fn new(settings: &DownloadSettings) -> Self {
        Self {
            binary: settings.binary.clone(),
            extra_args: settings.extra_args.clone(),
        }
    }

    /// 构造命令行参数
    fn args(&self, url: &str, output_template: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.extra_args.iter().map(OsString::from).collect();
        args.push("--no-playlist".into());
        args.push("-o".into());
        args.push(output_template.as_os_str().to_owned());
        args.push("--".into());
        args.push(url.into());
        args
    }
}

#[async_trait]
impl MediaDownloader for YtDlpEngine {
    async fn download(&self, url: &str, output_template: &Path) -> Result<(), DownloadError> {
        tracing::debug!("{} {:?}", self.binary, self.args(url, output_template));

        let status = Command::new(&self.binary)
            .args(self.args(url, output_template))
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| DownloadError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !status.success() {
            return Err(DownloadError::Failed {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
