// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// 远程 Chrome 调试地址的环境变量
pub const CHROMIUM_REMOTE_DEBUGGING_URL: &str = "CHROMIUM_REMOTE_DEBUGGING_URL";

/// 应用程序配置设置
///
/// 启动时构建一次，之后以引用形式传给各个阶段
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 调试开关，开启后输出请求URL、提取结果和下载列表
    pub debug: bool,
    /// 台账数据库配置
    pub database: DatabaseSettings,
    /// 搜索页配置
    pub search: SearchSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 下载器配置
    pub download: DownloadSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite 文件路径
    pub path: PathBuf,
    /// 建表 DDL 文件路径
    pub ddl_path: PathBuf,
}

/// 搜索页配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// 搜索URL模板，`{keywords}` 会被替换为编码后的关键词
    pub url_template: String,
    /// 搜索结果容器选择器
    pub container_selector: String,
    /// 容器内剧集链接选择器
    pub episode_selector: String,
    /// 等待结果容器出现的最长时间（秒）
    pub ready_timeout_secs: u64,
    /// 容器出现后的额外等待时间（毫秒）
    pub settle_delay_ms: u64,
}

/// 浏览器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 远程 Chrome 调试地址，设置后不再本地启动浏览器
    pub remote_debugging_url: Option<String>,
    /// CDP 请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 是否无头模式
    pub headless: bool,
}

/// 下载器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadSettings {
    /// yt-dlp 可执行文件
    pub binary: String,
    /// 默认输出目录
    pub out_dir: PathBuf,
    /// 输出文件名模板（相对于输出目录）
    pub output_template: String,
    /// 额外传给下载器的参数
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl SearchSettings {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl BrowserSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// 可选的额外配置文件以及 `TVDL__` 前缀的环境变量
    ///
    /// # 参数
    ///
    /// * `extra` - 额外配置文件（不含扩展名亦可）
    ///
    /// # 返回值
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new(extra: Option<&str>) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let remote = std::env::var(CHROMIUM_REMOTE_DEBUGGING_URL).ok();
        let mut builder = Self::with_chromium_fallback(Self::defaults()?, remote)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder
            .add_source(Environment::with_prefix("TVDL").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 把 `CHROMIUM_REMOTE_DEBUGGING_URL` 作为远程浏览器地址的默认值，
    /// 配置文件和 `TVDL__BROWSER__REMOTE_DEBUGGING_URL` 仍然优先
    fn with_chromium_fallback(
        builder: ConfigBuilder<DefaultState>,
        remote: Option<String>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        match remote {
            Some(url) if !url.trim().is_empty() => {
                builder.set_default("browser.remote_debugging_url", url)
            }
            _ => Ok(builder),
        }
    }

    /// 仅包含内置默认值的配置
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("debug", false)?
            // Ledger
            .set_default("database.path", "db.sqlite3")?
            .set_default("database.ddl_path", "sql/ddl.sql")?
            // Search page
            .set_default("search.url_template", "https://tver.jp/search/{keywords}")?
            .set_default(
                "search.container_selector",
                r#"div[class^="search-page-main_content"]"#,
            )?
            .set_default("search.episode_selector", r#"a[class^="episode-pattern-"]"#)?
            .set_default("search.ready_timeout_secs", 30)?
            .set_default("search.settle_delay_ms", 5000)?
            // Browser
            .set_default("browser.request_timeout_secs", 30)?
            .set_default("browser.headless", true)?
            // Downloader
            .set_default("download.binary", "yt-dlp")?
            .set_default("download.out_dir", "out")?
            .set_default("download.output_template", "%(title)s.%(ext)s")
    }
}
