// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::{DownloadError, ResolutionError};
use async_trait::async_trait;
use std::path::Path;

/// 渲染完成的页面
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// 最终页面URL，用于解析相对链接
    pub url: String,
    /// 客户端渲染后的HTML
    pub html: String,
}

/// 页面渲染引擎特质
///
/// 打开页面，等待 `ready_selector` 出现后返回渲染后的HTML
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// 渲染页面
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    /// * `ready_selector` - 页面就绪的标志元素
    ///
    /// # 返回值
    ///
    /// * `Ok(RenderedPage)` - 渲染结果
    /// * `Err(ResolutionError)` - 浏览器错误或等待超时
    async fn render(&self, url: &str, ready_selector: &str) -> Result<RenderedPage, ResolutionError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

/// 媒体下载引擎特质
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// 下载媒体
    ///
    /// `output_template` 支持下载器自身的标题、扩展名占位符
    async fn download(&self, url: &str, output_template: &Path) -> Result<(), DownloadError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
