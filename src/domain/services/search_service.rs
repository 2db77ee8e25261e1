// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchSettings;
use crate::domain::models::candidate::CandidateSet;
use crate::engines::traits::{PageRenderer, RenderedPage};
use crate::utils::errors::ResolutionError;
use crate::utils::url_utils::{build_search_url, resolve_url};
use scraper::{Html, Selector};
use std::sync::Arc;
use url::Url;

/// 搜索解析服务
///
/// 把关键词变成候选剧集URL集合
pub struct SearchService {
    renderer: Arc<dyn PageRenderer>,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(renderer: Arc<dyn PageRenderer>, settings: &SearchSettings) -> Self {
        Self {
            renderer,
            settings: settings.clone(),
        }
    }

    /// 按关键词搜索并提取剧集链接
    ///
    /// # 参数
    ///
    /// * `keywords` - 搜索关键词，以单个空格连接
    ///
    /// # 返回值
    ///
    /// * `Ok(CandidateSet)` - 去重后的候选URL
    /// * `Err(ResolutionError)` - 页面渲染失败或找不到结果容器
    pub async fn resolve(&self, keywords: &[String]) -> Result<CandidateSet, ResolutionError> {
        if keywords.is_empty() {
            return Err(ResolutionError::InvalidUrl("no search keywords".to_string()));
        }

        let req_url = build_search_url(&self.settings.url_template, keywords)
            .map_err(ResolutionError::InvalidUrl)?;
        tracing::debug!("req_url[{}]", req_url);

        let page = self
            .renderer
            .render(req_url.as_str(), &self.settings.container_selector)
            .await?;

        let candidates = EpisodeLinkExtractor::extract(
            &page,
            &self.settings.container_selector,
            &self.settings.episode_selector,
        )?;
        tracing::debug!(
            "lst_url[{:?}]",
            candidates.iter().collect::<Vec<_>>()
        );

        Ok(candidates)
    }
}

/// 剧集链接提取器
pub struct EpisodeLinkExtractor;

impl EpisodeLinkExtractor {
    /// 从渲染后的页面中提取剧集链接
    ///
    /// 只在第一个结果容器内查找；没有 `href` 的链接直接跳过，
    /// 相对链接按页面URL解析为绝对URL。
    ///
    /// # 参数
    ///
    /// * `page` - 渲染后的页面
    /// * `container_selector` - 结果容器选择器
    /// * `episode_selector` - 剧集链接选择器
    ///
    /// # 返回值
    ///
    /// * `Ok(CandidateSet)` - 提取到的链接集合（可能为空）
    /// * `Err(ResolutionError)` - 选择器无效或找不到结果容器
    pub fn extract(
        page: &RenderedPage,
        container_selector: &str,
        episode_selector: &str,
    ) -> Result<CandidateSet, ResolutionError> {
        let container_sel = parse_selector(container_selector)?;
        let episode_sel = parse_selector(episode_selector)?;
        let base = Url::parse(&page.url).map_err(|e| ResolutionError::InvalidUrl(e.to_string()))?;

        let document = Html::parse_document(&page.html);
        let container = document.select(&container_sel).next().ok_or_else(|| {
            ResolutionError::ContainerNotFound {
                selector: container_selector.to_string(),
                url: page.url.clone(),
            }
        })?;

        let mut candidates = CandidateSet::new();
        for anchor in container.select(&episode_sel) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            match resolve_url(&base, href.trim()) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                    candidates.insert(url.to_string());
                }
                Ok(url) => tracing::debug!("Skipping non-http link {}", url),
                Err(e) => tracing::debug!("Skipping unparseable link {:?}: {}", href, e),
            }
        }

        Ok(candidates)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ResolutionError> {
    Selector::parse(selector).map_err(|e| ResolutionError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}
