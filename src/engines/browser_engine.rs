// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{BrowserSettings, Settings};
use crate::engines::traits::{PageRenderer, RenderedPage};
use crate::utils::errors::ResolutionError;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 浏览器渲染引擎
///
/// 基于chromiumoxide实现。每次渲染都会启动（或连接）一个浏览器，
/// 渲染结束后无论成功与否都会关闭。
pub struct BrowserEngine {
    browser: BrowserSettings,
    ready_timeout: Duration,
    settle_delay: Duration,
}

/// 打开的浏览器会话
struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
    /// 本地启动的浏览器需要关闭进程，远程连接只关闭页面
    launched: bool,
}

impl BrowserEngine {
    pub fn new(settings: &Settings) -> Self {
        Self {
            browser: settings.browser.clone(),
            ready_timeout: settings.search.ready_timeout(),
            settle_delay: settings.search.settle_delay(),
        }
    }

    async fn open(&self) -> Result<Session, ResolutionError> {
        let remote = self.browser.remote_debugging_url.clone();

        let (browser, mut handler) = if let Some(ref url) = remote {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url).await.map_err(|e| {
                ResolutionError::Browser(format!("Failed to connect to remote Chrome: {}", e))
            })?
        } else {
            let mut builder = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(self.browser.request_timeout())
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage");

            if !self.browser.headless {
                builder = builder.with_head();
            }

            let config = builder.build().map_err(ResolutionError::Browser)?;
            Browser::launch(config)
                .await
                .map_err(|e| ResolutionError::Browser(format!("Failed to launch Chrome: {}", e)))?
        };

        // CDP events must be drained for the browser to make progress
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Session {
            browser,
            handler,
            launched: remote.is_none(),
        })
    }

    async fn close(&self, mut session: Session) {
        if session.launched {
            if let Err(e) = session.browser.close().await {
                tracing::warn!("Failed to close browser: {}", e);
            }
            if let Err(e) = session.browser.wait().await {
                tracing::warn!("Failed to reap browser process: {}", e);
            }
        }
        session.handler.abort();
    }

    async fn render_page(
        &self,
        browser: &Browser,
        url: &str,
        ready_selector: &str,
    ) -> Result<RenderedPage, ResolutionError> {
        let page = tokio::time::timeout(self.browser.request_timeout(), browser.new_page(url))
            .await
            .map_err(|_| ResolutionError::Browser(format!("Timed out loading {}", url)))?
            .map_err(|e| ResolutionError::Browser(e.to_string()))?;

        let outcome = self.read_when_ready(&page, url, ready_selector).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page: {}", e);
        }

        outcome
    }

    async fn read_when_ready(
        &self,
        page: &Page,
        url: &str,
        ready_selector: &str,
    ) -> Result<RenderedPage, ResolutionError> {
        let started = Instant::now();
        loop {
            if page.find_element(ready_selector).await.is_ok() {
                break;
            }
            if started.elapsed() >= self.ready_timeout {
                return Err(ResolutionError::ContainerNotFound {
                    selector: ready_selector.to_string(),
                    url: url.to_string(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        tracing::debug!(
            "Results container ready after {} ms",
            started.elapsed().as_millis()
        );

        // Tiles are filled in after the container mounts
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        let html = page
            .content()
            .await
            .map_err(|e| ResolutionError::Browser(e.to_string()))?;
        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());

        Ok(RenderedPage {
            url: final_url,
            html,
        })
    }
}

#[async_trait]
impl PageRenderer for BrowserEngine {
    async fn render(&self, url: &str, ready_selector: &str) -> Result<RenderedPage, ResolutionError> {
        let session = self.open().await?;
        let outcome = self.render_page(&session.browser, url, ready_selector).await;
        self.close(session).await;
        outcome
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}
