// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 默认日志过滤规则
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "info,tv_downloader=debug"
    } else {
        "info,tv_downloader=info"
    }
}

/// 初始化日志系统
///
/// `RUST_LOG` 优先，否则按调试开关选择默认过滤规则。
/// 日志写到 stderr，stdout 留给下载器的进度输出。
pub fn init_telemetry(debug: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(debug).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
