// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 爬取服务（crawl_service）：顺序下载并写入台账
/// - 过滤服务（filter_service）：候选URL与台账求差集
/// - 搜索服务（search_service）：关键词搜索和剧集链接提取
pub mod crawl_service;
pub mod filter_service;
pub mod search_service;
