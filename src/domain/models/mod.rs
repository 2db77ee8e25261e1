// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 候选集合（candidate）：一次搜索提取到的去重URL以及下载列表
/// - 下载记录（url_record）：台账中持久化的URL
pub mod candidate;
pub mod url_record;
