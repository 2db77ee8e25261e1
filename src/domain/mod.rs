// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：候选URL集合和下载记录
/// - 仓库接口（repositories）：下载台账的持久化抽象
/// - 服务（services）：搜索、过滤和下载
///
/// 领域层不依赖于任何外部实现，浏览器、下载器和数据库都通过特质注入。
pub mod models;
pub mod repositories;
pub mod services;
