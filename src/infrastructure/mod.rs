// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 负责与外部系统的交互，依赖领域层的抽象接口：
/// - 数据库（database）：SQLite 连接和实体映射
/// - 仓库实现（repositories）：下载台账的具体实现
pub mod database;
pub mod repositories;
