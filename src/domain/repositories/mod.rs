// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层的持久化契约，具体实现由基础设施层提供：
/// - 下载台账仓库（ledger_repository）：记录已下载的URL，支持事务
pub mod ledger_repository;
