// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 编排一次完整运行：初始化台账、搜索、过滤、下载、提交或回滚
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 浏览器渲染引擎和媒体下载引擎
pub mod engines;

/// 基础设施模块
///
/// 台账数据库的连接、实体和仓库实现
pub mod infrastructure;

/// 表示层模块
///
/// 命令行参数解析
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
