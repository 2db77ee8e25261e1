// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 负责把各个领域服务编排成一次完整的运行
pub mod dto;
pub mod use_cases;
