// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;

/// 一次运行的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// 搜索关键词（至少一个）
    pub keywords: Vec<String>,
    /// 下载输出目录
    pub out_dir: PathBuf,
}

impl RunRequest {
    pub fn new(keywords: Vec<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            keywords,
            out_dir: out_dir.into(),
        }
    }
}
