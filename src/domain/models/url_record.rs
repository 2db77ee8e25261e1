// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 台账中的一条下载记录
///
/// 只有一个属性：规范化后的绝对URL。下载成功后创建，之后不再修改或删除。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlRecord {
    pub url: String,
}

impl UrlRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl fmt::Display for UrlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
