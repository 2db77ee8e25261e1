// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::candidate::{CandidateSet, Worklist};
use std::collections::HashSet;

/// 从候选集合中去掉台账里已有的URL
///
/// 纯函数，不访问网络和存储。输出保持候选集合的迭代顺序。
pub fn filter(candidates: &CandidateSet, known: &HashSet<String>) -> Worklist {
    candidates
        .iter()
        .filter(|url| !known.contains(url.as_str()))
        .cloned()
        .collect()
}
