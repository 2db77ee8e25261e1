// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::url_record::UrlRecord;
use crate::utils::errors::StorageError;
use async_trait::async_trait;
use std::collections::HashSet;

/// 下载台账仓库特质
///
/// 定义已下载URL集合的持久化接口。`initialize` 之后的所有读写都发生在
/// 同一个事务里，直到 `commit` 或 `rollback`。
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// 确保表结构存在（幂等），然后开启事务
    async fn initialize(&mut self) -> Result<(), StorageError>;

    /// 返回所有已提交的URL
    ///
    /// 在事务内读取，并且总是先于本次运行的任何插入
    async fn list_known_urls(&self) -> Result<HashSet<String>, StorageError>;

    /// 记录一个下载成功的URL，重复时返回 `StorageError::Duplicate`
    async fn record(&self, record: &UrlRecord) -> Result<(), StorageError>;

    /// 提交 `initialize` 之后的全部记录
    async fn commit(&mut self) -> Result<(), StorageError>;

    /// 丢弃 `initialize` 之后的全部记录，没有打开的事务时什么也不做
    async fn rollback(&mut self) -> Result<(), StorageError>;
}
