// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DatabaseSettings;
use crate::domain::models::url_record::UrlRecord;
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::infrastructure::database::connection;
use crate::infrastructure::database::entities::url_record;
use crate::utils::errors::StorageError;
use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, Set, SqlErr,
    TransactionTrait,
};
use std::collections::HashSet;
use std::path::PathBuf;

/// 基于SQLite的下载台账仓库实现
///
/// 连接在 `initialize` 时建立，事务一直保持到 `commit` 或 `rollback`
pub struct LedgerRepositoryImpl {
    db_path: PathBuf,
    ddl_path: PathBuf,
    debug: bool,
    db: Option<DatabaseConnection>,
    txn: Option<DatabaseTransaction>,
}

impl LedgerRepositoryImpl {
    /// 创建新的台账仓库实例（尚未连接）
    pub fn new(settings: &DatabaseSettings, debug: bool) -> Self {
        Self {
            db_path: settings.path.clone(),
            ddl_path: settings.ddl_path.clone(),
            debug,
            db: None,
            txn: None,
        }
    }

    fn txn(&self) -> Result<&DatabaseTransaction, StorageError> {
        self.txn.as_ref().ok_or(StorageError::NoTransaction)
    }

    async fn read_schema(&self) -> Result<String, StorageError> {
        let ddl = tokio::fs::read_to_string(&self.ddl_path)
            .await
            .map_err(|source| StorageError::SchemaUnreadable {
                path: self.ddl_path.display().to_string(),
                source,
            })?;

        if ddl.trim().is_empty() {
            return Err(StorageError::SchemaInvalid(format!(
                "{} is empty",
                self.ddl_path.display()
            )));
        }

        Ok(ddl)
    }
}

impl From<&UrlRecord> for url_record::ActiveModel {
    fn from(record: &UrlRecord) -> Self {
        Self {
            url: Set(record.url.clone()),
        }
    }
}

fn database_error(e: DbErr) -> StorageError {
    StorageError::DatabaseError(e.to_string())
}

/// SQLite 把 TEXT 主键冲突报告为 UNIQUE 约束失败
fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || e.to_string().contains("UNIQUE constraint failed")
}

#[async_trait]
impl LedgerRepository for LedgerRepositoryImpl {
    async fn initialize(&mut self) -> Result<(), StorageError> {
        if self.txn.is_some() {
            return Err(StorageError::DatabaseError(
                "ledger already initialized".to_string(),
            ));
        }

        let ddl = self.read_schema().await?;

        let db = match self.db.take() {
            Some(db) => db,
            None => connection::create_pool(&self.db_path, self.debug)
                .await
                .map_err(database_error)?,
        };

        db.execute_unprepared(&ddl)
            .await
            .map_err(|e| StorageError::SchemaInvalid(e.to_string()))?;

        let txn = db.begin().await.map_err(database_error)?;

        self.db = Some(db);
        self.txn = Some(txn);
        tracing::debug!("Ledger opened at {}", self.db_path.display());
        Ok(())
    }

    async fn list_known_urls(&self) -> Result<HashSet<String>, StorageError> {
        let models = url_record::Entity::find()
            .all(self.txn()?)
            .await
            .map_err(database_error)?;

        Ok(models.into_iter().map(|m| m.url).collect())
    }

    async fn record(&self, record: &UrlRecord) -> Result<(), StorageError> {
        url_record::Entity::insert(url_record::ActiveModel::from(record))
            .exec_without_returning(self.txn()?)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StorageError::Duplicate(record.url.clone())
                } else {
                    database_error(e)
                }
            })?;

        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StorageError> {
        let txn = self.txn.take().ok_or(StorageError::NoTransaction)?;
        txn.commit().await.map_err(database_error)
    }

    async fn rollback(&mut self) -> Result<(), StorageError> {
        match self.txn.take() {
            Some(txn) => txn.rollback().await.map_err(database_error),
            None => Ok(()),
        }
    }
}
