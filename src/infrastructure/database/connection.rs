// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;
use std::time::Duration;

/// SQLite 连接URL，文件不存在时自动创建
///
/// 路径按段做百分号编码，驱动解析时会还原，所以文件名里的 `?`、`%`、`#` 不会
/// 被当成查询参数或转义序列
pub fn sqlite_url(path: &Path) -> String {
    let path = path.to_string_lossy();
    let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
    format!("sqlite://{}?mode=rwc", encoded.join("/"))
}

/// 创建数据库连接
///
/// 台账在整个运行期间只被编排器独占使用，因此连接池固定为一个连接，
/// 事务开启后的所有读写都走同一个连接。
///
/// # 参数
///
/// * `path` - SQLite 文件路径
/// * `debug` - 是否输出SQL日志
///
/// # 返回值
///
/// * `Ok(DatabaseConnection)` - 数据库连接
/// * `Err(DbErr)` - 连接过程中出现的错误
pub async fn create_pool(path: &Path, debug: bool) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(sqlite_url(path));

    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(debug);

    Database::connect(opt).await
}
