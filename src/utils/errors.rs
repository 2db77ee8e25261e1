// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 台账存储错误类型
///
/// 覆盖 schema 读取、数据库连接、读写和唯一约束冲突
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read schema file {path}: {source}")]
    SchemaUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("schema definition rejected: {0}")]
    SchemaInvalid(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("url already recorded: {0}")]
    Duplicate(String),

    #[error("no open transaction")]
    NoTransaction,
}

/// 搜索解析错误类型
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("invalid search url: {0}")]
    InvalidUrl(String),

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("results container `{selector}` not found on {url}")]
    ContainerNotFound { selector: String, url: String },

    #[error("browser error: {0}")]
    Browser(String),
}

/// 下载错误类型
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch downloader `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("download of {url} failed ({status})")]
    Failed { url: String, status: String },
}

/// 单次运行的错误汇总
///
/// 编排器只在这一层捕获错误，并据此决定提交或回滚
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl PipelineError {
    /// 错误类别名称，用于日志字段
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Storage(_) => "storage",
            PipelineError::Resolution(_) => "resolution",
            PipelineError::Download(_) => "download",
        }
    }
}
