use crate::orders::OrderError;
use crate::reports::{ExportError, MergeError, StorageError};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// 将存储错误转换为错误码（前端负责本地化）
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::InternalError;
    }

    // redb 错误通过字符串匹配分类
    let err_str = e.to_string().to_lowercase();
    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::SnapshotCorrupted;
    }

    ErrorCode::StorageFailure
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Order(e) => e.into(),
            ManagerError::Merge(MergeError::Overflow { period_key, name }) => {
                AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!("Report totals for {} in {} are out of range", name, period_key),
                )
                .with_detail("period_key", period_key)
            }
            ManagerError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                AppError::with_message(code, e.to_string())
            }
            ManagerError::Export(e) => {
                tracing::error!(error = %e, "Export failed");
                AppError::with_message(ErrorCode::ExportFailed, e.to_string())
            }
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
