//! 令牌服务错误类型定义
//!
//! 每类失败映射到独立的错误码，客户端按错误码分支，无需解析文本。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 令牌服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 资源不存在
    #[error("令牌不存在: {0}")]
    TokenNotFound(String),

    // 业务冲突
    #[error("令牌已被兑换: {0}")]
    AlreadyRedeemed(String),
    #[error("令牌已过期: {0}")]
    TokenExpired(String),

    // 发码重试耗尽
    #[error("无法生成唯一令牌码，请重试")]
    CodeGenerationExhausted,

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 存储是否不可达（连接层面失败，而非语句执行失败）
fn is_store_unreachable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::TokenNotFound(_) => StatusCode::NOT_FOUND,

            Self::AlreadyRedeemed(_) | Self::TokenExpired(_) => StatusCode::CONFLICT,

            Self::Database(e) if is_store_unreachable(e) => StatusCode::SERVICE_UNAVAILABLE,

            Self::CodeGenerationExhausted | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::TokenNotFound(_) => "TOKEN_NOT_FOUND",
            Self::AlreadyRedeemed(_) => "ALREADY_REDEEMED",
            Self::TokenExpired(_) => "TOKEN_EXPIRED",
            Self::CodeGenerationExhausted => "CODE_GENERATION_EXHAUSTED",
            Self::Database(e) if is_store_unreachable(e) => "STORE_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) if is_store_unreachable(e) => {
                tracing::error!(error = %e, "存储不可达");
                "存储暂不可用，请稍后重试".to_string()
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": code,
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
