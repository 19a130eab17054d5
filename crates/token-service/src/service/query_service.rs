//! 令牌查询服务
//!
//! 只读查询：按码精确查找与按创建时间倒序列表。

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use crate::dto::ListTokensQuery;
use crate::error::{ApiError, Result};
use crate::models::Token;
use crate::repository::TokenRepositoryTrait;

/// 列表默认返回条数
const DEFAULT_LIMIT: i64 = 100;

/// 列表单次返回条数上限
const MAX_LIMIT: i64 = 500;

/// 令牌查询服务
pub struct QueryService {
    repo: Arc<dyn TokenRepositoryTrait>,
}

impl QueryService {
    pub fn new(repo: Arc<dyn TokenRepositoryTrait>) -> Self {
        Self { repo }
    }

    /// 令牌列表，最新创建在前
    ///
    /// limit 截断到 [1, 500]，越界值不报错。
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: ListTokensQuery) -> Result<Vec<Token>> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let only_active = query.only_active.unwrap_or(false);
        self.repo.list(limit, only_active, Utc::now()).await
    }

    /// 按码精确查找
    #[instrument(skip(self))]
    pub async fn get(&self, code: &str) -> Result<Token> {
        self.repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| ApiError::TokenNotFound(code.to_string()))
    }
}
