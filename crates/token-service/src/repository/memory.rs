//! 内存令牌仓储
//!
//! 基于 DashMap 的内存实现，适用于测试和本地开发环境。
//! 兑换在条目锁内完成检查与写入，提供与数据库条件更新
//! 相同的单文档原子性。

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::traits::TokenRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{NewToken, Token};

/// 内存令牌仓储
///
/// 以令牌码为键存储，ID 按插入顺序递增。
#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    tokens: DashMap<String, Token>,
    next_id: AtomicI64,
}

impl InMemoryTokenRepository {
    /// 创建空的内存仓储
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前存储的令牌总数
    pub fn count(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl TokenRepositoryTrait for InMemoryTokenRepository {
    async fn insert(&self, token: &NewToken) -> Result<Token> {
        // 与数据库唯一索引对齐：重复码是存储层约束违例
        if self.tokens.contains_key(&token.code) {
            return Err(ApiError::Internal(format!("令牌码重复: {}", token.code)));
        }

        let now = Utc::now();
        let created = Token {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            code: token.code.clone(),
            value: token.value,
            currency: token.currency.clone(),
            purpose: token.purpose.clone(),
            expires_at: token.expires_at,
            redeemed: false,
            redeemed_by: None,
            redeemed_at: None,
            created_at: now,
            updated_at: now,
        };

        self.tokens.insert(created.code.clone(), created.clone());
        Ok(created)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Token>> {
        Ok(self.tokens.get(code).map(|entry| entry.value().clone()))
    }

    async fn code_exists(&self, code: &str) -> Result<bool> {
        Ok(self.tokens.contains_key(code))
    }

    async fn list(&self, limit: i64, only_active: bool, now: DateTime<Utc>) -> Result<Vec<Token>> {
        let mut tokens: Vec<Token> = self
            .tokens
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|token| !only_active || token.is_active(now))
            .collect();

        // ID 按插入顺序分配，倒序即最新创建在前
        tokens.sort_by(|a, b| b.id.cmp(&a.id));
        tokens.truncate(limit.max(0) as usize);
        Ok(tokens)
    }

    async fn redeem(
        &self,
        code: &str,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Token>> {
        // get_mut 持有条目锁，检查与写入之间无竞态窗口
        if let Some(mut entry) = self.tokens.get_mut(code) {
            let token = entry.value_mut();
            if token.redeemed || token.is_expired(now) {
                return Ok(None);
            }
            token.redeemed = true;
            token.redeemed_by = Some(client_id.to_string());
            token.redeemed_at = Some(now);
            token.updated_at = now;
            return Ok(Some(token.clone()));
        }
        Ok(None)
    }
}
