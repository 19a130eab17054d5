//! 令牌仓储（PostgreSQL）
//!
//! tokens 表的全部数据访问。兑换通过条件 UPDATE 保证单行原子性。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::traits::TokenRepositoryTrait;
use crate::error::Result;
use crate::models::{NewToken, Token};

/// 令牌仓储
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepositoryTrait for TokenRepository {
    /// 插入新令牌
    ///
    /// created_at / updated_at 由数据库默认值赋值；
    /// code 唯一索引是发码检查之外的数据库级约束。
    async fn insert(&self, token: &NewToken) -> Result<Token> {
        let created = sqlx::query_as::<_, Token>(
            r#"
            INSERT INTO tokens (code, value, currency, purpose, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, code, value, currency, purpose, expires_at,
                      redeemed, redeemed_by, redeemed_at, created_at, updated_at
            "#,
        )
        .bind(&token.code)
        .bind(token.value)
        .bind(&token.currency)
        .bind(&token.purpose)
        .bind(token.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Token>> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            SELECT id, code, value, currency, purpose, expires_at,
                   redeemed, redeemed_by, redeemed_at, created_at, updated_at
            FROM tokens
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }

    async fn code_exists(&self, code: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tokens WHERE code = $1)")
            .bind(code)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.0)
    }

    async fn list(&self, limit: i64, only_active: bool, now: DateTime<Utc>) -> Result<Vec<Token>> {
        let tokens = if only_active {
            sqlx::query_as::<_, Token>(
                r#"
                SELECT id, code, value, currency, purpose, expires_at,
                       redeemed, redeemed_by, redeemed_at, created_at, updated_at
                FROM tokens
                WHERE redeemed = false
                  AND (expires_at IS NULL OR expires_at > $2)
                ORDER BY created_at DESC, id DESC
                LIMIT $1
                "#,
            )
            .bind(limit)
            .bind(now)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Token>(
                r#"
                SELECT id, code, value, currency, purpose, expires_at,
                       redeemed, redeemed_by, redeemed_at, created_at, updated_at
                FROM tokens
                ORDER BY created_at DESC, id DESC
                LIMIT $1
                "#,
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(tokens)
    }

    /// 条件兑换
    ///
    /// WHERE 子句同时校验未兑换与未过期，整条语句即并发下的原子单元：
    /// 两个并发请求至多一个命中条件。
    async fn redeem(
        &self,
        code: &str,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Token>> {
        let updated = sqlx::query_as::<_, Token>(
            r#"
            UPDATE tokens
            SET redeemed = true, redeemed_by = $2, redeemed_at = $3, updated_at = $3
            WHERE code = $1
              AND redeemed = false
              AND (expires_at IS NULL OR expires_at > $3)
            RETURNING id, code, value, currency, purpose, expires_at,
                      redeemed, redeemed_by, redeemed_at, created_at, updated_at
            "#,
        )
        .bind(code)
        .bind(client_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}
