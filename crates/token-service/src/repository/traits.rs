//! 仓储 Trait 定义
//!
//! 定义令牌存储接口，服务层依赖抽象而非具体实现，
//! 支持 mock 测试与内存实现替换。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{NewToken, Token};

/// 令牌仓储接口
///
/// 实现方必须保证 redeem 是单文档原子条件更新：
/// 对同一令牌码的并发兑换至多一个成功。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepositoryTrait: Send + Sync {
    /// 持久化一条新令牌，返回带存储层时间戳的完整记录
    async fn insert(&self, token: &NewToken) -> Result<Token>;

    /// 按码精确查找
    async fn find_by_code(&self, code: &str) -> Result<Option<Token>>;

    /// 码是否已被占用（发码唯一性检查）
    async fn code_exists(&self, code: &str) -> Result<bool>;

    /// 按创建时间倒序列出令牌
    ///
    /// only_active 为 true 时仅返回未兑换且在 now 时刻未过期的记录。
    async fn list(&self, limit: i64, only_active: bool, now: DateTime<Utc>) -> Result<Vec<Token>>;

    /// 条件兑换：仅当令牌在 now 时刻未兑换且未过期时，
    /// 原子写入 redeemed/redeemed_by/redeemed_at/updated_at。
    ///
    /// 条件未命中时返回 None，由调用方重读记录分类失败原因。
    async fn redeem(
        &self,
        code: &str,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Token>>;
}
