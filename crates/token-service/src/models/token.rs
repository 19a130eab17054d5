//! 令牌实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 奖励令牌
///
/// 一次性使用的奖励码记录。生命周期只有两个状态：
/// Active（初始）和 Redeemed（终态），唯一的迁移由成功兑换触发。
/// 过期不是独立存储的状态，而是读取或兑换时惰性求值的派生条件。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: i64,
    /// 唯一令牌码（大写字母数字，可带固定前缀）
    pub code: String,
    /// 奖励面值
    pub value: f64,
    /// 币种代码
    pub currency: String,
    /// 用途说明
    #[sqlx(default)]
    pub purpose: Option<String>,
    /// 过期时间（UTC），为空表示永不过期
    #[sqlx(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// 是否已兑换
    pub redeemed: bool,
    /// 兑换方标识，仅在兑换后存在
    #[sqlx(default)]
    pub redeemed_by: Option<String>,
    /// 兑换时间，仅在兑换后存在
    #[sqlx(default)]
    pub redeemed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Token {
    /// 是否已过期
    ///
    /// 过期边界为 expires_at <= now：恰好等于当前时刻视为已过期。
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if expires_at <= now)
    }

    /// 是否可兑换（未兑换且未过期）
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.redeemed && !self.is_expired(now)
    }
}

/// 新建令牌的写入载荷
///
/// created_at / updated_at 由存储层赋值，不在业务逻辑中设置。
#[derive(Debug, Clone)]
pub struct NewToken {
    pub code: String,
    pub value: f64,
    pub currency: String,
    pub purpose: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
