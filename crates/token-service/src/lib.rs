//! 奖励令牌服务
//!
//! 提供一次性奖励令牌的批量发放、兑换与查询 REST API。
//!
//! ## 核心功能
//!
//! - **令牌发放**：批量生成唯一随机令牌码，支持自定义码长、前缀和有效期
//! - **令牌兑换**：单次使用的原子状态迁移，过期在兑换时刻惰性判定
//! - **查询**：按码精确查询与按创建时间倒序列表
//!
//! ## 模块结构
//!
//! - `dto`: 请求和响应的数据传输对象
//! - `models`: 令牌实体模型
//! - `error`: 错误类型定义
//! - `repository`: 数据访问层（PostgreSQL 实现与内存实现）
//! - `service`: 发放/兑换/查询业务服务
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据访问：sqlx (PostgreSQL)
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

// 重新导出核心类型
pub use dto::{
    ApiResponse, GenerateTokensRequest, ListTokensQuery, RedeemTokenRequest, TokenDto,
};
pub use error::{ApiError, Result};
pub use models::{NewToken, Token};
pub use repository::{InMemoryTokenRepository, TokenRepository, TokenRepositoryTrait};
pub use service::{IssueService, QueryService, RedeemService};
pub use state::AppState;
