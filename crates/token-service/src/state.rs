//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::repository::TokenRepositoryTrait;
use crate::service::{IssueService, QueryService, RedeemService};

/// Axum 应用共享状态
///
/// 持有三个业务服务。仓储接口在构建时注入，
/// 测试时可替换为内存实现。
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<IssueService>,
    pub redeemer: Arc<RedeemService>,
    pub query: Arc<QueryService>,
}

impl AppState {
    /// 基于仓储接口构建应用状态
    pub fn new(repo: Arc<dyn TokenRepositoryTrait>) -> Self {
        Self {
            issuer: Arc::new(IssueService::new(repo.clone())),
            redeemer: Arc::new(RedeemService::new(repo.clone())),
            query: Arc::new(QueryService::new(repo)),
        }
    }
}
