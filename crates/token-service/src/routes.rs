//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// 构建令牌相关的路由
pub fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/tokens/generate", post(handlers::token::generate_tokens))
        .route("/tokens", get(handlers::token::list_tokens))
        .route("/tokens/{code}", get(handlers::token::get_token))
        .route("/tokens/redeem", post(handlers::token::redeem_token))
}

/// 构建完整的 API 路由
///
/// 返回所有令牌 API 路由（不含前缀，由调用方在 main.rs 中挂载到 /api）
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(token_routes())
}
