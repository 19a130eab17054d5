//! 令牌 API 处理器
//!
//! 实现令牌发放、查询、兑换的 HTTP 接口

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::dto::{
    ApiResponse, GenerateTokensRequest, ListTokensQuery, RedeemTokenRequest, TokenDto,
};
use crate::error::ApiError;
use crate::state::AppState;

/// 批量生成令牌
///
/// POST /api/tokens/generate
pub async fn generate_tokens(
    State(state): State<AppState>,
    Json(req): Json<GenerateTokensRequest>,
) -> Result<Json<ApiResponse<Vec<TokenDto>>>, ApiError> {
    req.validate()?;

    let tokens = state.issuer.issue(req).await?;
    Ok(Json(ApiResponse::success(
        tokens.into_iter().map(TokenDto::from).collect(),
    )))
}

/// 令牌列表，最新创建在前
///
/// GET /api/tokens?limit=&only_active=
pub async fn list_tokens(
    State(state): State<AppState>,
    Query(query): Query<ListTokensQuery>,
) -> Result<Json<ApiResponse<Vec<TokenDto>>>, ApiError> {
    let tokens = state.query.list(query).await?;
    Ok(Json(ApiResponse::success(
        tokens.into_iter().map(TokenDto::from).collect(),
    )))
}

/// 按码查询单个令牌
///
/// GET /api/tokens/{code}
pub async fn get_token(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<TokenDto>>, ApiError> {
    let token = state.query.get(&code).await?;
    Ok(Json(ApiResponse::success(TokenDto::from(token))))
}

/// 兑换令牌
///
/// POST /api/tokens/redeem
pub async fn redeem_token(
    State(state): State<AppState>,
    Json(req): Json<RedeemTokenRequest>,
) -> Result<Json<ApiResponse<TokenDto>>, ApiError> {
    req.validate()?;

    let token = state.redeemer.redeem(req).await?;
    Ok(Json(ApiResponse::success(TokenDto::from(token))))
}
