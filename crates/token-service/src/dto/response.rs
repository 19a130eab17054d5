//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Token;

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }
}

/// 令牌响应 DTO
///
/// 对外不暴露内部自增 ID，令牌码即对外标识。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDto {
    pub code: String,
    pub value: f64,
    pub currency: String,
    pub purpose: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub redeemed: bool,
    pub redeemed_by: Option<String>,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Token> for TokenDto {
    fn from(token: Token) -> Self {
        Self {
            code: token.code,
            value: token.value,
            currency: token.currency,
            purpose: token.purpose,
            expires_at: token.expires_at,
            redeemed: token.redeemed,
            redeemed_by: token.redeemed_by,
            redeemed_at: token.redeemed_at,
            created_at: token.created_at,
            updated_at: token.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_token_dto_serializes_camel_case_without_id() {
        let now = Utc::now();
        let token = Token {
            id: 42,
            code: "PROMO-AB12CD".to_string(),
            value: 5.0,
            currency: "USD".to_string(),
            purpose: Some("welcome".to_string()),
            expires_at: None,
            redeemed: false,
            redeemed_by: None,
            redeemed_at: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(TokenDto::from(token)).unwrap();
        assert_eq!(json["code"], "PROMO-AB12CD");
        assert_eq!(json["redeemedBy"], serde_json::Value::Null);
        assert!(json.get("id").is_none(), "内部 ID 不应出现在响应中");
        assert!(json.get("expiresAt").is_some());
    }

    #[test]
    fn test_api_response_success_envelope() {
        let resp = ApiResponse::success(vec![1, 2, 3]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["code"], "SUCCESS");
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
