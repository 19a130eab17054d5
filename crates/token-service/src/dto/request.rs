//! 请求 DTO 定义
//!
//! 所有 REST API 的请求参数和请求体结构

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

fn default_count() -> u32 {
    1
}

fn default_value() -> f64 {
    0.0
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_length() -> u32 {
    10
}

/// 批量生成令牌请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokensRequest {
    /// 生成数量
    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 500, message = "生成数量必须在1-500之间"))]
    pub count: u32,
    /// 单个令牌的奖励面值
    #[serde(default = "default_value")]
    #[validate(range(min = 0.0, message = "奖励面值不能为负数"))]
    pub value: f64,
    /// 币种代码
    #[serde(default = "default_currency")]
    #[validate(length(min = 1, max = 6, message = "币种代码长度必须在1-6个字符之间"))]
    pub currency: String,
    /// 用途说明
    pub purpose: Option<String>,
    /// 过期时间（UTC），为空表示永不过期
    pub expires_at: Option<DateTime<Utc>>,
    /// 令牌码长度（不含前缀）
    #[serde(default = "default_length")]
    #[validate(range(min = 6, max = 32, message = "令牌码长度必须在6-32之间"))]
    pub length: u32,
    /// 令牌码前缀，如 PROMO-
    pub prefix: Option<String>,
}

/// 兑换令牌请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RedeemTokenRequest {
    /// 待兑换的令牌码
    #[validate(length(min = 1, message = "令牌码不能为空"))]
    pub code: String,
    /// 兑换方标识
    #[validate(length(min = 1, message = "兑换方标识不能为空"))]
    pub client_id: String,
}

/// 令牌列表查询参数
///
/// 查询键保持下划线风格（?limit=&only_active=）。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTokensQuery {
    /// 返回条数上限，截断到 [1,500]，默认 100
    pub limit: Option<i64>,
    /// 仅返回可兑换（未兑换且未过期）的令牌
    pub only_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> GenerateTokensRequest {
        GenerateTokensRequest {
            count: 1,
            value: 0.0,
            currency: "USD".to_string(),
            purpose: None,
            expires_at: None,
            length: 10,
            prefix: None,
        }
    }

    #[test]
    fn test_generate_defaults_from_empty_body() {
        let req: GenerateTokensRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.count, 1);
        assert_eq!(req.value, 0.0);
        assert_eq!(req.currency, "USD");
        assert_eq!(req.length, 10);
        assert!(req.prefix.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_generate_count_bounds() {
        let mut req = base_request();
        req.count = 0;
        assert!(req.validate().is_err());

        req.count = 501;
        assert!(req.validate().is_err());

        req.count = 500;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_generate_value_must_be_non_negative() {
        let mut req = base_request();
        req.value = -0.01;
        assert!(req.validate().is_err());

        req.value = 0.0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_generate_length_bounds() {
        let mut req = base_request();
        req.length = 5;
        assert!(req.validate().is_err());

        req.length = 33;
        assert!(req.validate().is_err());

        req.length = 6;
        assert!(req.validate().is_ok());
        req.length = 32;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_generate_currency_bounds() {
        let mut req = base_request();
        req.currency = String::new();
        assert!(req.validate().is_err());

        req.currency = "TOOLONG".to_string();
        assert!(req.validate().is_err());

        req.currency = "EUR".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_redeem_requires_non_empty_fields() {
        let req = RedeemTokenRequest {
            code: String::new(),
            client_id: "client-1".to_string(),
        };
        assert!(req.validate().is_err());

        let req = RedeemTokenRequest {
            code: "ABC123".to_string(),
            client_id: String::new(),
        };
        assert!(req.validate().is_err());

        let req = RedeemTokenRequest {
            code: "ABC123".to_string(),
            client_id: "client-1".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_redeem_request_uses_camel_case_keys() {
        let req: RedeemTokenRequest =
            serde_json::from_str(r#"{"code":"AB12CD","clientId":"shop-7"}"#).unwrap();
        assert_eq!(req.code, "AB12CD");
        assert_eq!(req.client_id, "shop-7");
    }
}
