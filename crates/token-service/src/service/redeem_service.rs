//! 令牌兑换服务
//!
//! 处理单次使用令牌的状态迁移 Active -> Redeemed。
//! 过期检查在迁移时刻惰性求值，不存在独立的 Expired 状态。

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::RedeemTokenRequest;
use crate::error::{ApiError, Result};
use crate::models::Token;
use crate::repository::TokenRepositoryTrait;

/// 令牌兑换服务
pub struct RedeemService {
    repo: Arc<dyn TokenRepositoryTrait>,
}

impl RedeemService {
    pub fn new(repo: Arc<dyn TokenRepositoryTrait>) -> Self {
        Self { repo }
    }

    /// 兑换令牌
    ///
    /// 先行读取用于尽早返回明确错误；真正的状态迁移由存储层的
    /// 条件更新保证原子性，并发兑换同一码时至多一个成功。
    #[instrument(skip(self, request), fields(code = %request.code))]
    pub async fn redeem(&self, request: RedeemTokenRequest) -> Result<Token> {
        request.validate()?;
        let now = Utc::now();

        let token = self
            .repo
            .find_by_code(&request.code)
            .await?
            .ok_or_else(|| ApiError::TokenNotFound(request.code.clone()))?;

        if token.redeemed {
            return Err(ApiError::AlreadyRedeemed(request.code));
        }
        if token.is_expired(now) {
            return Err(ApiError::TokenExpired(request.code));
        }

        match self
            .repo
            .redeem(&request.code, &request.client_id, now)
            .await?
        {
            Some(updated) => {
                info!(
                    code = %updated.code,
                    client_id = %request.client_id,
                    "令牌兑换成功"
                );
                Ok(updated)
            }
            // 条件更新未命中：读取与更新之间状态被并发修改，重读一次分类原因
            None => match self.repo.find_by_code(&request.code).await? {
                Some(current) if current.redeemed => Err(ApiError::AlreadyRedeemed(request.code)),
                Some(_) => Err(ApiError::TokenExpired(request.code)),
                None => Err(ApiError::TokenNotFound(request.code)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewToken;
    use crate::repository::InMemoryTokenRepository;
    use chrono::{DateTime, Duration};

    fn request(code: &str, client_id: &str) -> RedeemTokenRequest {
        RedeemTokenRequest {
            code: code.to_string(),
            client_id: client_id.to_string(),
        }
    }

    async fn seed(
        repo: &InMemoryTokenRepository,
        code: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Token {
        repo.insert(&NewToken {
            code: code.to_string(),
            value: 10.0,
            currency: "USD".to_string(),
            purpose: None,
            expires_at,
        })
        .await
        .unwrap()
    }

    fn service(repo: Arc<InMemoryTokenRepository>) -> RedeemService {
        RedeemService::new(repo)
    }

    #[tokio::test]
    async fn test_redeem_unknown_code_is_not_found() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        let err = service(repo)
            .redeem(request("MISSING", "client-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::TokenNotFound(code) if code == "MISSING"));
    }

    #[tokio::test]
    async fn test_redeem_rejects_empty_fields() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        let svc = service(repo);

        let err = svc.redeem(request("", "client-1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = svc.redeem(request("ABC123", "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_redeem_success_sets_all_redemption_fields() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        let created = seed(&repo, "GOOD01", Some(Utc::now() + Duration::hours(1))).await;

        let updated = service(repo)
            .redeem(request("GOOD01", "abc"))
            .await
            .unwrap();

        assert!(updated.redeemed);
        assert_eq!(updated.redeemed_by.as_deref(), Some("abc"));
        let redeemed_at = updated.redeemed_at.expect("兑换后必须有兑换时间");
        assert!(redeemed_at >= created.created_at);
        assert_eq!(updated.updated_at, redeemed_at);
    }

    /// 失败的幂等性：重复兑换每次都返回 already redeemed，且记录不再变化。
    #[tokio::test]
    async fn test_second_redeem_fails_and_leaves_record_unchanged() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        seed(&repo, "ONCE01", None).await;
        let svc = service(repo.clone());

        let first = svc.redeem(request("ONCE01", "client-1")).await.unwrap();

        let err = svc.redeem(request("ONCE01", "client-2")).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyRedeemed(_)));

        let err = svc.redeem(request("ONCE01", "client-3")).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyRedeemed(_)));

        let current = repo.find_by_code("ONCE01").await.unwrap().unwrap();
        assert_eq!(current.redeemed_by.as_deref(), Some("client-1"));
        assert_eq!(current.redeemed_at, first.redeemed_at);
        assert_eq!(current.updated_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_redeem_expired_token_is_rejected() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        seed(&repo, "OLD001", Some(Utc::now() - Duration::seconds(1))).await;

        let err = service(repo.clone())
            .redeem(request("OLD001", "client-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::TokenExpired(_)));

        let current = repo.find_by_code("OLD001").await.unwrap().unwrap();
        assert!(!current.redeemed, "过期令牌不应被标记为已兑换");
    }

    #[tokio::test]
    async fn test_redeem_far_future_expiry_succeeds() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        seed(&repo, "FRESH1", Some(Utc::now() + Duration::days(30))).await;

        let updated = service(repo)
            .redeem(request("FRESH1", "client-1"))
            .await
            .unwrap();
        assert!(updated.redeemed);
    }

    /// 并发兑换同一码：恰好一个成功，另一个收到 already redeemed。
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_redeems_allow_exactly_one_winner() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        seed(&repo, "RACE01", None).await;
        let svc = Arc::new(service(repo));

        let a = tokio::spawn({
            let svc = svc.clone();
            async move { svc.redeem(request("RACE01", "client-a")).await }
        });
        let b = tokio::spawn({
            let svc = svc.clone();
            async move { svc.redeem(request("RACE01", "client-b")).await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "并发兑换只允许一个成功");

        let loser = results
            .iter()
            .find(|r| r.is_err())
            .and_then(|r| r.as_ref().err());
        assert!(matches!(loser, Some(ApiError::AlreadyRedeemed(_))));
    }
}
