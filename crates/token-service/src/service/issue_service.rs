//! 令牌发放服务
//!
//! 负责批量生成唯一令牌码并持久化。
//!
//! ## 发放流程
//!
//! 1. 参数校验（失败时整单拒绝，不产生任何写入）
//! 2. 逐个生成候选码并做唯一性检查，单个令牌最多重试 10 次
//! 3. 持久化每条记录
//! 4. 返回全部新记录

use std::sync::Arc;

use rand::Rng;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::GenerateTokensRequest;
use crate::error::{ApiError, Result};
use crate::models::{NewToken, Token};
use crate::repository::TokenRepositoryTrait;

/// 令牌码字符集：大写字母 + 数字
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 单个令牌的最大发码尝试次数
const MAX_CODE_ATTEMPTS: u32 = 10;

/// 令牌发放服务
pub struct IssueService {
    repo: Arc<dyn TokenRepositoryTrait>,
}

impl IssueService {
    pub fn new(repo: Arc<dyn TokenRepositoryTrait>) -> Self {
        Self { repo }
    }

    /// 批量生成令牌
    #[instrument(skip(self, request), fields(count = request.count))]
    pub async fn issue(&self, request: GenerateTokensRequest) -> Result<Vec<Token>> {
        request.validate()?;

        let mut created = Vec::with_capacity(request.count as usize);
        for _ in 0..request.count {
            let code = self
                .unique_code(request.length, request.prefix.as_deref())
                .await?;
            let token = self
                .repo
                .insert(&NewToken {
                    code,
                    value: request.value,
                    currency: request.currency.clone(),
                    purpose: request.purpose.clone(),
                    expires_at: request.expires_at,
                })
                .await?;
            created.push(token);
        }

        info!(count = created.len(), "令牌发放成功");
        Ok(created)
    }

    /// 生成未被占用的令牌码
    ///
    /// 候选码与已有记录冲突时重新生成，尝试次数达到上限后
    /// 返回发码耗尽错误。
    async fn unique_code(&self, length: u32, prefix: Option<&str>) -> Result<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let mut code = generate_code(length);
            if let Some(prefix) = prefix {
                code = format!("{prefix}{code}");
            }
            if !self.repo.code_exists(&code).await? {
                return Ok(code);
            }
        }
        Err(ApiError::CodeGenerationExhausted)
    }
}

/// 从字符集均匀采样生成令牌码
///
/// 必须使用密码学安全随机源：码值可预测时客户端能猜出未发放的码。
/// rand::rng() 返回的 ThreadRng 是 CSPRNG。
fn generate_code(length: u32) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
