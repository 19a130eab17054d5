//! 业务服务层
//!
//! 发放、兑换、查询三个服务，均依赖注入的仓储接口

pub mod issue_service;
pub mod query_service;
pub mod redeem_service;

pub use issue_service::IssueService;
pub use query_service::QueryService;
pub use redeem_service::RedeemService;
