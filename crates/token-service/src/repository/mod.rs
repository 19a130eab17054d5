//! 数据访问层
//!
//! 仓储接口与两种实现：PostgreSQL（生产）与内存（测试/本地开发）

pub mod memory;
pub mod token_repo;
pub mod traits;

pub use memory::InMemoryTokenRepository;
pub use token_repo::TokenRepository;
pub use traits::TokenRepositoryTrait;
