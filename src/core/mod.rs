//! 核心加载流程
//!
//! - source: 读取文件/目录为原始行
//! - parser: 行解析与值规范化
//! - store: 环境变量存储接口与实现
//! - loader: 串联以上步骤并合并到存储
//! - validator: 必需变量校验

pub mod loader;
pub mod parser;
pub mod source;
pub mod store;
pub mod validator;

pub use loader::Loader;
pub use store::{EnvStore, MemoryEnvStore, ProcessEnvStore};
pub use validator::Validator;
