//! envload - .env 文件加载工具
//!
//! 读取 .env 文件或目录，规范化键值后写入环境变量存储，
//! 并提供必需变量校验。
//!
//! ```ignore
//! use envload::DotEnv;
//!
//! let mut dotenv = DotEnv::new(["."]);
//! dotenv.load()?;
//! dotenv.required(["DB_HOST", "DB_NAME"])?.not_empty()?;
//! ```

// 核心加载流程
pub mod core;

// 加载入口与全局访问
pub mod dotenv;

// 错误类型
pub mod error;

// 数据结构
pub mod types;

// CLI 定义
pub mod cli;

// 工具
pub mod utils;

#[cfg(test)]
mod test_utils;

// 重新导出常用类型
pub use crate::core::{EnvStore, Loader, MemoryEnvStore, ProcessEnvStore, Validator};
pub use dotenv::DotEnv;
pub use error::{EnvError, Result};
pub use types::{Config, EnvValue, LoadMode, OutputFormat, Variables};
