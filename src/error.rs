//! 错误处理模块 (修复原则：明确抛出异常)

use std::error::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("文件IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 未加引号的值中包含空白字符
    #[error("DotEnv values containing spaces must be surrounded by quotes: {0}")]
    InvalidValue(String),

    /// 每一项的格式为 "<name> <message>"
    #[error("One or more environment variables failed validation: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("命令未找到: {0}")]
    CommandNotFound(String),

    #[error("命令执行失败: {0}")]
    CommandExecutionFailed(String),
}

/// 详细的错误报告函数 (透明原则)
impl EnvError {
    /// 报告错误，支持详细/安静模式
    /// verbose = true: 详细错误链
    /// verbose = false: 关键信息，安静模式
    pub fn report(&self, verbose: bool) {
        if verbose {
            eprintln!("❌ 错误: {}", self);

            if let Some(source) = self.source() {
                eprintln!("  └─ 原因: {}", source);
                let mut current = source.source();
                while let Some(next) = current {
                    eprintln!("     └─ {}", next);
                    current = next.source();
                }
            }
        } else {
            match self {
                EnvError::ValidationFailed(_) | EnvError::InvalidValue(_) => {
                    eprintln!("{}", self)
                }
                EnvError::Io(err) => eprintln!("文件错误: {}", err),
                _ => eprintln!("错误: {}", self),
            }
        }
    }

    /// 校验失败时的违规条目
    #[must_use]
    pub fn failures(&self) -> &[String] {
        match self {
            EnvError::ValidationFailed(items) => items,
            _ => &[],
        }
    }
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, EnvError>;
