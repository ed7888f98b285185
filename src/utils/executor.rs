//! 命令执行器
//!
//! 子进程继承当前进程的环境与 stdin/stdout/stderr；
//! 加载得到的变量已写入进程环境，不再单独注入。

use crate::error::{EnvError, Result};
use std::process::{Command, Stdio};

/// 命令执行器
pub struct CommandExecutor;

impl CommandExecutor {
    /// 执行命令
    ///
    /// # 参数
    /// - `command`: 命令和参数，如 `["python", "app.py"]`
    ///
    /// # 返回
    /// 子进程的退出码
    pub fn exec(command: &[String]) -> Result<i32> {
        let Some((program, args)) = command.split_first() else {
            return Err(EnvError::CommandExecutionFailed("命令不能为空".to_string()));
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        tracing::debug!(program = %program, args = args.len(), "执行命令");

        let status = cmd.status().map_err(|e| {
            EnvError::CommandNotFound(format!(
                "{}: {} (请确保命令在 PATH 中或使用完整路径)",
                program, e
            ))
        })?;

        match status.code() {
            Some(code) => Ok(code),
            None => Err(EnvError::CommandExecutionFailed(format!(
                "{} 被信号终止",
                program
            ))),
        }
    }
}
