//! 测试工具模块
//!
//! 提供统一的测试环境管理，避免环境变量污染

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// 环境变量守卫 - 自动清理
pub struct EnvGuard {
    original_vars: HashMap<String, String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    /// 创建一个新的环境守卫，记录当前环境变量
    pub fn new() -> Self {
        let original_vars: HashMap<String, String> = env::vars().collect();
        Self { original_vars }
    }

    /// 设置测试环境变量（自动包装为 unsafe）
    pub fn set_var(&self, key: &str, value: &str) {
        unsafe {
            env::set_var(key, value);
        }
    }

    /// 移除环境变量（自动包装为 unsafe）
    pub fn remove_var(&self, key: &str) {
        unsafe {
            env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    /// 释放时恢复原始环境变量
    fn drop(&mut self) {
        let current_vars: Vec<String> = env::vars().map(|(k, _)| k).collect();
        for key in current_vars {
            if !self.original_vars.contains_key(&key) {
                self.remove_var(&key);
            }
        }

        for (key, value) in &self.original_vars {
            if env::var(key).as_ref() != Ok(value) {
                self.set_var(key, value);
            }
        }
    }
}

/// 在目录中写入一个 env 文件并返回路径
pub fn write_env_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_guard_cleanup() {
        {
            let guard = EnvGuard::new();
            guard.set_var("ENVLOAD_TEST_CLEANUP_VAR", "cleanup_test");
            assert_eq!(
                env::var("ENVLOAD_TEST_CLEANUP_VAR").ok(),
                Some("cleanup_test".to_string())
            );
        }
        // guard 被释放后，变量应该被清理
        assert!(env::var("ENVLOAD_TEST_CLEANUP_VAR").is_err());
    }

    #[test]
    fn test_write_env_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_env_file(temp_dir.path(), ".env", "A=1");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "A=1");
    }
}
