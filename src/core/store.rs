//! 环境变量存储 (遵循分离原则：接口与实现分离)
//!
//! - `EnvStore`: 存储接口，加载器只通过它读写
//! - `ProcessEnvStore`: 进程级实现，显式映射表 + 操作系统环境两份视图同步写入
//! - `MemoryEnvStore`: 纯内存实现，不触碰真实环境

use crate::types::EnvValue;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// 环境变量存储接口
pub trait EnvStore: Send + Sync {
    /// 读取原始值，不存在返回 `None`
    fn get_variable(&self, name: &str) -> Option<String>;

    /// 写入所有视图
    fn set_variable(&self, name: &str, value: &str);

    /// 从所有视图中删除
    fn clear_variable(&self, name: &str);

    /// 变量是否存在
    fn has(&self, name: &str) -> bool {
        self.get_variable(name).is_some()
    }

    /// 读取类型化值 (true/false/null/empty 字面量转换)
    fn get(&self, name: &str) -> Option<EnvValue> {
        self.get_variable(name).map(|raw| EnvValue::from_raw(&raw))
    }

    /// 读取类型化值，不存在时返回默认值
    fn get_or(&self, name: &str, default: EnvValue) -> EnvValue {
        self.get(name).unwrap_or(default)
    }

    /// 变量存在且类型化值等于 `expected`
    fn is(&self, name: &str, expected: &EnvValue) -> bool {
        self.get(name).is_some_and(|value| value == *expected)
    }
}

// ==================== 进程环境 ====================

/// 显式映射表 (进程内，优先于操作系统环境)
static REGISTRY: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<String, String>> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// 进程级环境存储
///
/// 读取顺序：显式映射表 → 操作系统环境。
/// 写入与删除同时作用于两份视图。
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvStore;

impl ProcessEnvStore {
    pub fn new() -> Self {
        Self
    }

    /// 操作系统环境是否接受该键值 (`std::env::set_var` 对非法输入会 panic)
    fn os_accepts(name: &str, value: &str) -> bool {
        !name.is_empty() && !name.contains(['=', '\0']) && !value.contains('\0')
    }
}

impl EnvStore for ProcessEnvStore {
    fn get_variable(&self, name: &str) -> Option<String> {
        if let Ok(map) = registry().read()
            && let Some(value) = map.get(name)
        {
            return Some(value.clone());
        }

        std::env::var(name).ok()
    }

    fn set_variable(&self, name: &str, value: &str) {
        if let Ok(mut map) = registry().write() {
            map.insert(name.to_string(), value.to_string());
        }

        if Self::os_accepts(name, value) {
            // 单线程加载阶段调用，不与其他线程并发读写环境
            unsafe {
                std::env::set_var(name, value);
            }
        } else {
            tracing::warn!(name, "变量名或值无法写入操作系统环境，仅保存在显式映射表");
        }
    }

    fn clear_variable(&self, name: &str) {
        if let Ok(mut map) = registry().write() {
            map.remove(name);
        }

        if Self::os_accepts(name, "") {
            unsafe {
                std::env::remove_var(name);
            }
        }
    }
}

// ==================== 内存实现 ====================

/// 内存环境存储
#[derive(Debug, Default)]
pub struct MemoryEnvStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryEnvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定变量初始化
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            inner: RwLock::new(map),
        }
    }

    /// 当前全部变量的副本
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner.read().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnvStore for MemoryEnvStore {
    fn get_variable(&self, name: &str) -> Option<String> {
        self.inner.read().ok()?.get(name).cloned()
    }

    fn set_variable(&self, name: &str, value: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(name.to_string(), value.to_string());
        }
    }

    fn clear_variable(&self, name: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(name);
        }
    }
}
