//! 加载入口
//!
//! `DotEnv` 负责选择加载模式并持有最近一次使用的加载器；
//! 模块级的 `get`/`has`/`is`/`set` 面向进程环境，供需要全局访问的调用方使用。

use crate::core::{EnvStore, Loader, ProcessEnvStore, Validator};
use crate::error::Result;
use crate::types::{EnvValue, LoadMode, Variables};
use std::path::PathBuf;
use std::sync::Arc;

/// .env 加载入口
pub struct DotEnv {
    paths: Vec<PathBuf>,
    store: Arc<dyn EnvStore>,
    loader: Loader,
}

impl DotEnv {
    /// 使用进程环境作为存储
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_store(paths, Arc::new(ProcessEnvStore::new()))
    }

    /// 使用指定存储
    pub fn with_store<I, P>(paths: I, store: Arc<dyn EnvStore>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        let loader = Loader::with_mode(Vec::new(), LoadMode::Overload, store.clone());

        Self {
            paths,
            store,
            loader,
        }
    }

    /// 加载并设置变量，不覆盖已存在的变量
    ///
    /// # Errors
    ///
    /// 未加引号的值包含空白时返回 `EnvError::InvalidValue`。
    pub fn load(&mut self) -> Result<&mut Self> {
        self.run(LoadMode::Load)
    }

    /// 加载并设置变量，覆盖已存在的变量
    ///
    /// # Errors
    ///
    /// 同 [`DotEnv::load`]。
    pub fn overload(&mut self) -> Result<&mut Self> {
        self.run(LoadMode::Overload)
    }

    fn run(&mut self, mode: LoadMode) -> Result<&mut Self> {
        self.loader = Loader::with_mode(self.paths.clone(), mode, self.store.clone());
        tracing::debug!(mode = %mode, paths = self.paths.len(), "加载 env 文件");
        self.loader.load()?;
        Ok(self)
    }

    /// 返回全部解析结果；`mode` 为 `None` 时不写存储
    ///
    /// # Errors
    ///
    /// 同 [`DotEnv::load`]。
    pub fn to_array(&mut self, mode: Option<LoadMode>) -> Result<Variables> {
        self.loader = Loader::with_mode(self.paths.clone(), LoadMode::Overload, self.store.clone());
        self.loader.to_array(mode)
    }

    /// 校验必需变量 (构造时已检查存在性)
    ///
    /// # Errors
    ///
    /// 任一变量不存在时返回 `EnvError::ValidationFailed`。
    pub fn required<I, S>(&self, variables: I) -> Result<Validator<'_>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Validator::new(variables, &self.loader)
    }

    /// 通过当前加载器设置变量 (同样经过规范化与覆盖策略)
    ///
    /// # Errors
    ///
    /// 未加引号的值包含空白时返回 `EnvError::InvalidValue`。
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.loader.set_variable(name, Some(value))
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn store(&self) -> &Arc<dyn EnvStore> {
        &self.store
    }
}

// ==================== 进程环境快捷访问 ====================

/// 读取类型化值，不存在返回 `None`
pub fn get(name: &str) -> Option<EnvValue> {
    ProcessEnvStore.get(name)
}

/// 读取类型化值，不存在时返回默认值
pub fn get_or(name: &str, default: impl Into<EnvValue>) -> EnvValue {
    ProcessEnvStore.get_or(name, default.into())
}

/// 读取类型化值，不存在时调用 `default`
pub fn get_or_else<F>(name: &str, default: F) -> EnvValue
where
    F: FnOnce() -> EnvValue,
{
    ProcessEnvStore.get(name).unwrap_or_else(default)
}

/// 变量是否存在
pub fn has(name: &str) -> bool {
    ProcessEnvStore.has(name)
}

/// 变量存在且等于 `expected`
pub fn is(name: &str, expected: impl Into<EnvValue>) -> bool {
    ProcessEnvStore.is(name, &expected.into())
}

/// 规范化后写入进程环境 (覆盖已存在的值)
///
/// # Errors
///
/// 未加引号的值包含空白时返回 `EnvError::InvalidValue`。
pub fn set(name: &str, value: &str) -> Result<()> {
    let mut loader = Loader::with_mode(Vec::new(), LoadMode::Overload, Arc::new(ProcessEnvStore));
    loader.set_variable(name, Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryEnvStore;
    use crate::error::EnvError;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".env"), "ENVIRONMENT=live\n").unwrap();
        fs::write(
            temp_dir.path().join(".env.database"),
            "DB_HOST=localhost\nDB_NAME=test\nDB_USER=user\nDB_PASS=password\n",
        )
        .unwrap();
        temp_dir
    }

    #[test]
    fn test_load_directory_into_store() {
        let temp_dir = fixture();
        let store = Arc::new(MemoryEnvStore::new());

        let mut dotenv = DotEnv::with_store([temp_dir.path()], store.clone());
        dotenv.load().unwrap();

        assert!(store.is("ENVIRONMENT", &"live".into()));
        assert_eq!(store.get_variable("DB_PASS"), Some("password".to_string()));
        assert!(dotenv.loader().is_immutable());
    }

    #[test]
    fn test_required_after_load() {
        let temp_dir = fixture();
        let store = Arc::new(MemoryEnvStore::new());

        let mut dotenv = DotEnv::with_store([temp_dir.path()], store);
        dotenv.load().unwrap();

        assert!(dotenv.required(["DB_HOST", "DB_NAME"]).is_ok());

        let err = dotenv.required(["MISSING_A", "DB_HOST", "MISSING_B"]).err().unwrap();
        assert!(matches!(err, EnvError::ValidationFailed(ref items) if items.len() == 2));
        assert!(err.to_string().contains("MISSING_A is missing, MISSING_B is missing"));
    }

    #[test]
    fn test_to_array_modes() {
        let temp_dir = fixture();
        let database = temp_dir.path().join(".env.database");

        let store = Arc::new(MemoryEnvStore::new());
        let mut dotenv = DotEnv::with_store([&database], store.clone());
        let vars = dotenv.to_array(None).unwrap();
        assert_eq!(vars.len(), 4);
        assert!(store.is_empty());

        let vars = dotenv.to_array(LoadMode::parse("invalid")).unwrap();
        assert_eq!(vars.len(), 4);
        assert!(store.is_empty());

        dotenv.to_array(LoadMode::parse("load")).unwrap();
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_set_normalizes_value() {
        let store = Arc::new(MemoryEnvStore::new());
        let mut dotenv = DotEnv::with_store(Vec::<PathBuf>::new(), store.clone());

        dotenv.set("CUSTOM_VARIABLE", "\"something's\"").unwrap();
        dotenv.set("CUSTOM_VARIABLE_2", "\"something's").unwrap();

        assert!(store.is("CUSTOM_VARIABLE", &"something's".into()));
        assert!(store.is("CUSTOM_VARIABLE_2", &"\"something's".into()));
        assert!(dotenv.required(["CUSTOM_VARIABLE"]).is_ok());
    }

    #[test]
    fn test_set_after_load_keeps_existing() {
        let temp_dir = fixture();
        let store = Arc::new(MemoryEnvStore::new());

        let mut dotenv = DotEnv::with_store([temp_dir.path().join(".env")], store.clone());
        dotenv.load().unwrap();
        dotenv.set("ENVIRONMENT", "local").unwrap();

        assert!(store.is("ENVIRONMENT", &"live".into()));
    }
}
