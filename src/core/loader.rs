//! 加载器：行读取 → 解析 → 规范化 → 合并到存储

use crate::core::parser;
use crate::core::source;
use crate::core::store::EnvStore;
use crate::error::Result;
use crate::types::{LoadMode, Variables};
use std::path::PathBuf;
use std::sync::Arc;

/// .env 加载器
///
/// - `immutable`: 存储中已有非空值时不覆盖
/// - `setter`: 关闭时只收集结果，不写存储
/// - `attributes`: 本次运行解析出的全部变量，无论是否写入存储
pub struct Loader {
    paths: Vec<PathBuf>,
    immutable: bool,
    setter: bool,
    attributes: Variables,
    store: Arc<dyn EnvStore>,
}

impl Loader {
    pub fn new(paths: Vec<PathBuf>, immutable: bool, store: Arc<dyn EnvStore>) -> Self {
        Self {
            paths,
            immutable,
            setter: true,
            attributes: Variables::new(),
            store,
        }
    }

    /// 按加载模式创建
    pub fn with_mode(paths: Vec<PathBuf>, mode: LoadMode, store: Arc<dyn EnvStore>) -> Self {
        Self::new(paths, mode.is_immutable(), store)
    }

    /// 读取所有路径并写入存储
    ///
    /// # Errors
    ///
    /// 未加引号的值包含空白时返回 `EnvError::InvalidValue`；
    /// 出错行之前的变量已经合并。
    pub fn load(&mut self) -> Result<()> {
        self.setter = true;
        self.process()
    }

    /// 读取所有路径并返回解析结果
    ///
    /// `mode` 为 `Some` 时按对应策略写入存储；为 `None` 时不触碰存储。
    ///
    /// # Errors
    ///
    /// 同 [`Loader::load`]。
    pub fn to_array(&mut self, mode: Option<LoadMode>) -> Result<Variables> {
        match mode {
            Some(mode) => {
                self.immutable = mode.is_immutable();
                self.setter = true;
            }
            None => self.setter = false,
        }

        self.process()?;

        Ok(self.attributes.clone())
    }

    fn process(&mut self) -> Result<()> {
        let lines = source::read_lines(&self.paths);

        for line in &lines {
            if parser::is_comment(line) || !parser::is_setter(line) {
                continue;
            }

            self.set_variable(line, None)?;
        }

        Ok(())
    }

    /// 规范化并合并一个变量
    ///
    /// `name` 含 `=` 时按第一个 `=` 拆分，忽略 `value` 参数。
    ///
    /// # Errors
    ///
    /// 未加引号的值包含空白时返回 `EnvError::InvalidValue`。
    pub fn set_variable(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        let (name, value) = match parser::split_entry(name) {
            Some(entry) => (entry.name, entry.value),
            None => (name.to_string(), value.unwrap_or_default().to_string()),
        };

        let name = parser::normalize_name(&name);
        let value = parser::normalize_value(&name, &value)?;
        let value = parser::resolve_nested(&value, |reference| self.get_variable(reference));

        self.merge(name, value);

        Ok(())
    }

    fn merge(&mut self, name: String, value: String) {
        self.attributes.insert(name.clone(), value.clone());

        if !self.setter {
            return;
        }

        if self.immutable && self.store.get_variable(&name).is_some() {
            tracing::debug!(name = %name, "变量已存在，保持原值");
            return;
        }

        self.store.set_variable(&name, &value);
        tracing::debug!(name = %name, "设置变量");
    }

    /// 读取变量：先查存储，再查本次解析结果
    pub fn get_variable(&self, name: &str) -> Option<String> {
        self.store
            .get_variable(name)
            .or_else(|| self.attributes.get(name).cloned())
    }

    /// 删除变量；不可覆盖模式下忽略
    pub fn clear_variable(&mut self, name: &str) {
        if self.immutable {
            return;
        }

        self.store.clear_variable(name);
    }

    /// 本次运行解析出的全部变量
    pub fn attributes(&self) -> &Variables {
        &self.attributes
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    pub fn store(&self) -> &Arc<dyn EnvStore> {
        &self.store
    }
}
