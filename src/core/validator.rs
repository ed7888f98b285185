//! 必需变量校验器
//!
//! 每个断言扫描全部变量，收集所有失败项后一次性返回错误。

use crate::core::loader::Loader;
use crate::core::parser;
use crate::error::{EnvError, Result};

/// 必需变量校验器
pub struct Validator<'a> {
    variables: Vec<String>,
    loader: &'a Loader,
}

impl<'a> Validator<'a> {
    /// 创建校验器，并立即执行存在性检查
    ///
    /// # Errors
    ///
    /// 任一变量不存在时返回 `EnvError::ValidationFailed`。
    pub fn new<I, S>(variables: I, loader: &'a Loader) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let validator = Self {
            variables: variables.into_iter().map(Into::into).collect(),
            loader,
        };

        validator.not_null()?;

        Ok(validator)
    }

    /// 每个变量都必须存在
    ///
    /// # Errors
    ///
    /// 失败项格式为 `"<name> is missing"`。
    pub fn not_null(&self) -> Result<&Self> {
        self.assert(|value| value.is_some(), "is missing")
    }

    /// 每个变量去掉首尾空白后都不能为空
    ///
    /// # Errors
    ///
    /// 失败项格式为 `"<name> is empty"`。
    pub fn not_empty(&self) -> Result<&Self> {
        self.assert(
            |value| value.is_some_and(|v| !parser::trim_blank(v).is_empty()),
            "is empty",
        )
    }

    /// 每个变量的值都必须在给定集合内
    ///
    /// # Errors
    ///
    /// 失败项格式为 `"<name> is not an allowed value"`。
    pub fn allowed_values<S: AsRef<str>>(&self, choices: &[S]) -> Result<&Self> {
        self.assert(
            |value| value.is_some_and(|v| choices.iter().any(|choice| choice.as_ref() == v)),
            "is not an allowed value",
        )
    }

    /// 被校验的变量名
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    fn assert<F>(&self, check: F, message: &str) -> Result<&Self>
    where
        F: Fn(Option<&str>) -> bool,
    {
        let failures: Vec<String> = self
            .variables
            .iter()
            .filter(|name| !check(self.loader.get_variable(name).as_deref()))
            .map(|name| format!("{name} {message}"))
            .collect();

        if failures.is_empty() {
            Ok(self)
        } else {
            tracing::debug!(count = failures.len(), "环境变量校验失败");
            Err(EnvError::ValidationFailed(failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryEnvStore;
    use std::sync::Arc;

    fn loader_with(vars: &[(&str, &str)]) -> Loader {
        let store = Arc::new(MemoryEnvStore::with_vars(vars.iter().copied()));
        Loader::new(Vec::new(), false, store)
    }

    #[test]
    fn test_construction_checks_presence() {
        let loader = loader_with(&[("PRESENT", "1")]);

        assert!(Validator::new(["PRESENT"], &loader).is_ok());

        let err = Validator::new(["X"], &loader).err().unwrap();
        assert!(err.to_string().contains("X is missing"));
    }

    #[test]
    fn test_all_failures_reported_together() {
        let loader = loader_with(&[("PRESENT", "1")]);

        let err = Validator::new(["X", "PRESENT", "Y"], &loader).err().unwrap();
        assert_eq!(
            err.failures(),
            &["X is missing".to_string(), "Y is missing".to_string()]
        );
        assert!(err.to_string().contains("X is missing, Y is missing"));
    }

    #[test]
    fn test_not_empty() {
        let loader = loader_with(&[("FILLED", "value"), ("BLANK", "   "), ("EMPTY", "")]);

        let validator = Validator::new(["FILLED", "BLANK", "EMPTY"], &loader).unwrap();
        let err = validator.not_empty().err().unwrap();

        assert_eq!(
            err.failures(),
            &["BLANK is empty".to_string(), "EMPTY is empty".to_string()]
        );
    }

    #[test]
    fn test_not_empty_only_trims_ascii_whitespace() {
        let loader = loader_with(&[("NBSP", "\u{a0}"), ("TABS", "\t\x0B")]);

        let validator = Validator::new(["NBSP", "TABS"], &loader).unwrap();
        let err = validator.not_empty().err().unwrap();

        assert_eq!(err.failures(), &["TABS is empty".to_string()]);
    }

    #[test]
    fn test_allowed_values_and_chaining() {
        let loader = loader_with(&[("APP_ENV", "production"), ("DEBUG", "false")]);

        let validator = Validator::new(["APP_ENV"], &loader).unwrap();
        assert!(
            validator
                .not_empty()
                .and_then(|v| v.allowed_values(&["local", "production"]))
                .is_ok()
        );

        let validator = Validator::new(["APP_ENV", "DEBUG"], &loader).unwrap();
        let err = validator.allowed_values(&["local", "staging"]).err().unwrap();
        assert_eq!(
            err.failures(),
            &[
                "APP_ENV is not an allowed value".to_string(),
                "DEBUG is not an allowed value".to_string()
            ]
        );
    }

    #[test]
    fn test_allowed_values_is_exact_match() {
        let loader = loader_with(&[("DEBUG", "1")]);
        let validator = Validator::new(["DEBUG"], &loader).unwrap();

        assert!(validator.allowed_values(&["true", "01"]).is_err());
        assert!(validator.allowed_values(&["1"]).is_ok());
    }
}
