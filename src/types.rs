//! 核心数据结构定义 (表达原则：用数据结构表达逻辑)

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// 已解析的变量集合 (name → value，键唯一，后写覆盖先写)
pub type Variables = BTreeMap<String, String>;

/// 加载模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadMode {
    /// 不覆盖已存在的变量
    Load,
    /// 覆盖已存在的变量
    Overload,
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMode::Load => write!(f, "load"),
            LoadMode::Overload => write!(f, "overload"),
        }
    }
}

impl LoadMode {
    /// 从字符串解析，只接受 "load" 与 "overload"
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "load" => Some(LoadMode::Load),
            "overload" => Some(LoadMode::Overload),
            _ => None,
        }
    }

    /// 是否保留已存在的变量
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, LoadMode::Load)
    }
}

/// 一行声明拆分出的原始键值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// `get` 返回的类型化值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnvValue {
    Bool(bool),
    Null,
    Str(String),
}

impl EnvValue {
    /// 将字面量 true/false/null/empty (可带括号，不区分大小写) 转换为对应类型，
    /// 其余值去掉一层首尾双引号
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "true" | "(true)" => return EnvValue::Bool(true),
            "false" | "(false)" => return EnvValue::Bool(false),
            "null" | "(null)" => return EnvValue::Null,
            "empty" | "(empty)" => return EnvValue::Str(String::new()),
            _ => {}
        }

        let unquoted = raw
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(raw);

        EnvValue::Str(unquoted.to_string())
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Bool(b) => write!(f, "{}", b),
            EnvValue::Null => write!(f, "null"),
            EnvValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(s: &str) -> Self {
        EnvValue::Str(s.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(s: String) -> Self {
        EnvValue::Str(s)
    }
}

impl From<bool> for EnvValue {
    fn from(b: bool) -> Self {
        EnvValue::Bool(b)
    }
}

/// 配置选项 (支持详细/安静模式切换)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub verbose: bool,
    pub format: OutputFormat,
}

/// 输出格式类型
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Env,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "j" => OutputFormat::Json,
            _ => OutputFormat::Env,
        }
    }
}
