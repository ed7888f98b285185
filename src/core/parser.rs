//! .env 行解析与规范化 (简单原则：透明的文本解析)
//!
//! 规则：
//! - 首个非空白字符为 `#` 的行是注释
//! - 不含 `=` 的行忽略
//! - 在第一个 `=` 处拆分为名称与值
//! - 名称去掉 `export ` 与引号
//! - 带引号的值支持 `\"`、`\'`、`\\` 转义，闭合引号后的内容丢弃
//! - 不带引号的值去掉 ` #` 之后的行内注释，且不允许包含空白
//! - 值以 `${NAME}` 开头时替换为已知变量的值

use crate::error::{EnvError, Result};
use crate::types::Entry;
use regex::Regex;
use std::sync::LazyLock;

/// 值开头的嵌套引用 `${NAME}`
static NESTED_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\{([A-Za-z0-9_]+)\}").expect("嵌套引用正则无效"));

/// 首尾裁剪的空白字符集 (只含 ASCII)
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// 去掉首尾 ASCII 空白，非 ASCII 空白 (如 NBSP) 保留
pub(crate) fn trim_blank(s: &str) -> &str {
    s.trim_matches(TRIMMED)
}

/// 未加引号的值中不允许出现的空白 (只含 ASCII)
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// 是否为注释行
pub fn is_comment(line: &str) -> bool {
    trim_blank(line).starts_with('#')
}

/// 是否为赋值行
pub fn is_setter(line: &str) -> bool {
    line.contains('=')
}

/// 把一行拆分为原始键值；注释行与不含 `=` 的行返回 `None`
pub fn parse_line(line: &str) -> Option<Entry> {
    if is_comment(line) || !is_setter(line) {
        return None;
    }

    split_entry(line)
}

/// 在第一个 `=` 处拆分，两边去空白
pub fn split_entry(line: &str) -> Option<Entry> {
    line.split_once('=')
        .map(|(name, value)| Entry::new(trim_blank(name), trim_blank(value)))
}

/// 清理变量名：去掉所有 `export ` 与单双引号
pub fn normalize_name(name: &str) -> String {
    let name = name.replace("export ", "").replace(['\'', '"'], "");
    trim_blank(&name).to_string()
}

/// 清理变量值
///
/// # Errors
///
/// 未加引号的值包含空白时返回 `EnvError::InvalidValue`，携带变量名。
pub fn normalize_value(name: &str, raw: &str) -> Result<String> {
    let value = trim_blank(raw);

    if value.is_empty() {
        return Ok(String::new());
    }

    let value = match value.chars().next() {
        Some(quote @ ('"' | '\'')) => unquote(value, quote),
        _ => strip_inline_comment(name, value)?,
    };

    Ok(trim_blank(&value).to_string())
}

/// 去掉引号并还原转义
///
/// 从开头的引号扫描到第一个未转义的同类引号；`\` 只能与 `\` 或该引号组成转义。
/// 找不到合法的闭合引号时整个值保持原样，只做转义还原。
fn unquote(value: &str, quote: char) -> String {
    match scan_quoted(value, quote) {
        Some(inner) => inner,
        None => unescape(value, quote),
    }
}

fn scan_quoted(value: &str, quote: char) -> Option<String> {
    let mut chars = value.chars();
    chars.next()?;

    let mut inner = String::new();

    while let Some(c) = chars.next() {
        if c == quote {
            return Some(inner);
        }

        if c == '\\' {
            match chars.next() {
                Some(escaped) if escaped == '\\' || escaped == quote => inner.push(escaped),
                _ => return None,
            }
            continue;
        }

        inner.push(c);
    }

    None
}

fn unescape(value: &str, quote: char) -> String {
    value
        .replace(&format!("\\{quote}"), &quote.to_string())
        .replace("\\\\", "\\")
}

/// 去掉 ` #` 之后的行内注释并拒绝含空白的值
fn strip_inline_comment(name: &str, value: &str) -> Result<String> {
    let value = trim_blank(value.split_once(" #").map_or(value, |(before, _)| before));

    if value.chars().any(is_blank) {
        return Err(EnvError::InvalidValue(name.to_string()));
    }

    Ok(value.to_string())
}

/// 解析值开头的 `${NAME}` 引用
///
/// 只替换开头的一处；`lookup` 找不到时保留原文。
pub fn resolve_nested<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains('$') {
        return value.to_string();
    }

    let Some(caps) = NESTED_REFERENCE.captures(value) else {
        return value.to_string();
    };

    let (Some(full), Some(reference)) = (caps.get(0), caps.get(1)) else {
        return value.to_string();
    };

    match lookup(reference.as_str()) {
        Some(resolved) => format!("{}{}", resolved, &value[full.end()..]),
        None => value.to_string(),
    }
}
