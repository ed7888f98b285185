//! 行读取器：把文件或目录展开为有序的原始行序列

use std::fs;
use std::path::{Path, PathBuf};

/// 目录模式下只收录以此前缀开头的文件
pub const ENV_FILE_PREFIX: &str = ".env";

/// 依次读取所有路径，拼接成一个行序列
///
/// 规则：
/// - 普通文件：按 `\n`、`\r\n`、`\r` 切分，丢弃空行
/// - 目录：只看直接子项，收录文件名以 `.env` 开头的普通文件，按文件名排序
/// - 既不是文件也不是目录的路径静默跳过
/// - 读取失败的文件静默跳过 (记录 warn 日志)
pub fn read_lines<P: AsRef<Path>>(paths: &[P]) -> Vec<String> {
    let mut lines = Vec::new();

    for path in paths {
        let path = path.as_ref();

        if path.is_file() {
            read_file_lines(path, &mut lines);
        } else if path.is_dir() {
            for file in env_files_in(path) {
                read_file_lines(&file, &mut lines);
            }
        } else {
            tracing::debug!(path = %path.display(), "路径不存在，跳过");
        }
    }

    lines
}

/// 列出目录中符合条件的 .env 文件 (非递归)
pub fn env_files_in(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "无法读取目录，跳过");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_env_file_name(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    files.sort();
    files
}

/// 文件名是否以 `.env` 开头
pub fn is_env_file_name(name: &str) -> bool {
    name.starts_with(ENV_FILE_PREFIX)
}

/// 切分文本为非空行，兼容任意换行风格
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(['\n', '\r'])
        .filter(|line| !line.is_empty())
}

fn read_file_lines(path: &Path, lines: &mut Vec<String>) {
    match fs::read_to_string(path) {
        Ok(content) => {
            let before = lines.len();
            lines.extend(split_lines(&content).map(str::to_string));
            tracing::debug!(
                path = %path.display(),
                lines = lines.len() - before,
                "读取 env 文件"
            );
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "无法读取文件，跳过");
        }
    }
}
