//! CLI 参数定义

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// envload - .env 文件加载与校验工具
#[derive(Parser)]
#[command(
    name = "envload",
    version,
    about = ".env 文件加载与校验工具",
    long_about = "读取 .env 文件或目录，解析引号、转义、行内注释和 ${VAR} 引用，\
                  写入进程环境并校验必需变量"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 输出格式 (env/json)
    #[arg(short, long, global = true, default_value = "env")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 显示解析结果 (默认不写入环境)
    Show {
        /// 文件或目录，默认当前目录
        paths: Vec<PathBuf>,
        /// 同时按该模式写入环境 (load/overload)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// 加载后校验必需变量
    Check {
        /// 文件或目录，默认当前目录
        paths: Vec<PathBuf>,
        /// 必需变量 (逗号分隔)
        #[arg(short, long, value_delimiter = ',', required = true)]
        required: Vec<String>,
        /// 必需变量不能为空
        #[arg(long)]
        not_empty: bool,
        /// 允许的取值 (逗号分隔)
        #[arg(short, long, value_delimiter = ',')]
        allowed: Vec<String>,
        /// 覆盖已存在的变量
        #[arg(long)]
        overload: bool,
    },

    /// 加载后获取单个变量
    Get {
        /// 变量名称
        key: String,
        /// 文件或目录，默认当前目录
        paths: Vec<PathBuf>,
        /// 覆盖已存在的变量
        #[arg(long)]
        overload: bool,
    },

    /// 加载后运行命令
    Run {
        /// 文件或目录，默认当前目录
        paths: Vec<PathBuf>,
        /// 覆盖已存在的变量
        #[arg(long)]
        overload: bool,
        /// 要执行的命令 (写在 `--` 之后)
        #[arg(required = true, last = true)]
        command: Vec<String>,
    },
}

/// 未指定路径时使用当前目录
pub fn paths_or_cwd(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    }
}
