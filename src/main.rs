//! envload 主程序入口
//!
//! 设计原则：
//! - 模块化：入口代码简洁，逻辑委托给库
//! - 安静模式：默认只输出结果，日志走 stderr
//! - 错误处理：详细/安静错误模式，通过 --verbose 切换

use clap::Parser;
use envload::cli::{self, Cli, Commands};
use envload::utils::executor::CommandExecutor;
use envload::{
    Config, DotEnv, EnvError, EnvStore, EnvValue, LoadMode, OutputFormat, Result, Variables,
};
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    let config = init_config(&cli);
    init_logging(config.verbose);

    match run_command(cli.command, &config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            e.report(config.verbose);
            std::process::exit(1);
        }
    }
}

/// 初始化配置
fn init_config(cli: &Cli) -> Config {
    Config {
        verbose: cli.verbose,
        format: OutputFormat::from(cli.format.as_str()),
    }
}

/// 初始化日志：优先使用 RUST_LOG，否则按 --verbose 选择级别
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn mode_for(overload: bool) -> LoadMode {
    if overload {
        LoadMode::Overload
    } else {
        LoadMode::Load
    }
}

/// 运行具体命令，返回进程退出码
fn run_command(command: Commands, config: &Config) -> Result<i32> {
    match command {
        Commands::Show { paths, mode } => {
            let mode = mode.as_deref().and_then(LoadMode::parse);
            let mut dotenv = DotEnv::new(cli::paths_or_cwd(paths));
            let vars = dotenv.to_array(mode)?;
            print_vars(&mut io::stdout().lock(), &vars, &config.format)?;
        }

        Commands::Check {
            paths,
            required,
            not_empty,
            allowed,
            overload,
        } => {
            let mut dotenv = DotEnv::new(cli::paths_or_cwd(paths));
            load(&mut dotenv, mode_for(overload))?;

            let validator = dotenv.required(required)?;
            if not_empty {
                validator.not_empty()?;
            }
            if !allowed.is_empty() {
                validator.allowed_values(allowed.as_slice())?;
            }

            if config.verbose {
                writeln!(
                    io::stdout().lock(),
                    "✓ {} 个变量校验通过",
                    validator.variables().len()
                )?;
            }
        }

        Commands::Get {
            key,
            paths,
            overload,
        } => {
            let mut dotenv = DotEnv::new(cli::paths_or_cwd(paths));
            load(&mut dotenv, mode_for(overload))?;

            match dotenv.store().get(&key) {
                Some(value) => print_value(&mut io::stdout().lock(), &value, &config.format)?,
                None => {
                    return Err(EnvError::ValidationFailed(vec![format!("{key} is missing")]));
                }
            }
        }

        Commands::Run {
            paths,
            overload,
            command,
        } => {
            let mut dotenv = DotEnv::new(cli::paths_or_cwd(paths));
            load(&mut dotenv, mode_for(overload))?;

            // 子进程继承已写入的进程环境，无需额外注入
            return CommandExecutor::exec(&command);
        }
    }

    Ok(0)
}

fn load(dotenv: &mut DotEnv, mode: LoadMode) -> Result<()> {
    match mode {
        LoadMode::Load => dotenv.load()?,
        LoadMode::Overload => dotenv.overload()?,
    };
    Ok(())
}

fn print_vars<W: Write>(out: &mut W, vars: &Variables, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Env => {
            for (name, value) in vars {
                writeln!(out, "{}={}", name, value)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(vars)?)?;
        }
    }
    Ok(())
}

fn print_value<W: Write>(out: &mut W, value: &EnvValue, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Env => writeln!(out, "{}", value)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(value)?)?,
    }
    Ok(())
}
