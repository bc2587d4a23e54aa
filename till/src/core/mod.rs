//! 核心模块 - 配置和启动环境
//!
//! - [`Config`] - 收银台配置
//! - [`load_dotenv`] - 加载 .env (须在 `Config::from_env` 之前)
//! - [`setup_environment`] - 创建工作目录、初始化日志

pub mod config;

pub use config::Config;

use crate::utils::logger;

/// Create the work directory and install the logger
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;
    logger::init_logger_with_file(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
    )?;
    if let Some(dir) = config.log_dir.as_deref()
        && let Err(e) = logger::cleanup_old_logs(std::path::Path::new(dir))
    {
        tracing::warn!(error = %e, "Failed to clean up old log files");
    }
    Ok(())
}

/// Load a `.env` file from the current directory if one exists
pub fn load_dotenv() {
    // missing .env is fine
    let _ = dotenv::dotenv();
}
