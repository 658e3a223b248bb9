use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法确定用户主目录")]
    HomeDirNotFound,
}

/// 默认日志级别；`-v` 时为 DEBUG
pub const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::WARN;

/// 运行期配置，由命令行解析而来，显式传给各组件
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub query_file: PathBuf,
    pub output_dir: PathBuf,
    pub downloader: PathBuf,
    pub concurrency: usize,
    pub fetch_timeout: Duration,
    pub download_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_cli(args: &Cli) -> Result<Self, ConfigError> {
        let output_dir = match &args.output_dir {
            Some(dir) => dir.clone(),
            None => default_output_dir()?,
        };

        Ok(Self {
            query_file: args.file.clone(),
            output_dir,
            downloader: args.downloader.clone(),
            concurrency: usize::from(args.concurrency),
            fetch_timeout: Duration::from_secs(args.fetch_timeout),
            download_timeout: args.download_timeout.map(Duration::from_secs),
        })
    }
}

/// <home>/Videos/wrk
pub fn default_output_dir() -> Result<PathBuf, ConfigError> {
    let dirs = directories::UserDirs::new().ok_or(ConfigError::HomeDirNotFound)?;
    Ok(work_dir_under(dirs.home_dir()))
}

pub fn work_dir_under(home: &Path) -> PathBuf {
    home.join("Videos").join("wrk")
}
