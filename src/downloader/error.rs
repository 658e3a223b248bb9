use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("无法启动下载器 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("下载器异常退出 ({})", describe_code(code))]
    ExitStatus { code: Option<i32>, output: String },

    #[error("下载超时 ({0:?})")]
    Timeout(Duration),

    #[error("下载任务异常终止: {0}")]
    Join(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("退出码 {}", code),
        None => "被信号终止".to_string(),
    }
}

impl DownloadError {
    /// 下载器输出（仅退出码异常时有）
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            DownloadError::ExitStatus { output, .. } => Some(output),
            _ => None,
        }
    }
}
