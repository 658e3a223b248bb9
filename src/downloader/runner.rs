use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::error::DownloadError;
use super::task::DownloadJob;

pub const DEFAULT_PROGRAM: &str = "yt-dlp";

/// 一次成功下载的结果
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub status: ExitStatus,
    pub output: String,
}

// 真正的下载交给外部工具，这里只约定输出路径和视频 id
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    async fn download(&self, job: &DownloadJob) -> Result<DownloadReport, DownloadError>;
}

#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// 检查下载器能否执行 `--version`
    pub async fn check_available(&self) -> bool {
        debug!("检查下载器 {:?} 是否可用...", self.program);
        let status = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                warn!("无法执行 {:?}: {}", self.program, e);
                false
            }
        }
    }

    fn command(&self, job: &DownloadJob) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-o")
            .arg(output_template(&job.output_path))
            .arg("--")
            .arg(&job.candidate.video_id)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

/// yt-dlp 把 -o 当作输出模板解析，字面量 % 需要写成 %%
pub fn output_template(path: &Path) -> String {
    path.to_string_lossy().replace('%', "%%")
}

#[async_trait]
impl MediaDownloader for YtDlp {
    async fn download(&self, job: &DownloadJob) -> Result<DownloadReport, DownloadError> {
        let program = self.program.to_string_lossy().into_owned();
        debug!(task_id = %job.task_id, "执行 {} -o {:?} -- {}", program, job.output_path, job.candidate.video_id);

        let mut cmd = self.command(job);
        let run = cmd.output();
        let output = match self.timeout {
            // 超时后 future 被丢弃，kill_on_drop 会结束子进程
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| DownloadError::Timeout(limit))?,
            None => run.await,
        }
        .map_err(|source| DownloadError::Spawn { program, source })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(DownloadError::ExitStatus {
                code: output.status.code(),
                output: combined,
            });
        }

        Ok(DownloadReport {
            status: output.status,
            output: combined,
        })
    }
}
