use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::config::AppConfig;
use crate::downloader::{DownloadManager, JobOutcome, MediaDownloader, build_jobs};
use crate::search::SearchSource;
use crate::selection::{AnswerReader, SelectionLoop};

pub const DONE_MESSAGE: &str = "Done";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub selected: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    fn from_outcomes(outcomes: &[JobOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|(_, r)| r.is_ok()).count();
        Self {
            selected: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

/// 读取搜索词文件，一行一个
pub async fn read_queries(path: &Path) -> Result<Vec<String>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Couldn't read file {}", path.display()))?;
    // 非 UTF-8 字节替换为 U+FFFD，不中断整个运行
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_owned)
        .collect())
}

pub struct App {
    config: AppConfig,
    source: Arc<dyn SearchSource>,
    downloader: Arc<dyn MediaDownloader>,
}

impl App {
    pub fn new(
        config: AppConfig,
        source: Arc<dyn SearchSource>,
        downloader: Arc<dyn MediaDownloader>,
    ) -> Self {
        Self {
            config,
            source,
            downloader,
        }
    }

    /// 先逐行挑选，再并发下载，全部结束后输出 Done
    pub async fn run<Q, R, W>(
        &self,
        queries: Q,
        answers: &mut AnswerReader<R>,
        out: &mut W,
    ) -> Result<(RunSummary, Vec<JobOutcome>)>
    where
        Q: IntoIterator,
        Q::Item: AsRef<str>,
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let selected = SelectionLoop::new(&*self.source)
            .run(queries, answers, out)
            .await;
        info!("挑选完成，共 {} 个视频", selected.len());

        let output_dir = &self.config.output_dir;
        if !output_dir.exists() {
            info!("创建输出目录: {:?}", output_dir);
        }
        tokio::fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("Couldn't create directory {}", output_dir.display()))?;

        let jobs = build_jobs(selected, output_dir);
        let manager = DownloadManager::new(Arc::clone(&self.downloader), self.config.concurrency);
        let outcomes = manager.run_all(jobs).await;

        let summary = RunSummary::from_outcomes(&outcomes);
        let mut report = String::new();
        if summary.selected > 0 {
            report.push_str(&format!(
                "Downloaded {} of {} videos into {}",
                summary.succeeded,
                summary.selected,
                output_dir.display()
            ));
            if summary.failed > 0 {
                report.push_str(&format!(" ({} failed)", summary.failed));
            }
            report.push('\n');
        }
        report.push_str(DONE_MESSAGE);
        report.push('\n');

        out.write_all(report.as_bytes()).await?;
        out.flush().await?;

        Ok((summary, outcomes))
    }
}
