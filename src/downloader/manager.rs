use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use super::error::DownloadError;
use super::runner::{DownloadReport, MediaDownloader};
use super::task::DownloadJob;
use crate::log_error;

/// 单个任务的结果，与提交的任务一一对应
pub type JobOutcome = (DownloadJob, Result<DownloadReport, DownloadError>);

#[derive(Clone)]
pub struct DownloadManager {
    downloader: Arc<dyn MediaDownloader>,
    semaphore: Arc<Semaphore>, // 控制同时运行的下载进程数
}

impl DownloadManager {
    pub fn new(downloader: Arc<dyn MediaDownloader>, max_concurrent: usize) -> Self {
        Self {
            downloader,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// 为每个任务启动一个 tokio 任务，全部结束后按提交顺序返回结果
    ///
    /// 单个任务失败只会记录日志，不影响其他任务。
    pub async fn run_all(&self, jobs: Vec<DownloadJob>) -> Vec<JobOutcome> {
        info!("开始下载 {} 个视频", jobs.len());

        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| {
                let downloader = Arc::clone(&self.downloader);
                let semaphore = Arc::clone(&self.semaphore);
                let fallback = job.clone();
                let handle = tokio::spawn(async move {
                    let result = Self::run(downloader, semaphore, &job).await;
                    (job, result)
                });
                (fallback, handle)
            })
            .collect();

        let (fallbacks, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let joined = join_all(handles).await;

        joined
            .into_iter()
            .zip(fallbacks)
            .map(|(joined, job)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    // 任务 panic 或被取消
                    let err = DownloadError::Join(e.to_string());
                    report_failure(&job, &err);
                    (job, Err(err))
                }
            })
            .collect()
    }

    async fn run(
        downloader: Arc<dyn MediaDownloader>,
        semaphore: Arc<Semaphore>,
        job: &DownloadJob,
    ) -> Result<DownloadReport, DownloadError> {
        let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|e| DownloadError::Join(e.to_string()))?;

        info!(task_id = %job.task_id, "开始下载: {}", job.title());
        let result = downloader.download(job).await;

        match &result {
            Ok(report) => {
                info!(task_id = %job.task_id, "✅ 下载完成: {:?}", job.output_path);
                debug!(task_id = %job.task_id, "下载器输出:\n{}", report.output);
            }
            Err(e) => report_failure(job, e),
        }

        result
    }
}

fn report_failure(job: &DownloadJob, err: &DownloadError) {
    error!(task_id = %job.task_id, video_id = %job.candidate.video_id, "下载失败: {}", err);
    match err.captured_output() {
        Some(output) if !output.trim().is_empty() => {
            log_error!("{}: {}\n{}", job.title(), err, output.trim_end())
        }
        _ => log_error!("{}: {}", job.title(), err),
    }
}


#[cfg(all(test, unix))]
mod tests {
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::test_support::RecordingDownloader;
    use super::*;
    use crate::search::Candidate;

    fn jobs(ids: &[&str]) -> Vec<DownloadJob> {
        ids.iter()
            .map(|id| DownloadJob::new(Candidate::titled(*id, format!("Title {id}")), Path::new("/tmp/wrk")))
            .collect()
    }

    #[tokio::test]
    async fn failures_do_not_affect_siblings() {
        let downloader = Arc::new(RecordingDownloader::failing_on(&["b"]));
        let manager = DownloadManager::new(downloader.clone(), 4);

        let outcomes = manager.run_all(jobs(&["a", "b", "c"])).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(downloader.calls.lock().unwrap().len(), 3);
        let ids: Vec<_> = outcomes.iter().map(|(j, _)| j.candidate.video_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(outcomes[0].1.is_ok());
        assert!(matches!(outcomes[1].1, Err(DownloadError::ExitStatus { .. })));
        assert!(outcomes[2].1.is_ok());
    }

    #[tokio::test]
    async fn waits_for_every_job_regardless_of_completion_order() {
        let downloader = Arc::new(RecordingDownloader {
            delay: Duration::from_millis(80),
            ..Default::default()
        });
        let manager = DownloadManager::new(downloader.clone(), 8);

        let outcomes = manager.run_all(jobs(&["1", "2", "3", "4", "5"])).await;

        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|(_, r)| r.is_ok()));
        assert_eq!(downloader.running.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrency_is_capped() {
        let downloader = Arc::new(RecordingDownloader {
            delay: Duration::from_millis(50),
            ..Default::default()
        });
        let manager = DownloadManager::new(downloader.clone(), 2);

        manager.run_all(jobs(&["a", "b", "c", "d", "e", "f"])).await;

        assert_eq!(downloader.calls.lock().unwrap().len(), 6);
        assert!(downloader.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn panicking_task_is_reported_as_join_error() {
        let downloader = Arc::new(RecordingDownloader {
            panicking: HashSet::from(["boom".to_string()]),
            ..Default::default()
        });
        let manager = DownloadManager::new(downloader, 2);

        let outcomes = manager.run_all(jobs(&["ok", "boom"])).await;

        assert!(outcomes[0].1.is_ok());
        assert_eq!(outcomes[1].0.candidate.video_id, "boom");
        assert!(matches!(outcomes[1].1, Err(DownloadError::Join(_))));
    }

    #[tokio::test]
    async fn closed_pool_fails_jobs_without_running_them() {
        let downloader = Arc::new(RecordingDownloader::default());
        let manager = DownloadManager::new(downloader.clone(), 2);
        manager.semaphore.close();

        let outcomes = manager.run_all(jobs(&["a", "b"])).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|(_, r)| matches!(r, Err(DownloadError::Join(_)))));
        assert!(downloader.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_jobs_returns_immediately() {
        let manager = DownloadManager::new(Arc::new(RecordingDownloader::default()), 3);
        assert!(manager.run_all(Vec::new()).await.is_empty());
    }
}
