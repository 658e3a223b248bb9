use std::path::Path;

use crate::search::Candidate;

pub mod error;
pub mod manager;
pub mod runner;
pub mod task;

pub use error::DownloadError;
pub use manager::{DownloadManager, JobOutcome};
pub use runner::{DownloadReport, MediaDownloader, YtDlp};
pub use task::{DownloadJob, sanitize_title};

/// 每个选中的视频生成一个下载任务，顺序不变
pub fn build_jobs(selected: Vec<Candidate>, output_dir: &Path) -> Vec<DownloadJob> {
    selected
        .into_iter()
        .map(|candidate| DownloadJob::new(candidate, output_dir))
        .collect()
}
