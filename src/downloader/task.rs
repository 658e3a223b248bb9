use std::path::{Path, PathBuf};

use crate::search::Candidate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub task_id: String,
    pub candidate: Candidate,
    pub output_path: PathBuf,
}

impl DownloadJob {
    pub fn new(candidate: Candidate, output_dir: &Path) -> Self {
        let output_path = output_dir.join(output_name(&candidate));
        Self {
            task_id: uuid::Uuid::new_v4().to_string(),
            candidate,
            output_path,
        }
    }

    pub fn title(&self) -> &str {
        self.candidate
            .display_title()
            .filter(|t| !t.is_empty())
            .unwrap_or(self.candidate.video_id.as_str())
    }
}

/// 替换标题中的路径分隔符，避免生成多级目录
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            _ => c,
        })
        .collect()
}

// 标题清洗后仍可能是 "." 或 ".."，这种情况退回使用视频 id
fn output_name(candidate: &Candidate) -> String {
    let name = candidate
        .display_title()
        .map(sanitize_title)
        .unwrap_or_default();

    match name.trim() {
        "" | "." | ".." => sanitize_title(&candidate.video_id),
        _ => name,
    }
}
