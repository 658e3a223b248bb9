use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::search::{Candidate, SearchSource};

pub mod answer;
pub mod presenter;

pub use answer::{AnswerError, AnswerReader};
pub use presenter::{SelectionIndexMap, present_options};

/// 挑选阶段：逐行搜索、展示、等待用户选择
///
/// 每行至多贡献一个结果，顺序与输入一致。搜索失败的行只记一条 warn 日志，
/// 然后继续处理下一行。
pub struct SelectionLoop<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S> SelectionLoop<'a, S>
where
    S: SearchSource + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn run<Q, R, W>(
        &self,
        queries: Q,
        answers: &mut AnswerReader<R>,
        out: &mut W,
    ) -> Vec<Candidate>
    where
        Q: IntoIterator,
        Q::Item: AsRef<str>,
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut selected = Vec::new();

        for (line_no, query) in queries.into_iter().enumerate() {
            let query = query.as_ref().trim();
            if query.is_empty() {
                debug!("第 {} 行为空，跳过", line_no + 1);
                continue;
            }

            let candidates = match self.source.search(query).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    info!(line = line_no + 1, query, error = %e, "搜索失败，跳过该行");
                    continue;
                }
            };

            let (rendered, map) = present_options(&candidates);
            if map.is_empty() {
                warn!(line = line_no + 1, query, "没有可供选择的结果，跳过该行");
                continue;
            }

            if let Err(e) = write_flush(out, rendered.as_bytes()).await {
                error!("输出候选列表失败: {}", e);
                break;
            }

            match answers.read_choice(&map, out).await {
                Ok(index) => {
                    let chosen = candidates[index].clone();
                    info!("已选择: {} ({})", chosen.display_title().unwrap_or_default(), chosen.video_id);
                    selected.push(chosen);
                }
                Err(AnswerError::Closed) => {
                    warn!("输入已结束，停止挑选，已选择 {} 个视频", selected.len());
                    break;
                }
                Err(e) => {
                    error!("读取选择失败: {}", e);
                    break;
                }
            }
        }

        selected
    }
}

async fn write_flush<W: AsyncWrite + Unpin>(out: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    out.write_all(bytes).await?;
    out.flush().await
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::search::{Candidate, FetchError, SearchSource};

    /// 按搜索词返回预置结果；未登记的搜索词视为页面缺少标记
    #[derive(Default)]
    pub struct StubSource {
        results: HashMap<String, Vec<Candidate>>,
        pub queries: Mutex<Vec<String>>,
    }

    impl StubSource {
        pub fn with(mut self, query: &str, candidates: Vec<Candidate>) -> Self {
            self.results.insert(query.to_string(), candidates);
            self
        }
    }

    #[async_trait]
    impl SearchSource for StubSource {
        async fn search(&self, query: &str) -> Result<Vec<Candidate>, FetchError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.results
                .get(query)
                .cloned()
                .ok_or(FetchError::MarkerNotFound)
        }
    }
}
