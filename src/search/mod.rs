use async_trait::async_trait;

pub mod errors;
pub mod extract;
pub mod models;
pub mod youtube;

pub use errors::FetchError;
pub use models::Candidate;
pub use youtube::YoutubeSearch;

// 搜索来源：给定一行搜索词，返回按页面顺序排列的候选结果
// 解析依赖页面中的固定标记，调用方需要容忍失败
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, FetchError>;
}
