use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::SearchSource;
use super::errors::FetchError;
use super::extract;
use super::models::Candidate;
use crate::common::client::HttpClient;

pub const DEFAULT_ENDPOINT: &str = "https://www.youtube.com/";

/// 抓取 YouTube 网页版搜索结果
#[derive(Debug, Clone)]
pub struct YoutubeSearch {
    client: HttpClient,
    endpoint: Url,
}

impl YoutubeSearch {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("默认搜索地址无效"),
        }
    }

    /// 指定搜索地址（测试时指向本地 mock 服务）
    pub fn with_endpoint(client: HttpClient, endpoint: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
        })
    }

    pub fn search_url(&self, query: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint.join("results")?;
        url.set_query(Some(&format!("search_query={}", build_query(query))));
        Ok(url)
    }
}

/// 按空白切词，逐词编码后用 '+' 连接
pub fn build_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

#[async_trait]
impl SearchSource for YoutubeSearch {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, FetchError> {
        let url = self.search_url(query)?;
        let (status, body) = self.client.get_text(url.as_str()).await?;
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let candidates = extract::candidates_from_html(&body)?;
        debug!("「{}」解析到 {} 条结果", query, candidates.len());
        Ok(candidates)
    }
}
