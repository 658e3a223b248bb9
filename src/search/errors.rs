use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("网络请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("搜索页返回异常状态码: {0}")]
    Status(reqwest::StatusCode),

    #[error("响应中未找到 ytInitialData 标记")]
    MarkerNotFound,

    #[error("响应结构不符合预期: {0}")]
    UnexpectedShape(String),

    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("无效的搜索地址: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}
