use std::time::Duration;

use reqwest::{
    Client, ClientBuilder, StatusCode,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, error};

// 不带任何登录状态的 HTTP 客户端
#[derive(Debug, Clone)]
pub struct HttpClient {
    pub inner: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let inner = ClientBuilder::new()
            .timeout(timeout)
            .default_headers(Self::get_default_headers())
            .build()
            .map_err(|e| {
                error!("创建 HTTP 客户端失败: {}", e);
                e
            })?;

        Ok(Self { inner })
    }

    pub fn get_default_headers() -> HeaderMap {
        // 搜索页会根据 UA 返回不同的页面结构，这里伪装成桌面浏览器
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36"));

        headers
    }

    /// GET 并以文本形式读取响应体，返回状态码供调用方判断
    pub async fn get_text(&self, url: &str) -> Result<(StatusCode, String), reqwest::Error> {
        debug!("GET {}", url);
        let resp = self.inner.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!("响应状态: {}, 长度: {}", status, body.len());
        Ok((status, body))
    }
}
