use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::errors::FetchError;
use super::models::{Candidate, SearchItem, candidates_from_items};

lazy_static! {
    // 搜索页把初始数据内联在 <script> 里，兼容两种赋值写法
    static ref INITIAL_DATA: Regex =
        Regex::new(r#"(?s)(?:var ytInitialData|window\["ytInitialData"\])\s*=\s*(.*?);</script>"#)
            .expect("ytInitialData 正则无效");
}

const RESULTS_POINTER: &str = "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents/0/itemSectionRenderer/contents";

/// 从 HTML 中截取 ytInitialData 的 JSON 表达式
pub fn embedded_data(html: &str) -> Result<&str, FetchError> {
    INITIAL_DATA
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|data| !data.is_empty())
        .ok_or(FetchError::MarkerNotFound)
}

/// 解析 ytInitialData，取出第一个结果分区中的视频
pub fn parse_initial_data(data: &str) -> Result<Vec<Candidate>, FetchError> {
    let mut root: Value = serde_json::from_str(data)?;
    let contents = root
        .pointer_mut(RESULTS_POINTER)
        .map(Value::take)
        .ok_or_else(|| FetchError::UnexpectedShape(RESULTS_POINTER.to_string()))?;

    let items: Vec<SearchItem> = serde_json::from_value(contents)?;
    Ok(candidates_from_items(items))
}

/// 完整的页面解析流程
pub fn candidates_from_html(html: &str) -> Result<Vec<Candidate>, FetchError> {
    parse_initial_data(embedded_data(html)?)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_blob_between_marker_and_script_end() {
        let html = "<script>var ytInitialData = {\"a\": \"x=y\"};</script><script>var b = 2;</script>";
        assert_eq!(embedded_data(html).unwrap(), "{\"a\": \"x=y\"}");
    }

    #[test]
    fn accepts_window_assignment_form() {
        let html = "<script>window[\"ytInitialData\"] = {\"a\": 1};</script>";
        assert_eq!(embedded_data(html).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn missing_marker_is_reported() {
        let err = embedded_data("<html><body>consent page</body></html>").unwrap_err();
        assert!(matches!(err, FetchError::MarkerNotFound));
    }

    #[test]
    fn parses_multiline_page() {
        let html = fixtures::search_page(&[("abc123", Some("My Video")), ("def456", None)]);
        let candidates = candidates_from_html(&html).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], Candidate::titled("abc123", "My Video"));
        assert_eq!(candidates[1].title, None);
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let err = parse_initial_data(r#"{"contents": {}}"#).unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedShape(_)));
    }

    #[test]
    fn broken_json_is_a_decode_error() {
        let err = parse_initial_data("{not json").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
