use serde::Deserialize;

/// 一条搜索结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub video_id: String,
    pub title: Option<String>,
}

impl Candidate {
    pub fn new(video_id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title,
        }
    }

    pub fn titled(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(video_id, Some(title.into()))
    }

    /// 可展示的标题；只有标题 runs 为空时才返回 None，空字符串照常展示
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

// ---------------------------------------------------------------
// itemSectionRenderer.contents 里的原始结构

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItem {
    #[serde(default)]
    pub video_renderer: Option<VideoRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoRenderer {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub title: Option<TitleRuns>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TitleRuns {
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextRun {
    #[serde(default)]
    pub text: String,
}

impl From<VideoRenderer> for Candidate {
    fn from(renderer: VideoRenderer) -> Self {
        // 只取第一个 run 作为标题
        let title = renderer
            .title
            .and_then(|t| t.runs.into_iter().next())
            .map(|run| run.text);
        Candidate::new(renderer.video_id, title)
    }
}

/// 丢弃非视频条目（广告、频道卡片、推荐合集等）
pub(crate) fn candidates_from_items(items: Vec<SearchItem>) -> Vec<Candidate> {
    items
        .into_iter()
        .filter_map(|item| item.video_renderer)
        .map(Candidate::from)
        .collect()
}
