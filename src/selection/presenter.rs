use std::collections::BTreeMap;
use std::fmt::Write;

use crate::search::Candidate;

pub const PROMPT_HEADER: &str = "Choose one of the titles by their number: ";

/// 展示编号（从 1 开始）到候选列表下标的映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionIndexMap {
    entries: BTreeMap<i64, usize>,
}

impl SelectionIndexMap {
    pub fn resolve(&self, choice: i64) -> Option<usize> {
        self.entries.get(&choice).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, original_index: usize) -> i64 {
        let number = self.entries.len() as i64 + 1;
        self.entries.insert(number, original_index);
        number
    }
}

/// 渲染编号列表，跳过没有标题的条目
pub fn present_options(candidates: &[Candidate]) -> (String, SelectionIndexMap) {
    let mut map = SelectionIndexMap::default();
    let mut rendered = String::new();
    let _ = writeln!(rendered, "{}", PROMPT_HEADER);

    for (index, candidate) in candidates.iter().enumerate() {
        let Some(title) = candidate.display_title() else {
            continue;
        };
        let number = map.push(index);
        let _ = writeln!(rendered, " {} ) - {}", number, title);
    }

    (rendered, map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::extract::{candidates_from_html, fixtures};

    #[test]
    fn numbering_skips_titleless_candidates() {
        let candidates = vec![
            Candidate::new("a", None),
            Candidate::titled("b", "First"),
            Candidate::titled("d", "Second"),
            Candidate::new("e", None),
        ];

        let (rendered, map) = present_options(&candidates);

        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve(1), Some(1));
        assert_eq!(map.resolve(2), Some(2));
        assert_eq!(map.resolve(0), None);
        assert_eq!(map.resolve(3), None);
        assert_eq!(
            rendered,
            format!("{}\n 1 ) - First\n 2 ) - Second\n", PROMPT_HEADER)
        );
    }

    #[test]
    fn map_size_equals_titled_count() {
        let candidates: Vec<Candidate> = (0..9)
            .map(|i| {
                if i % 3 == 0 {
                    Candidate::new(format!("id{i}"), None)
                } else {
                    Candidate::titled(format!("id{i}"), format!("Video {i}"))
                }
            })
            .collect();

        let (_, map) = present_options(&candidates);
        assert_eq!(map.len(), 6);
        for n in 1..=6 {
            let index = map.resolve(n).unwrap();
            assert!(candidates[index].display_title().is_some());
        }
    }

    #[test]
    fn empty_title_run_is_still_numbered() {
        let html = fixtures::search_page(&[("a", Some("")), ("b", Some("B")), ("c", None)]);
        let candidates = candidates_from_html(&html).unwrap();

        let (rendered, map) = present_options(&candidates);

        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve(1), Some(0));
        assert_eq!(map.resolve(2), Some(1));
        assert_eq!(
            rendered,
            format!("{}\n 1 ) - \n 2 ) - B\n", PROMPT_HEADER)
        );
    }

    #[test]
    fn all_titleless_yields_empty_map() {
        let (_, map) = present_options(&[Candidate::new("a", None)]);
        assert!(map.is_empty());
    }
}
