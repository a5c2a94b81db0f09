use crate::constants::TRANSCRIPT_CONTENT_TYPE;
use serde::{Deserialize, Serialize};

/// A reference to external content collected into a bowl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(rename = "origURL", default, skip_serializing_if = "Option::is_none")]
    pub orig_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ContentItem {
    pub fn new(title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            link: None,
            info_link: None,
            title: title.into(),
            kind: kind.into(),
            sub_type: None,
            orig_url: None,
            date: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_info_link(mut self, info_link: impl Into<String>) -> Self {
        self.info_link = Some(info_link.into());
        self
    }

    pub fn with_orig_url(mut self, orig_url: impl Into<String>) -> Self {
        self.orig_url = Some(orig_url.into());
        self
    }

    /// The URL the body is fetched from: `infoLink` when present, else `link`.
    pub fn source_url(&self) -> Option<&str> {
        non_empty(self.info_link.as_deref()).or_else(|| non_empty(self.link.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A content item with its body fetched, local to one mix.
///
/// `text` is empty when the fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    pub title: String,
    pub text: String,
    pub kind: String,
    pub sub_type: Option<String>,
    pub orig_url: Option<String>,
}

impl ResolvedContent {
    pub fn from_item(item: &ContentItem, text: String) -> Self {
        Self {
            title: item.title.clone(),
            text,
            kind: item.kind.clone(),
            sub_type: item.sub_type.clone(),
            orig_url: item.orig_url.clone(),
        }
    }

    /// Same shape as a fetched item, with no body.
    pub fn unfetched(item: &ContentItem) -> Self {
        Self::from_item(item, String::new())
    }

    pub fn is_transcript(&self) -> bool {
        self.kind == TRANSCRIPT_CONTENT_TYPE
    }
}

/// A third-party quote pulled out of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub affiliation: String,
    pub quote: String,
}

/// The structured payload returned by quote extraction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteSheet {
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

impl QuoteSheet {
    pub fn truncated(mut self, cap: usize) -> Self {
        self.quotes.truncate(cap);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_url_prefers_info_link() {
        let item = ContentItem::new("A", "document")
            .with_link("https://a.example/page")
            .with_info_link("https://a.example/info");
        assert_eq!(item.source_url(), Some("https://a.example/info"));

        let item = ContentItem::new("A", "document").with_link("https://a.example/page");
        assert_eq!(item.source_url(), Some("https://a.example/page"));

        let item = ContentItem::new("A", "document")
            .with_link("https://a.example/page")
            .with_info_link("  ");
        assert_eq!(item.source_url(), Some("https://a.example/page"));

        assert_eq!(ContentItem::new("A", "document").source_url(), None);
    }

    #[test]
    fn test_item_wire_names() {
        let item: ContentItem = serde_json::from_value(json!({
            "link": "https://x.example",
            "infoLink": "https://x.example/info",
            "title": "X",
            "type": "transcript",
            "subType": "podcast",
            "origURL": "https://origin.example",
            "date": "2024-01-02"
        }))
        .unwrap();

        assert_eq!(item.kind, "transcript");
        assert_eq!(item.sub_type.as_deref(), Some("podcast"));
        assert_eq!(item.orig_url.as_deref(), Some("https://origin.example"));
        assert_eq!(item.date.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_unfetched_keeps_metadata() {
        let item = ContentItem::new("T", "transcript").with_orig_url("https://o.example");
        let resolved = ResolvedContent::unfetched(&item);
        assert_eq!(resolved.text, "");
        assert_eq!(resolved.title, "T");
        assert!(resolved.is_transcript());
        assert_eq!(resolved.orig_url.as_deref(), Some("https://o.example"));
    }

    #[test]
    fn test_quote_sheet_truncates() {
        let sheet: QuoteSheet = serde_json::from_value(json!({
            "quotes": [
                {"speaker": "A", "affiliation": "X", "quote": "one"},
                {"speaker": "B", "affiliation": "Y", "quote": "two"},
                {"speaker": "C", "quote": "three"}
            ]
        }))
        .unwrap();
        let sheet = sheet.truncated(2);
        assert_eq!(sheet.quotes.len(), 2);
        assert_eq!(sheet.quotes[1].quote, "two");
    }
}
