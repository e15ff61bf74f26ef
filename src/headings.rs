use scraper::{ElementRef, Html};

use crate::anchors::AnchorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            _ => None,
        }
    }

    pub fn tag_name(self) -> &'static str {
        match self {
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// A heading found in the page body, with its descendant text concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: HeadingLevel,
    pub text: String,
    pub document_order: usize,
}

/// Parses `html` and returns every h2/h3/h4 element in document order.
///
/// The parser recovers from malformed markup, so this never fails; an empty
/// body simply has no headings.
pub fn collect_headings(html: &str) -> Vec<Heading> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(html);
    let headings = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter_map(|element| {
            let level = HeadingLevel::from_tag_name(element.value().name())?;
            Some((level, element.text().collect::<String>()))
        })
        .enumerate()
        .map(|(document_order, (level, text))| Heading {
            level,
            text,
            document_order,
        })
        .collect::<Vec<_>>();

    tracing::debug!(count = headings.len(), "collected headings");
    headings
}

/// Keeps the headings whose level is enabled, then applies the ignore flags.
///
/// The second-to-last removal only happens when more than one heading
/// survives the level filter; the last-heading removal runs afterwards on
/// whatever is left.
pub fn filter_headings(headings: Vec<Heading>, config: &AnchorConfig) -> Vec<Heading> {
    let mut filtered = headings
        .into_iter()
        .filter(|heading| config.processes(heading.level))
        .collect::<Vec<_>>();

    if filtered.len() > 1 && config.ignore_second_last_tag {
        filtered.remove(filtered.len() - 2);
    }

    if config.ignore_last_tag {
        filtered.pop();
    }

    filtered
}
