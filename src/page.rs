use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use url::Url;

/// The two fields of a site page list item the widgets read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageItem {
    #[serde(rename = "CanvasContent1", default)]
    pub canvas_content1: String,
    #[serde(rename = "FileRef", default, skip_serializing_if = "Option::is_none")]
    pub file_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListItemResponse {
    Verbose { d: PageItem },
    Plain(PageItem),
}

impl PageItem {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            canvas_content1: html.into(),
            file_ref: None,
        }
    }

    /// Parses a list item as returned by the REST API, with or without the
    /// verbose `d` envelope.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let response: ListItemResponse =
            serde_json::from_str(json).context("parse list item json")?;
        Ok(match response {
            ListItemResponse::Verbose { d } => d,
            ListItemResponse::Plain(item) => item,
        })
    }
}

/// Reads a page from disk: `.json` files are list items, anything else is the
/// raw canvas HTML.
pub fn load_page(path: &Path) -> anyhow::Result<PageItem> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read page: {}", path.display()))?;

    let item = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        PageItem::from_json(&contents).with_context(|| format!("load list item: {}", path.display()))?
    } else {
        PageItem::from_html(contents)
    };

    if item.canvas_content1.trim().is_empty() {
        tracing::warn!(path = %path.display(), "page has no canvas content");
    }
    Ok(item)
}

/// Where a page lives: the site's absolute URL and the server-relative URL
/// of the web that holds the page library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContext {
    pub absolute_url: String,
    pub server_relative_url: String,
}

impl SiteContext {
    pub fn new(absolute_url: impl Into<String>, server_relative_url: impl Into<String>) -> Self {
        Self {
            absolute_url: absolute_url.into(),
            server_relative_url: server_relative_url.into(),
        }
    }

    /// Absolute URL of the page stored at the server-relative `file_ref`.
    ///
    /// The base is the site URL up to the web's server-relative path; for the
    /// usual layout that is just scheme and host. `file_ref` only ever
    /// replaces the path, so `?` and `#` in file names are escaped and a
    /// leading `//` cannot move the link to another host.
    pub fn page_url(&self, file_ref: &str) -> anyhow::Result<String> {
        if !file_ref.starts_with('/') {
            anyhow::bail!("file ref must be server-relative (start with '/'): {file_ref}");
        }

        let site = Url::parse(&self.absolute_url)
            .with_context(|| format!("parse site url: {}", self.absolute_url))?;
        if site.cannot_be_a_base() {
            anyhow::bail!("site url must be hierarchical: {}", self.absolute_url);
        }

        let prefix = self.path_prefix(site.path());
        let mut page = site.clone();
        page.set_query(None);
        page.set_fragment(None);
        page.set_path(&format!("{prefix}{file_ref}"));

        Ok(page.to_string())
    }

    fn path_prefix<'a>(&self, site_path: &'a str) -> &'a str {
        let web_path = match self.server_relative_url.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match site_path.find(web_path) {
            Some(index) => site_path[..index].trim_end_matches('/'),
            None => {
                tracing::warn!(
                    site_path,
                    web_path,
                    "web path is not part of the site url; using the site origin"
                );
                ""
            }
        }
    }
}
