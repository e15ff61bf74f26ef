use scraper::{ElementRef, Html};
use serde::Serialize;

use crate::anchors::AnchorConfig;

/// Component id of the in-page navigation web part.
pub const ANCHOR_WEBPART_ID: &str = "69abf377-77b4-4042-9039-bd1f42a14d64";

const WEBPART_DATA_ATTR: &str = "data-sp-webpartdata";

/// Outcome of looking for the anchor web part on a page.
///
/// A page without the web part is not an error: `anchor_webpart_found` is
/// false and the configuration is left at its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpartDiscovery {
    pub anchor_webpart_found: bool,
    #[serde(flatten)]
    pub config: AnchorConfig,
}

impl WebpartDiscovery {
    fn not_found() -> Self {
        Self::default()
    }

    /// The discovered configuration, if the web part was on the page.
    pub fn found_config(&self) -> Option<&AnchorConfig> {
        self.anchor_webpart_found.then_some(&self.config)
    }
}

/// Finds the first anchor web part serialized in the page canvas and reads
/// its properties.
pub fn discover_anchor_config(html: &str) -> WebpartDiscovery {
    let document = Html::parse_document(html);
    let Some(data) = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter_map(|element| element.value().attr(WEBPART_DATA_ATTR))
        .find(|data| data.contains(ANCHOR_WEBPART_ID))
    else {
        tracing::debug!("anchor web part not present on page");
        return WebpartDiscovery::not_found();
    };

    match parse_webpart_data(data) {
        Ok(config) => WebpartDiscovery {
            anchor_webpart_found: true,
            config,
        },
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "failed to parse web part data");
            WebpartDiscovery::not_found()
        }
    }
}

/// Reads the `properties` object of a serialized web part.
///
/// Flags count only when they are literally `true`; icons fall back to an
/// empty string when absent or not a string.
pub fn parse_webpart_data(data: &str) -> anyhow::Result<AnchorConfig> {
    let unescaped = data.replace("&quot;", "\"");
    let value: serde_json::Value = serde_json::from_str(&unescaped)?;
    let properties = value
        .get("properties")
        .and_then(|v| v.as_object())
        .ok_or_else(|| anyhow::anyhow!("web part data has no `properties` object"))?;

    let flag = |key: &str| properties.get(key).and_then(|v| v.as_bool()) == Some(true);
    let icon = |key: &str| {
        properties
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_owned()
    };

    Ok(AnchorConfig {
        process_h2: flag("processH2"),
        process_h3: flag("processH3"),
        process_h4: flag("processH4"),
        toggle_numeric_layout: flag("toggleNumericLayout"),
        ignore_last_tag: flag("ignoreLastTag"),
        ignore_second_last_tag: flag("ignoreSecondLastTag"),
        icon_h2: icon("iconH2"),
        icon_h3: icon("iconH3"),
        icon_h4: icon("iconH4"),
    })
}
