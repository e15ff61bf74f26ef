use serde::{Deserialize, Serialize};

use crate::anchor_id::{anchor_id, decode_entities, strip_numeric_ordering};
use crate::headings::{Heading, HeadingLevel, collect_headings, filter_headings};

/// Which headings become anchors and how they are decorated.
///
/// Field names follow the stored web part properties so the struct can be
/// read straight from a page's embedded configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnchorConfig {
    pub process_h2: bool,
    pub process_h3: bool,
    pub process_h4: bool,
    pub toggle_numeric_layout: bool,
    pub ignore_last_tag: bool,
    pub ignore_second_last_tag: bool,
    pub icon_h2: String,
    pub icon_h3: String,
    pub icon_h4: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Neither H2 nor H3 headings are processed.
    NoPrimaryHeadingLevel,
    /// A processed level has no icon while the icon layout is active.
    MissingIcon(HeadingLevel),
}

impl ConfigWarning {
    /// Key of the localized message for this warning.
    pub fn message_key(self) -> &'static str {
        match self {
            Self::NoPrimaryHeadingLevel => "WarningHTagRequiredLabel",
            Self::MissingIcon(_) => "UIIconEmptyValue",
        }
    }
}

impl AnchorConfig {
    pub fn processes(&self, level: HeadingLevel) -> bool {
        match level {
            HeadingLevel::H2 => self.process_h2,
            HeadingLevel::H3 => self.process_h3,
            HeadingLevel::H4 => self.process_h4,
        }
    }

    /// Icon for `level`, or `""` in numeric layout.
    pub fn icon_for(&self, level: HeadingLevel) -> &str {
        if self.toggle_numeric_layout {
            return "";
        }
        match level {
            HeadingLevel::H2 => &self.icon_h2,
            HeadingLevel::H3 => &self.icon_h3,
            HeadingLevel::H4 => &self.icon_h4,
        }
    }

    /// Problems an editor should fix before publishing. Extraction runs
    /// regardless of these.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if !self.process_h2 && !self.process_h3 {
            warnings.push(ConfigWarning::NoPrimaryHeadingLevel);
        }
        if !self.toggle_numeric_layout {
            for level in [HeadingLevel::H2, HeadingLevel::H3, HeadingLevel::H4] {
                if self.processes(level) && self.icon_for(level).is_empty() {
                    warnings.push(ConfigWarning::MissingIcon(level));
                }
            }
        }
        warnings
    }
}

/// One entry of the in-page navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorTag {
    #[serde(rename = "TagUrl")]
    pub tag_url: String,
    #[serde(rename = "TagIcon")]
    pub tag_icon: String,
    #[serde(rename = "TagValue")]
    pub tag_value: String,
}

pub fn build_anchor_tag(heading: &Heading, page_url: &str, config: &AnchorConfig) -> AnchorTag {
    let tag_id = anchor_id(&heading.text);
    let tag_value = decode_entities(&strip_numeric_ordering(&heading.text));

    AnchorTag {
        tag_url: format!("{page_url}#{tag_id}"),
        tag_icon: config.icon_for(heading.level).to_owned(),
        tag_value,
    }
}

pub fn build_anchor_tags(
    headings: &[Heading],
    page_url: &str,
    config: &AnchorConfig,
) -> Vec<AnchorTag> {
    headings
        .iter()
        .map(|heading| build_anchor_tag(heading, page_url, config))
        .collect()
}

/// Derives the in-page navigation entries for a page body.
///
/// Pure: the result depends only on the arguments, and a page without
/// matching headings yields an empty list.
pub fn extract_anchors(html: &str, page_url: &str, config: &AnchorConfig) -> Vec<AnchorTag> {
    let headings = filter_headings(collect_headings(html), config);
    let tags = build_anchor_tags(&headings, page_url, config);
    tracing::debug!(count = tags.len(), page_url, "extracted anchors");
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://contoso.sharepoint.com/sites/hr/SitePages/Home.aspx";

    fn icon_config() -> AnchorConfig {
        AnchorConfig {
            process_h2: true,
            process_h3: true,
            process_h4: true,
            icon_h2: "ChevronRight".to_owned(),
            icon_h3: "Forward".to_owned(),
            icon_h4: String::new(),
            ..AnchorConfig::default()
        }
    }

    fn values(tags: &[AnchorTag]) -> Vec<&str> {
        tags.iter().map(|t| t.tag_value.as_str()).collect()
    }

    #[test]
    fn all_levels_disabled_yields_nothing() {
        let html = "<h2>A</h2><h3>B</h3><h4>C</h4>";
        let config = AnchorConfig {
            ignore_last_tag: true,
            ..AnchorConfig::default()
        };

        assert!(extract_anchors(html, PAGE_URL, &config).is_empty());
    }

    #[test]
    fn output_follows_source_order() {
        let html = "<h3>Details</h3><h2>Overview</h2><h4>Fine print</h4>";
        let config = AnchorConfig {
            process_h2: true,
            process_h3: true,
            ..AnchorConfig::default()
        };

        let tags = extract_anchors(html, PAGE_URL, &config);
        assert_eq!(values(&tags), vec!["Details", "Overview"]);
    }

    #[test]
    fn builds_url_icon_and_value() {
        let html = "<h2>1. Getting Started</h2><h3>Café Review</h3><h4>Notes</h4>";
        let tags = extract_anchors(html, PAGE_URL, &icon_config());

        assert_eq!(
            tags,
            vec![
                AnchorTag {
                    tag_url: format!("{PAGE_URL}#1.-getting-started"),
                    tag_icon: "ChevronRight".to_owned(),
                    tag_value: "Getting Started".to_owned(),
                },
                AnchorTag {
                    tag_url: format!("{PAGE_URL}#caf%C3%A9-review"),
                    tag_icon: "Forward".to_owned(),
                    tag_value: "Café Review".to_owned(),
                },
                AnchorTag {
                    tag_url: format!("{PAGE_URL}#notes"),
                    tag_icon: String::new(),
                    tag_value: "Notes".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn numeric_layout_never_uses_icons() {
        let html = "<h2>A</h2><h3>B</h3>";
        let config = AnchorConfig {
            toggle_numeric_layout: true,
            ..icon_config()
        };

        let tags = extract_anchors(html, PAGE_URL, &config);
        assert_eq!(tags.len(), 2);
        assert!(tags.iter().all(|t| t.tag_icon.is_empty()));
    }

    #[test]
    fn double_encoded_entities_are_decoded_for_display_and_id() {
        let html = "<h2>Fish &amp;amp; Chips</h2>";
        let tags = extract_anchors(html, PAGE_URL, &icon_config());

        assert_eq!(values(&tags), vec!["Fish & Chips"]);
        assert_eq!(tags[0].tag_url, format!("{PAGE_URL}#fish-chips"));
    }

    #[test]
    fn duplicate_headings_share_a_fragment() {
        let html = "<h2>Summary</h2><p>one</p><h2>Summary</h2>";
        let tags = extract_anchors(html, PAGE_URL, &icon_config());

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].tag_url, tags[1].tag_url);
    }

    #[test]
    fn extraction_is_repeatable() {
        let html = "<h2>One</h2><h3>Two</h3><h2>Three</h2>";
        let config = AnchorConfig {
            ignore_second_last_tag: true,
            ..icon_config()
        };

        assert_eq!(
            extract_anchors(html, PAGE_URL, &config),
            extract_anchors(html, PAGE_URL, &config)
        );
    }

    #[test]
    fn ignore_flags_reach_the_output() {
        let html = "<h2>One</h2><h2>Two</h2><h2>Three</h2>";
        let config = AnchorConfig {
            ignore_second_last_tag: true,
            ..icon_config()
        };

        let tags = extract_anchors(html, PAGE_URL, &config);
        assert_eq!(values(&tags), vec!["One", "Three"]);
    }

    #[test]
    fn serializes_with_widget_field_names() -> anyhow::Result<()> {
        let tag = AnchorTag {
            tag_url: "u".to_owned(),
            tag_icon: "i".to_owned(),
            tag_value: "v".to_owned(),
        };
        let json = serde_json::to_value(&tag)?;

        assert_eq!(
            json,
            serde_json::json!({ "TagUrl": "u", "TagIcon": "i", "TagValue": "v" })
        );
        Ok(())
    }

    #[test]
    fn config_reads_stored_property_names() -> anyhow::Result<()> {
        let config: AnchorConfig = serde_json::from_str(
            r#"{"processH2":true,"iconH2":"Chevron","ignoreSecondLastTag":true}"#,
        )?;

        assert!(config.process_h2);
        assert!(!config.process_h3);
        assert!(config.ignore_second_last_tag);
        assert_eq!(config.icon_h2, "Chevron");
        assert_eq!(config.icon_h3, "");
        Ok(())
    }

    #[test]
    fn validate_flags_missing_primary_levels_and_icons() {
        let config = AnchorConfig {
            process_h4: true,
            ..AnchorConfig::default()
        };

        assert_eq!(
            config.validate(),
            vec![
                ConfigWarning::NoPrimaryHeadingLevel,
                ConfigWarning::MissingIcon(HeadingLevel::H4),
            ]
        );
    }

    #[test]
    fn validate_ignores_icons_in_numeric_layout() {
        let config = AnchorConfig {
            process_h2: true,
            toggle_numeric_layout: true,
            ..AnchorConfig::default()
        };

        assert!(config.validate().is_empty());
    }
}
