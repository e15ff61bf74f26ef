use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::anchors::{ConfigWarning, extract_anchors};
use crate::cli::{
    AnchorsArgs, DiscoverArgs, OutputArgs, PageArgs, ScrollToTopArgs, StringsArgs, ValidateArgs,
};
use crate::env_config::RootEnv;
use crate::locale;
use crate::page::{PageItem, SiteContext, load_page};
use crate::render::{RenderOptions, Widget, render};
use crate::webpart::discover_anchor_config;

pub fn anchors(args: AnchorsArgs, env: &RootEnv) -> anyhow::Result<()> {
    let item = load_page(&PathBuf::from(&args.page.page))?;
    let url = resolve_page_url(&args.page, &item)?;
    let config = args.config.to_config();

    for warning in config.validate() {
        tracing::warn!(?warning, "anchor configuration needs attention");
    }

    let tags = extract_anchors(&item.canvas_content1, &url, &config);
    tracing::info!(count = tags.len(), page_url = %url, "anchors extracted");

    let options = render_options(&args.output, Widget::Inline, config.toggle_numeric_layout, env);
    write_stdout(&render(&tags, &options)?)
}

pub fn scroll_to_top(args: ScrollToTopArgs, env: &RootEnv) -> anyhow::Result<()> {
    let item = load_page(&PathBuf::from(&args.page.page))?;
    let discovery = discover_anchor_config(&item.canvas_content1);

    let (tags, numeric) = match discovery.found_config() {
        Some(config) => {
            let url = resolve_page_url(&args.page, &item)?;
            let tags = extract_anchors(&item.canvas_content1, &url, config);
            tracing::info!(count = tags.len(), page_url = %url, "anchors extracted");
            (tags, config.toggle_numeric_layout)
        }
        None => {
            tracing::info!("anchor web part not found on page; no anchors to show");
            (Vec::new(), false)
        }
    };

    let options = render_options(&args.output, Widget::ScrollToTop, numeric, env);
    write_stdout(&render(&tags, &options)?)
}

pub fn discover(args: DiscoverArgs) -> anyhow::Result<()> {
    let item = load_page(&PathBuf::from(&args.page))?;
    let discovery = discover_anchor_config(&item.canvas_content1);

    let mut json = serde_json::to_string_pretty(&discovery).context("serialize discovery")?;
    json.push('\n');
    write_stdout(&json)
}

pub fn validate(args: ValidateArgs) -> anyhow::Result<()> {
    let warnings = args.config.to_config().validate();
    tracing::debug!(count = warnings.len(), "validated configuration");

    let mut out = String::new();
    for warning in warnings {
        let message = locale::lookup(warning.message_key(), &args.locale)?;
        match warning {
            ConfigWarning::MissingIcon(level) => out.push_str(&format!("{level}: {message}\n")),
            ConfigWarning::NoPrimaryHeadingLevel => out.push_str(&format!("{message}\n")),
        }
    }
    write_stdout(&out)
}

pub fn strings(args: StringsArgs) -> anyhow::Result<()> {
    let value = locale::lookup(&args.key, &args.locale)?;
    write_stdout(&format!("{value}\n"))
}

fn resolve_page_url(args: &PageArgs, item: &PageItem) -> anyhow::Result<String> {
    if let Some(url) = &args.page_url {
        return Ok(url.clone());
    }

    let Some(site_url) = &args.site_url else {
        anyhow::bail!("pass --page-url, or --site-url with a list item that has a FileRef");
    };
    let file_ref = args
        .file_ref
        .as_deref()
        .or(item.file_ref.as_deref())
        .ok_or_else(|| anyhow::anyhow!("page has no FileRef; pass --file-ref"))?;

    let site = SiteContext::new(
        site_url.as_str(),
        args.web_url.as_deref().unwrap_or("/"),
    );
    site.page_url(file_ref).context("build page url")
}

fn render_options<'a>(
    output: &'a OutputArgs,
    widget: Widget,
    numeric: bool,
    env: &'a RootEnv,
) -> RenderOptions<'a> {
    RenderOptions {
        format: output.format,
        widget,
        numeric,
        edit_mode: output.edit_mode,
        locale: &output.locale,
        env,
    }
}

fn write_stdout(text: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("write stdout")?;
    stdout.flush().context("flush stdout")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_args(page_url: Option<&str>, site_url: Option<&str>, file_ref: Option<&str>) -> PageArgs {
        PageArgs {
            page: "page.json".to_owned(),
            page_url: page_url.map(str::to_owned),
            site_url: site_url.map(str::to_owned),
            web_url: None,
            file_ref: file_ref.map(str::to_owned),
        }
    }

    fn item_with_ref(file_ref: Option<&str>) -> PageItem {
        PageItem {
            canvas_content1: String::new(),
            file_ref: file_ref.map(str::to_owned),
        }
    }

    #[test]
    fn explicit_page_url_wins() -> anyhow::Result<()> {
        let url = resolve_page_url(
            &page_args(Some("https://x.test/a.aspx"), None, None),
            &item_with_ref(Some("/b.aspx")),
        )?;

        assert_eq!(url, "https://x.test/a.aspx");
        Ok(())
    }

    #[test]
    fn site_url_uses_item_file_ref() -> anyhow::Result<()> {
        let url = resolve_page_url(
            &page_args(None, Some("https://x.test/sites/a"), None),
            &item_with_ref(Some("/sites/a/SitePages/Home.aspx")),
        )?;

        assert_eq!(url, "https://x.test/sites/a/SitePages/Home.aspx");
        Ok(())
    }

    #[test]
    fn file_ref_flag_overrides_item() -> anyhow::Result<()> {
        let url = resolve_page_url(
            &page_args(None, Some("https://x.test"), Some("/SitePages/Other.aspx")),
            &item_with_ref(Some("/SitePages/Home.aspx")),
        )?;

        assert_eq!(url, "https://x.test/SitePages/Other.aspx");
        Ok(())
    }

    #[test]
    fn web_url_keeps_site_path_prefix() -> anyhow::Result<()> {
        let args = PageArgs {
            web_url: Some("/sites/hr".to_owned()),
            ..page_args(None, Some("https://x.test/portal/sites/hr"), None)
        };
        let url = resolve_page_url(&args, &item_with_ref(Some("/sites/hr/SitePages/Home.aspx")))?;

        assert_eq!(url, "https://x.test/portal/sites/hr/SitePages/Home.aspx");
        Ok(())
    }

    #[test]
    fn missing_url_sources_are_errors() {
        assert!(resolve_page_url(&page_args(None, None, None), &item_with_ref(None)).is_err());
        assert!(
            resolve_page_url(
                &page_args(None, Some("https://x.test"), None),
                &item_with_ref(None)
            )
            .is_err()
        );
    }
}
