use anyhow::Context as _;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::anchors::AnchorTag;
use crate::env_config::RootEnv;
use crate::locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Html,
}

/// Which widget the anchors are rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    /// The web part: the list sits inline in the page.
    Inline,
    /// The page extension: a scroll-to-top button with the list in a dialog.
    ScrollToTop,
}

#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub format: OutputFormat,
    pub widget: Widget,
    pub numeric: bool,
    pub edit_mode: bool,
    pub locale: &'a str,
    pub env: &'a RootEnv,
}

pub fn render(tags: &[AnchorTag], options: &RenderOptions<'_>) -> anyhow::Result<String> {
    if options.format == OutputFormat::Json {
        let mut json = serde_json::to_string_pretty(tags).context("serialize anchors")?;
        json.push('\n');
        return Ok(json);
    }

    if tags.is_empty() {
        // The extension shows nothing at all without anchors; the web part
        // only tells editors.
        if !options.edit_mode || options.widget == Widget::ScrollToTop {
            return Ok(String::new());
        }
        return render_placeholder(options);
    }

    Ok(match (options.format, options.widget) {
        (OutputFormat::Text, _) => render_text(tags, options.numeric),
        (_, Widget::Inline) => render_inline_html(tags, options.numeric, options.env),
        (_, Widget::ScrollToTop) => render_dialog_html(tags, options.numeric, options.env),
    })
}

fn render_placeholder(options: &RenderOptions<'_>) -> anyhow::Result<String> {
    let title = locale::lookup("NoAnchorsFound", options.locale)?;
    let description = locale::lookup("NoAnchorsFoundDescription", options.locale)?;

    Ok(match options.format {
        OutputFormat::Html => format!(
            "<div class=\"placeholder\"><span class=\"placeholder-title\">{}</span>\
             <span class=\"placeholder-description\">{}</span></div>\n",
            encode_text(title),
            encode_text(description),
        ),
        _ => format!("{title}\n{}\n", description.trim_end()),
    })
}

pub fn render_text(tags: &[AnchorTag], numeric: bool) -> String {
    let mut out = String::new();
    for (index, tag) in tags.iter().enumerate() {
        let marker = if numeric {
            format!("{}.", index + 1)
        } else if tag.tag_icon.is_empty() {
            "-".to_owned()
        } else {
            format!("[{}]", tag.tag_icon)
        };
        out.push_str(&format!("{marker} {} <{}>\n", tag.tag_value, tag.tag_url));
    }
    out
}

fn link(tag: &AnchorTag, with_icon: bool) -> String {
    let icon = if with_icon {
        format!(
            "<i class=\"icon\" data-icon-name=\"{}\" aria-hidden=\"true\"></i>",
            encode_double_quoted_attribute(&tag.tag_icon)
        )
    } else {
        String::new()
    };
    format!(
        "<a class=\"anchor-link\" href=\"{}\">{icon}<span class=\"anchor-text\">{}</span></a>",
        encode_double_quoted_attribute(&tag.tag_url),
        encode_text(&tag.tag_value),
    )
}

fn render_list(tags: &[AnchorTag], numeric: bool) -> String {
    let mut out = String::new();
    if numeric {
        out.push_str("<ol class=\"anchor-list-numeric\">\n");
        for tag in tags {
            out.push_str(&format!("<li>{}</li>\n", link(tag, false)));
        }
        out.push_str("</ol>\n");
    } else {
        out.push_str("<div class=\"anchor-list\">\n");
        for tag in tags {
            out.push_str(&format!("<div class=\"anchor-item\">{}</div>\n", link(tag, true)));
        }
        out.push_str("</div>\n");
    }
    out
}

fn style_attr(env: &RootEnv) -> String {
    let style = env.style_attribute();
    if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", encode_double_quoted_attribute(&style))
    }
}

pub fn render_inline_html(tags: &[AnchorTag], numeric: bool, env: &RootEnv) -> String {
    format!(
        "<nav class=\"inpagenav\"{}>\n{}</nav>\n",
        style_attr(env),
        render_list(tags, numeric)
    )
}

pub fn render_dialog_html(tags: &[AnchorTag], numeric: bool, env: &RootEnv) -> String {
    format!(
        "<div class=\"scroll-to-top\"{}>\n\
         <a class=\"scroll-to-top-button\" href=\"#top\" aria-label=\"Scroll to top\"></a>\n\
         <dialog class=\"anchors-dialog\">\n{}</dialog>\n\
         </div>\n",
        style_attr(env),
        render_list(tags, numeric)
    )
}
