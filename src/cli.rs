use clap::{Args, Parser, Subcommand};

use crate::anchors::AnchorConfig;
use crate::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Anchors for the web part, configured from the command line.
    Anchors(AnchorsArgs),
    /// Anchors for the page extension, configured by the web part on the page.
    ScrollToTop(ScrollToTopArgs),
    /// Print the anchor web part configuration embedded in a page.
    Discover(DiscoverArgs),
    /// Check a configuration for problems an editor should fix.
    Validate(ValidateArgs),
    /// Look up a localized UI string.
    Strings(StringsArgs),
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page to read: a `.json` list item (CanvasContent1/FileRef) or raw canvas HTML.
    #[arg(long)]
    pub page: String,

    /// Absolute page URL used as the base of every anchor link.
    #[arg(long, conflicts_with = "site_url")]
    pub page_url: Option<String>,

    /// Absolute site URL; combined with the item's FileRef (or `--file-ref`).
    #[arg(long)]
    pub site_url: Option<String>,

    /// Server-relative URL of the web holding the page (default `/`). The
    /// page URL keeps the part of `--site-url` before this path.
    #[arg(long, requires = "site_url")]
    pub web_url: Option<String>,

    /// Server-relative page path, overriding the list item's FileRef.
    #[arg(long, requires = "site_url")]
    pub file_ref: Option<String>,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Show the "no anchors" placeholder when nothing is found.
    #[arg(long)]
    pub edit_mode: bool,

    /// Locale for placeholder text.
    #[arg(long, default_value = crate::locale::DEFAULT_LOCALE)]
    pub locale: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Process H2 headings.
    #[arg(long)]
    pub h2: bool,

    /// Process H3 headings.
    #[arg(long)]
    pub h3: bool,

    /// Process H4 headings.
    #[arg(long)]
    pub h4: bool,

    /// Fluent UI icon name for H2 anchors.
    #[arg(long, default_value = "")]
    pub icon_h2: String,

    /// Fluent UI icon name for H3 anchors.
    #[arg(long, default_value = "")]
    pub icon_h3: String,

    /// Fluent UI icon name for H4 anchors.
    #[arg(long, default_value = "")]
    pub icon_h4: String,

    /// Numbered list without icons.
    #[arg(long)]
    pub numeric: bool,

    /// Drop the last heading.
    #[arg(long)]
    pub ignore_last: bool,

    /// Drop the second-to-last heading.
    #[arg(long)]
    pub ignore_second_last: bool,
}

impl ConfigArgs {
    pub fn to_config(&self) -> AnchorConfig {
        AnchorConfig {
            process_h2: self.h2,
            process_h3: self.h3,
            process_h4: self.h4,
            toggle_numeric_layout: self.numeric,
            ignore_last_tag: self.ignore_last,
            ignore_second_last_tag: self.ignore_second_last,
            icon_h2: self.icon_h2.clone(),
            icon_h3: self.icon_h3.clone(),
            icon_h4: self.icon_h4.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct AnchorsArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ScrollToTopArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Page to read: a `.json` list item or raw canvas HTML.
    #[arg(long)]
    pub page: String,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Locale for the warning messages.
    #[arg(long, default_value = crate::locale::DEFAULT_LOCALE)]
    pub locale: String,
}

#[derive(Debug, Args)]
pub struct StringsArgs {
    /// String name, e.g. `NoAnchorsFound`.
    #[arg(long)]
    pub key: String,

    #[arg(long, default_value = crate::locale::DEFAULT_LOCALE)]
    pub locale: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flags_map_to_anchor_config() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "inpagenav",
            "anchors",
            "--page",
            "page.html",
            "--page-url",
            "https://x.test/p.aspx",
            "--h2",
            "--h4",
            "--icon-h2",
            "Chevron",
            "--ignore-second-last",
        ])?;
        let Command::Anchors(args) = cli.command else {
            anyhow::bail!("expected anchors command");
        };

        assert_eq!(
            args.config.to_config(),
            AnchorConfig {
                process_h2: true,
                process_h4: true,
                icon_h2: "Chevron".to_owned(),
                ignore_second_last_tag: true,
                ..AnchorConfig::default()
            }
        );
        assert_eq!(args.output.format, OutputFormat::Json);
        Ok(())
    }

    #[test]
    fn page_url_and_site_url_conflict() {
        let result = Cli::try_parse_from([
            "inpagenav",
            "scroll-to-top",
            "--page",
            "p.html",
            "--page-url",
            "https://x.test/p.aspx",
            "--site-url",
            "https://x.test",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn web_url_parses_and_requires_site_url() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "inpagenav",
            "anchors",
            "--page",
            "p.json",
            "--site-url",
            "https://x.test/sites/hr",
            "--web-url",
            "/sites/hr",
        ])?;
        let Command::Anchors(args) = cli.command else {
            anyhow::bail!("expected anchors command");
        };
        assert_eq!(args.page.web_url.as_deref(), Some("/sites/hr"));

        let result = Cli::try_parse_from([
            "inpagenav",
            "anchors",
            "--page",
            "p.json",
            "--web-url",
            "/sites/hr",
        ]);
        assert!(result.is_err());
        Ok(())
    }
}
