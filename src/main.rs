use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    inpagenav::logging::init().context("init logging")?;

    let cli = inpagenav::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let env = inpagenav::env_config::RootEnv::from_env();
    tracing::debug!(?env, "loaded theme environment");

    match cli.command {
        inpagenav::cli::Command::Anchors(args) => {
            inpagenav::commands::anchors(args, &env).context("anchors")?;
        }
        inpagenav::cli::Command::ScrollToTop(args) => {
            inpagenav::commands::scroll_to_top(args, &env).context("scroll-to-top")?;
        }
        inpagenav::cli::Command::Discover(args) => {
            inpagenav::commands::discover(args).context("discover")?;
        }
        inpagenav::cli::Command::Validate(args) => {
            inpagenav::commands::validate(args).context("validate")?;
        }
        inpagenav::cli::Command::Strings(args) => {
            inpagenav::commands::strings(args).context("strings")?;
        }
    }

    Ok(())
}
