mod cli;

use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::Parser;
use gitlink_core::config::Config;
use gitlink_core::service::LinkService;
use gitlink_core::{paths, ComposedLink, LinkRequest};
use tracing_subscriber::EnvFilter;

use cli::Options;

const LOG_ENV: &str = "GITLINK_LOG";

fn main() -> ExitCode {
    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => return fail("unexpected arguments; try 'gitlink --help'"),
    };

    init_tracing();

    match run(&options) {
        Ok(link) => {
            println!("{link}");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err.to_string()),
    }
}

fn run(options: &Options) -> anyhow::Result<ComposedLink> {
    let config = Config::from_env()?.with_flags(options.blame, options.open);

    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|cwd| anyhow::anyhow!("current directory {} is not valid UTF-8", cwd.display()))?;
    let path = paths::absolutize(&options.path, &cwd)?;

    let request = LinkRequest::new(path.into_string(), options.line.clone(), config.link_kind);
    let service = LinkService::from_config(&config);
    Ok(service.share(&request)?)
}

fn fail(message: &str) -> ExitCode {
    eprintln!("Error: {}", message.trim());
    ExitCode::FAILURE
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
