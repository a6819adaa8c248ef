mod config;
mod error;
mod igmp;
mod ip;
mod net;
mod socket;
mod utils;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const BANNER: &str = "send internet group management protocol with router alert";
const EXIT_USAGE: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    println!("{BANNER}");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(index) = test_index(&args) else {
        println!("usage: {} Nn", program_name(&args));
        return Ok(ExitCode::from(EXIT_USAGE));
    };
    debug!(%index);

    let config = Config::load().context("loading test configuration")?;
    let case = config
        .resolve(index)
        .with_context(|| format!("resolving test case {index}"))?;
    debug!(?case);

    igmp::send_igmp(&case).with_context(|| format!("sending on {}", case.interface))?;

    Ok(ExitCode::SUCCESS)
}

/// The single positional argument, or `None` when the count is wrong.
fn test_index(args: &[String]) -> Option<&str> {
    match args {
        [_, index] => Some(index.as_str()),
        _ => None,
    }
}

fn program_name(args: &[String]) -> String {
    args.first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
