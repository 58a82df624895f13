//! embedly command-line entry point.
//!
//! Calls an Embedly endpoint for the URLs given on the command line and
//! prints the resulting record list as JSON. Logging goes to stderr so
//! stdout stays parseable.

use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;

use embedly_client::{ApiClient, CallParams};
use embedly_core::ApiConfig;

const USAGE: &str = "usage: embedly [--endpoint oembed|objectify|preview] <url>...";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (endpoint, urls) = parse_args(std::env::args().skip(1))?;
    if urls.is_empty() {
        bail!(USAGE);
    }

    let config = ApiConfig::load()?;
    let client = ApiClient::new(config)?;

    tracing::info!("calling {} for {} urls", endpoint, urls.len());

    let outcome = client.call(&endpoint, CallParams::new(urls)).await?;

    println!("{}", serde_json::to_string_pretty(&outcome.records)?);

    Ok(())
}

/// Split argv into the endpoint name and the URL list.
fn parse_args(args: impl Iterator<Item = String>) -> Result<(String, Vec<String>)> {
    let mut endpoint = "oembed".to_string();
    let mut urls = Vec::new();

    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--endpoint" => match args.next() {
                Some(name) => endpoint = name,
                None => bail!(USAGE),
            },
            _ => urls.push(arg),
        }
    }

    Ok((endpoint, urls))
}
