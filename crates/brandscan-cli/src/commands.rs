//! Command handlers for the CLI.
//!
//! Every handler validates the URL before building any client, writes its
//! result to stdout, and leaves diagnostics to `tracing` on stderr.

use std::path::Path;

use anyhow::Context;
use brandscan_core::AppConfig;
use brandscan_extract::{
    generate_guide, generate_report, validate_homepage_url, ExtractionMode, Extractor,
    GuideGenerator, ProfileGenerator,
};

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Extract brand intelligence and print it as JSON.
///
/// # Errors
///
/// Returns an error if the URL is invalid, a client cannot be built, or
/// every strategy in the chain fails.
pub(crate) async fn run_extract(
    config: &AppConfig,
    url: &str,
    mode: ExtractionMode,
) -> anyhow::Result<()> {
    let url = validate_homepage_url(url)?;
    let extractor = Extractor::from_config(config).context("failed to build extractor")?;

    let brand = extractor.extract(&url, mode).await?;
    print_json(&brand)
}

/// Generate a Markdown brand guide, printing it or writing it to `output`.
///
/// # Errors
///
/// Returns an error if the URL is invalid, extraction or generation fails,
/// or the output file cannot be written.
pub(crate) async fn run_guide(
    config: &AppConfig,
    url: &str,
    mode: ExtractionMode,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let url = validate_homepage_url(url)?;
    let extractor = Extractor::from_config(config).context("failed to build extractor")?;
    let guide = GuideGenerator::from_config(config).context("failed to build guide generator")?;

    let markdown = generate_guide(&extractor, &guide, &url, mode).await?;

    match output {
        Some(path) => {
            tokio::fs::write(path, format!("{markdown}\n"))
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                chars = markdown.chars().count(),
                "brand guide written"
            );
        }
        None => println!("{markdown}"),
    }
    Ok(())
}

/// Extract the flat brand profile and print it as JSON.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the single extraction attempt
/// fails.
pub(crate) async fn run_profile(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let url = validate_homepage_url(url)?;
    let generator =
        ProfileGenerator::from_config(config).context("failed to build profile generator")?;

    let profile = generator.generate(&url).await?;
    print_json(&profile)
}

/// Generate guide and profile together and print the combined report.
///
/// A half that fails is reported inside the JSON. The command only fails
/// when both halves do.
///
/// # Errors
///
/// Returns an error if the URL is invalid, a client cannot be built, or
/// neither half produced output.
pub(crate) async fn run_report(
    config: &AppConfig,
    url: &str,
    mode: ExtractionMode,
) -> anyhow::Result<()> {
    let url = validate_homepage_url(url)?;
    let extractor = Extractor::from_config(config).context("failed to build extractor")?;
    let guide = GuideGenerator::from_config(config).context("failed to build guide generator")?;
    let profile =
        ProfileGenerator::from_config(config).context("failed to build profile generator")?;

    let report = generate_report(&extractor, &guide, &profile, &url, mode).await;
    print_json(&report)?;

    if report.is_empty() {
        anyhow::bail!("brand guide and profile both failed for {url}");
    }
    Ok(())
}
