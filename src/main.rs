// ABOUTME: Entry point for the image-promote CLI application.
// ABOUTME: Parses arguments, runs one promotion, and maps failure to exit status 1.

mod cli;

use clap::Parser;
use cli::Cli;
use image_promote::diagnostics::Diagnostics;
use image_promote::error::Result;
use image_promote::exec::ProcessExecutor;
use image_promote::output::Output;
use image_promote::promote::Promotion;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output.into());
    output.start_timer();

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = cli.into_config()?;
    tracing::debug!(?config, "resolved configuration");

    let mut diag = Diagnostics::default();
    let mut promotion = Promotion::new(config, ProcessExecutor);
    let result = promotion.run(output, &mut diag).await;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    result?;

    output.success("Promotion complete");
    Ok(())
}
