use hycdx_quotes::{ExtractConfig, extract_directory};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hycdx_quotes=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ExtractConfig::in_dir(std::env::current_dir()?);
    tracing::info!(dir = %config.input_dir.display(), "Scanning for quote dumps");

    let report = extract_directory(&config)?;

    match &report.output {
        Some(path) => tracing::info!(
            records = report.records,
            files = report.files_scanned,
            failed = report.files_failed.len(),
            output = %path.display(),
            "Done"
        ),
        None => tracing::info!(
            files = report.files_scanned,
            failed = report.files_failed.len(),
            "No quotes found; nothing written"
        ),
    }

    Ok(())
}
