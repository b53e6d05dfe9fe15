// src/main.rs
mod utils;
mod schema;
mod extractors;
mod session;
mod report;

use std::io::{BufRead, Write};
use std::time::Duration;

use clap::Parser;

use extractors::field::FieldExtractor;
use extractors::tab::{Report, TabScraper};
use report::ReportWriter;
use schema::Tab;
use session::{Session, SessionConfig};
use utils::AppError;

/// Command Line Interface for the property record extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Property record URL (prompted for interactively when omitted)
    #[arg(short, long)]
    url: Option<String>,

    /// Output directory for the report
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// WebDriver endpoint to attach the browser session to
    #[arg(long, default_value = "http://localhost:9515")]
    webdriver_url: String,

    /// Settle delay after each tab navigation, in milliseconds
    #[arg(long, default_value_t = 3000)]
    settle_delay_ms: u64,

    /// Bound on the initial page readiness wait, in seconds
    #[arg(long, default_value_t = 30)]
    page_timeout_secs: u64,

    /// Debug mode - save each tab's raw page source for offline diagnosis
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    let url = match &args.url {
        Some(url) => url.clone(),
        None => prompt_line("Enter the Property URL: ")?,
    };
    let record_id = record_id_from_url(&url);
    if record_id.is_empty() {
        return Err(AppError::Config(format!("Could not derive a record id from URL: {url}")));
    }

    // 3. Start the browser session
    let config = SessionConfig {
        webdriver_url: args.webdriver_url.clone(),
        page_timeout: Duration::from_secs(args.page_timeout_secs),
        settle_delay: Duration::from_millis(args.settle_delay_ms),
    };
    let session = Session::connect(&config).await?;

    // Release the browser whichever way the run ends.
    let outcome = run(&session, &url, &record_id, &args).await;
    if let Err(e) = session.quit().await {
        tracing::warn!("Failed to release browser session: {}", e);
    }
    outcome
}

async fn run(session: &Session, url: &str, record_id: &str, args: &Args) -> Result<(), AppError> {
    // 4. Open the record page and wait for readiness
    session.open(url).await?;

    // 5. Human-gated manual login, then continue
    session.await_manual_login()?;
    tracing::info!("Login successful, continuing script...");

    // 6. Visit each tab in fixed order and assemble the report
    let extractor = FieldExtractor::default();
    let mut scraper = TabScraper::new(session, &extractor);
    if args.debug {
        let debug_dir = std::path::Path::new(&args.output_dir)
            .join(record_id)
            .join("debug");
        scraper = scraper.with_debug_dir(debug_dir);
    }

    let mut report = Report::new(record_id);
    for tab in Tab::ALL {
        let result = scraper.scrape_tab(tab).await?;
        tracing::info!(
            "Completed '{}' tab: {}/{} fields found",
            tab.name(),
            result.found_count(),
            result.len()
        );
        report.push(result);
    }

    // 7. Write the workbook and its metadata sidecar
    let writer = ReportWriter::new(&args.output_dir)?;
    let path = writer.save_report(&report)?;
    tracing::info!("Data saved to Excel file: {}", path.display());

    match writer.save_report_metadata(&report) {
        Ok(path) => tracing::info!("Saved report metadata to: {}", path.display()),
        Err(e) => tracing::error!("Failed to save report metadata: {}", e),
    }

    Ok(())
}

/// Record identifier: the trailing path segment of the record URL.
fn record_id_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn prompt_line(prompt: &str) -> Result<String, AppError> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
