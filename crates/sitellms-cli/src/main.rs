//! sitellms CLI - generate llms.txt-style site summaries from sitemaps

use clap::Parser;
use sitellms::{parse_delay, records_to_csv, render_document, Scrape};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// sitellms - sitemap-driven llms.txt generator
#[derive(Parser, Debug)]
#[command(name = "sitellms")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Site URL to scrape (schemeless input defaults to https://)
    url: Option<String>,

    /// Designated FAQ page URL
    #[arg(long)]
    faq_url: Option<String>,

    /// Delay between page fetches in seconds (non-numeric or negative means none)
    #[arg(long, default_value = "0")]
    delay: String,

    /// Write the rendered document to a file instead of stdout
    #[arg(long, short)]
    output: Option<String>,

    /// Also write a CSV export of all records to this file
    #[arg(long)]
    csv: Option<String>,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Print the scrape outcome as JSON instead of the rendered document
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // Require URL
    let url = match args.url {
        Some(url) => url,
        None => {
            eprintln!("Error: Missing required parameter: url");
            eprintln!("Usage: sitellms <URL>");
            std::process::exit(1);
        }
    };

    // Build scrape
    let mut builder = Scrape::builder().delay(parse_delay(&args.delay));

    if let Some(faq_url) = args.faq_url {
        builder = builder.faq_url(faq_url);
    }
    if let Some(ua) = args.user_agent {
        builder = builder.user_agent(ua);
    }

    let scrape = match builder.build() {
        Ok(scrape) => scrape,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Run the pipeline
    let outcome = match scrape.run(&url).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(csv_path) = args.csv {
        let csv = records_to_csv(&outcome.records);
        if let Err(e) = std::fs::write(&csv_path, csv) {
            eprintln!("Error writing {}: {}", csv_path, e);
            std::process::exit(1);
        }
    }

    let rendered = if args.json {
        serde_json::to_string_pretty(&outcome).unwrap_or_else(|e| {
            eprintln!("Error serializing outcome: {}", e);
            std::process::exit(1);
        })
    } else {
        render_document(&outcome.records, &outcome.faq_items)
    };

    match args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, rendered) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
        }
        None => writeln_safe(&rendered),
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
