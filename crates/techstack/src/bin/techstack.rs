// ABOUTME: CLI binary for techstack.
// ABOUTME: Maps the handbook page (or a given URL / saved HTML file) and prints the areas as JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use techstack::{Client, ScrapeError, TechStack, DEFAULT_URL};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "techstack")]
#[command(about = "Map a handbook page's tech-stack tables to JSON, grouped by area")]
struct Args {
    /// Page to fetch
    #[arg(default_value = DEFAULT_URL, conflicts_with = "html")]
    url: String,

    /// Map a saved HTML file instead of fetching
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output compact JSON instead of pretty
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// User-Agent header to send
    #[arg(long = "user-agent")]
    user_agent: Option<String>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(args: &Args) -> Result<Client, ScrapeError> {
    let mut builder = Client::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua);
    }
    builder.build()
}

fn scrape(args: &Args) -> Result<TechStack, ScrapeError> {
    let client = build_client(args)?;

    match &args.html {
        Some(path) => {
            let html = fs::read_to_string(path).map_err(|e| {
                ScrapeError::input(
                    path.display().to_string(),
                    "ReadHtml",
                    Some(anyhow::anyhow!("failed to read file: {}", e)),
                )
            })?;
            client.scrape_html(&html)
        }
        None => client.scrape(&args.url),
    }
}

fn write_output(args: &Args, stack: &TechStack) -> Result<(), ScrapeError> {
    let json = if args.compact {
        stack.to_json()?
    } else {
        stack.to_json_pretty()?
    };

    match &args.output {
        Some(path) => fs::write(path, format!("{}\n", json)).map_err(|e| {
            ScrapeError::output(
                path.display().to_string(),
                "Write",
                Some(anyhow::anyhow!("failed to write file: {}", e)),
            )
        }),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    // Nothing reaches stdout unless the whole run succeeded
    match scrape(&args).and_then(|stack| write_output(&args, &stack)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = %e.code, "{}", e);
            ExitCode::from(1)
        }
    }
}
