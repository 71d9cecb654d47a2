use clap::Parser;
use link_sift::utils::truncate_for_log;
use link_sift::{Sift, SiftOutcome};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command-line arguments and layer configuration
    let args = Args::parse();
    let config = args.load_config()?;

    ::log::info!("Starting link sift for: {}", config.page_url);
    let start_time = std::time::Instant::now();

    let outcome = Sift::from_config(config).run().await?;
    report(&outcome);

    ::log::info!(
        "Run complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// How much of an LLM error response is echoed back
const ERROR_BODY_CHARS: usize = 2000;

/// Print the operator-facing summary of a run
fn report(outcome: &SiftOutcome) {
    match outcome {
        SiftOutcome::Saved { links, path, .. } => {
            println!("Extracted {} relevant links.", links.len());
            println!("Relevant links saved to {}", path.display());
        }
        SiftOutcome::FetchFailed { status } => {
            println!("Failed to fetch the page: {}", status);
            println!("No relevant links found.");
        }
        SiftOutcome::FilterRejected { status, body, .. } => {
            println!("Failed to process LLM request: {}", status);
            println!("Error response: {}", truncate_for_log(body, ERROR_BODY_CHARS));
            println!("No relevant links found.");
        }
        SiftOutcome::NoRelevantLinks { reason, .. } => {
            if let Some(reason) = reason {
                println!("{}", reason);
            }
            println!("No relevant links found.");
        }
        SiftOutcome::NoLinks => {
            println!("No relevant links found.");
        }
    }
}
