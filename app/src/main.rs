use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentiment_app::{Form, HttpTransport, LoggingOpts};
use sentiment_core::{Controller, OrderingPolicy, SentimentClient, DEFAULT_BASE_URL};
use tokio::io::{stdin, stdout, BufReader};

#[derive(Parser)]
#[command(name = "sentiment")]
#[command(about = "Send text to a sentiment analysis service and show the result")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the analysis service
    #[arg(long, env = "SENTIMENT_BASE_URL", default_value = DEFAULT_BASE_URL, global(true))]
    base_url: String,

    /// Only show the outcome of the most recently issued request
    #[arg(long, global(true))]
    discard_stale: bool,

    #[command(flatten)]
    logging: LoggingOpts,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one text and exit
    Analyze {
        /// Text to analyze
        text: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    cli.logging.configure_logging();

    let policy = if cli.discard_stale {
        OrderingPolicy::LatestIssuedWins
    } else {
        OrderingPolicy::LastResolvedWins
    };
    let client = SentimentClient::new(&cli.base_url);
    tracing::debug!(base_url = client.base_url(), ?policy, "starting");

    let mut form = Form::new(Controller::with_policy(client, policy), HttpTransport::new());

    match cli.command {
        Some(Commands::Analyze { text }) => {
            let screen = form.analyze_once(&text).await;
            print!("{screen}");
            if screen.alert().is_some() {
                return Ok(ExitCode::FAILURE);
            }
        }
        None => {
            println!("Enter text to analyze its sentiment. ':again' resubmits, ':quit' exits.");
            form.run(BufReader::new(stdin()), stdout()).await?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
