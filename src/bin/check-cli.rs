use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use subdomain_checker::AvailabilityResult;

#[derive(Parser)]
#[command(name = "check-cli")]
#[command(about = "Terminal client for a running subdomain-checker", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Print the raw JSON answer.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a subdomain is free (exit code 1 when taken)
    Check { subdomain: String },
    /// Show service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Check { subdomain } => {
            let res = client
                .post(format!("{}/api/check-domain", cli.url))
                .json(&json!({ "subdomain": subdomain.trim() }))
                .send()
                .await?;

            let status = res.status();
            let body: Value = res.json().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&body)?);
            }

            let result: AvailabilityResult = serde_json::from_value(body)?;
            if !cli.json {
                println!("{}", result.message);
            }
            if !status.is_success() {
                eprintln!("Error: service returned status {}", status);
            }
            if !result.available {
                std::process::exit(1);
            }
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
