use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "word-cli")]
#[command(about = "Client for the word frequency service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one occurrence of a word
    Record { word: String },
    /// Most frequent word starting with a prefix (all words if omitted)
    Query {
        #[arg(default_value = "")]
        prefix: String,
    },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Record { word } => {
            let res = client
                .post(format!("{}/service/word", base))
                .json(&json!({ "word": word }))
                .send()
                .await?;
            if res.status().is_success() {
                println!("recorded");
            } else {
                print_error(res).await;
            }
        }
        Commands::Query { prefix } => {
            let res = client
                .get(format!("{}/service/prefix", base))
                .query(&[("prefix", prefix.as_str())])
                .send()
                .await?;
            if res.status() == StatusCode::NOT_FOUND {
                eprintln!("No word matches prefix {:?}", prefix);
                return Ok(());
            }
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_error(res: reqwest::Response) {
    eprintln!("Error: service returned status {}", res.status());
    if let Ok(text) = res.text().await {
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        print_error(res).await;
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
