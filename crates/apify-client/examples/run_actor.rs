//! Start an actor run and print the resulting run envelope.
//!
//! Usage: APIFY_API_TOKEN=... cargo run --example run_actor -- <actor-id>

use anyhow::Result;
use apify_client::{ApifyClient, RunOptions};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <actor-id>", args[0]);
        std::process::exit(1);
    }
    let actor_id = &args[1];

    let client = ApifyClient::from_env()?;

    let input = json!({ "url": "https://example.com" });
    let run = client
        .run_actor(actor_id, &input, &RunOptions::default())
        .await?;

    println!("run id:     {}", run["data"]["id"]);
    println!("run status: {}", run["data"]["status"]);

    Ok(())
}
