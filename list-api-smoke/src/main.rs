use anyhow::{Context, Result};
use list_api_smoke::{check_endpoint, smoke_client, SmokeConfig, ENDPOINTS};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config = SmokeConfig::from_env()?;
    let client = smoke_client().context("Failed to build HTTP client")?;

    for endpoint in ENDPOINTS {
        check_endpoint(&client, &config, endpoint)
            .await
            .with_context(|| format!("{endpoint} endpoint test failed"))?;
        println!("{} endpoint test passed.", capitalize(endpoint));
    }

    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
