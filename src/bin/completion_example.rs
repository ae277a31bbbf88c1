use chat_relay::config::Config;
use chat_relay::relay_core::{ChatMessage, CompletionClient};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // This should come from env var outside the program
    std::env::set_var("RUST_LOG", "warn");

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let client = CompletionClient::new(config.api_key, config.api_base);

    let reply = client
        .complete(&[ChatMessage::user("Say hello in one short sentence.")])
        .await?;
    println!("{}: {}", reply.role.as_str(), reply.content);

    Ok(())
}
