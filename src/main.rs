use anyhow::Context;
use recipe_pipeline::{config::AppConfig, server, GroqClient, RecipePipeline};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let client = Arc::new(GroqClient::new(config.api_key));
    let pipeline = RecipePipeline::builder()
        .client(client)
        .models(config.models)
        .build()?;

    info!(
        recipe_model = %pipeline.models().recipe,
        ingredient_model = %pipeline.models().ingredient,
        calorie_model = %pipeline.models().calorie,
        insights_model = %pipeline.models().insights,
        "pipeline configured"
    );

    let app = server::router(Arc::new(pipeline));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
