//! Environment-driven server configuration, resolved once at startup.

use crate::{
    client::API_KEY_ENV,
    error::{PipelineError, Result},
    pipeline::StageModels,
};
use std::net::SocketAddr;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const RECIPE_MODEL_ENV: &str = "RECIPE_MODEL";
const INGREDIENT_MODEL_ENV: &str = "INGREDIENT_MODEL";
const CALORIE_MODEL_ENV: &str = "CALORIE_MODEL";
const INSIGHTS_MODEL_ENV: &str = "INSIGHTS_MODEL";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub models: StageModels,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// The API key is required; a missing key fails startup rather than
    /// surfacing per-request. Per-stage models and the bind address have
    /// defaults and may be overridden individually.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            PipelineError::Config(format!("missing {API_KEY_ENV} environment variable"))
        })?;

        let defaults = StageModels::default();
        let models = StageModels {
            recipe: env_or(RECIPE_MODEL_ENV, defaults.recipe),
            ingredient: env_or(INGREDIENT_MODEL_ENV, defaults.ingredient),
            calorie: env_or(CALORIE_MODEL_ENV, defaults.calorie),
            insights: env_or(INSIGHTS_MODEL_ENV, defaults.insights),
        };

        let bind_addr = env_or(BIND_ADDR_ENV, DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| PipelineError::Config(format!("invalid {BIND_ADDR_ENV}: {e}")))?;

        Ok(Self {
            api_key,
            models,
            bind_addr,
        })
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}
