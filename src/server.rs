//! HTTP boundary exposing the pipeline.

use crate::{
    error::PipelineError,
    pipeline::{RecipePipeline, RecipeReport},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Build the application router.
pub fn router(pipeline: Arc<RecipePipeline>) -> Router {
    Router::new()
        .route("/generate-recipe/", post(generate_recipe))
        .route("/health", get(health))
        .with_state(pipeline)
}

#[derive(Debug, Deserialize)]
struct GenerateParams {
    cuisine: String,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    status: &'static str,
    #[serde(flatten)]
    report: RecipeReport,
}

async fn generate_recipe(
    State(pipeline): State<Arc<RecipePipeline>>,
    Query(params): Query<GenerateParams>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let report = pipeline.run(&params.cuisine).await?;
    Ok(Json(GenerateResponse {
        status: "success",
        report,
    }))
}

async fn health(State(pipeline): State<Arc<RecipePipeline>>) -> Json<serde_json::Value> {
    let models = pipeline.models();
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "models": {
            "recipe_generator": models.recipe,
            "ingredient_checker": models.ingredient,
            "calorie_agent": models.calorie,
            "insights_agent": models.insights,
        },
    }))
}

/// Pipeline failure surfaced over HTTP. Any stage failure maps to a 500
/// with the original error text in the `detail` field.
struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("pipeline failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}
