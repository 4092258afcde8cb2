//! # Recipe Pipeline
//!
//! Four-stage LLM recipe workflow: recipe generation, ingredient analysis
//! with an optional revised recipe, calorie estimation, and insights.
//!
//! Each stage renders a prompt template, calls the completion service, and
//! feeds its output into the next stage. The calorie and insights stages
//! depend only on the revised recipe and run concurrently.
//!
//! ## Features
//!
//! - **Fixed stage chain** — recipe → ingredient analysis → calorie +
//!   insights, with automatic output-to-input piping
//! - **Per-stage models** — use different models for different stages
//! - **Revision modes** — the ingredient stage either requests a revised
//!   recipe or analyzes only
//! - **Marker extraction** — pulls labeled sections out of model free text,
//!   degrading to the unmodified input rather than failing
//! - **Fail-fast** — the first completion failure aborts the remaining
//!   stages; no partial result is returned
//! - **HTTP surface** — axum server exposing the pipeline and a health
//!   endpoint
//!
//! ## Quick Start
//!
//! ```no_run
//! use recipe_pipeline::{GroqClient, RecipePipeline};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(GroqClient::from_env()?);
//!
//!     let pipeline = RecipePipeline::builder().client(client).build()?;
//!
//!     let report = pipeline.run("Thai").await?;
//!     println!("{}", report.recipe);
//!     println!("{}", report.insights);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prompt;
pub mod server;

pub use client::{CompletionClient, CompletionRequest, GroqClient};
pub use config::AppConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{
    PipelineBuilder, RecipePipeline, RecipeReport, RevisionMode, StageModels,
};
pub use prompt::{PromptTemplate, PromptVariables};
