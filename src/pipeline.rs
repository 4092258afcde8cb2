use crate::{
    client::{CompletionClient, CompletionRequest},
    error::{PipelineError, Result},
    extract,
    prompt::{self, PromptVariables},
};
use futures::future::try_join;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Default model serving recipe generation.
pub const DEFAULT_RECIPE_MODEL: &str = "mixtral-8x7b-32768";

/// Default model serving ingredient analysis, calorie estimation, and insights.
pub const DEFAULT_ANALYSIS_MODEL: &str = "llama-3.3-70b-versatile";

/// Model identifiers assigned per stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageModels {
    pub recipe: String,
    pub ingredient: String,
    pub calorie: String,
    pub insights: String,
}

impl Default for StageModels {
    fn default() -> Self {
        Self {
            recipe: DEFAULT_RECIPE_MODEL.to_string(),
            ingredient: DEFAULT_ANALYSIS_MODEL.to_string(),
            calorie: DEFAULT_ANALYSIS_MODEL.to_string(),
            insights: DEFAULT_ANALYSIS_MODEL.to_string(),
        }
    }
}

/// Whether the ingredient-analysis stage asks the model for a revised
/// recipe. The two modes share one pipeline; the mode selects the
/// ingredient template and the text fed to the calorie and insights stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevisionMode {
    /// Request a revised recipe, extract it, and analyze the revision.
    #[default]
    Revise,
    /// Analysis only. Calorie and insights stages use the original recipe.
    AnalyzeOnly,
}

/// Aggregate output of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReport {
    pub cuisine: String,
    pub recipe: String,
    pub ingredient_analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_recipe: Option<String>,
    pub calorie_analysis: String,
    pub insights: String,
}

/// Orchestrator for the four-stage recipe workflow.
///
/// Stages run strictly in order: recipe generation, ingredient extraction,
/// ingredient analysis, revised-recipe extraction, then calorie estimation
/// and insights concurrently. Any completion failure aborts the remaining
/// stages; no partial report is produced.
pub struct RecipePipeline {
    client: Arc<dyn CompletionClient>,
    models: StageModels,
    mode: RevisionMode,
}

impl std::fmt::Debug for RecipePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipePipeline")
            .field("models", &self.models)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl RecipePipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Model identifiers the pipeline is configured with.
    pub fn models(&self) -> &StageModels {
        &self.models
    }

    pub fn mode(&self) -> RevisionMode {
        self.mode
    }

    /// Run the full pipeline for one cuisine.
    pub async fn run(&self, cuisine: &str) -> Result<RecipeReport> {
        info!(cuisine, "generating recipe");
        let recipe_prompt =
            prompt::RECIPE.render(&PromptVariables::new().set("cuisine", cuisine))?;
        let recipe = self
            .client
            .complete(&CompletionRequest::new(&self.models.recipe, recipe_prompt))
            .await?;
        info!("recipe generated");

        let ingredients = extract::ingredients(&recipe);

        let ingredient_template = match self.mode {
            RevisionMode::Revise => prompt::INGREDIENT_REVISE,
            RevisionMode::AnalyzeOnly => prompt::INGREDIENT_ANALYZE,
        };
        let analysis_prompt =
            ingredient_template.render(&PromptVariables::new().set("ingredients", ingredients))?;
        let ingredient_analysis = self
            .client
            .complete(&CompletionRequest::new(
                &self.models.ingredient,
                analysis_prompt,
            ))
            .await?;
        info!("ingredients analyzed");

        // The calorie and insights stages both operate on the revised
        // recipe when revision is on, and on the original recipe otherwise.
        let (revised_recipe, subject) = match self.mode {
            RevisionMode::Revise => {
                let revised = extract::revised_recipe(&ingredient_analysis);
                (Some(revised.clone()), revised)
            }
            RevisionMode::AnalyzeOnly => (None, recipe.clone()),
        };

        let calorie_prompt =
            prompt::CALORIE.render(&PromptVariables::new().set("ingredients", subject.as_str()))?;
        let insights_prompt =
            prompt::INSIGHTS.render(&PromptVariables::new().set("recipe", subject.as_str()))?;

        let calorie_request = CompletionRequest::new(&self.models.calorie, calorie_prompt);
        let insights_request = CompletionRequest::new(&self.models.insights, insights_prompt);

        // The two calls share no data dependency; try_join fails the run
        // as soon as either call fails.
        let (calorie_analysis, insights) = try_join(
            self.client.complete(&calorie_request),
            self.client.complete(&insights_request),
        )
        .await?;
        info!("calorie analysis and insights completed");

        Ok(RecipeReport {
            cuisine: cuisine.to_string(),
            recipe,
            ingredient_analysis,
            revised_recipe,
            calorie_analysis,
            insights,
        })
    }
}

/// Builder for creating pipelines.
pub struct PipelineBuilder {
    client: Option<Arc<dyn CompletionClient>>,
    models: StageModels,
    mode: RevisionMode,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            models: StageModels::default(),
            mode: RevisionMode::default(),
        }
    }

    /// Set the completion client. Required.
    pub fn client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Override the per-stage model assignments.
    pub fn models(mut self, models: StageModels) -> Self {
        self.models = models;
        self
    }

    pub fn mode(mut self, mode: RevisionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build the pipeline, validating configuration.
    pub fn build(self) -> Result<RecipePipeline> {
        let client = self.client.ok_or_else(|| {
            PipelineError::Config("pipeline requires a completion client".to_string())
        })?;

        Ok(RecipePipeline {
            client,
            models: self.models,
            mode: self.mode,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
