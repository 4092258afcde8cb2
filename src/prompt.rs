use crate::error::{PipelineError, Result};
use std::collections::HashMap;

/// Recipe generation prompt. Expects `{cuisine}`.
pub const RECIPE: PromptTemplate = PromptTemplate::new(
    "recipe",
    "Generate a detailed recipe for {cuisine} cuisine. Include:\n\
     1. Recipe name and cultural background.\n\
     2. Ingredients with measurements.\n\
     3. Step-by-step instructions.\n\
     4. Serving suggestions and dietary information.",
);

/// Ingredient analysis prompt, analysis only. Expects `{ingredients}`.
pub const INGREDIENT_ANALYZE: PromptTemplate = PromptTemplate::new(
    "ingredient_analyze",
    "Analyze these ingredients for potential issues:\n\
     {ingredients}\n\
     1. Identify allergens.\n\
     2. Suggest healthier substitutions.\n\
     3. Highlight hard-to-find items.\n\
     4. Check if the recipe is healthy (yes/no) and why.",
);

/// Ingredient analysis prompt that also requests a revised recipe.
/// Expects `{ingredients}`. The response is expected to label the rewrite
/// with a "Revised Recipe:" marker for downstream extraction.
pub const INGREDIENT_REVISE: PromptTemplate = PromptTemplate::new(
    "ingredient_revise",
    "Analyze these ingredients for potential issues:\n\
     {ingredients}\n\
     1. Identify allergens.\n\
     2. Suggest healthier substitutions.\n\
     3. Highlight hard-to-find items.\n\
     4. Check if the recipe is healthy (yes/no) and why.\n\
     5. Provide a revised recipe that incorporates the suggested changes, \
     ensuring it is healthier, allergen-free, and uses easily available \
     ingredients. Label it \"Revised Recipe:\".",
);

/// Calorie estimation prompt. Expects `{ingredients}`.
pub const CALORIE: PromptTemplate = PromptTemplate::new(
    "calorie",
    "Estimate the calorie content of this recipe based on the ingredients:\n\
     {ingredients}\n\
     1. Provide the total calorie count.\n\
     2. Break down the calorie contribution of major ingredients.\n\
     3. Suggest ways to reduce calories if the recipe is high in calories.",
);

/// Insights prompt. Expects `{recipe}`.
pub const INSIGHTS: PromptTemplate = PromptTemplate::new(
    "insights",
    "Provide concise insights for this recipe:\n\
     {recipe}\n\
     1. Is this recipe healthy? (yes/no) and why.\n\
     2. Key nutritional highlights.\n\
     3. Calorie insights: Total calories and breakdown.\n\
     4. One sentence cultural significance.",
);

/// A named prompt template with `{placeholder}` variables.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    name: &'static str,
    text: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Render the template by substituting every `{key}` placeholder with
    /// its value from `vars`.
    ///
    /// Fails with [`PipelineError::MissingVariable`] if the template
    /// references a placeholder that `vars` does not supply. Substituted
    /// values are copied through verbatim, so braces inside a value are
    /// never re-interpreted as placeholders.
    pub fn render(&self, vars: &PromptVariables) -> Result<String> {
        let mut rendered = String::with_capacity(self.text.len());
        let mut rest = self.text;

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    let placeholder = &after[..end];
                    let value = vars.get(placeholder).ok_or_else(|| {
                        PipelineError::MissingVariable {
                            placeholder: placeholder.to_string(),
                            template: self.name.to_string(),
                        }
                    })?;
                    rendered.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    // Unmatched brace, copy through
                    rendered.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        rendered.push_str(rest);
        Ok(rendered)
    }
}

/// Variable values for prompt rendering, built fresh per stage call.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables {
    values: HashMap<String, String>,
}

impl PromptVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a placeholder value, replacing any previous value for the key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let template = PromptTemplate::new("greet", "Hello {name}, cook {dish}");
        let vars = PromptVariables::new()
            .set("name", "Alice")
            .set("dish", "pad thai");
        let result = template.render(&vars).unwrap();
        assert_eq!(result, "Hello Alice, cook pad thai");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let template = PromptTemplate::new("echo", "{word} and {word}");
        let vars = PromptVariables::new().set("word", "again");
        assert_eq!(template.render(&vars).unwrap(), "again and again");
    }

    #[test]
    fn test_render_missing_variable() {
        let template = PromptTemplate::new("greet", "Hello {name}");
        let result = template.render(&PromptVariables::new());
        match result.unwrap_err() {
            PipelineError::MissingVariable {
                placeholder,
                template,
            } => {
                assert_eq!(placeholder, "name");
                assert_eq!(template, "greet");
            }
            other => panic!("Expected MissingVariable, got {other:?}"),
        }
    }

    #[test]
    fn test_render_no_placeholders() {
        let template = PromptTemplate::new("static", "static prompt");
        let result = template.render(&PromptVariables::new()).unwrap();
        assert_eq!(result, "static prompt");
    }

    #[test]
    fn test_render_value_with_braces_not_reinterpreted() {
        let template = PromptTemplate::new("wrap", "Value: {value}");
        let vars = PromptVariables::new().set("value", "{not_a_placeholder}");
        let result = template.render(&vars).unwrap();
        assert_eq!(result, "Value: {not_a_placeholder}");
    }

    #[test]
    fn test_render_deterministic() {
        let vars = PromptVariables::new().set("cuisine", "Thai");
        let first = RECIPE.render(&vars).unwrap();
        let second = RECIPE.render(&vars).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_variables_overwrite() {
        let vars = PromptVariables::new()
            .set("key", "first")
            .set("key", "second");
        assert_eq!(vars.get("key"), Some("second"));
    }

    #[test]
    fn test_stage_templates_reference_their_placeholders() {
        let rendered = RECIPE
            .render(&PromptVariables::new().set("cuisine", "Thai"))
            .unwrap();
        assert!(rendered.contains("Thai cuisine"));

        for template in [&INGREDIENT_ANALYZE, &INGREDIENT_REVISE, &CALORIE] {
            let rendered = template
                .render(&PromptVariables::new().set("ingredients", "- rice"))
                .unwrap();
            assert!(rendered.contains("- rice"), "{}", template.name());
        }

        let rendered = INSIGHTS
            .render(&PromptVariables::new().set("recipe", "a recipe"))
            .unwrap();
        assert!(rendered.contains("a recipe"));
    }

    #[test]
    fn test_revise_template_requests_marker() {
        let rendered = INGREDIENT_REVISE
            .render(&PromptVariables::new().set("ingredients", "- egg"))
            .unwrap();
        assert!(rendered.contains("Revised Recipe:"));

        let rendered = INGREDIENT_ANALYZE
            .render(&PromptVariables::new().set("ingredients", "- egg"))
            .unwrap();
        assert!(!rendered.contains("Revised Recipe:"));
    }
}
