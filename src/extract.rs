//! Marker-based extraction of sub-sections from model-generated text.
//!
//! Model output is semi-structured free text, not a grammar. Both
//! extractors look for literal, case-sensitive labels and fall back to
//! returning the input unchanged when a label is absent, so extraction
//! never aborts a pipeline run.

const INGREDIENTS_MARKER: &str = "Ingredients:";
const INSTRUCTIONS_MARKER: &str = "Instructions:";
const REVISED_MARKER: &str = "Revised Recipe:";

/// Extract the ingredients section from generated recipe text.
///
/// Takes the text after the first `"Ingredients:"` label, truncated at the
/// first following `"Instructions:"` label, trimmed. Without an
/// `"Ingredients:"` label the whole input is returned unchanged.
pub fn ingredients(recipe_text: &str) -> String {
    let section = match recipe_text.find(INGREDIENTS_MARKER) {
        Some(start) => &recipe_text[start + INGREDIENTS_MARKER.len()..],
        None => return recipe_text.to_string(),
    };
    let section = match section.find(INSTRUCTIONS_MARKER) {
        Some(end) => &section[..end],
        None => section,
    };

    section.trim().to_string()
}

/// Extract the revised recipe from ingredient-analysis text.
///
/// Takes the text after the last `"Revised Recipe:"` label, trimmed.
/// Without the label the whole input is returned unchanged.
pub fn revised_recipe(analysis_text: &str) -> String {
    match analysis_text.rfind(REVISED_MARKER) {
        Some(start) => analysis_text[start + REVISED_MARKER.len()..]
            .trim()
            .to_string(),
        None => analysis_text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredients_between_markers() {
        let text = "Ingredients:\n- egg\nInstructions:\nmix";
        assert_eq!(ingredients(text), "- egg");
    }

    #[test]
    fn test_ingredients_no_markers() {
        assert_eq!(ingredients("no markers here"), "no markers here");
    }

    #[test]
    fn test_ingredients_without_instructions() {
        assert_eq!(ingredients("Ingredients: flour"), "flour");
    }

    #[test]
    fn test_ingredients_with_preamble() {
        let text = "Pad Thai, a street food classic.\n\n\
                    Ingredients:\n- 200g rice noodles\n- 2 eggs\n\n\
                    Instructions:\n1. Soak the noodles.";
        assert_eq!(ingredients(text), "- 200g rice noodles\n- 2 eggs");
    }

    #[test]
    fn test_ingredients_first_marker_wins() {
        let text = "Ingredients: a Ingredients: b Instructions: c";
        assert_eq!(ingredients(text), "a Ingredients: b");
    }

    #[test]
    fn test_ingredients_case_sensitive() {
        assert_eq!(ingredients("ingredients: flour"), "ingredients: flour");
    }

    #[test]
    fn test_revised_recipe_after_marker() {
        let text = "blah Revised Recipe: New recipe text";
        assert_eq!(revised_recipe(text), "New recipe text");
    }

    #[test]
    fn test_revised_recipe_last_occurrence() {
        let text = "Revised Recipe: A Revised Recipe: B";
        assert_eq!(revised_recipe(text), "B");
    }

    #[test]
    fn test_revised_recipe_no_marker() {
        assert_eq!(revised_recipe("nothing to find"), "nothing to find");
    }

    #[test]
    fn test_revised_recipe_trims_whitespace() {
        let text = "analysis...\nRevised Recipe:\n\n  Use tofu.  \n";
        assert_eq!(revised_recipe(text), "Use tofu.");
    }
}
