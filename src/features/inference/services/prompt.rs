use minijinja::{context, Environment};

use crate::core::error::AppError;
use crate::features::inference::models::RawClassification;
use crate::features::tickets::models::Category;
use crate::shared::llm::StructuredResponse;

const INSPECTOR_TEMPLATE_NAME: &str = "inspector/system.jinja";
const INSPECTOR_TEMPLATE: &str =
    include_str!("../../../../templates/prompts/inspector/system.jinja");

/// Render the inspector instruction sent with every image
pub fn render_inspector_prompt(campus_name: &str) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.add_template(INSPECTOR_TEMPLATE_NAME, INSPECTOR_TEMPLATE)
        .map_err(|e| AppError::Internal(format!("Invalid inspector template: {}", e)))?;

    let template = env
        .get_template(INSPECTOR_TEMPLATE_NAME)
        .map_err(|e| AppError::Internal(format!("Inspector template missing: {}", e)))?;

    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();

    template
        .render(context! {
            campus_name => campus_name,
            categories => categories,
            schema => RawClassification::json_schema_string(),
        })
        .map_err(|e| AppError::Internal(format!("Failed to render inspector prompt: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_campus_and_categories() {
        let prompt = render_inspector_prompt("DTU").unwrap();

        assert!(prompt.contains("Senior Campus Infrastructure Inspector for DTU."));
        assert!(prompt.contains(
            "(Maintenance, Cleanliness, Safety, Infrastructure, Electrical, Plumbing)"
        ));
        assert!(prompt.contains("detectedIssue"));
        assert!(prompt.contains("Respond ONLY with valid JSON."));
    }
}
