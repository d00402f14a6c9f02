//! Product content flows: descriptions, category suggestions, name ideas.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AiError;
use crate::generation::{text_field, text_list_field, OutputSchema, StructuredGenerator};

const MAX_NAME_SUGGESTIONS: u8 = 10;
const DEFAULT_NAME_SUGGESTIONS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescriptionInput {
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDescription {
    pub description: String,
}

#[instrument(skip(generator, input), fields(product = %input.product_name))]
pub async fn describe_product(
    generator: &dyn StructuredGenerator,
    input: &ProductDescriptionInput,
) -> Result<ProductDescription, AiError> {
    let name = required("product name", &input.product_name)?;

    let mut instruction = format!(
        "Write an engaging, accurate product description for an online store listing.\n\
         Product: {name}\n"
    );
    if let Some(category) = non_blank(input.category.as_deref()) {
        instruction.push_str(&format!("Category: {category}\n"));
    }
    if !input.features.is_empty() {
        instruction.push_str(&format!("Key features: {}\n", input.features.join("; ")));
    }
    instruction.push_str("Keep it under 120 words and do not invent certifications or prices.\n");

    let schema = OutputSchema::new().text("description", "The product description");
    let output = generator.generate(&instruction, &schema).await?;

    Ok(ProductDescription {
        description: text_field(&output, "description")?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestionInput {
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Categories already used by the catalog; the suggestion should prefer one of these.
    #[serde(default)]
    pub existing_categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySuggestion {
    pub category: String,
    pub reasoning: String,
}

#[instrument(skip(generator, input), fields(product = %input.product_name))]
pub async fn suggest_category(
    generator: &dyn StructuredGenerator,
    input: &CategorySuggestionInput,
) -> Result<CategorySuggestion, AiError> {
    let name = required("product name", &input.product_name)?;

    let mut instruction = format!("Suggest the best catalog category for the product \"{name}\".\n");
    if let Some(description) = non_blank(input.description.as_deref()) {
        instruction.push_str(&format!("Description: {description}\n"));
    }
    if input.existing_categories.is_empty() {
        instruction.push_str("Propose a short, conventional retail category name.\n");
    } else {
        instruction.push_str(&format!(
            "Prefer one of the existing categories if any fits: {}\n",
            input.existing_categories.join(", ")
        ));
    }

    let schema = OutputSchema::new()
        .text("category", "The suggested category name")
        .text("reasoning", "One sentence explaining the choice");
    let output = generator.generate(&instruction, &schema).await?;

    Ok(CategorySuggestion {
        category: text_field(&output, "category")?,
        reasoning: text_field(&output, "reasoning")?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNamesInput {
    pub description: String,
    #[serde(default)]
    pub count: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductNames {
    pub names: Vec<String>,
}

#[instrument(skip(generator, input))]
pub async fn suggest_names(
    generator: &dyn StructuredGenerator,
    input: &ProductNamesInput,
) -> Result<ProductNames, AiError> {
    let description = required("description", &input.description)?;
    let count = input.count.unwrap_or(DEFAULT_NAME_SUGGESTIONS);
    if count == 0 || count > MAX_NAME_SUGGESTIONS {
        return Err(AiError::invalid_input(format!(
            "count must be between 1 and {MAX_NAME_SUGGESTIONS}"
        )));
    }

    let instruction = format!(
        "Suggest {count} distinct, catchy product names for an online store.\n\
         Product description: {description}\n\
         Names must be short (at most five words) and must not reuse trademarked brands.\n"
    );

    let schema = OutputSchema::new().text_list("names", "The suggested product names");
    let output = generator.generate(&instruction, &schema).await?;

    let mut names = text_list_field(&output, "names")?;
    names.truncate(usize::from(count));
    Ok(ProductNames { names })
}

fn required<'a>(what: &str, value: &'a str) -> Result<&'a str, AiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AiError::invalid_input(format!("{what} cannot be empty")));
    }
    Ok(trimmed)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
