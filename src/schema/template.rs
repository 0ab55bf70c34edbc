//! Markdown rendering of the review projection

use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::profile::SchemaProfile;
use crate::document::review::ReviewProjection;

const REVIEW_TEMPLATE: &str = "review.md.tera";

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// Renders review projections with the embedded Tera templates
pub struct ReviewRenderer {
    tera: Tera,
}

impl ReviewRenderer {
    /// Create a renderer with the embedded templates loaded
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render the review as Markdown
    pub fn render_markdown(
        &self,
        profile: SchemaProfile,
        review: &ReviewProjection,
    ) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == REVIEW_TEMPLATE) {
            return Err(TemplateError::NotFound(REVIEW_TEMPLATE.to_string()));
        }

        let mut context = tera::Context::new();
        context.insert("profile", profile.as_str());
        context.insert("sections", &review.sections);

        self.tera
            .render(REVIEW_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}
