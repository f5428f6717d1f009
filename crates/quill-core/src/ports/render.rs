//! Presentation port - turns a view's template name and context mapping
//! into a response body. The template pack itself is an external
//! collaborator; views only name templates and supply contexts.

/// Renders a named template with a context mapping.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, RenderError>;

    /// Content type of rendered bodies.
    fn content_type(&self) -> &'static str;
}

/// Rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Render failed: {0}")]
    Failed(String),
}
