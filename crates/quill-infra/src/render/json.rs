//! JSON renderer - the default presentation adapter.
//!
//! The template pack is an external collaborator. Until one is wired in,
//! rendered pages go out as `{"template": ..., "context": ...}` bodies that
//! a front end (or a test) can consume directly.

use serde_json::json;

use quill_core::ports::{RenderError, Renderer};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, RenderError> {
        serde_json::to_string(&json!({
            "template": template,
            "context": context,
        }))
        .map_err(|e| RenderError::Failed(e.to_string()))
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wraps_template_and_context() {
        let body = JsonRenderer
            .render("index.html", &json!({ "page": { "number": 1 } }))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["template"], "index.html");
        assert_eq!(parsed["context"]["page"]["number"], 1);
    }
}
