//! Renderer Boundary
//!
//! The content-rendering step is an external collaborator: the core hands it
//! the stored `content` and `content_type` verbatim and treats the output as
//! opaque. Transformation rules for non-HTML types are deliberately not
//! defined here.

// == Renderer Contract ==
pub trait Renderer: Send + Sync {
    /// Turns stored source into displayable output.
    fn render(&self, content: &str, content_type: &str) -> String;
}

// == Passthrough Renderer ==
/// Default renderer: returns the stored content unchanged for every content
/// type. Sanitization or translation belongs to whichever renderer a
/// deployment plugs in instead.
#[derive(Debug, Clone, Default)]
pub struct PassthroughRenderer;

impl Renderer for PassthroughRenderer {
    fn render(&self, content: &str, _content_type: &str) -> String {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_preserves_content() {
        let renderer = PassthroughRenderer;
        assert_eq!(renderer.render("<h1>hi</h1>", "html"), "<h1>hi</h1>");
        assert_eq!(renderer.render("# title", "markdown"), "# title");
    }
}
