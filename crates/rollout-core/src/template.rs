//! Build-file template rendering
//!
//! The template is plain text. Every literal occurrence of the
//! placeholder is replaced by the revision; there is no escaping and no
//! other syntax.

use crate::revision::Revision;

/// Result of rendering a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered<T = String> {
    pub content: T,
    /// Number of placeholders replaced
    pub replacements: usize,
}

#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    placeholder: String,
}

impl TemplateRenderer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replace every occurrence of the placeholder with `revision`
    ///
    /// An empty placeholder matches nothing and leaves the template as is.
    pub fn render(&self, template: &str, revision: &Revision) -> Rendered {
        if self.placeholder.is_empty() {
            return Rendered {
                content: template.to_string(),
                replacements: 0,
            };
        }

        let replacements = template.matches(self.placeholder.as_str()).count();
        let content = template.replace(self.placeholder.as_str(), revision.as_str());
        tracing::debug!(
            placeholder = %self.placeholder,
            replacements,
            "Rendered build file"
        );

        Rendered {
            content,
            replacements,
        }
    }

    /// Byte-level [`render`](Self::render): everything but the
    /// placeholder is copied unchanged, whatever its encoding
    pub fn render_bytes(&self, template: &[u8], revision: &Revision) -> Rendered<Vec<u8>> {
        let needle = self.placeholder.as_bytes();
        if needle.is_empty() {
            return Rendered {
                content: template.to_vec(),
                replacements: 0,
            };
        }

        let mut content = Vec::with_capacity(template.len());
        let mut replacements = 0;
        let mut rest = template;
        while let Some(pos) = find(rest, needle) {
            content.extend_from_slice(&rest[..pos]);
            content.extend_from_slice(revision.as_str().as_bytes());
            rest = &rest[pos + needle.len()..];
            replacements += 1;
        }
        content.extend_from_slice(rest);

        tracing::debug!(
            placeholder = %self.placeholder,
            replacements,
            "Rendered build file"
        );

        Rendered {
            content,
            replacements,
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
