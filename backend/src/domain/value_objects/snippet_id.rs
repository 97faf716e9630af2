use std::fmt;

/// Opaque identifier of the snippet a permission protects. Upstream systems
/// with numeric snippet ids pass them as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnippetId(String);

impl SnippetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
