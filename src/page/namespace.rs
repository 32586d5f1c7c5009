//! Attribute and class namespacing.

pub const DEFAULT_PREFIX: &str = "imm";

/// Maps short logical names onto prefixed identifiers.
///
/// ```
/// use pagemodal::page::Namespace;
///
/// let ns = Namespace::new("imm");
/// assert_eq!(ns.name("modal-id"), "imm-modal-id");
/// assert_eq!(ns.data_attr("modal-id"), "data-imm-modal-id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl Namespace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Fully-qualified name, used for classes.
    pub fn name(&self, short: &str) -> String {
        if self.prefix.is_empty() {
            short.to_string()
        } else {
            format!("{}-{}", self.prefix, short)
        }
    }

    /// Fully-qualified `data-*` attribute name.
    pub fn data_attr(&self, short: &str) -> String {
        format!("data-{}", self.name(short))
    }
}
