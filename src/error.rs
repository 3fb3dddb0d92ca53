use thiserror::Error;

/// Reasons a compilation unit can fail to transform.
///
/// A failed unit produces no output at all; nothing of a half-rewritten tree
/// is ever printed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("failed to parse source: {}", .0.join("; "))]
    Parse(Vec<String>),

    #[error("invalid private token factory `{0}`, expected a dotted identifier path like `Symbol.private`")]
    InvalidFactory(String),

    #[error("could not find a free binding name for `{name}` after {attempts} attempts")]
    NameExhausted { name: String, attempts: u32 },
}
