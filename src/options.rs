use serde::Deserialize;

use crate::error::TransformError;

/// Knobs for a single transform call.
///
/// Deserialized from a plain JS object on the wasm side, so every field has a
/// default and unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TransformOptions {
    /// Dotted path of the function that creates a private token.
    pub factory: String,
    /// Parse the source as an ES module rather than a script.
    pub module: bool,
    /// Highest numeric suffix tried when disambiguating a binding name.
    pub max_suffix: u32,
    /// Log every rewrite.
    pub verbose: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            factory: "Symbol.private".to_string(),
            module: true,
            max_suffix: 10_000,
            verbose: false,
        }
    }
}

/// A validated `factory` option, split on dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryPath {
    segments: Vec<String>,
}

impl FactoryPath {
    pub fn parse(path: &str) -> Result<Self, TransformError> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();

        let valid = segments.iter().all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() || first == '$' || first == '_' => {
                    chars.all(|c| c.is_alphanumeric() || c == '$' || c == '_')
                }
                _ => false,
            }
        });

        if !valid {
            return Err(TransformError::InvalidFactory(path.to_string()));
        }

        Ok(Self { segments })
    }

    /// The leading identifier, `Symbol` in `Symbol.private`.
    pub fn object(&self) -> &str {
        &self.segments[0]
    }

    /// The property names that follow the leading identifier.
    pub fn properties(&self) -> &[String] {
        &self.segments[1..]
    }
}
