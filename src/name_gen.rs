use crate::error::TransformError;
use crate::scope::ScopeTree;

/// Produces binding names that are free everywhere in a unit.
///
/// Names are derived the same way every time: `_foo` becomes `_foo`, then
/// `_foo2`, `_foo3` and so on until one is free. Leading underscores and
/// trailing digits of the input are dropped before the suffix is added, so
/// `__foo` and `_foo7` both start from `_foo` as well.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    max_suffix: u32,
}

impl NameGenerator {
    pub fn new(max_suffix: u32) -> Self {
        Self { max_suffix: max_suffix.max(1) }
    }

    pub fn fresh(&self, base: &str, scopes: &ScopeTree) -> Result<String, TransformError> {
        let stem = uid_stem(base);

        for attempt in 1..=self.max_suffix {
            let candidate = candidate_name(&stem, attempt);
            if !scopes.is_taken(&candidate) {
                return Ok(candidate);
            }
        }

        Err(TransformError::NameExhausted { name: base.to_string(), attempts: self.max_suffix })
    }
}

fn candidate_name(stem: &str, attempt: u32) -> String {
    if attempt > 1 {
        format!("_{}{}", stem, attempt)
    } else {
        format!("_{}", stem)
    }
}

/// The part of a name that every generated candidate is built from.
pub fn uid_stem(name: &str) -> String {
    to_identifier(name)
        .trim_start_matches('_')
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_string()
}

/// Turn an arbitrary string into something usable as an identifier.
///
/// Anything outside `[A-Za-z0-9$_]` acts as a word separator and
/// upper-cases the character after it (`_a-b c` -> `_aBC`). Leading digits
/// and separators are dropped. Never returns an empty string.
pub fn to_identifier(name: &str) -> String {
    let dashed: String = name
        .chars()
        .map(|c| if is_identifier_char(c) { c } else { '-' })
        .collect();

    let trimmed = dashed.trim_start_matches(|c: char| c == '-' || c.is_ascii_digit());

    let mut out = String::with_capacity(trimmed.len());
    let mut upper_next = false;
    for c in trimmed.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    if out.is_empty() {
        "_".to_string()
    } else {
        out
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
