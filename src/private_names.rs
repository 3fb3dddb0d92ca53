use indexmap::IndexMap;
use serde::Serialize;

use crate::error::TransformError;
use crate::name_gen::NameGenerator;
use crate::scope::{ScopeId, ScopeTree};

/// The binding that stands in for one underscore-prefixed property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedIdentifier {
    /// The property name as written in the source, underscore included.
    pub name: String,
    /// The variable holding the private token.
    pub binding: String,
    /// Argument passed to the token factory: `name` minus one leading underscore.
    pub label: String,
}

pub fn is_private_name(name: &str) -> bool {
    name.starts_with('_')
}

/// Property name to generated binding, in first-discovery order.
#[derive(Debug, Default)]
pub struct PrivateNames {
    table: IndexMap<String, GeneratedIdentifier>,
}

impl PrivateNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&GeneratedIdentifier> {
        self.table.get(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedIdentifier> {
        self.table.values()
    }

    /// Look up the binding for `name`, creating it on first use.
    ///
    /// A new binding gets a name that is free in the whole unit and is
    /// recorded as a binding of the root scope, which is where its
    /// declaration will end up.
    pub fn resolve(
        &mut self,
        name: &str,
        use_site: ScopeId,
        scopes: &mut ScopeTree,
        generator: &NameGenerator,
    ) -> Result<&GeneratedIdentifier, TransformError> {
        if self.table.contains_key(name) {
            return Ok(&self.table[name]);
        }

        let root = scopes.root_of(use_site);
        let binding = generator.fresh(name, scopes)?;
        scopes.bind(root, &binding);

        let label = name.strip_prefix('_').unwrap_or(name).to_string();
        let generated = self.table.entry(name.to_string()).or_insert(GeneratedIdentifier {
            name: name.to_string(),
            binding,
            label,
        });

        Ok(generated)
    }
}
