use crate::error::TransformError;
use crate::name_gen::NameGenerator;
use crate::options::TransformOptions;
use crate::private_names::{GeneratedIdentifier, PrivateNames};
use crate::scope::{ScopeId, ScopeTree};

/// Everything one compilation unit needs while it is being rewritten.
///
/// Created at the start of a transform and dropped at the end of it; nothing
/// in here outlives the unit or is shared with another one.
pub struct TransformContext<'o> {
    pub options: &'o TransformOptions,
    pub scopes: ScopeTree,
    pub names: PrivateNames,
    generator: NameGenerator,
}

impl<'o> TransformContext<'o> {
    pub fn new(options: &'o TransformOptions, scopes: ScopeTree) -> Self {
        Self {
            options,
            scopes,
            names: PrivateNames::new(),
            generator: NameGenerator::new(options.max_suffix),
        }
    }

    pub fn resolve(&mut self, name: &str, use_site: ScopeId) -> Result<&GeneratedIdentifier, TransformError> {
        self.names.resolve(name, use_site, &mut self.scopes, &self.generator)
    }
}
