pub mod builder;
pub mod declarations;
pub mod private_site;

use oxc_allocator::Allocator;

use crate::context::TransformContext;
use crate::error::TransformError;
use crate::scope::{ScopeCursor, ScopeKind};
use crate::transforms::builder::create_identifier_expression;
use crate::transforms::private_site::PrivateSite;
use crate::utils;
use crate::walker::Visitor;

/// Rewrites every underscore-prefixed site it is handed into a computed access
/// keyed by the binding generated for that name.
///
/// Relies on the scope tree in `ctx` having been collected from the same
/// program, so it can follow along with a [`ScopeCursor`].
pub struct PrivateNameRewriter<'a, 'c, 'o> {
    allocator: &'a Allocator,
    ctx: &'c mut TransformContext<'o>,
    cursor: ScopeCursor,
    rewritten: usize,
}

impl<'a, 'c, 'o> PrivateNameRewriter<'a, 'c, 'o> {
    pub fn new(allocator: &'a Allocator, ctx: &'c mut TransformContext<'o>) -> Self {
        let cursor = ScopeCursor::new(&ctx.scopes);
        Self { allocator, ctx, cursor, rewritten: 0 }
    }

    /// Number of sites changed so far.
    pub fn rewritten(&self) -> usize {
        self.rewritten
    }
}

impl<'a, 'c, 'o> Visitor<'a> for PrivateNameRewriter<'a, 'c, 'o> {
    fn enter_scope(&mut self, _kind: ScopeKind) {
        self.cursor.enter(&self.ctx.scopes);
    }

    fn leave_scope(&mut self) {
        self.cursor.leave(&self.ctx.scopes);
    }

    fn visit_site(&mut self, site: PrivateSite<'_, 'a>) -> Result<(), TransformError> {
        let Some((name, span)) = site.private_name().map(|token| (token.name.to_string(), token.span)) else {
            return Ok(());
        };

        let is_new = self.ctx.names.get(&name).is_none();
        let binding = self.ctx.resolve(&name, self.cursor.current())?.binding.clone();

        if self.ctx.options.verbose {
            utils::rewrite(site.kind(), &name, &binding, is_new);
        }

        site.rewrite(create_identifier_expression(self.allocator, binding, span), self.allocator);
        self.rewritten += 1;

        Ok(())
    }
}
