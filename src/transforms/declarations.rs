use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_span::Span;

use crate::options::FactoryPath;
use crate::private_names::PrivateNames;
use crate::transforms::builder::*;

/// Prepend one `var` statement declaring every generated binding:
///
/// ```js
/// var _foo = Symbol.private('foo'), _m = Symbol.private('m');
/// ```
///
/// Declarators follow the order in which the names were first seen. Nothing
/// is added when no name was generated. Returns the number of declarators.
pub fn emit_declarations<'a>(
    program: &mut Program<'a>,
    names: &PrivateNames,
    factory: &FactoryPath,
    allocator: &'a Allocator,
) -> usize {
    if names.is_empty() {
        return 0;
    }

    let span = Span::default();
    let declarators: Vec<(String, Expression<'a>)> = names
        .iter()
        .map(|generated| {
            let callee = create_member_chain(
                allocator,
                create_identifier_expression(allocator, factory.object().to_string(), span),
                factory.properties(),
                span,
            );
            (generated.binding.clone(), create_token_call(allocator, callee, generated.label.clone(), span))
        })
        .collect();

    let count = declarators.len();
    program.body.insert(0, create_var_declaration(allocator, declarators, span));

    count
}
