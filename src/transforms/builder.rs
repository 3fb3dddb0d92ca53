use std::cell::Cell;

use oxc_allocator::Allocator;
use oxc_allocator::Box as OxcBox;
use oxc_allocator::Vec as OxcVec;
use oxc_ast::ast::*;
use oxc_span::{Atom, Span};
use oxc_syntax::reference::ReferenceFlag;

pub fn create_identifier_expression<'alloc>(allocator: &'alloc Allocator, name: String, span: Span) -> Expression<'alloc> {
    Expression::Identifier(OxcBox(allocator.alloc(IdentifierReference {
        name: Atom::from(name),
        span,
        reference_id: Cell::default(),
        reference_flag: ReferenceFlag::default(),
    })))
}

/// Only used to fill a hole while a node is being taken apart.
pub fn create_null<'alloc>(allocator: &'alloc Allocator, span: Span) -> Expression<'alloc> {
    Expression::NullLiteral(OxcBox(allocator.alloc(NullLiteral { span })))
}

/// `object.a.b.c` for a list of property names.
pub fn create_member_chain<'alloc>(
    allocator: &'alloc Allocator,
    object: Expression<'alloc>,
    properties: &[String],
    span: Span,
) -> Expression<'alloc> {
    properties.iter().fold(object, |object, property| {
        Expression::MemberExpression(OxcBox(allocator.alloc(MemberExpression::StaticMemberExpression(
            StaticMemberExpression {
                object,
                property: IdentifierName { name: Atom::from(property.clone()), span },
                optional: false,
                span,
            },
        ))))
    })
}

/// `callee('label')`
pub fn create_token_call<'alloc>(
    allocator: &'alloc Allocator,
    callee: Expression<'alloc>,
    label: String,
    span: Span,
) -> Expression<'alloc> {
    let mut arguments = OxcVec::with_capacity_in(1, allocator);
    arguments.push(Argument::Expression(Expression::StringLiteral(OxcBox(allocator.alloc(StringLiteral {
        value: Atom::from(label),
        span,
    })))));

    Expression::CallExpression(OxcBox(allocator.alloc(CallExpression {
        callee,
        arguments,
        optional: false,
        type_parameters: None,
        span,
    })))
}

/// A single `var a = x, b = y;` statement.
pub fn create_var_declaration<'alloc>(
    allocator: &'alloc Allocator,
    declarators: Vec<(String, Expression<'alloc>)>,
    span: Span,
) -> Statement<'alloc> {
    let mut declarations = OxcVec::with_capacity_in(declarators.len(), allocator);
    for (name, init) in declarators {
        declarations.push(VariableDeclarator {
            kind: VariableDeclarationKind::Var,
            id: BindingPattern {
                kind: BindingPatternKind::BindingIdentifier(OxcBox(allocator.alloc(BindingIdentifier {
                    name: Atom::from(name),
                    symbol_id: Cell::default(),
                    span,
                }))),
                type_annotation: None,
                optional: false,
            },
            init: Some(init),
            definite: false,
            span,
        });
    }

    Statement::Declaration(Declaration::VariableDeclaration(OxcBox(allocator.alloc(VariableDeclaration {
        kind: VariableDeclarationKind::Var,
        declarations,
        modifiers: Modifiers::empty(),
        span,
    }))))
}

/// A plain identifier on the left of an assignment.
pub fn create_identifier_target<'alloc>(allocator: &'alloc Allocator, name: String, span: Span) -> AssignmentTarget<'alloc> {
    AssignmentTarget::SimpleAssignmentTarget(SimpleAssignmentTarget::AssignmentTargetIdentifier(OxcBox(allocator.alloc(
        IdentifierReference {
            name: Atom::from(name),
            span,
            reference_id: Cell::default(),
            reference_flag: ReferenceFlag::default(),
        },
    ))))
}

/// `key: target` or `key: target = init` inside an object assignment pattern.
pub fn create_target_property<'alloc>(
    allocator: &'alloc Allocator,
    key: Expression<'alloc>,
    target: AssignmentTarget<'alloc>,
    init: Option<Expression<'alloc>>,
    span: Span,
) -> AssignmentTargetProperty<'alloc> {
    let binding = match init {
        Some(init) => AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(OxcBox(allocator.alloc(
            AssignmentTargetWithDefault { binding: target, init, span },
        ))),
        None => AssignmentTargetMaybeDefault::AssignmentTarget(target),
    };

    AssignmentTargetProperty::AssignmentTargetPropertyProperty(OxcBox(allocator.alloc(AssignmentTargetPropertyProperty {
        name: PropertyKey::Expression(key),
        binding,
        span,
    })))
}
