use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_span::Span;

use crate::private_names::is_private_name;
use crate::transforms::builder::{create_identifier_target, create_null, create_target_property};

/// The key of an object or class member together with whatever decides how
/// it is printed.
pub enum KeySlot<'s, 'a> {
    /// A key with its own `computed` flag, and a `shorthand` flag for object
    /// members.
    Flagged {
        key: &'s mut PropertyKey<'a>,
        computed: &'s mut bool,
        shorthand: Option<&'s mut bool>,
    },
    /// A key inside an assignment pattern, `({ _a: b } = o)`, which prints as
    /// computed whenever it is an expression. `property_start` is where the
    /// whole property begins; a key that starts later sits inside `[...]`.
    Bare { key: &'s mut PropertyKey<'a>, property_start: u32 },
    /// `({ _a } = o)` and `({ _a = 1 } = o)`, which have no key node until
    /// they are expanded.
    ShorthandTarget(&'s mut AssignmentTargetProperty<'a>),
}

impl<'s, 'a> KeySlot<'s, 'a> {
    pub fn flagged(key: &'s mut PropertyKey<'a>, computed: &'s mut bool, shorthand: Option<&'s mut bool>) -> Self {
        KeySlot::Flagged { key, computed, shorthand }
    }

    fn name_token(&self) -> Option<NameToken<'_>> {
        match self {
            KeySlot::Flagged { computed, .. } if **computed => None,
            KeySlot::Flagged { key, .. } => key_name_token(key),
            KeySlot::Bare { key, property_start } => {
                key_name_token(key).filter(|token| token.span.start == *property_start)
            }
            KeySlot::ShorthandTarget(prop) => match &**prop {
                AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(ident) => Some(NameToken {
                    name: ident.binding.name.as_str(),
                    span: ident.binding.span,
                }),
                _ => None,
            },
        }
    }

    fn rewrite(self, binding: Expression<'a>, allocator: &'a Allocator) {
        match self {
            KeySlot::Flagged { key, computed, shorthand } => {
                *key = PropertyKey::Expression(binding);
                *computed = true;
                // `{ _x }` would print as `{ [_x2] }` otherwise
                if let Some(shorthand) = shorthand {
                    *shorthand = false;
                }
            }
            KeySlot::Bare { key, .. } => *key = PropertyKey::Expression(binding),
            KeySlot::ShorthandTarget(prop) => {
                let AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(ident) = &mut *prop else {
                    return;
                };
                let span = ident.span;
                let target = create_identifier_target(allocator, ident.binding.name.to_string(), ident.binding.span);
                let init = ident.init.take();

                // `{ _x = 1 }` becomes `{ [_x2]: _x = 1 }`
                *prop = create_target_property(allocator, binding, target, init, span);
            }
        }
    }
}

fn key_name_token<'k>(key: &'k PropertyKey<'_>) -> Option<NameToken<'k>> {
    match key {
        PropertyKey::Identifier(ident) => Some(NameToken { name: ident.name.as_str(), span: ident.span }),
        PropertyKey::Expression(Expression::StringLiteral(lit)) => Some(NameToken { name: lit.value.as_str(), span: lit.span }),
        _ => None,
    }
}

fn without_parens<'e, 'a>(expr: &'e Expression<'a>) -> &'e Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(paren) => without_parens(&paren.expression),
        _ => expr,
    }
}

/// A node whose static name may refer to a private property, along with the
/// part of it that has to change when it does.
pub enum PrivateSite<'s, 'a> {
    /// `a._b`
    PropertyAccess(&'s mut MemberExpression<'a>),
    /// The left operand of `'_b' in a`, parenthesized or not.
    MembershipTest(&'s mut Expression<'a>),
    /// `{ _b: 1 }`, `{ _b() {} }`, `{ get _b() {} }`, `const { _b: b } = a`,
    /// `({ _b: c } = a)`, `({ _b } = a)`
    ObjectMember(KeySlot<'s, 'a>),
    /// `class { _b = 1; _c() {} }`
    ClassMember(KeySlot<'s, 'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteKind {
    PropertyAccess,
    MembershipTest,
    ObjectMember,
    ClassMember,
}

#[derive(Debug, Clone, Copy)]
pub struct NameToken<'s> {
    pub name: &'s str,
    pub span: Span,
}

impl<'s, 'a> PrivateSite<'s, 'a> {
    pub fn kind(&self) -> SiteKind {
        match self {
            PrivateSite::PropertyAccess(_) => SiteKind::PropertyAccess,
            PrivateSite::MembershipTest(_) => SiteKind::MembershipTest,
            PrivateSite::ObjectMember(_) => SiteKind::ObjectMember,
            PrivateSite::ClassMember(_) => SiteKind::ClassMember,
        }
    }

    /// The literal name this site uses, if it has one. Computed accesses and
    /// bare identifiers on the left of `in` have none.
    pub fn name_token(&self) -> Option<NameToken<'_>> {
        match self {
            PrivateSite::PropertyAccess(member) => match &**member {
                MemberExpression::StaticMemberExpression(static_member) => Some(NameToken {
                    name: static_member.property.name.as_str(),
                    span: static_member.property.span,
                }),
                _ => None,
            },
            PrivateSite::MembershipTest(left) => match without_parens(left) {
                Expression::StringLiteral(lit) => Some(NameToken { name: lit.value.as_str(), span: lit.span }),
                _ => None,
            },
            PrivateSite::ObjectMember(slot) | PrivateSite::ClassMember(slot) => slot.name_token(),
        }
    }

    /// [`name_token`](Self::name_token), but only for underscore-prefixed names.
    pub fn private_name(&self) -> Option<NameToken<'_>> {
        self.name_token().filter(|token| is_private_name(token.name))
    }

    /// Make the site computed and key it by `binding`. Nothing else about the
    /// node changes.
    pub fn rewrite(self, binding: Expression<'a>, allocator: &'a Allocator) {
        match self {
            PrivateSite::PropertyAccess(member) => {
                let MemberExpression::StaticMemberExpression(static_member) = &mut *member else {
                    return;
                };
                let span = static_member.span;
                let optional = static_member.optional;
                let object = std::mem::replace(&mut static_member.object, create_null(allocator, span));

                *member = MemberExpression::ComputedMemberExpression(ComputedMemberExpression {
                    object,
                    expression: binding,
                    optional,
                    span,
                });
            }
            // Parentheses around the string go along with it
            PrivateSite::MembershipTest(left) => {
                *left = binding;
            }
            PrivateSite::ObjectMember(slot) | PrivateSite::ClassMember(slot) => slot.rewrite(binding, allocator),
        }
    }
}
