use std::marker::PhantomData;

use oxc_ast::ast::*;
use oxc_syntax::operator::BinaryOperator;

use crate::error::TransformError;
use crate::scope::ScopeKind;
use crate::transforms::private_site::{KeySlot, PrivateSite};

pub type WalkResult = Result<(), TransformError>;

/// Callbacks the [`Walker`] fires while it descends into a program.
///
/// Scopes are entered and left in strict nesting order and always in the same
/// order for the same tree. Sites are reported when their node is entered,
/// before any of its children.
pub trait Visitor<'a> {
    fn enter_scope(&mut self, _kind: ScopeKind) {}

    fn leave_scope(&mut self) {}

    /// A name declared in the current scope.
    fn visit_binding(&mut self, _name: &str) {}

    /// An identifier read or written as a variable.
    fn visit_reference(&mut self, _name: &str) {}

    fn visit_label(&mut self, _name: &str) {}

    fn visit_site(&mut self, _site: PrivateSite<'_, 'a>) -> WalkResult {
        Ok(())
    }
}

pub struct Walker<'a, V> {
    visitor: V,
    _ast: PhantomData<&'a ()>,
}

impl<'a, V: Visitor<'a>> Walker<'a, V> {
    pub fn new(visitor: V) -> Self {
        Self { visitor, _ast: PhantomData }
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    pub fn walk(&mut self, program: &mut Program<'a>) -> WalkResult {
        self.visit_statements(&mut program.body)
    }

    fn scoped<F>(&mut self, kind: ScopeKind, f: F) -> WalkResult
    where
        F: FnOnce(&mut Self) -> WalkResult,
    {
        self.visitor.enter_scope(kind);
        let result = f(self);
        self.visitor.leave_scope();
        result
    }

    fn visit_statements(&mut self, stmts: &mut [Statement<'a>]) -> WalkResult {
        for stmt in stmts.iter_mut() {
            self.visit_statement(stmt)?;
        }
        Ok(())
    }

    fn visit_statement(&mut self, stmt: &mut Statement<'a>) -> WalkResult {
        match stmt {
            Statement::BlockStatement(block) => {
                self.scoped(ScopeKind::Block, |walker| walker.visit_statements(&mut block.body))
            }
            Statement::BreakStatement(_) => Ok(()), // No children to visit
            Statement::ContinueStatement(_) => Ok(()), // No children to visit
            Statement::DebuggerStatement(_) => Ok(()), // No children to visit
            Statement::EmptyStatement(_) => Ok(()), // No children to visit
            Statement::DoWhileStatement(do_while) => {
                self.visit_statement(&mut do_while.body)?;
                self.visit_expression(&mut do_while.test)
            }
            Statement::ExpressionStatement(expr_stmt) => self.visit_expression(&mut expr_stmt.expression),
            Statement::ForInStatement(for_in) => self.scoped(ScopeKind::Block, |walker| {
                walker.visit_for_statement_left(&mut for_in.left)?;
                walker.visit_expression(&mut for_in.right)?;
                walker.visit_statement(&mut for_in.body)
            }),
            Statement::ForOfStatement(for_of) => self.scoped(ScopeKind::Block, |walker| {
                walker.visit_for_statement_left(&mut for_of.left)?;
                walker.visit_expression(&mut for_of.right)?;
                walker.visit_statement(&mut for_of.body)
            }),
            Statement::ForStatement(for_stmt) => self.scoped(ScopeKind::Block, |walker| {
                match &mut for_stmt.init {
                    Some(ForStatementInit::Expression(expr)) => walker.visit_expression(expr)?,
                    Some(ForStatementInit::VariableDeclaration(decl)) => walker.visit_variable_declaration(decl)?,
                    // `using` bindings are not tracked
                    Some(ForStatementInit::UsingDeclaration(_)) => {}
                    None => {}
                }
                if let Some(test) = &mut for_stmt.test {
                    walker.visit_expression(test)?;
                }
                if let Some(update) = &mut for_stmt.update {
                    walker.visit_expression(update)?;
                }
                walker.visit_statement(&mut for_stmt.body)
            }),
            Statement::IfStatement(if_stmt) => {
                self.visit_expression(&mut if_stmt.test)?;
                self.visit_statement(&mut if_stmt.consequent)?;
                if let Some(alt) = &mut if_stmt.alternate {
                    self.visit_statement(alt)?;
                }
                Ok(())
            }
            Statement::LabeledStatement(labeled) => {
                self.visitor.visit_label(labeled.label.name.as_str());
                self.visit_statement(&mut labeled.body)
            }
            Statement::ReturnStatement(ret) => match &mut ret.argument {
                Some(arg) => self.visit_expression(arg),
                None => Ok(()),
            },
            Statement::SwitchStatement(switch) => {
                self.visit_expression(&mut switch.discriminant)?;
                self.scoped(ScopeKind::Block, |walker| {
                    for case in switch.cases.iter_mut() {
                        if let Some(test) = &mut case.test {
                            walker.visit_expression(test)?;
                        }
                        walker.visit_statements(&mut case.consequent)?;
                    }
                    Ok(())
                })
            }
            Statement::ThrowStatement(throw) => self.visit_expression(&mut throw.argument),
            Statement::TryStatement(try_stmt) => {
                self.scoped(ScopeKind::Block, |walker| walker.visit_statements(&mut try_stmt.block.body))?;
                if let Some(handler) = &mut try_stmt.handler {
                    self.scoped(ScopeKind::Catch, |walker| {
                        if let Some(param) = &mut handler.param {
                            walker.visit_binding_pattern(param)?;
                        }
                        walker.visit_statements(&mut handler.body.body)
                    })?;
                }
                if let Some(finalizer) = &mut try_stmt.finalizer {
                    self.scoped(ScopeKind::Block, |walker| walker.visit_statements(&mut finalizer.body))?;
                }
                Ok(())
            }
            Statement::WhileStatement(while_stmt) => {
                self.visit_expression(&mut while_stmt.test)?;
                self.visit_statement(&mut while_stmt.body)
            }
            Statement::WithStatement(with) => {
                self.visit_expression(&mut with.object)?;
                self.visit_statement(&mut with.body)
            }
            Statement::Declaration(decl) => self.visit_declaration(decl),
            Statement::ModuleDeclaration(module_decl) => self.visit_module_declaration(module_decl),
        }
    }

    fn visit_declaration(&mut self, decl: &mut Declaration<'a>) -> WalkResult {
        match decl {
            Declaration::VariableDeclaration(var_decl) => self.visit_variable_declaration(var_decl),
            Declaration::FunctionDeclaration(func_decl) => self.visit_function(func_decl, true),
            Declaration::ClassDeclaration(class_decl) => self.visit_class(class_decl, true),
            // `using` declarations and types carry nothing we rewrite
            _ => Ok(()),
        }
    }

    fn visit_module_declaration(&mut self, module_decl: &mut ModuleDeclaration<'a>) -> WalkResult {
        match module_decl {
            ModuleDeclaration::ImportDeclaration(import_decl) => {
                if let Some(specifiers) = &import_decl.specifiers {
                    for specifier in specifiers.iter() {
                        let local = match specifier {
                            ImportDeclarationSpecifier::ImportSpecifier(specifier) => &specifier.local,
                            ImportDeclarationSpecifier::ImportDefaultSpecifier(specifier) => &specifier.local,
                            ImportDeclarationSpecifier::ImportNamespaceSpecifier(specifier) => &specifier.local,
                        };
                        self.visitor.visit_binding(local.name.as_str());
                    }
                }
                Ok(())
            }
            ModuleDeclaration::ExportNamedDeclaration(export_decl) => match &mut export_decl.declaration {
                Some(decl) => self.visit_declaration(decl),
                None => Ok(()),
            },
            ModuleDeclaration::ExportDefaultDeclaration(export_decl) => match &mut export_decl.declaration {
                ExportDefaultDeclarationKind::Expression(expr) => self.visit_expression(expr),
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => self.visit_function(func, true),
                ExportDefaultDeclarationKind::ClassDeclaration(class) => self.visit_class(class, true),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }

    fn visit_expression(&mut self, expr: &mut Expression<'a>) -> WalkResult {
        match expr {
            Expression::ArrayExpression(array) => {
                for elem in array.elements.iter_mut() {
                    match elem {
                        ArrayExpressionElement::Expression(expr) => self.visit_expression(expr)?,
                        ArrayExpressionElement::SpreadElement(spread) => self.visit_expression(&mut spread.argument)?,
                        ArrayExpressionElement::Elision(_) => {}
                    }
                }
                Ok(())
            }
            Expression::ArrowExpression(arrow) => self.scoped(ScopeKind::Function, |walker| {
                walker.visit_formal_parameters(&mut arrow.params)?;
                // An expression body is a single expression statement
                walker.visit_statements(&mut arrow.body.statements)
            }),
            Expression::AssignmentExpression(assign) => {
                self.visit_assignment_target(&mut assign.left)?;
                self.visit_expression(&mut assign.right)
            }
            Expression::AwaitExpression(await_expr) => self.visit_expression(&mut await_expr.argument),
            Expression::BinaryExpression(binary) => {
                if binary.operator == BinaryOperator::In {
                    self.visitor.visit_site(PrivateSite::MembershipTest(&mut binary.left))?;
                }
                self.visit_expression(&mut binary.left)?;
                self.visit_expression(&mut binary.right)
            }
            Expression::CallExpression(call) => self.visit_call_expression(call),
            Expression::ChainExpression(chain) => match &mut chain.expression {
                ChainElement::CallExpression(call) => self.visit_call_expression(call),
                ChainElement::MemberExpression(member) => self.visit_member_expression(member),
            },
            Expression::ClassExpression(class) => self.visit_class(class, false),
            Expression::ConditionalExpression(cond) => {
                self.visit_expression(&mut cond.test)?;
                self.visit_expression(&mut cond.consequent)?;
                self.visit_expression(&mut cond.alternate)
            }
            Expression::FunctionExpression(func) => self.visit_function(func, false),
            Expression::LogicalExpression(logical) => {
                self.visit_expression(&mut logical.left)?;
                self.visit_expression(&mut logical.right)
            }
            Expression::MemberExpression(member) => self.visit_member_expression(member),
            Expression::NewExpression(new_expr) => {
                self.visit_expression(&mut new_expr.callee)?;
                self.visit_arguments(&mut new_expr.arguments)
            }
            Expression::ObjectExpression(object) => {
                for prop in object.properties.iter_mut() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(prop) => {
                            let prop = &mut **prop;
                            self.visitor.visit_site(PrivateSite::ObjectMember(KeySlot::flagged(
                                &mut prop.key,
                                &mut prop.computed,
                                Some(&mut prop.shorthand),
                            )))?;
                            self.visit_property_key(&mut prop.key)?;
                            self.visit_expression(&mut prop.value)?;
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => self.visit_expression(&mut spread.argument)?,
                    }
                }
                Ok(())
            }
            Expression::ParenthesizedExpression(paren) => self.visit_expression(&mut paren.expression),
            Expression::SequenceExpression(seq) => {
                for expr in seq.expressions.iter_mut() {
                    self.visit_expression(expr)?;
                }
                Ok(())
            }
            Expression::TaggedTemplateExpression(tagged) => {
                self.visit_expression(&mut tagged.tag)?;
                self.visit_template_literal(&mut tagged.quasi)
            }
            Expression::TemplateLiteral(template) => self.visit_template_literal(template),
            Expression::UnaryExpression(unary) => self.visit_expression(&mut unary.argument),
            Expression::UpdateExpression(update) => self.visit_simple_assignment_target(&mut update.argument),
            Expression::YieldExpression(yield_expr) => match &mut yield_expr.argument {
                Some(arg) => self.visit_expression(arg),
                None => Ok(()),
            },
            Expression::ImportExpression(import) => {
                self.visit_expression(&mut import.source)?;
                for arg in import.arguments.iter_mut() {
                    self.visit_expression(arg)?;
                }
                Ok(())
            }
            // `#field in obj`, the private name itself is not ours
            Expression::PrivateInExpression(private_in) => self.visit_expression(&mut private_in.right),
            Expression::Identifier(ident) => {
                self.visitor.visit_reference(ident.name.as_str());
                Ok(())
            }
            Expression::TSAsExpression(ts) => self.visit_expression(&mut ts.expression),
            Expression::TSSatisfiesExpression(ts) => self.visit_expression(&mut ts.expression),
            Expression::TSNonNullExpression(ts) => self.visit_expression(&mut ts.expression),
            Expression::TSTypeAssertion(ts) => self.visit_expression(&mut ts.expression),
            Expression::TSInstantiationExpression(ts) => self.visit_expression(&mut ts.expression),
            // Literals, `this`, `super`, `import.meta` and JSX
            _ => Ok(()),
        }
    }

    fn visit_call_expression(&mut self, call: &mut CallExpression<'a>) -> WalkResult {
        self.visit_expression(&mut call.callee)?;
        self.visit_arguments(&mut call.arguments)
    }

    fn visit_arguments(&mut self, arguments: &mut [Argument<'a>]) -> WalkResult {
        for arg in arguments.iter_mut() {
            match arg {
                Argument::Expression(expr) => self.visit_expression(expr)?,
                Argument::SpreadElement(spread) => self.visit_expression(&mut spread.argument)?,
            }
        }
        Ok(())
    }

    fn visit_member_expression(&mut self, member: &mut MemberExpression<'a>) -> WalkResult {
        if !is_in_optional_chain(member) {
            self.visitor.visit_site(PrivateSite::PropertyAccess(&mut *member))?;
        }

        match member {
            MemberExpression::ComputedMemberExpression(computed) => {
                self.visit_expression(&mut computed.object)?;
                self.visit_expression(&mut computed.expression)
            }
            // "static" being the opposite of computed, not related to the "static" keyword
            MemberExpression::StaticMemberExpression(static_member) => self.visit_expression(&mut static_member.object),
            MemberExpression::PrivateFieldExpression(private_field) => self.visit_expression(&mut private_field.object),
        }
    }

    fn visit_template_literal(&mut self, template: &mut TemplateLiteral<'a>) -> WalkResult {
        for expr in template.expressions.iter_mut() {
            self.visit_expression(expr)?;
        }
        Ok(())
    }

    fn visit_property_key(&mut self, key: &mut PropertyKey<'a>) -> WalkResult {
        match key {
            PropertyKey::Expression(expr) => self.visit_expression(expr),
            _ => Ok(()),
        }
    }

    fn visit_for_statement_left(&mut self, left: &mut ForStatementLeft<'a>) -> WalkResult {
        match left {
            ForStatementLeft::VariableDeclaration(decl) => self.visit_variable_declaration(decl),
            ForStatementLeft::AssignmentTarget(target) => self.visit_assignment_target(target),
            ForStatementLeft::UsingDeclaration(_) => Ok(()),
        }
    }

    fn visit_variable_declaration(&mut self, decl: &mut VariableDeclaration<'a>) -> WalkResult {
        for declarator in decl.declarations.iter_mut() {
            self.visit_binding_pattern(&mut declarator.id)?;
            if let Some(init) = &mut declarator.init {
                self.visit_expression(init)?;
            }
        }
        Ok(())
    }

    fn visit_binding_pattern(&mut self, pattern: &mut BindingPattern<'a>) -> WalkResult {
        match &mut pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => {
                self.visitor.visit_binding(ident.name.as_str());
                Ok(())
            }
            BindingPatternKind::ObjectPattern(obj_pattern) => {
                for prop in obj_pattern.properties.iter_mut() {
                    self.visitor.visit_site(PrivateSite::ObjectMember(KeySlot::flagged(
                        &mut prop.key,
                        &mut prop.computed,
                        Some(&mut prop.shorthand),
                    )))?;
                    self.visit_property_key(&mut prop.key)?;
                    self.visit_binding_pattern(&mut prop.value)?;
                }
                if let Some(rest) = &mut obj_pattern.rest {
                    self.visit_binding_pattern(&mut rest.argument)?;
                }
                Ok(())
            }
            BindingPatternKind::ArrayPattern(array_pattern) => {
                for elem in array_pattern.elements.iter_mut().flatten() {
                    self.visit_binding_pattern(elem)?;
                }
                if let Some(rest) = &mut array_pattern.rest {
                    self.visit_binding_pattern(&mut rest.argument)?;
                }
                Ok(())
            }
            BindingPatternKind::AssignmentPattern(assign_pattern) => {
                self.visit_binding_pattern(&mut assign_pattern.left)?;
                self.visit_expression(&mut assign_pattern.right)
            }
        }
    }

    fn visit_assignment_target(&mut self, target: &mut AssignmentTarget<'a>) -> WalkResult {
        match target {
            AssignmentTarget::SimpleAssignmentTarget(simple) => self.visit_simple_assignment_target(simple),
            AssignmentTarget::AssignmentTargetPattern(pattern) => self.visit_assignment_target_pattern(pattern),
        }
    }

    fn visit_assignment_target_pattern(&mut self, pattern: &mut AssignmentTargetPattern<'a>) -> WalkResult {
        match pattern {
            AssignmentTargetPattern::ArrayAssignmentTarget(array) => {
                for elem in array.elements.iter_mut().flatten() {
                    self.visit_assignment_target_maybe_default(elem)?;
                }
                if let Some(rest) = &mut array.rest {
                    self.visit_assignment_target(rest)?;
                }
                Ok(())
            }
            AssignmentTargetPattern::ObjectAssignmentTarget(object) => {
                for prop in object.properties.iter_mut() {
                    self.visit_assignment_target_property(prop)?;
                }
                if let Some(rest) = &mut object.rest {
                    self.visit_assignment_target(rest)?;
                }
                Ok(())
            }
        }
    }

    fn visit_assignment_target_property(&mut self, prop: &mut AssignmentTargetProperty<'a>) -> WalkResult {
        // `{ _x } = o` only gets a key of its own once it is rewritten
        if matches!(prop, AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(_)) {
            self.visitor.visit_site(PrivateSite::ObjectMember(KeySlot::ShorthandTarget(&mut *prop)))?;
        }

        match prop {
            AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(ident) => {
                self.visitor.visit_reference(ident.binding.name.as_str());
                match &mut ident.init {
                    Some(init) => self.visit_expression(init),
                    None => Ok(()),
                }
            }
            AssignmentTargetProperty::AssignmentTargetPropertyProperty(property) => {
                let property = &mut **property;
                let property_start = property.span.start;
                let slot = KeySlot::Bare { key: &mut property.name, property_start };
                self.visitor.visit_site(PrivateSite::ObjectMember(slot))?;
                self.visit_property_key(&mut property.name)?;
                self.visit_assignment_target_maybe_default(&mut property.binding)
            }
        }
    }

    fn visit_assignment_target_maybe_default(&mut self, target: &mut AssignmentTargetMaybeDefault<'a>) -> WalkResult {
        match target {
            AssignmentTargetMaybeDefault::AssignmentTarget(target) => self.visit_assignment_target(target),
            AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(with_default) => {
                self.visit_assignment_target(&mut with_default.binding)?;
                self.visit_expression(&mut with_default.init)
            }
        }
    }

    fn visit_simple_assignment_target(&mut self, target: &mut SimpleAssignmentTarget<'a>) -> WalkResult {
        match target {
            SimpleAssignmentTarget::AssignmentTargetIdentifier(ident) => {
                self.visitor.visit_reference(ident.name.as_str());
                Ok(())
            }
            SimpleAssignmentTarget::MemberAssignmentTarget(member) => self.visit_member_expression(member),
            SimpleAssignmentTarget::TSAsExpression(ts) => self.visit_expression(&mut ts.expression),
            SimpleAssignmentTarget::TSSatisfiesExpression(ts) => self.visit_expression(&mut ts.expression),
            SimpleAssignmentTarget::TSNonNullExpression(ts) => self.visit_expression(&mut ts.expression),
            SimpleAssignmentTarget::TSTypeAssertion(ts) => self.visit_expression(&mut ts.expression),
        }
    }

    fn visit_formal_parameters(&mut self, params: &mut FormalParameters<'a>) -> WalkResult {
        for param in params.items.iter_mut() {
            self.visit_binding_pattern(&mut param.pattern)?;
        }
        if let Some(rest) = &mut params.rest {
            self.visit_binding_pattern(&mut rest.argument)?;
        }
        Ok(())
    }

    /// `binds_outer` is set for declarations, whose name lives in the
    /// enclosing scope rather than in the function's own.
    fn visit_function(&mut self, func: &mut Function<'a>, binds_outer: bool) -> WalkResult {
        if binds_outer {
            if let Some(id) = &func.id {
                self.visitor.visit_binding(id.name.as_str());
            }
        }

        self.scoped(ScopeKind::Function, |walker| {
            if !binds_outer {
                if let Some(id) = &func.id {
                    walker.visitor.visit_binding(id.name.as_str());
                }
            }
            walker.visit_formal_parameters(&mut func.params)?;
            if let Some(body) = &mut func.body {
                walker.visit_statements(&mut body.statements)?;
            }
            Ok(())
        })
    }

    fn visit_class(&mut self, class: &mut Class<'a>, binds_outer: bool) -> WalkResult {
        if binds_outer {
            if let Some(id) = &class.id {
                self.visitor.visit_binding(id.name.as_str());
            }
        }

        if let Some(super_class) = &mut class.super_class {
            self.visit_expression(super_class)?;
        }

        self.scoped(ScopeKind::Class, |walker| {
            if !binds_outer {
                if let Some(id) = &class.id {
                    walker.visitor.visit_binding(id.name.as_str());
                }
            }
            for element in class.body.body.iter_mut() {
                walker.visit_class_element(element)?;
            }
            Ok(())
        })
    }

    fn visit_class_element(&mut self, element: &mut ClassElement<'a>) -> WalkResult {
        match element {
            ClassElement::MethodDefinition(method) => {
                let method = &mut **method;
                self.visitor.visit_site(PrivateSite::ClassMember(KeySlot::flagged(&mut method.key, &mut method.computed, None)))?;
                self.visit_property_key(&mut method.key)?;
                self.visit_function(&mut method.value, false)
            }
            ClassElement::PropertyDefinition(prop) => {
                let prop = &mut **prop;
                self.visitor.visit_site(PrivateSite::ClassMember(KeySlot::flagged(&mut prop.key, &mut prop.computed, None)))?;
                self.visit_property_key(&mut prop.key)?;
                match &mut prop.value {
                    Some(value) => self.visit_expression(value),
                    None => Ok(()),
                }
            }
            ClassElement::StaticBlock(block) => {
                self.scoped(ScopeKind::StaticBlock, |walker| walker.visit_statements(&mut block.body))
            }
            // Auto-accessors and TS-only members
            _ => Ok(()),
        }
    }
}

/// Whether `member` is part of an optional chain, from the first `?.` on.
/// `a?.b._c` is, `a._b?.c` only for its outer access.
pub fn is_in_optional_chain(member: &MemberExpression<'_>) -> bool {
    let (object, optional) = match member {
        MemberExpression::ComputedMemberExpression(computed) => (&computed.object, computed.optional),
        MemberExpression::StaticMemberExpression(static_member) => (&static_member.object, static_member.optional),
        MemberExpression::PrivateFieldExpression(private_field) => (&private_field.object, private_field.optional),
    };
    optional || continues_optional_chain(object)
}

fn continues_optional_chain(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::MemberExpression(member) => is_in_optional_chain(member),
        Expression::CallExpression(call) => call.optional || continues_optional_chain(&call.callee),
        _ => false,
    }
}
