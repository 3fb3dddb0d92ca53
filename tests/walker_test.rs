use insta::assert_snapshot;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use underscore_private::error::TransformError;
use underscore_private::scope::ScopeKind;
use underscore_private::transforms::private_site::PrivateSite;
use underscore_private::walker::{Visitor, Walker};

#[derive(Default)]
struct TraceVisitor {
    events: Vec<String>,
}

impl<'a> Visitor<'a> for TraceVisitor {
    fn enter_scope(&mut self, kind: ScopeKind) {
        self.events.push(format!("enter {:?}", kind));
    }

    fn leave_scope(&mut self) {
        self.events.push("leave".to_string());
    }

    fn visit_binding(&mut self, name: &str) {
        self.events.push(format!("binding {}", name));
    }

    fn visit_reference(&mut self, name: &str) {
        self.events.push(format!("reference {}", name));
    }

    fn visit_label(&mut self, name: &str) {
        self.events.push(format!("label {}", name));
    }

    fn visit_site(&mut self, site: PrivateSite<'_, 'a>) -> Result<(), TransformError> {
        let name = site.name_token().map_or("-".to_string(), |token| token.name.to_string());
        self.events.push(format!("site {:?} {}", site.kind(), name));
        Ok(())
    }
}

fn parse_and_walk(source: &str) -> String {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true);
    let parsed = Parser::new(&allocator, source, source_type).parse();
    assert!(parsed.errors.is_empty(), "unexpected parse errors: {:?}", parsed.errors);

    let mut program = parsed.program;
    let mut walker = Walker::new(TraceVisitor::default());
    walker.walk(&mut program).unwrap();
    walker.into_visitor().events.join("\n")
}

#[test]
fn test_class_members_and_sites() {
    let trace = parse_and_walk(r#"
        class C {
            _a = 1;
            m() { this._a; '_a' in this; }
        }
    "#);

    assert_snapshot!(trace, @r#"
    binding C
    enter Class
    site ClassMember _a
    site ClassMember m
    enter Function
    site PropertyAccess _a
    site MembershipTest _a
    leave
    leave
    "#);
}

#[test]
fn test_optional_chain_is_not_a_site() {
    let trace = parse_and_walk(r#"
        for (let i of xs) {
            a?.b._c;
            try {} catch (e) { e._d }
        }
    "#);

    assert_snapshot!(trace, @r#"
    enter Block
    binding i
    reference xs
    enter Block
    reference a
    enter Block
    leave
    enter Catch
    binding e
    site PropertyAccess _d
    reference e
    leave
    leave
    leave
    "#);
}

#[test]
fn test_function_names_and_params() {
    let trace = parse_and_walk(r#"
        function f(a, { _b: b }) {}
        const g = function h() {};
        outer: x._y = 1;
    "#);

    assert_snapshot!(trace, @r#"
    binding f
    enter Function
    binding a
    site ObjectMember _b
    binding b
    leave
    binding g
    enter Function
    binding h
    leave
    label outer
    site PropertyAccess _y
    reference x
    "#);
}

#[test]
fn test_assignment_patterns() {
    let trace = parse_and_walk(r#"
        ({ _a: this._b, c = d } = o);
        [e, ...f._g] = h;
    "#);

    assert_snapshot!(trace, @r#"
    site ObjectMember _a
    site PropertyAccess _b
    site ObjectMember c
    reference c
    reference d
    reference o
    reference e
    site PropertyAccess _g
    reference f
    reference h
    "#);
}

#[test]
fn test_computed_keys_are_walked_but_not_named() {
    let trace = parse_and_walk(r#"
        ({ [k]: 1, '_s': 2, _m() {} });
        ({ ['_p']: q, '_r': s } = o);
    "#);

    assert_snapshot!(trace, @r#"
    site ObjectMember -
    reference k
    site ObjectMember _s
    site ObjectMember _m
    enter Function
    leave
    site ObjectMember -
    reference q
    site ObjectMember _r
    reference s
    reference o
    "#);
}
