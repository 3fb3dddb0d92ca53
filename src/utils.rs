use crate::log;
use crate::transforms::private_site::SiteKind;

pub fn rule(desc: &str) {
    log!("Rule: {}", desc);
}

pub fn example(from: &str, into: &str) {
    log!("Example: {} --> {}", from, into);
}

/// Trace a single rewritten site.
pub fn rewrite(kind: SiteKind, name: &str, binding: &str, is_new: bool) {
    if is_new {
        log!("- new private name `{}` bound to `{}`", name, binding);
    }
    log!("  - {:?} `{}` -> [{}]", kind, name, binding);
}
