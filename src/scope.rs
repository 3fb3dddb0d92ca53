use std::collections::HashSet;

use oxc_ast::ast::Program;

use crate::error::TransformError;
use crate::walker::{Visitor, Walker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Program,
    Function,
    Block,
    Catch,
    Class,
    StaticBlock,
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub bindings: HashSet<String>,
}

/// Lexical scopes of one compilation unit, stored as an arena.
///
/// Scopes are numbered in the order the walker enters them, so a second walk
/// over the same tree can find its way back to the same scopes by counting
/// (see [`ScopeCursor`]). Besides per-scope bindings the tree remembers every
/// identifier referenced and every label used anywhere in the unit; all three
/// are off limits for generated names.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    bound: HashSet<String>,
    referenced: HashSet<String>,
    labels: HashSet<String>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope { parent: None, kind: ScopeKind::Program, bindings: HashSet::new() }],
            bound: HashSet::new(),
            referenced: HashSet::new(),
            labels: HashSet::new(),
        }
    }

    /// Build the scope tree of a parsed program.
    pub fn collect(program: &mut Program<'_>) -> Result<Self, TransformError> {
        let mut walker = Walker::new(ScopeCollector::new());
        walker.walk(program)?;
        Ok(walker.into_visitor().tree)
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn add_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope { parent: Some(parent), kind, bindings: HashSet::new() });
        id
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).and_then(|scope| scope.parent)
    }

    pub fn kind(&self, id: ScopeId) -> Option<ScopeKind> {
        self.get(id).map(|scope| scope.kind)
    }

    /// Follow parent links up to the scope that has none.
    pub fn root_of(&self, scope: ScopeId) -> ScopeId {
        let mut current = scope;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    pub fn bind(&mut self, scope: ScopeId, name: &str) {
        if let Some(target) = self.scopes.get_mut(scope.0) {
            target.bindings.insert(name.to_string());
            self.bound.insert(name.to_string());
        }
    }

    pub fn add_reference(&mut self, name: &str) {
        self.referenced.insert(name.to_string());
    }

    pub fn add_label(&mut self, name: &str) {
        self.labels.insert(name.to_string());
    }

    pub fn has_binding(&self, scope: ScopeId, name: &str) -> bool {
        self.get(scope).map_or(false, |scope| scope.bindings.contains(name))
    }

    pub fn has_reference(&self, name: &str) -> bool {
        self.referenced.contains(name)
    }

    /// Whether `name` is bound, referenced or used as a label anywhere in the
    /// unit.
    pub fn is_taken(&self, name: &str) -> bool {
        self.bound.contains(name) || self.referenced.contains(name) || self.labels.contains(name)
    }
}

/// Tracks the current scope during a later walk over an already collected
/// tree, relying on scopes being entered in the same order.
#[derive(Debug, Clone)]
pub struct ScopeCursor {
    current: ScopeId,
    entered: usize,
}

impl ScopeCursor {
    pub fn new(tree: &ScopeTree) -> Self {
        Self { current: tree.root(), entered: 0 }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn enter(&mut self, tree: &ScopeTree) {
        self.entered += 1;
        let next = ScopeId(self.entered);
        debug_assert_eq!(tree.parent(next), Some(self.current), "scope walk out of sync");
        if tree.get(next).is_some() {
            self.current = next;
        }
    }

    pub fn leave(&mut self, tree: &ScopeTree) {
        self.current = tree.parent(self.current).unwrap_or_else(|| tree.root());
    }
}

struct ScopeCollector {
    tree: ScopeTree,
    current: ScopeId,
}

impl ScopeCollector {
    fn new() -> Self {
        let tree = ScopeTree::new();
        let current = tree.root();
        Self { tree, current }
    }
}

impl<'a> Visitor<'a> for ScopeCollector {
    fn enter_scope(&mut self, kind: ScopeKind) {
        self.current = self.tree.add_scope(kind, self.current);
    }

    fn leave_scope(&mut self) {
        self.current = self.tree.parent(self.current).unwrap_or_else(|| self.tree.root());
    }

    fn visit_binding(&mut self, name: &str) {
        self.tree.bind(self.current, name);
    }

    fn visit_reference(&mut self, name: &str) {
        self.tree.add_reference(name);
    }

    fn visit_label(&mut self, name: &str) {
        self.tree.add_label(name);
    }
}
