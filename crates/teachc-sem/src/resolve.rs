//! A minimal resolution pass: every `id` leaf in an AST binds to a fresh
//! `DefId` the first time it's seen and resolves to that same `DefId`
//! afterwards. There is no scope nesting yet (every binding lands in the
//! module rib) — this exists to exercise [`crate::scope::ScopeTree`] against
//! a real tree, not to implement block scoping or shadowing.

use crate::scope::ScopeTree;
use teachc_par::{Ast, AstNodeId};
use teachc_util::{DefId, DefIdGenerator, Symbol};

/// Walk `ast` binding every first-seen identifier and resolving every
/// occurrence against it. Returns the populated scope tree.
pub fn resolve_identifiers(ast: &Ast) -> ScopeTree {
    let mut tree = ScopeTree::new();
    let defs = DefIdGenerator::new();
    walk(ast, ast.root, &mut tree, &defs);
    tree
}

fn walk(ast: &Ast, node: AstNodeId, tree: &mut ScopeTree, defs: &DefIdGenerator) {
    let n = &ast.nodes[node];
    if n.children.is_empty() {
        if n.label.as_str() == "id" {
            let name = Symbol::intern(n.value.as_deref().unwrap_or_default());
            if tree.resolve(name).is_none() {
                let id: DefId = defs.next();
                tree.add_binding(name, id);
            }
        }
        return;
    }
    for &child in &n.children {
        walk(ast, child, tree, defs);
    }
}
