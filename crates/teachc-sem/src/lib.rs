//! teachc-sem - Name Resolution Scaffolding
//!
//! This crate is deliberately thin: a scope tree and a `DefId` resolution
//! hook, not a type checker. A teaching compiler that stops at quadruple IR
//! emission (see `teachc-ir`) never needs type inference, borrow checking, or
//! control-flow analysis to produce its output, so none of that lives here.
//!
//! NAME RESOLUTION
//! ----------------
//! [`scope::ScopeTree`] is a stack of ribs ([`scope::Rib`]), each one a scope
//! a name resolves through. `enter_scope`/`exit_scope` push and pop ribs as a
//! driver walks an AST; `add_binding` records a name in the current rib;
//! `resolve` walks outward through parent ribs until a name is found or the
//! module root is reached.
//!
//! [`resolve::resolve_identifiers`] drives a `ScopeTree` over a real
//! `teachc_par::Ast`: every `id` leaf binds a fresh `DefId` the first time
//! it's seen and resolves to that binding afterwards. There is no block
//! scoping yet — every name lands in one module-level rib.

pub mod resolve;
pub mod scope;

pub use resolve::resolve_identifiers;
pub use scope::{Rib, RibId, RibKind, ScopeTree};
