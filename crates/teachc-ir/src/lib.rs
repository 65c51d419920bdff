//! teachc-ir - Quadruple IR Emission
//!
//! ============================================================================
//! THREE-ADDRESS CODE
//! ============================================================================
//!
//! The final core phase turns an AST ([`teachc_par::Ast`]) into a flat list
//! of quadruples: `(op, arg1, arg2, result)` instructions with at most one
//! operator per instruction and every intermediate value named by a
//! temporary. This is the classic three-address code a teaching compiler
//! hands off to a code generator, not an SSA form or a control-flow graph —
//! [`quad::IrEmitter`] walks the tree once, depth-first, and never revisits
//! or reorders an instruction once it's appended.
//!
//! Four schemas cover the whole traversal (see [`quad::IrEmitter`] for the
//! per-schema lowering): binary expressions allocate a temp per operator;
//! atoms (`id`/`number`/`string`/`char`) resolve to a name or literal
//! operand with no instruction at all; assignment lowers to a single
//! `assign` quadruple; `if`/`while` lower to a handful of `label`/`goto`/
//! `if-goto-false` quadruples bracketing their body.
//!
//! Temporaries (`t1`, `t2`, ...) and labels (`L1`, `L2`, ...) are each
//! named by their own monotonic counter, private to one `IrEmitter`
//! instance and never shared across emission passes.

pub mod quad;

pub use quad::{emit, IrEmitter, LabelId, Op, Operand, Quadruple, TempId};
