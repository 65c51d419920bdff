//! Thompson construction: folds a [`crate::regex::PostfixItem`] stream
//! into an NFA fragment, and stitches per-rule fragments into one combined
//! NFA for the whole lexer.
//!
//! Every fragment built here has exactly one start state and one accept
//! state, with no transitions entering the start or leaving the accept —
//! that invariant is what makes the four construction rules (atom, concat,
//! union, star) compose without ever inspecting a sub-fragment's internals.

use crate::regex::{PostfixItem, RegexOp};
use teachc_util::IndexVec;

teachc_util::define_idx!(StateId);

/// An NFA state: a list of outgoing transitions. `None` is an epsilon move.
#[derive(Debug, Clone, Default)]
pub struct NfaState {
    pub transitions: Vec<(Option<char>, StateId)>,
}

/// A fragment under construction: single start, single accept, both already
/// present in the builder's shared state arena.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

/// Accumulates NFA states across one or more fragment builds so that
/// multiple rules can share a single state arena (needed for the combined
/// lexer NFA, where a super-start epsilon-branches into every rule).
#[derive(Debug, Default)]
pub struct NfaBuilder {
    states: IndexVec<StateId, NfaState>,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn new_state(&mut self) -> StateId {
        self.states.push(NfaState::default())
    }

    fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].transitions.push((None, to));
    }

    fn add_transition(&mut self, from: StateId, on: char, to: StateId) {
        self.states[from].transitions.push((Some(on), to));
    }

    /// Fold `postfix` into a single fragment using the four Thompson rules.
    fn build_fragment(&mut self, postfix: &[PostfixItem]) -> Fragment {
        let mut stack: Vec<Fragment> = Vec::new();
        for item in postfix {
            match item {
                PostfixItem::Atom(c) => {
                    let start = self.new_state();
                    let accept = self.new_state();
                    self.add_transition(start, *c, accept);
                    stack.push(Fragment { start, accept });
                }
                PostfixItem::Op(RegexOp::Concat) => {
                    let b = stack.pop().expect("validated postfix: concat operand");
                    let a = stack.pop().expect("validated postfix: concat operand");
                    self.add_epsilon(a.accept, b.start);
                    stack.push(Fragment {
                        start: a.start,
                        accept: b.accept,
                    });
                }
                PostfixItem::Op(RegexOp::Union) => {
                    let b = stack.pop().expect("validated postfix: union operand");
                    let a = stack.pop().expect("validated postfix: union operand");
                    let start = self.new_state();
                    let accept = self.new_state();
                    self.add_epsilon(start, a.start);
                    self.add_epsilon(start, b.start);
                    self.add_epsilon(a.accept, accept);
                    self.add_epsilon(b.accept, accept);
                    stack.push(Fragment { start, accept });
                }
                PostfixItem::Op(RegexOp::Star) => {
                    let a = stack.pop().expect("validated postfix: star operand");
                    let start = self.new_state();
                    let accept = self.new_state();
                    self.add_epsilon(start, a.start);
                    self.add_epsilon(start, accept);
                    self.add_epsilon(a.accept, a.start);
                    self.add_epsilon(a.accept, accept);
                    stack.push(Fragment { start, accept });
                }
                PostfixItem::Op(RegexOp::Plus) => {
                    // Same shape as star, but without the start->accept
                    // bypass: at least one pass through `a` is mandatory.
                    let a = stack.pop().expect("validated postfix: plus operand");
                    let start = self.new_state();
                    let accept = self.new_state();
                    self.add_epsilon(start, a.start);
                    self.add_epsilon(a.accept, a.start);
                    self.add_epsilon(a.accept, accept);
                    stack.push(Fragment { start, accept });
                }
                PostfixItem::Op(RegexOp::Question) => {
                    // a? == (a|epsilon): bypass start->accept, no loop-back.
                    let a = stack.pop().expect("validated postfix: question operand");
                    let start = self.new_state();
                    let accept = self.new_state();
                    self.add_epsilon(start, a.start);
                    self.add_epsilon(start, accept);
                    self.add_epsilon(a.accept, accept);
                    stack.push(Fragment { start, accept });
                }
            }
        }
        stack.pop().expect("validated postfix: exactly one fragment remains")
    }
}

/// A standalone compiled pattern: one start state, one accept state.
#[derive(Debug)]
pub struct Nfa {
    pub states: IndexVec<StateId, NfaState>,
    pub start: StateId,
    pub accept: StateId,
}

/// Thompson-construct a single pattern. `postfix` must come from
/// [`crate::regex::parse`], which guarantees the arity [`NfaBuilder`]
/// relies on.
pub fn compile(postfix: &[PostfixItem]) -> Nfa {
    let mut builder = NfaBuilder::new();
    let frag = builder.build_fragment(postfix);
    Nfa {
        states: builder.states,
        start: frag.start,
        accept: frag.accept,
    }
}

/// An NFA built from several rule patterns sharing one state arena, with a
/// super-start epsilon-branching into each rule's fragment start. Subset
/// construction ([`crate::dfa`]) consumes this directly.
#[derive(Debug)]
pub struct CombinedNfa {
    pub states: IndexVec<StateId, NfaState>,
    pub start: StateId,
    /// Accept state -> index into the `patterns` slice passed to
    /// [`compile_rules`]. Lower index means higher priority: a DFA state
    /// reachable from two rules' accepts resolves ties by minimum index
    /// ("earliest rule wins").
    pub accepts: Vec<(StateId, usize)>,
}

/// Build one combined NFA out of several rules, in priority order (index 0
/// is checked first on ties).
pub fn compile_rules(patterns: &[Vec<PostfixItem>]) -> CombinedNfa {
    let mut builder = NfaBuilder::new();
    let super_start = builder.new_state();
    let mut accepts = Vec::with_capacity(patterns.len());
    for (index, postfix) in patterns.iter().enumerate() {
        let frag = builder.build_fragment(postfix);
        builder.add_epsilon(super_start, frag.start);
        accepts.push((frag.accept, index));
    }
    CombinedNfa {
        states: builder.states,
        start: super_start,
        accepts,
    }
}
