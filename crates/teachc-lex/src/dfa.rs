//! Subset construction: turns a [`crate::nfa::CombinedNfa`] into a DFA
//! whose states are canonicalized sets of NFA states, and whose accept
//! labels are resolved by priority when more than one rule's accept state
//! lands in the same DFA state.

use crate::nfa::{CombinedNfa, NfaState, StateId as NfaStateId};
use rustc_hash::FxHashMap;
use teachc_util::IndexVec;

teachc_util::define_idx!(DfaStateId);

/// A DFA state: one transition per input character, plus an optional accept
/// label (the index of the rule it accepts, lowest index wins ties).
#[derive(Debug, Clone, Default)]
pub struct DfaState {
    pub transitions: FxHashMap<char, DfaStateId>,
    pub accept: Option<usize>,
}

#[derive(Debug)]
pub struct Dfa {
    pub states: IndexVec<DfaStateId, DfaState>,
    pub start: DfaStateId,
}

/// Canonical NFA-subset key: a sorted, deduplicated list of NFA state
/// indices. Two DFA states are the same state iff their keys are equal.
fn epsilon_closure(states: &IndexVec<NfaStateId, NfaState>, seeds: &[NfaStateId]) -> Vec<NfaStateId> {
    let mut stack: Vec<NfaStateId> = seeds.to_vec();
    let mut closure: Vec<NfaStateId> = seeds.to_vec();
    while let Some(s) = stack.pop() {
        for (on, to) in &states[s].transitions {
            if on.is_none() && !closure.contains(to) {
                closure.push(*to);
                stack.push(*to);
            }
        }
    }
    closure.sort_by_key(|s| s.0);
    closure.dedup();
    closure
}

fn mv(states: &IndexVec<NfaStateId, NfaState>, set: &[NfaStateId], on: char) -> Vec<NfaStateId> {
    let mut out = Vec::new();
    for s in set {
        for (c, to) in &states[*s].transitions {
            if *c == Some(on) && !out.contains(to) {
                out.push(*to);
            }
        }
    }
    out
}

/// The accept label for a DFA state is the rule index of the
/// lowest-indexed (highest-priority) NFA accept state present in its
/// subset, or `None` if the subset contains no accept state at all.
fn accept_label(nfa: &CombinedNfa, set: &[NfaStateId]) -> Option<usize> {
    nfa.accepts
        .iter()
        .filter(|(state, _)| set.contains(state))
        .map(|(_, rule)| *rule)
        .min()
}

/// Every character that appears on some NFA transition; the alphabet the
/// subset construction fans out over.
fn alphabet(nfa: &CombinedNfa) -> Vec<char> {
    let mut chars: Vec<char> = nfa
        .states
        .as_slice()
        .iter()
        .flat_map(|s| s.transitions.iter().filter_map(|(c, _)| *c))
        .collect();
    chars.sort_unstable();
    chars.dedup();
    chars
}

pub fn subset_construct(nfa: &CombinedNfa) -> Dfa {
    let alphabet = alphabet(nfa);
    let mut states: IndexVec<DfaStateId, DfaState> = IndexVec::new();
    let mut key_to_id: FxHashMap<Vec<NfaStateId>, DfaStateId> = FxHashMap::default();

    let start_key = epsilon_closure(&nfa.states, &[nfa.start]);
    let start_id = states.push(DfaState {
        transitions: FxHashMap::default(),
        accept: accept_label(nfa, &start_key),
    });
    key_to_id.insert(start_key.clone(), start_id);

    let mut worklist = vec![(start_id, start_key)];
    while let Some((id, key)) = worklist.pop() {
        for &c in &alphabet {
            let moved = mv(&nfa.states, &key, c);
            if moved.is_empty() {
                continue;
            }
            let closure = epsilon_closure(&nfa.states, &moved);
            let target = match key_to_id.get(&closure) {
                Some(existing) => *existing,
                None => {
                    let new_id = states.push(DfaState {
                        transitions: FxHashMap::default(),
                        accept: accept_label(nfa, &closure),
                    });
                    key_to_id.insert(closure.clone(), new_id);
                    worklist.push((new_id, closure));
                    new_id
                }
            };
            states[id].transitions.insert(c, target);
        }
    }

    Dfa {
        states,
        start: start_id,
    }
}
