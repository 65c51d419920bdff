//! DFA minimization: partition-refinement (Hopcroft-style block
//! splitting) down to a fixed point, then quotients the DFA by the
//! resulting equivalence classes.
//!
//! Two states start in the same block only if they carry the same accept
//! label (including both being non-accepting) — states that accept
//! different token rules can never be merged, even if their transition
//! behavior is otherwise identical, because merging them would lose which
//! rule fired.

use crate::dfa::{Dfa, DfaState, DfaStateId};
use rustc_hash::FxHashMap;
use teachc_util::IndexVec;

fn alphabet(dfa: &Dfa) -> Vec<char> {
    let mut chars: Vec<char> = dfa
        .states
        .as_slice()
        .iter()
        .flat_map(|s| s.transitions.keys().copied())
        .collect();
    chars.sort_unstable();
    chars.dedup();
    chars
}

/// Refine `blocks` until no block's states disagree on which block their
/// successor (for every alphabet character) belongs to. Returns the stable
/// partition as a state -> block-index map.
fn refine_to_fixed_point(dfa: &Dfa, alphabet: &[char]) -> FxHashMap<DfaStateId, usize> {
    let n = dfa.states.len();

    // Initial partition: group by accept label only.
    let mut block_of: FxHashMap<DfaStateId, usize> = FxHashMap::default();
    let mut labels: Vec<Option<usize>> = Vec::new();
    for idx in 0..n {
        let id = DfaStateId(idx as u32);
        let label = dfa.states[id].accept;
        let block = match labels.iter().position(|l| *l == label) {
            Some(b) => b,
            None => {
                labels.push(label);
                labels.len() - 1
            }
        };
        block_of.insert(id, block);
    }

    loop {
        let mut signature_to_block: FxHashMap<Vec<Option<usize>>, usize> = FxHashMap::default();
        let mut new_block_of: FxHashMap<DfaStateId, usize> = FxHashMap::default();
        let mut next_block = 0usize;

        // Group states first by their *current* block (never split across
        // an old boundary), then by transition signature within it.
        let mut by_old_block: FxHashMap<usize, Vec<DfaStateId>> = FxHashMap::default();
        for idx in 0..n {
            let id = DfaStateId(idx as u32);
            by_old_block.entry(block_of[&id]).or_default().push(id);
        }

        let mut old_blocks: Vec<usize> = by_old_block.keys().copied().collect();
        old_blocks.sort_unstable();
        for old in old_blocks {
            signature_to_block.clear();
            for id in &by_old_block[&old] {
                let sig: Vec<Option<usize>> = alphabet
                    .iter()
                    .map(|c| dfa.states[*id].transitions.get(c).map(|t| block_of[t]))
                    .collect();
                let block = *signature_to_block.entry(sig).or_insert_with(|| {
                    let b = next_block;
                    next_block += 1;
                    b
                });
                new_block_of.insert(*id, block);
            }
        }

        if new_block_of == block_of {
            return block_of;
        }
        block_of = new_block_of;
    }
}

/// Quotient `dfa` by the coarsest partition consistent with both its
/// accept labels and its transition behavior.
pub fn minimize(dfa: &Dfa) -> Dfa {
    let alphabet = alphabet(dfa);
    let block_of = refine_to_fixed_point(dfa, &alphabet);

    let mut block_ids: Vec<usize> = block_of.values().copied().collect();
    block_ids.sort_unstable();
    block_ids.dedup();

    // Order new states so the block containing the original start state
    // becomes the new start state, keeping minimized DFAs easy to read.
    let start_block = block_of[&dfa.start];
    let mut ordered = vec![start_block];
    ordered.extend(block_ids.iter().copied().filter(|b| *b != start_block));
    let new_id_of: FxHashMap<usize, DfaStateId> = ordered
        .iter()
        .enumerate()
        .map(|(i, b)| (*b, DfaStateId(i as u32)))
        .collect();

    let mut states: IndexVec<DfaStateId, DfaState> = IndexVec::new();
    for _ in &ordered {
        states.push(DfaState::default());
    }
    for block in &ordered {
        // Any representative state of the block carries the shared accept
        // label and transition targets (translated through the block map).
        let representative = *block_of.iter().find(|(_, b)| *b == block).unwrap().0;
        let new_id = new_id_of[block];
        states[new_id].accept = dfa.states[representative].accept;
        for (c, target) in &dfa.states[representative].transitions {
            let target_block = block_of[target];
            states[new_id]
                .transitions
                .insert(*c, new_id_of[&target_block]);
        }
    }

    Dfa {
        states,
        start: new_id_of[&start_block],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::compile_rules;
    use crate::regex::parse;

    fn run(dfa: &Dfa, input: &str) -> Option<usize> {
        let mut state = dfa.start;
        for c in input.chars() {
            state = *dfa.states[state].transitions.get(&c)?;
        }
        dfa.states[state].accept
    }

    #[test]
    fn minimized_dfa_agrees_with_unminimized_on_accept_reject() {
        let nfa = compile_rules(&[parse("a(b|c)*").unwrap()]);
        let dfa = crate::dfa::subset_construct(&nfa);
        let min = minimize(&dfa);
        for input in ["a", "ab", "ac", "abcbcb", "", "b", "abd"] {
            assert_eq!(run(&dfa, input), run(&min, input), "mismatch on {input:?}");
        }
    }

    #[test]
    fn minimization_never_increases_state_count() {
        let nfa = compile_rules(&[parse("(a|b)*abb").unwrap()]);
        let dfa = crate::dfa::subset_construct(&nfa);
        let min = minimize(&dfa);
        assert!(min.states.len() <= dfa.states.len());
    }

    #[test]
    fn distinct_accepting_rules_are_never_merged() {
        let nfa = compile_rules(&[parse("if").unwrap(), parse("[a-z]+").unwrap()]);
        let dfa = crate::dfa::subset_construct(&nfa);
        let min = minimize(&dfa);
        assert_eq!(run(&min, "if"), Some(0));
        assert_eq!(run(&min, "iffy"), Some(1));
        assert_eq!(run(&min, "xyz"), Some(1));
    }
}
