//! First-match executor
//!
//! A biased depth-first search over the automaton graph: at every state the
//! outgoing edges are tried in order, so a greedy loop re-enters its body
//! before exiting and a non-greedy loop exits first. The first complete
//! derivation found wins, which gives the classic backtracking semantics
//! (`"<.*?>"` stops at the first `>`, `"<.*>"` runs to the last).
//!
//! Two guards bound the search:
//!
//! - a failed-(state, position) memo: without backreferences, failure from
//!   a state/position pair is independent of capture history, so each pair
//!   is explored at most once and the search is O(states × input length);
//! - an on-path set that refuses to re-enter a (state, position) already on
//!   the current stack, which breaks epsilon cycles such as `(a*)*`.
//!
//! Capture slots are written when `Open`/`Close` edges are traversed and
//! restored from an undo record when the search backtracks over them.

use std::collections::HashSet;

use crate::input::Units;
use crate::nfa::{Automaton, Edge, StateId};

/// A successful derivation: where it ended and what the slots recorded
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PathMatch {
    /// Unit position one past the last consumed unit
    pub end: usize,
    /// Per-slot (open, close) unit positions
    pub slots: Vec<Option<(usize, usize)>>,
}

struct Frame {
    state: StateId,
    pos: usize,
    next_edge: usize,
    /// Slot write performed by the edge that entered this frame, with the
    /// previous value to restore on backtrack
    undo: Option<SlotUndo>,
}

enum SlotUndo {
    Open(usize, Option<usize>),
    Close(usize, Option<usize>),
}

/// Run the biased search from `start`; returns the first acceptance found
pub(crate) fn run(automaton: &Automaton, units: &Units<'_>, start: usize) -> Option<PathMatch> {
    let len = units.len();
    let mut opens: Vec<Option<usize>> = vec![None; automaton.slots.len()];
    let mut closes: Vec<Option<usize>> = vec![None; automaton.slots.len()];

    let mut failed: HashSet<(StateId, usize)> = HashSet::new();
    let mut on_path: HashSet<(StateId, usize)> = HashSet::new();
    let mut frames: Vec<Frame> = Vec::new();

    on_path.insert((automaton.start, start));
    frames.push(Frame {
        state: automaton.start,
        pos: start,
        next_edge: 0,
        undo: None,
    });

    while !frames.is_empty() {
        let top = frames.len() - 1;
        let (state, pos) = (frames[top].state, frames[top].pos);

        if state == automaton.accept {
            let slots = opens
                .iter()
                .zip(&closes)
                .map(|(o, c)| o.zip(*c))
                .collect();
            return Some(PathMatch { end: pos, slots });
        }

        // try the next untried edge of the top frame
        let mut advanced = false;
        while !advanced {
            let edge_idx = frames[top].next_edge;
            let edges = &automaton.states[state].edges;
            let Some((edge, target)) = edges.get(edge_idx) else {
                break;
            };
            frames[top].next_edge += 1;

            let (next_pos, undo) = match edge {
                Edge::Unit(test) => {
                    if pos >= len || !test.matches(units.at(pos)) {
                        continue;
                    }
                    (pos + 1, None)
                }
                Edge::Epsilon => (pos, None),
                Edge::End => {
                    if pos != len {
                        continue;
                    }
                    (pos, None)
                }
                Edge::Open(k) => {
                    let undo = SlotUndo::Open(*k, opens[*k]);
                    opens[*k] = Some(pos);
                    (pos, Some(undo))
                }
                Edge::Close(k) => {
                    let undo = SlotUndo::Close(*k, closes[*k]);
                    closes[*k] = Some(pos);
                    (pos, Some(undo))
                }
            };

            let key = (*target, next_pos);
            if failed.contains(&key) || on_path.contains(&key) {
                // undo an eager slot write before skipping the edge
                restore(&mut opens, &mut closes, undo);
                continue;
            }
            on_path.insert(key);
            frames.push(Frame {
                state: *target,
                pos: next_pos,
                next_edge: 0,
                undo,
            });
            advanced = true;
        }

        if !advanced {
            // exhausted: this state/position pair can never succeed
            if let Some(frame) = frames.pop() {
                failed.insert((frame.state, frame.pos));
                on_path.remove(&(frame.state, frame.pos));
                restore(&mut opens, &mut closes, frame.undo);
            }
        }
    }

    None
}

fn restore(opens: &mut [Option<usize>], closes: &mut [Option<usize>], undo: Option<SlotUndo>) {
    match undo {
        Some(SlotUndo::Open(k, prev)) => opens[k] = prev,
        Some(SlotUndo::Close(k, prev)) => closes[k] = prev,
        None => {}
    }
}
