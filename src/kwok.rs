//! Compute a maximum weight matching between two disjoint vertex sets (a
//! bipartite graph) using a primal-dual augmenting-path search with "Kwok"
//! label adjustment, a variant of the
//! [Kuhn-Munkres / Hungarian algorithm](https://en.wikipedia.org/wiki/Hungarian_algorithm)
//! that works directly off an adjacency list instead of a dense weight
//! matrix, and that tolerates `|L| < |R|` without padding the smaller side
//! with zero-weight edges.
//!
//! Unlike the matrix-based Hungarian algorithm, this version never builds a
//! `|L| x |R|` table: only the edges actually present in `adj` are ever
//! touched, which keeps the algorithm practical when `R` is large but each
//! left vertex only has a handful of candidate right vertices.

use crate::error::KwokError;
use fixedbitset::FixedBitSet;
use num_traits::{Bounded, Zero};
use std::collections::VecDeque;
use std::ops::{Add, Sub};

/// The result of a call to [`kwok`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matching<C> {
    /// `left_pairs[l]` is the right vertex matched to left vertex `l`, or
    /// `None` if `l` could not be matched with positive benefit.
    pub left_pairs: Vec<Option<usize>>,
    /// `right_pairs[r]` is the left vertex matched to right vertex `r`, or
    /// `None` if `r` is unmatched. The symmetric inverse of `left_pairs`.
    pub right_pairs: Vec<Option<usize>>,
    /// Sum of the weights of the edges actually in the matching.
    pub total_weight: C,
}

/// Compute a maximum weight matching between a left partition of size
/// `l_size` and a right partition of size `r_size`, given as an adjacency
/// list `adj` indexed by left vertex id.
///
/// `adj[l]` is the sequence of `(r, w)` edges leaving left vertex `l`, with
/// `r` a right vertex id in `[0, r_size)` and `w` a non-negative weight.
/// Duplicate `(l, r)` edges are permitted: only the first one encountered is
/// guaranteed to participate in the initial greedy seeding and in the final
/// weight lookup for a matched pair, but all of them are considered while
/// searching for augmenting paths, so the returned matching is still
/// optimal regardless of which duplicate "wins".
///
/// Every left vertex that can be matched with positive benefit ends up
/// matched; the rest are `None` in `left_pairs`. `total_weight` is the
/// maximum achievable sum over all matchings of the input graph.
///
/// Runs in O(`l_size` * (`l_size` + `r_size` + sum of `adj[l].len()`)) time,
/// the standard bound for this family of primal-dual matching algorithms:
/// one phase per left vertex, each phase touching every visited vertex and
/// edge at most a constant number of times before either tightening a new
/// edge or applying an augmenting path.
///
/// # Errors
///
/// Returns [`KwokError`] if `r_size < l_size`, if `adj.len() != l_size`, if
/// an edge references a right vertex outside `[0, r_size)`, or if an edge
/// carries a negative weight. Validation runs to completion before any
/// matching state is built, so a rejected call never partially mutates
/// anything observable.
pub fn kwok<C>(l_size: usize, r_size: usize, adj: &[Vec<(usize, C)>]) -> Result<Matching<C>, KwokError>
where
    C: Copy + Ord + Zero + Bounded + Add<Output = C> + Sub<Output = C>,
{
    validate(l_size, r_size, adj)?;
    let mut search = Search::new(r_size, adj);
    search.greedy_seed();
    for l0 in 0..l_size {
        if search.left_pair[l0].is_none() {
            search.run_phase(l0);
        }
    }
    Ok(search.into_matching())
}

fn validate<C: Copy + Ord + Zero>(
    l_size: usize,
    r_size: usize,
    adj: &[Vec<(usize, C)>],
) -> Result<(), KwokError> {
    if r_size < l_size {
        return Err(KwokError::RightSmallerThanLeft { l_size, r_size });
    }
    if adj.len() != l_size {
        return Err(KwokError::AdjacencyLengthMismatch {
            l_size,
            adj_len: adj.len(),
        });
    }
    for (left, edges) in adj.iter().enumerate() {
        for &(right, weight) in edges {
            if right >= r_size {
                return Err(KwokError::RightVertexOutOfRange { left, right, r_size });
            }
            if weight < C::zero() {
                return Err(KwokError::NegativeWeight { left, right });
            }
        }
    }
    Ok(())
}

/// All per-invocation state: Labeling State and Frontier State fused into
/// one struct, since nothing outside this module ever needs them apart.
/// Lives for the duration of one [`kwok`] call and is never reused across
/// invocations.
struct Search<'a, C> {
    adj: &'a [Vec<(usize, C)>],
    left_label: Vec<C>,
    right_label: Vec<C>,
    left_pair: Vec<Option<usize>>,
    right_pair: Vec<Option<usize>>,
    /// +infinity (`C::max_value()`) for a right vertex not yet reached by
    /// any edge out of the current phase's frontier.
    slack: Vec<C>,
    /// The left vertex that gave a right vertex its current slack or tight
    /// edge; overwritten whenever `slack[r]` decreases.
    right_parent: Vec<Option<usize>>,
    right_visited: FixedBitSet,
    right_on_edge: FixedBitSet,
    visited_lefts: Vec<usize>,
    visited_rights: Vec<usize>,
    on_edge_rights: Vec<usize>,
    queue: VecDeque<usize>,
}

impl<'a, C> Search<'a, C>
where
    C: Copy + Ord + Zero + Bounded + Add<Output = C> + Sub<Output = C>,
{
    fn new(r_size: usize, adj: &'a [Vec<(usize, C)>]) -> Self {
        let l_size = adj.len();
        let left_label = adj
            .iter()
            .map(|edges| edges.iter().map(|&(_, w)| w).max().unwrap_or_else(C::zero))
            .collect();
        Search {
            adj,
            left_label,
            right_label: vec![C::zero(); r_size],
            left_pair: vec![None; l_size],
            right_pair: vec![None; r_size],
            slack: vec![C::max_value(); r_size],
            right_parent: vec![None; r_size],
            right_visited: FixedBitSet::with_capacity(r_size),
            right_on_edge: FixedBitSet::with_capacity(r_size),
            visited_lefts: Vec::with_capacity(l_size),
            visited_rights: Vec::with_capacity(r_size),
            on_edge_rights: Vec::with_capacity(r_size),
            queue: VecDeque::with_capacity(l_size),
        }
    }

    /// For each left vertex in order, match it to the first right vertex
    /// reachable via an already-tight edge. Bootstraps a feasible partial
    /// matching before any phase runs, cutting down the number of phases
    /// that actually need an augmenting path.
    fn greedy_seed(&mut self) {
        for l in 0..self.left_pair.len() {
            for &(r, w) in &self.adj[l] {
                if self.right_pair[r].is_none() && self.left_label[l] + self.right_label[r] == w {
                    self.left_pair[l] = Some(r);
                    self.right_pair[r] = Some(l);
                    break;
                }
            }
        }
    }

    /// Run one phase: find one augmenting path starting from unmatched left
    /// `l0` and apply it, growing the matching by exactly one pair.
    fn run_phase(&mut self, l0: usize) {
        self.reset_phase(l0);
        let first_unmatched_r = self
            .right_pair
            .iter()
            .position(Option::is_none)
            .expect("an unmatched right vertex must exist while a left vertex remains unmatched");
        self.bfs_until_augmented(first_unmatched_r);
    }

    fn reset_phase(&mut self, l0: usize) {
        self.queue.clear();
        for &r in &self.visited_rights {
            self.right_visited.set(r, false);
        }
        for &r in &self.on_edge_rights {
            self.right_on_edge.set(r, false);
            self.slack[r] = C::max_value();
        }
        self.visited_lefts.clear();
        self.visited_rights.clear();
        self.on_edge_rights.clear();
        self.visited_lefts.push(l0);
        self.queue.push_back(l0);
    }

    /// BFS-Search (expansion) alternating with Adjuster (adjustment) until
    /// one augmenting path is applied. `first_unmatched_r` is the
    /// designated "virtual" target: a zero-cost synthetic edge is available
    /// from any left vertex whose label has dropped to zero, guaranteeing
    /// that a phase terminates even when no real path to an unmatched right
    /// vertex exists yet.
    fn bfs_until_augmented(&mut self, first_unmatched_r: usize) {
        loop {
            if self.expand(first_unmatched_r) {
                return;
            }
            if self.adjust() {
                return;
            }
        }
    }

    /// Expansion phase: drain the queue, admitting newly tight real edges
    /// and the virtual edge into the alternating tree. Returns `true` if an
    /// augmenting path was applied.
    fn expand(&mut self, first_unmatched_r: usize) -> bool {
        while let Some(l) = self.queue.pop_front() {
            if self.left_label[l] == C::zero() {
                self.right_parent[first_unmatched_r] = Some(l);
                if self.advance(first_unmatched_r) {
                    return true;
                }
            }
            if self.slack[first_unmatched_r] > self.left_label[l] {
                self.slack[first_unmatched_r] = self.left_label[l];
                self.right_parent[first_unmatched_r] = Some(l);
                self.mark_on_edge(first_unmatched_r);
            }
            for i in 0..self.adj[l].len() {
                let (r, w) = self.adj[l][i];
                if self.right_visited.contains(r) {
                    continue;
                }
                let diff = self.left_label[l] + self.right_label[r] - w;
                if diff == C::zero() {
                    self.right_parent[r] = Some(l);
                    if self.advance(r) {
                        return true;
                    }
                } else if self.slack[r] > diff {
                    self.right_parent[r] = Some(l);
                    self.slack[r] = diff;
                    self.mark_on_edge(r);
                }
            }
        }
        false
    }

    /// Adjustment phase: shift labels by the minimum frontier slack δ and
    /// re-admit any right vertex whose slack has hit zero. Returns `true`
    /// if re-admission applied an augmenting path.
    fn adjust(&mut self) -> bool {
        let mut delta: Option<C> = None;
        for &r in &self.on_edge_rights {
            if self.right_on_edge.contains(r) {
                delta = Some(delta.map_or(self.slack[r], |best| best.min(self.slack[r])));
            }
        }
        let Some(delta) = delta else {
            unreachable!(
                "Adjuster found no on-edge right vertex while a left vertex remains unmatched; \
                 this means feasibility or seeding was violated by a prior step"
            );
        };

        for &l in &self.visited_lefts {
            self.left_label[l] = self.left_label[l] - delta;
        }
        for &r in &self.visited_rights {
            self.right_label[r] = self.right_label[r] + delta;
        }

        let mut i = 0;
        while i < self.on_edge_rights.len() {
            let r = self.on_edge_rights[i];
            i += 1;
            if self.right_on_edge.contains(r) {
                debug_assert!(self.slack[r] >= delta, "slack underflow during label adjustment");
                self.slack[r] = self.slack[r] - delta;
                if self.slack[r] == C::zero() && self.advance(r) {
                    return true;
                }
            }
        }
        false
    }

    fn mark_on_edge(&mut self, r: usize) {
        if !self.right_on_edge.contains(r) {
            self.on_edge_rights.push(r);
            self.right_on_edge.insert(r);
        }
    }

    /// Pull `r` into the alternating tree. If `r` is already matched, its
    /// match becomes a new BFS source ("extended"); otherwise the Augmentor
    /// runs and the phase is over ("augmented").
    fn advance(&mut self, r: usize) -> bool {
        self.right_on_edge.set(r, false);
        self.right_visited.insert(r);
        self.visited_rights.push(r);
        match self.right_pair[r] {
            Some(l) => {
                self.queue.push_back(l);
                self.visited_lefts.push(l);
                false
            }
            None => {
                self.augment(r);
                true
            }
        }
    }

    /// Augmentor: walk the right -> left -> right parent chain back to the
    /// phase's source, flipping pair assignments along the way.
    fn augment(&mut self, r: usize) {
        let mut cur_r = Some(r);
        while let Some(rv) = cur_r {
            let l = self.right_parent[rv].expect("visited right vertex must have a recorded parent");
            let prev_r = self.left_pair[l];
            self.left_pair[l] = Some(rv);
            self.right_pair[rv] = Some(l);
            cur_r = prev_r;
        }
    }

    /// Totalizer: strip virtual pairs (those with no real edge explaining
    /// them) and sum the weight of what remains. If `adj[l]` contains more
    /// than one edge to the matched right vertex, the first one in storage
    /// order is used, even if a later duplicate carries a different weight.
    fn into_matching(mut self) -> Matching<C> {
        let mut total = C::zero();
        for l in 0..self.left_pair.len() {
            if let Some(r) = self.left_pair[l] {
                let real_weight = self.adj[l].iter().find(|&&(rr, _)| rr == r).map(|&(_, w)| w);
                match real_weight {
                    Some(w) => total = total + w,
                    None => {
                        self.left_pair[l] = None;
                        self.right_pair[r] = None;
                    }
                }
            }
        }
        Matching {
            left_pairs: self.left_pair,
            right_pairs: self.right_pair,
            total_weight: total,
        }
    }
}
