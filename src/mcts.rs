//! Monte Carlo Tree Search (MCTS) over a restricted candidate set.
//!
//! Each iteration runs the four classic phases:
//! - Selection: UCB1 descent through fully expanded nodes
//! - Expansion: one new child per iteration, best Evaluator score among a
//!   short prefix of the untried moves
//! - Simulation: a bounded playout from the new child (see [`crate::playout`])
//! - Backpropagation: visits and rewards up to the root
//!
//! The tree lives in an arena owned by a single search. Nodes refer to each
//! other by [`NodeId`]; parent links are written once when a node is created
//! and only read during backpropagation. The whole arena is dropped when the
//! search returns.
//!
//! Rewards at a node are counted for the player to move *at that node*:
//! 1.0 for a win, 0.5 for a draw, 0.0 for a loss. A parent choosing among its
//! children therefore sees a child's value as `1 - child.winrate()`.

use std::cmp::Ordering;

use fastrand::Rng;
use tracing::{debug, trace};

use crate::board::{Color, Move};
use crate::candidates::candidates;
use crate::config::EngineConfig;
use crate::constants::{REWARD_DRAW, REWARD_LOSS, REWARD_WIN};
use crate::eval::score_move;
use crate::playout::mcplayout;
use crate::position::{GameState, Status};

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Where a node stands in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Untried moves remain. Partially expanded nodes count here too.
    Unexpanded,
    /// Every move has a child.
    Expanded,
    /// The game is over at this node.
    Terminal,
}

/// A node in the MCTS search tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// The game state at this node
    pub state: GameState,
    /// Parent node (`None` for the root)
    pub parent: Option<NodeId>,
    /// Children, in expansion order
    pub children: Vec<NodeId>,
    /// Moves not yet expanded, in candidate order
    pub untried: Vec<Move>,
    /// Move that led here from the parent
    pub mv: Option<Move>,
    /// Number of visits
    pub v: u32,
    /// Accumulated reward for the player to move here
    pub w: f64,
    /// Distance from the root
    pub depth: u32,
}

impl TreeNode {
    fn new(
        state: GameState,
        parent: Option<NodeId>,
        mv: Option<Move>,
        untried: Vec<Move>,
        depth: u32,
    ) -> Self {
        Self {
            state,
            parent,
            children: Vec::new(),
            untried,
            mv,
            v: 0,
            w: 0.0,
            depth,
        }
    }

    pub fn kind(&self) -> NodeKind {
        if self.state.status().is_terminal() {
            NodeKind::Terminal
        } else if !self.untried.is_empty() {
            NodeKind::Unexpanded
        } else {
            NodeKind::Expanded
        }
    }

    /// Average reward for the player to move at this node.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.v > 0 {
            self.w / self.v as f64
        } else {
            0.0
        }
    }

    /// Average reward for the player who chose this node's move.
    #[inline]
    pub fn parent_winrate(&self) -> f64 {
        if self.v > 0 {
            1.0 - self.winrate()
        } else {
            0.0
        }
    }

    /// UCB1 as seen from the parent.
    fn ucb1(&self, ln_parent_visits: f64, c: f64) -> f64 {
        self.parent_winrate() + c * (ln_parent_visits / self.v as f64).sqrt()
    }
}

/// Reward credited to `player` for a finished simulation.
#[inline]
fn reward(outcome: Status, player: Color) -> f64 {
    match outcome {
        Status::Won(winner) if winner == player => REWARD_WIN,
        Status::Won(_) => REWARD_LOSS,
        _ => REWARD_DRAW,
    }
}

/// Counters gathered over one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Iterations run
    pub iterations: usize,
    /// Nodes in the arena
    pub nodes: usize,
    /// Deepest node reached
    pub max_depth: u32,
    /// Total nodes touched by backpropagation over all iterations
    pub path_visits: u64,
}

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<TreeNode>,
}

impl SearchTree {
    const ROOT: NodeId = NodeId(0);

    /// Create a tree whose root may only play `candidate_set`.
    ///
    /// Occupied or off-board cells are dropped from the set.
    pub fn new(state: GameState, candidate_set: &[Move]) -> Self {
        let untried = if state.status().is_terminal() {
            Vec::new()
        } else {
            candidate_set
                .iter()
                .copied()
                .filter(|&mv| state.board().is_free(mv))
                .collect()
        };
        Self {
            nodes: vec![TreeNode::new(state, None, None, untried, 0)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, root first.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// True if the root has nothing to search.
    pub fn is_degenerate(&self) -> bool {
        let root = self.get(self.root());
        root.untried.is_empty() && root.children.is_empty()
    }

    /// Id for the node stored at `index`, or `None` once the arena is past
    /// what a `u32` can address.
    fn node_id(index: usize) -> Option<NodeId> {
        u32::try_from(index).ok().map(NodeId)
    }

    /// Pick the child to descend into: the first unvisited child if any,
    /// otherwise the highest UCB1 (first one on ties).
    pub fn select_child(&self, id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(id);
        if let Some(&unvisited) = node.children.iter().find(|&&cid| self.get(cid).v == 0) {
            return Some(unvisited);
        }

        let ln_parent = (node.v.max(1) as f64).ln();
        let mut best: Option<(NodeId, f64)> = None;
        for &cid in &node.children {
            let score = self.get(cid).ucb1(ln_parent, c);
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((cid, score));
            }
        }
        best.map(|(cid, _)| cid)
    }

    /// Descend from the root while nodes are fully expanded.
    fn descend(&self, c: f64) -> NodeId {
        let mut current = self.root();
        while self.get(current).kind() == NodeKind::Expanded {
            match self.select_child(current, c) {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    /// Add one child to an unexpanded node.
    ///
    /// Scores the first `expansion_prefix` untried moves for the side to move
    /// and expands the best. Returns `None` if the node cannot be expanded.
    pub fn expand(&mut self, id: NodeId, config: &EngineConfig) -> Option<NodeId> {
        let node = self.get(id);
        if node.kind() != NodeKind::Unexpanded {
            return None;
        }
        let child_id = Self::node_id(self.nodes.len())?;

        let player = node.state.to_move();
        let board = node.state.board();
        let prefix = config.expansion_prefix.min(node.untried.len());
        let mut best_idx = 0;
        let mut best_score = i32::MIN;
        for (i, &mv) in node.untried[..prefix].iter().enumerate() {
            let s = score_move(board, mv, player);
            if s > best_score {
                best_score = s;
                best_idx = i;
            }
        }

        let depth = node.depth + 1;
        let mut child_state = node.state.clone();
        let mv = self.get_mut(id).untried.remove(best_idx);
        if child_state.play(mv).is_err() {
            return None;
        }

        let untried = if child_state.status().is_terminal() {
            Vec::new()
        } else {
            candidates(
                child_state.board(),
                config.pruning_radius,
                config.candidate_cap,
            )
        };
        let child = TreeNode::new(child_state, Some(id), Some(mv), untried, depth);
        self.nodes.push(child);
        self.get_mut(id).children.push(child_id);
        Some(child_id)
    }

    /// Credit a simulation outcome from `leaf` up to the root.
    ///
    /// Returns the number of nodes updated.
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: Status) -> usize {
        let mut current = Some(leaf);
        let mut updated = 0;
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.v += 1;
            node.w += reward(outcome, node.state.to_move());
            updated += 1;
            current = node.parent;
        }
        updated
    }

    /// Most visited root child. Ties go to the higher win rate, then to the
    /// smaller move.
    pub fn best_move(&self) -> Option<Move> {
        let root = self.get(self.root());
        root.children
            .iter()
            .map(|&id| self.get(id))
            .max_by(|a, b| {
                a.v.cmp(&b.v)
                    .then_with(|| {
                        a.parent_winrate()
                            .partial_cmp(&b.parent_winrate())
                            .unwrap_or(Ordering::Equal)
                    })
                    .then_with(|| b.mv.cmp(&a.mv))
            })
            .and_then(|node| node.mv)
    }
}

/// Run `iterations` rounds of select / expand / simulate / backpropagate.
pub fn tree_search(
    tree: &mut SearchTree,
    iterations: usize,
    config: &EngineConfig,
    rng: &mut Rng,
) -> SearchStats {
    let mut stats = SearchStats::default();
    if tree.is_degenerate() {
        return stats;
    }

    for _ in 0..iterations {
        let selected = tree.descend(config.exploration_constant);
        let leaf = tree.expand(selected, config).unwrap_or(selected);

        let node = tree.get(leaf);
        let outcome = if node.kind() == NodeKind::Terminal {
            node.state.status()
        } else {
            let mut state = node.state.clone();
            mcplayout(&mut state, config, rng)
        };
        stats.max_depth = stats.max_depth.max(node.depth);

        let path_len = tree.backpropagate(leaf, outcome);
        stats.path_visits += path_len as u64;
        stats.iterations += 1;

        trace!(
            leaf = leaf.0,
            path_len = path_len,
            outcome = ?outcome,
            "MCTS iteration complete"
        );
    }

    stats.nodes = tree.len();
    debug!(
        iterations = stats.iterations,
        nodes = stats.nodes,
        max_depth = stats.max_depth,
        "MCTS search finished"
    );
    stats
}

/// Search from `state` over `candidate_set` and return the robust child.
///
/// Returns `None` when there is nothing to search: an empty candidate set or
/// a finished game.
pub fn search(
    state: &GameState,
    candidate_set: &[Move],
    iterations: usize,
    config: &EngineConfig,
    rng: &mut Rng,
) -> Option<Move> {
    let mut tree = SearchTree::new(state.clone(), candidate_set);
    tree_search(&mut tree, iterations, config, rng);
    dump_children(&tree);
    tree.best_move()
}

/// Log statistics of the root's children.
pub fn dump_children(tree: &SearchTree) {
    let root = tree.get(tree.root());
    for &id in &root.children {
        let child = tree.get(id);
        if let Some(mv) = child.mv {
            trace!(
                mv = %mv,
                v = child.v,
                wr = format_args!("{:.3}", child.parent_winrate()),
                "root child"
            );
        }
    }
}
