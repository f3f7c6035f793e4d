//! Adaptive Huffman model.
//!
//! The model is a binary code tree over the bytes seen so far plus a single
//! escape leaf (the "not yet transmitted" leaf) that stands for every byte
//! not seen yet. Encoder and decoder each own one model and update it with
//! [`AdaptiveModel::observe`] after every symbol, so both sides derive the
//! same prefix code without a transmitted frequency table.
//!
//! ## Layout
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by index.
//! Alongside the tree the model keeps the weight-ordered sequence: every node
//! exactly once, heaviest first. The root is always at rank 0 and the escape
//! leaf (weight 0) is always last, so new nodes are appended. Read back to
//! front, the sequence is non-decreasing in weight.
//!
//! ## Sibling property
//!
//! After every update:
//!
//! - weights never increase along the sequence,
//! - every internal node weighs the sum of its two children,
//! - every node sits at a lower rank than its children.
//!
//! Incrementing a node of weight `w` first moves it to the front of the run
//! of weight-`w` nodes (its block) by exchanging subtrees with the block
//! leader. Exchanged nodes always have equal weights, so no ancestor weight
//! needs correcting. The only ancestor that can share a node's weight is its
//! parent, and only when the sibling is the escape leaf; such a node is never
//! exchanged with its parent.

use adahuff_core::{AdaHuffError, Result};

/// Index of a node in the model's arena.
pub(crate) type NodeId = usize;

/// The root never moves: it is created first and never exchanged.
pub(crate) const ROOT: NodeId = 0;

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// First identity handed to internal and escape nodes.
const FIRST_SYNTHETIC_ID: u16 = ALPHABET_SIZE as u16;

/// Which child slot of its parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The root has no parent.
    Root,
    /// Left child, branch bit 0.
    Left,
    /// Right child, branch bit 1.
    Right,
}

#[derive(Debug, Clone)]
struct Node {
    weight: u64,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
    side: Side,
    /// Byte value for symbol leaves, a synthetic id (>= 256) otherwise.
    ident: u16,
    /// Position in the weight-ordered sequence.
    rank: usize,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn symbol(&self) -> Option<u8> {
        if self.ident < FIRST_SYNTHETIC_ID {
            Some(self.ident as u8)
        } else {
            None
        }
    }
}

/// Adaptive Huffman code tree with its weight-ordered sequence and symbol table.
#[derive(Debug, Clone)]
pub struct AdaptiveModel {
    /// Node arena; `ROOT` is slot 0.
    nodes: Vec<Node>,
    /// Weight-ordered sequence, heaviest first.
    order: Vec<NodeId>,
    /// Symbol table: the leaf of every observed byte.
    leaves: [Option<NodeId>; ALPHABET_SIZE],
    /// Current escape leaf.
    escape: NodeId,
    /// Next synthetic identity.
    next_ident: u16,
    /// Number of observed distinct bytes.
    distinct: usize,
}

impl AdaptiveModel {
    /// Create a model whose only node is the root, which is also the escape leaf.
    pub fn new() -> Self {
        let root = Node {
            weight: 0,
            left: None,
            right: None,
            parent: None,
            side: Side::Root,
            ident: FIRST_SYNTHETIC_ID,
            rank: 0,
        };

        Self {
            nodes: vec![root],
            order: vec![ROOT],
            leaves: [None; ALPHABET_SIZE],
            escape: ROOT,
            next_ident: FIRST_SYNTHETIC_ID + 1,
            distinct: 0,
        }
    }

    /// Record one occurrence of `symbol` and restore the sibling property.
    pub fn observe(&mut self, symbol: u8) {
        let leaf = match self.leaves[symbol as usize] {
            Some(leaf) => leaf,
            None => self.split_escape(symbol),
        };
        self.increment_from(leaf);
    }

    /// Check whether `symbol` has been observed.
    #[inline]
    pub fn is_observed(&self, symbol: u8) -> bool {
        self.leaves[symbol as usize].is_some()
    }

    /// Current code of `symbol`, root to leaf (`true` = right branch).
    ///
    /// Returns `None` if the symbol has not been observed; such symbols are
    /// sent as the escape code followed by the raw byte.
    pub fn code_for(&self, symbol: u8) -> Option<Vec<bool>> {
        let leaf = self.leaves[symbol as usize]?;
        let mut path = Vec::new();
        self.path_into(leaf, &mut path);
        Some(path)
    }

    /// Current code of the escape leaf, root to leaf.
    ///
    /// Empty while the escape leaf is still the root, i.e. before the first
    /// symbol is observed.
    pub fn escape_code(&self) -> Vec<bool> {
        let mut path = Vec::new();
        self.path_into(self.escape, &mut path);
        path
    }

    /// Occurrence count of `symbol`, or `None` if it has not been observed.
    pub fn weight(&self, symbol: u8) -> Option<u64> {
        self.leaves[symbol as usize].map(|leaf| self.nodes[leaf].weight)
    }

    /// Total number of observed symbol occurrences (the root weight).
    pub fn total_weight(&self) -> u64 {
        self.nodes[ROOT].weight
    }

    /// Number of distinct bytes observed so far.
    pub fn distinct_symbols(&self) -> usize {
        self.distinct
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the current escape code.
    pub fn escape_depth(&self) -> usize {
        self.depth(self.escape)
    }

    /// Weights of the weight-ordered sequence, lightest first.
    pub fn ordered_weights(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().rev().map(|&id| self.nodes[id].weight)
    }

    /// Verify the sibling property and the consistency of all links.
    pub fn validate(&self) -> Result<()> {
        if self.order.len() != self.nodes.len() {
            return Err(AdaHuffError::corrupted_model(format!(
                "sequence holds {} entries for {} nodes",
                self.order.len(),
                self.nodes.len()
            )));
        }
        if self.order.first() != Some(&ROOT) || self.order.last() != Some(&self.escape) {
            return Err(AdaHuffError::corrupted_model(
                "root must lead the sequence and the escape leaf must close it",
            ));
        }

        let escape = &self.nodes[self.escape];
        if !escape.is_leaf() || escape.weight != 0 || escape.symbol().is_some() {
            return Err(AdaHuffError::corrupted_model(
                "escape leaf must be a weightless synthetic leaf",
            ));
        }

        for (rank, &id) in self.order.iter().enumerate() {
            let node = &self.nodes[id];
            if node.rank != rank {
                return Err(AdaHuffError::corrupted_model(format!(
                    "node {id} records rank {} but sits at rank {rank}",
                    node.rank
                )));
            }
            if rank > 0 {
                let previous = &self.nodes[self.order[rank - 1]];
                if previous.weight < node.weight {
                    return Err(AdaHuffError::corrupted_model(format!(
                        "weight order broken at rank {rank}: {} before {}",
                        previous.weight, node.weight
                    )));
                }
            }
        }

        for (id, node) in self.nodes.iter().enumerate() {
            match node.parent {
                None if id != ROOT => {
                    return Err(AdaHuffError::corrupted_model(format!(
                        "node {id} is detached from the tree"
                    )));
                }
                Some(parent) => {
                    let slot = match node.side {
                        Side::Left => self.nodes[parent].left,
                        Side::Right => self.nodes[parent].right,
                        Side::Root => None,
                    };
                    if slot != Some(id) {
                        return Err(AdaHuffError::corrupted_model(format!(
                            "node {id} is not in the {:?} slot of its parent {parent}",
                            node.side
                        )));
                    }
                    if self.nodes[parent].rank >= node.rank {
                        return Err(AdaHuffError::corrupted_model(format!(
                            "node {id} precedes its parent {parent} in the sequence"
                        )));
                    }
                }
                None => {}
            }

            match (node.left, node.right) {
                (Some(left), Some(right)) => {
                    let sum = self.nodes[left].weight + self.nodes[right].weight;
                    if node.weight != sum {
                        return Err(AdaHuffError::corrupted_model(format!(
                            "internal node {id} weighs {} but its children sum to {sum}",
                            node.weight
                        )));
                    }
                }
                (None, None) => {
                    if id != self.escape && node.symbol().is_none() {
                        return Err(AdaHuffError::corrupted_model(format!(
                            "leaf {id} is neither a symbol nor the escape leaf"
                        )));
                    }
                }
                _ => {
                    return Err(AdaHuffError::corrupted_model(format!(
                        "internal node {id} has a single child"
                    )));
                }
            }
        }

        for (symbol, leaf) in self.leaves.iter().enumerate() {
            if let Some(leaf) = *leaf
                && self.nodes[leaf].symbol() != Some(symbol as u8)
            {
                return Err(AdaHuffError::corrupted_model(format!(
                    "symbol table entry {symbol:#04x} points at node {leaf}"
                )));
            }
        }

        Ok(())
    }

    /// Append the code of `symbol` to `out`. Returns `false` if unobserved.
    pub(crate) fn symbol_path_into(&self, symbol: u8, out: &mut Vec<bool>) -> bool {
        match self.leaves[symbol as usize] {
            Some(leaf) => {
                self.path_into(leaf, out);
                true
            }
            None => false,
        }
    }

    /// Append the escape code to `out`.
    pub(crate) fn escape_path_into(&self, out: &mut Vec<bool>) {
        self.path_into(self.escape, out);
    }

    /// Child of `node` along `bit`, if `node` is internal.
    #[inline]
    pub(crate) fn child(&self, node: NodeId, bit: bool) -> Option<NodeId> {
        let node = &self.nodes[node];
        if bit { node.right } else { node.left }
    }

    /// Whether `node` is the current escape leaf.
    #[inline]
    pub(crate) fn is_escape(&self, node: NodeId) -> bool {
        node == self.escape
    }

    /// Byte value of `node` if it is a symbol leaf.
    #[inline]
    pub(crate) fn symbol_at(&self, node: NodeId) -> Option<u8> {
        self.nodes[node].symbol()
    }

    /// Walk from `node` up to the root, then emit the branches root first.
    fn path_into(&self, node: NodeId, out: &mut Vec<bool>) {
        let start = out.len();
        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            out.push(self.nodes[current].side == Side::Right);
            current = parent;
        }
        out[start..].reverse();
    }

    fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Turn the escape leaf into an internal node with a fresh escape leaf
    /// on the left and a leaf for `symbol` on the right.
    fn split_escape(&mut self, symbol: u8) -> NodeId {
        let parent = self.escape;

        // Symbol leaf first so the escape leaf stays last in the sequence.
        let leaf = self.push_node(symbol as u16, parent, Side::Right);
        let escape_ident = self.next_ident;
        self.next_ident += 1;
        let escape = self.push_node(escape_ident, parent, Side::Left);

        let node = &mut self.nodes[parent];
        node.left = Some(escape);
        node.right = Some(leaf);

        self.escape = escape;
        self.leaves[symbol as usize] = Some(leaf);
        self.distinct += 1;
        leaf
    }

    fn push_node(&mut self, ident: u16, parent: NodeId, side: Side) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            weight: 0,
            left: None,
            right: None,
            parent: Some(parent),
            side,
            ident,
            rank: self.order.len(),
        });
        self.order.push(id);
        id
    }

    /// Increment `leaf` and every ancestor, rebalancing at each level.
    fn increment_from(&mut self, leaf: NodeId) {
        let mut current = Some(leaf);
        while let Some(node) = current {
            self.move_to_block_leader(node);
            self.nodes[node].weight += 1;
            current = self.nodes[node].parent;
        }
    }

    /// Move `node` to the lowest rank holding its weight, so that the
    /// increment that follows keeps the sequence ordered.
    fn move_to_block_leader(&mut self, node: NodeId) {
        let weight = self.nodes[node].weight;
        let rank = self.nodes[node].rank;

        let mut leader_rank = rank;
        while leader_rank > 0 && self.nodes[self.order[leader_rank - 1]].weight == weight {
            leader_rank -= 1;
        }
        if leader_rank == rank {
            return;
        }

        let leader = self.order[leader_rank];
        if self.nodes[node].parent == Some(leader) {
            // Sibling of the escape leaf. It always ranks right behind its
            // parent, which is incremented next.
            debug_assert_eq!(leader_rank + 1, rank);
            return;
        }
        self.swap_nodes(node, leader);
    }

    /// Exchange the tree positions and sequence ranks of two equal-weight,
    /// non-nested nodes.
    fn swap_nodes(&mut self, a: NodeId, b: NodeId) {
        debug_assert_eq!(self.nodes[a].weight, self.nodes[b].weight);
        debug_assert!(a != ROOT && b != ROOT);

        let (parent_a, side_a) = (self.nodes[a].parent, self.nodes[a].side);
        let (parent_b, side_b) = (self.nodes[b].parent, self.nodes[b].side);

        self.set_child(parent_a, side_a, b);
        self.set_child(parent_b, side_b, a);

        self.nodes[a].parent = parent_b;
        self.nodes[a].side = side_b;
        self.nodes[b].parent = parent_a;
        self.nodes[b].side = side_a;

        let (rank_a, rank_b) = (self.nodes[a].rank, self.nodes[b].rank);
        self.order.swap(rank_a, rank_b);
        self.nodes[a].rank = rank_b;
        self.nodes[b].rank = rank_a;
    }

    fn set_child(&mut self, parent: Option<NodeId>, side: Side, child: NodeId) {
        let Some(parent) = parent else {
            return;
        };
        match side {
            Side::Left => self.nodes[parent].left = Some(child),
            Side::Right => self.nodes[parent].right = Some(child),
            Side::Root => {}
        }
    }
}

impl Default for AdaptiveModel {
    fn default() -> Self {
        Self::new()
    }
}
