//! Decode-side tree traversal.
//!
//! A [`TreeWalker`] is a cursor into an [`AdaptiveModel`]. It only holds a
//! position and borrows the model for the duration of each step, so the
//! model stays free to be updated with `observe` between symbols; the walker
//! itself can never change the tree.

use crate::model::{AdaptiveModel, NodeId, ROOT};

/// Where a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A leaf for an already observed byte.
    Symbol(u8),
    /// The escape leaf: a raw byte follows.
    Escape,
}

/// One-bit-at-a-time cursor from the root towards a leaf.
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    cursor: NodeId,
    resolved: Option<Resolution>,
}

impl TreeWalker {
    /// Create a walker positioned at the root.
    pub fn new() -> Self {
        Self {
            cursor: ROOT,
            resolved: None,
        }
    }

    /// Follow one branch: left for `false`, right for `true`.
    ///
    /// Returns `true` once the cursor stands on a symbol leaf or on the
    /// escape leaf. A walker that is already on a leaf stays there.
    pub fn advance(&mut self, model: &AdaptiveModel, bit: bool) -> bool {
        if let Some(next) = model.child(self.cursor, bit) {
            self.cursor = next;
        }

        self.resolved = if model.is_escape(self.cursor) {
            Some(Resolution::Escape)
        } else {
            model.symbol_at(self.cursor).map(Resolution::Symbol)
        };
        self.resolved.is_some()
    }

    /// What the last [`advance`](Self::advance) resolved to, if anything.
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolved
    }

    /// Whether the walk resolved to a symbol leaf rather than the escape leaf.
    pub fn is_symbol(&self) -> bool {
        matches!(self.resolved, Some(Resolution::Symbol(_)))
    }

    /// Byte at the resolved symbol leaf; `None` at the escape leaf or mid-walk.
    pub fn symbol(&self) -> Option<u8> {
        match self.resolved {
            Some(Resolution::Symbol(byte)) => Some(byte),
            _ => None,
        }
    }

    /// Return to the root for the next symbol.
    pub fn reset(&mut self) {
        self.cursor = ROOT;
        self.resolved = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(walker: &mut TreeWalker, model: &AdaptiveModel, bits: &[bool]) -> Vec<bool> {
        bits.iter().map(|&bit| walker.advance(model, bit)).collect()
    }

    #[test]
    fn test_walk_follows_codes() {
        let mut model = AdaptiveModel::new();
        for &byte in b"ABCDC" {
            model.observe(byte);
        }

        let mut walker = TreeWalker::new();
        for symbol in *b"ABCD" {
            let code = model.code_for(symbol).unwrap();
            let steps = walk(&mut walker, &model, &code);

            // Only the final bit resolves.
            assert_eq!(steps.last(), Some(&true));
            assert!(steps[..steps.len() - 1].iter().all(|&done| !done));
            assert!(walker.is_symbol());
            assert_eq!(walker.symbol(), Some(symbol));
            walker.reset();
        }
    }

    #[test]
    fn test_walk_to_escape() {
        let mut model = AdaptiveModel::new();
        model.observe(b'x');
        model.observe(b'y');

        let mut walker = TreeWalker::new();
        let code = model.escape_code();
        assert_eq!(walk(&mut walker, &model, &code).last(), Some(&true));
        assert!(!walker.is_symbol());
        assert_eq!(walker.symbol(), None);
        assert_eq!(walker.resolution(), Some(Resolution::Escape));
    }

    #[test]
    fn test_reset_clears_resolution() {
        let mut model = AdaptiveModel::new();
        model.observe(b'x');

        let mut walker = TreeWalker::new();
        assert!(walker.advance(&model, true));
        walker.reset();
        assert_eq!(walker.resolution(), None);

        // Left of the root is the escape leaf.
        assert!(walker.advance(&model, false));
        assert_eq!(walker.resolution(), Some(Resolution::Escape));
    }

    #[test]
    fn test_empty_model_resolves_to_escape() {
        let model = AdaptiveModel::new();
        let mut walker = TreeWalker::new();
        assert!(walker.advance(&model, true));
        assert_eq!(walker.resolution(), Some(Resolution::Escape));
    }
}
