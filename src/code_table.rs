use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, HuffmanResult};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Symbol → code mapping derived from a [`HuffmanTree`].
///
/// Iteration is in symbol order. A tree whose root is a leaf yields a single
/// empty code; callers that pack bits must special-case it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    codes: BTreeMap<S, BitVec>,
}

/// Walk `tree` depth-first, appending `0` for left and `1` for right.
#[instrument(level = "debug", skip_all)]
pub fn derive_codes<S: Ord + Clone>(tree: &HuffmanTree<S>) -> CodeTable<S> {
    let mut codes = BTreeMap::new();
    let mut prefix = BitVec::new();
    add_node(&mut codes, &mut prefix, tree.root());
    debug_assert!(prefix.is_empty());
    debug!(codes = codes.len(), "derived code table");
    CodeTable { codes }
}

fn add_node<S: Ord + Clone>(codes: &mut BTreeMap<S, BitVec>, prefix: &mut BitVec, node: &HuffNode<S>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            let existing = codes.insert(symbol.clone(), prefix.clone());
            assert!(existing.is_none(), "symbol appears in more than one leaf");
        }
        HuffNode::Internal { left, right, .. } => {
            prefix.push_bit(false);
            add_node(codes, prefix, left);
            prefix.pop_bit();

            prefix.push_bit(true);
            add_node(codes, prefix, right);
            prefix.pop_bit();
        }
    }
}

impl<S: Ord + Clone> HuffmanTree<S> {
    pub fn generate_table(&self) -> CodeTable<S> {
        derive_codes(self)
    }
}

impl<S: Ord> CodeTable<S> {
    pub fn get(&self, symbol: &S) -> Option<&BitVec> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitVec)> {
        self.codes.iter()
    }

    /// Total encoded size in bits of a message with the given symbol counts.
    /// Symbols without a code contribute nothing.
    ///
    /// # Errors
    ///
    /// [`HuffmanError::WeightOverflow`] if the size exceeds `u64::MAX`.
    pub fn encoded_len(&self, frequencies: &BTreeMap<S, u64>) -> HuffmanResult<u64> {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.codes.get(symbol).map(|code| (code.len() as u64, *count)))
            .try_fold(0u64, |acc, (len, count)| acc.checked_add(len.checked_mul(count)?))
            .ok_or(HuffmanError::WeightOverflow)
    }

    /// No code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&BitVec> = self.codes.values().collect();
        sorted.sort_by(|a, b| a.iter().cmp(b.iter()));
        // in lexicographic order a prefix always sorts directly before some extension of it
        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}

impl<S> From<CodeTable<S>> for BTreeMap<S, BitVec> {
    fn from(table: CodeTable<S>) -> Self {
        table.codes
    }
}

impl<S> IntoIterator for CodeTable<S> {
    type Item = (S, BitVec);
    type IntoIter = std::collections::btree_map::IntoIter<S, BitVec>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.into_iter()
    }
}
