use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::error::{HuffmanError, HuffmanResult};
use crate::min_heap::MinHeap;

/// A node of a Huffman tree. Internal weights are the sum of their children's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode<S> {
    Leaf {
        weight: u64,
        symbol: S,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode<S>>,
        right: Box<HuffNode<S>>,
    },
}

impl<S> HuffNode<S> {
    pub fn leaf(symbol: S, weight: u64) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Join two subtrees; `a` goes left, `b` goes right.
    ///
    /// The combined weight must fit in `u64`; `build` checks the total first.
    pub(crate) fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn internal_weight_sum(&self) -> Option<u64> {
        match self {
            HuffNode::Leaf { .. } => Some(0),
            HuffNode::Internal { weight, left, right } => weight
                .checked_add(left.internal_weight_sum()?)?
                .checked_add(right.internal_weight_sum()?),
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result
    where
        S: fmt::Debug,
    {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { weight, symbol } => {
                writeln!(f, "{}{}-> Leaf: {:?} [weight: {}]", indent, label, symbol, weight)
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                left.fmt_node(f, depth + 1, "L")?;
                right.fmt_node(f, depth + 1, "R")
            }
        }
    }
}

/// Heap entry ordered by `(weight, sequence)`.
///
/// Leaves take sequence numbers `0..n` in ascending symbol order, and every
/// merged node takes the next number after that. Equal weights therefore pop
/// in symbol order for leaves and in creation order for merged nodes.
struct QueuedNode<S> {
    weight: u64,
    sequence: usize,
    node: HuffNode<S>,
}

impl<S> PartialEq for QueuedNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl<S> Eq for QueuedNode<S> {}

impl<S> PartialOrd for QueuedNode<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for QueuedNode<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A Huffman tree over symbols of type `S`. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: HuffNode<S>,
}

impl<S: Ord + Clone + fmt::Debug> HuffmanTree<S> {
    /// Build a tree from `(symbol, frequency)` pairs.
    ///
    /// Zero frequencies are skipped and a symbol listed more than once has its
    /// frequencies summed. All input is validated before any node is created.
    ///
    /// # Errors
    ///
    /// - [`HuffmanError::InvalidWeight`] for the first negative frequency.
    /// - [`HuffmanError::EmptyInput`] if no symbol has a positive frequency.
    /// - [`HuffmanError::WeightOverflow`] if the total weight exceeds `u64::MAX`.
    #[instrument(level = "debug", skip_all)]
    pub fn build<I>(frequencies: I) -> HuffmanResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
    {
        let mut table: BTreeMap<S, u64> = BTreeMap::new();
        for (symbol, weight) in frequencies {
            if weight < 0 {
                return Err(HuffmanError::InvalidWeight {
                    symbol: format!("{:?}", symbol),
                    weight,
                });
            }
            if weight == 0 {
                continue;
            }
            let entry = table.entry(symbol).or_insert(0);
            *entry = entry
                .checked_add(weight as u64)
                .ok_or(HuffmanError::WeightOverflow)?;
        }

        if table.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }
        // every merged node weighs at most the total, so merges cannot overflow
        let total = table
            .values()
            .try_fold(0u64, |acc, w| acc.checked_add(*w))
            .ok_or(HuffmanError::WeightOverflow)?;
        debug!(symbols = table.len(), total, "building huffman tree");

        let leaves: Vec<QueuedNode<S>> = table
            .into_iter()
            .enumerate()
            .map(|(sequence, (symbol, weight))| QueuedNode {
                weight,
                sequence,
                node: HuffNode::leaf(symbol, weight),
            })
            .collect();
        let mut next_sequence = leaves.len();
        let mut heap = MinHeap::build(leaves);

        let root = loop {
            let first = heap.extract_min().expect("heap holds at least one node");
            match heap.extract_min() {
                Some(second) => {
                    trace!(
                        left = first.weight,
                        right = second.weight,
                        sequence = next_sequence,
                        "merging"
                    );
                    let node = HuffNode::merge(first.node, second.node);
                    heap.insert(QueuedNode {
                        weight: node.weight(),
                        sequence: next_sequence,
                        node,
                    });
                    next_sequence += 1;
                }
                None => break first.node,
            }
        };

        Ok(HuffmanTree { root })
    }

    /// Count occurrences of each symbol in `symbols` and build from the counts.
    pub fn from_symbols<I>(symbols: I) -> HuffmanResult<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let counts = symbols
            .into_iter()
            .fold(BTreeMap::new(), |mut acc, symbol| {
                *acc.entry(symbol).or_insert(0i64) += 1;
                acc
            });
        Self::build(counts)
    }

    /// The symbol → weight table recovered from the leaves.
    pub fn frequencies(&self) -> BTreeMap<S, u64> {
        let mut frequencies = BTreeMap::new();
        collect_frequencies(&self.root, &mut frequencies);
        frequencies
    }
}

fn collect_frequencies<S: Ord + Clone>(node: &HuffNode<S>, frequencies: &mut BTreeMap<S, u64>) {
    match node {
        HuffNode::Leaf { symbol, weight } => {
            frequencies.insert(symbol.clone(), *weight);
        }
        HuffNode::Internal { left, right, .. } => {
            collect_frequencies(left, frequencies);
            collect_frequencies(right, frequencies);
        }
    }
}

impl<S> HuffmanTree<S> {
    pub fn root(&self) -> &HuffNode<S> {
        &self.root
    }

    pub fn into_root(self) -> HuffNode<S> {
        self.root
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn internal_count(&self) -> usize {
        self.leaf_count() - 1
    }

    /// Σ code length × frequency over all leaves.
    ///
    /// Each internal node contributes its weight once per leaf beneath it, so
    /// this is the sum of internal-node weights.
    ///
    /// # Errors
    ///
    /// [`HuffmanError::WeightOverflow`] if the sum exceeds `u64::MAX`. This can
    /// happen even when the total weight fits.
    pub fn weighted_path_length(&self) -> HuffmanResult<u64> {
        self.root
            .internal_weight_sum()
            .ok_or(HuffmanError::WeightOverflow)
    }
}

impl<S: fmt::Debug> fmt::Display for HuffmanTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt_node(f, 0, "root")
    }
}

impl TryFrom<&str> for HuffmanTree<char> {
    type Error = HuffmanError;

    fn try_from(text: &str) -> HuffmanResult<Self> {
        HuffmanTree::from_symbols(text.chars())
    }
}

impl TryFrom<&[u8]> for HuffmanTree<u8> {
    type Error = HuffmanError;

    fn try_from(bytes: &[u8]) -> HuffmanResult<Self> {
        HuffmanTree::from_symbols(bytes.iter().copied())
    }
}
