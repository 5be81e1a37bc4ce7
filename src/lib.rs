//! # huffman_code
//!
//! Greedy Huffman tree construction over a frequency table, and derivation of
//! the prefix-free bit code each symbol receives from the tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman_code::{derive_codes, HuffmanTree};
//!
//! let tree = HuffmanTree::build([('a', 5), ('b', 2), ('c', 1), ('d', 1)])?;
//! let codes = derive_codes(&tree);
//!
//! assert_eq!(codes.get(&'a').unwrap().to_string(), "1");
//! assert_eq!(codes.get(&'b').unwrap().to_string(), "00");
//! assert!(codes.is_prefix_free());
//! # Ok::<(), huffman_code::HuffmanError>(())
//! ```
//!
//! ## Tie-breaking
//!
//! Nodes of equal weight leave the queue in a fixed order: leaves by ascending
//! symbol, then merged nodes in the order they were created. The same table
//! always yields the same codes.
//!
//! Library code logs through `tracing`; installing a subscriber is up to the
//! caller.

pub mod bit_vec;
pub mod code_table;
pub mod error;
pub mod hufftree;

// Internal modules - not part of public API
mod min_heap;

pub use bit_vec::BitVec;
pub use code_table::{derive_codes, CodeTable};
pub use error::{HuffmanError, HuffmanResult};
pub use hufftree::{HuffNode, HuffmanTree};
