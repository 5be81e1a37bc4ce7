use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    #[error("Cannot build a Huffman tree: no symbol has a positive frequency")]
    EmptyInput,

    #[error("Invalid weight {weight} for symbol {symbol}")]
    InvalidWeight {
        symbol: String,
        weight: i64,
    },

    #[error("Weight overflow while summing frequencies")]
    WeightOverflow,
}

pub type HuffmanResult<T> = Result<T, HuffmanError>;
