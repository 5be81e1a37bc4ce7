use std::env;

use huffman_code::{derive_codes, HuffmanTree};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let text = env::args().nth(1).unwrap_or_else(|| "abcde".to_string());

    let tree = HuffmanTree::<char>::try_from(text.as_str())?;
    let codes = derive_codes(&tree);
    let frequencies = tree.frequencies();

    println!("SYMBOL\tWEIGHT\tHUFFMAN CODE");
    for (symbol, code) in codes.iter() {
        println!("{}\t{}\t{}", symbol, frequencies[symbol], code);
    }
    println!();
    print!("{}", tree);
    println!(
        "{} symbols, {} bits encoded ({} bits raw)",
        text.chars().count(),
        tree.weighted_path_length()?,
        text.len() * 8
    );

    Ok(())
}
