//! Huffman coding with a serialized trie.
//!
//! Compressed layout:
//!
//! ```text
//! trie          preorder; bit 1 + 8-bit symbol for a leaf,
//!               bit 0 followed by left then right subtree otherwise
//! length        32 bits, big-endian, number of original bytes
//! codes         one code per original byte, zero padded to a byte boundary
//! ```
//!
//! The trie always has at least two leaves so that every real symbol gets
//! a non-empty code. Inputs with fewer than two distinct bytes are padded
//! with zero-frequency leaves for byte 0 and/or byte 1.

use crate::heap::MinPq;
use burrows_core::RADIX;
use burrows_core::bitstream::{BitRead, BitWrite};
use burrows_core::error::{BurrowsError, Result, checked_len};
use burrows_core::traits::Codec;
use log::{debug, trace};

/// Deepest level a leaf can occupy in a trie with 256 distinct leaves.
const MAX_DEPTH: usize = RADIX - 1;

/// A binary prefix-code trie. Internal nodes always have two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trie {
    /// A leaf carrying one byte value.
    Leaf {
        /// The byte value.
        symbol: u8,
    },
    /// An internal node: bit 0 selects `left`, bit 1 selects `right`.
    Internal {
        /// Subtree for bit 0.
        left: Box<Trie>,
        /// Subtree for bit 1.
        right: Box<Trie>,
    },
}

/// A subtree together with its total frequency, used while building.
#[derive(Debug)]
struct Weighted {
    frequency: u64,
    trie: Trie,
}

impl Trie {
    /// Create a leaf.
    pub fn leaf(symbol: u8) -> Self {
        Self::Leaf { symbol }
    }

    /// Create an internal node.
    pub fn internal(left: Trie, right: Trie) -> Self {
        Self::Internal {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Number of bits taken by the serialized trie.
    pub fn serialized_bits(&self) -> u64 {
        // 9 bits per leaf, 1 per internal node.
        let leaves = self.leaf_count() as u64;
        leaves * 9 + (leaves - 1)
    }

    /// Build a Huffman trie from per-byte frequencies.
    ///
    /// The two lowest-frequency subtrees are merged repeatedly; ties are
    /// broken by whatever order the priority queue yields.
    pub fn build(frequencies: &[u64; RADIX]) -> Self {
        let mut pq = MinPq::with_comparator(|a: &Weighted, b: &Weighted| {
            a.frequency.cmp(&b.frequency)
        });

        for (symbol, &frequency) in frequencies.iter().enumerate() {
            if frequency > 0 {
                pq.insert(Weighted {
                    frequency,
                    trie: Self::leaf(symbol as u8),
                });
            }
        }

        for filler in [0u8, 1] {
            if pq.len() >= 2 {
                break;
            }
            if frequencies[filler as usize] == 0 {
                trace!("huffman: padding trie with unused leaf {}", filler);
                pq.insert(Weighted {
                    frequency: 0,
                    trie: Self::leaf(filler),
                });
            }
        }

        while let Some(left) = pq.extract() {
            match pq.extract() {
                Some(right) => pq.insert(Weighted {
                    frequency: left.frequency + right.frequency,
                    trie: Self::internal(left.trie, right.trie),
                }),
                None => return left.trie,
            }
        }

        // Padding guarantees two leaves, so the queue never starts empty.
        Self::internal(Self::leaf(0), Self::leaf(1))
    }

    /// Serialize in preorder.
    pub fn write_to(&self, output: &mut dyn BitWrite) -> Result<()> {
        match self {
            Self::Leaf { symbol } => {
                output.write_bit(true)?;
                output.write_byte(*symbol)?;
            }
            Self::Internal { left, right } => {
                output.write_bit(false)?;
                left.write_to(output)?;
                right.write_to(output)?;
            }
        }
        Ok(())
    }

    /// Deserialize a trie written by [`write_to`](Self::write_to).
    ///
    /// Fails with [`BurrowsError::MalformedTrie`] if the root is a leaf, a
    /// symbol appears twice, or the trie is deeper than any 256-leaf trie.
    pub fn read_from(input: &mut dyn BitRead) -> Result<Self> {
        let mut seen = [false; RADIX];
        let trie = Self::read_node(input, 0, &mut seen)?;
        if trie.is_leaf() {
            return Err(BurrowsError::malformed_trie("root is a leaf"));
        }
        Ok(trie)
    }

    fn read_node(input: &mut dyn BitRead, depth: usize, seen: &mut [bool; RADIX]) -> Result<Self> {
        if depth > MAX_DEPTH {
            return Err(BurrowsError::malformed_trie(format!(
                "deeper than {} levels",
                MAX_DEPTH
            )));
        }

        if input.read_bit()? {
            let symbol = input.read_byte()?;
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(BurrowsError::malformed_trie(format!(
                    "duplicate leaf for byte {:#04x}",
                    symbol
                )));
            }
            Ok(Self::leaf(symbol))
        } else {
            let left = Self::read_node(input, depth + 1, seen)?;
            let right = Self::read_node(input, depth + 1, seen)?;
            Ok(Self::internal(left, right))
        }
    }

    /// Decode one symbol by walking from this node to a leaf.
    pub fn decode(&self, input: &mut dyn BitRead) -> Result<u8> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { symbol } => return Ok(*symbol),
                Self::Internal { left, right } => {
                    node = if input.read_bit()? {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    };
                }
            }
        }
    }
}

/// Per-byte codes derived from a trie.
#[derive(Debug, Clone)]
pub struct CodeTable {
    /// Code for each byte value; empty when the byte has no leaf.
    codes: Vec<Vec<bool>>,
}

impl CodeTable {
    /// Derive codes by a preorder walk: left edge 0, right edge 1.
    pub fn from_trie(trie: &Trie) -> Self {
        let mut codes = vec![Vec::new(); RADIX];
        let mut prefix = Vec::new();
        Self::assign(trie, &mut prefix, &mut codes);
        Self { codes }
    }

    fn assign(node: &Trie, prefix: &mut Vec<bool>, codes: &mut [Vec<bool>]) {
        match node {
            Trie::Leaf { symbol } => codes[*symbol as usize] = prefix.clone(),
            Trie::Internal { left, right } => {
                prefix.push(false);
                Self::assign(left, prefix, codes);
                prefix.pop();
                prefix.push(true);
                Self::assign(right, prefix, codes);
                prefix.pop();
            }
        }
    }

    /// Code for `symbol`, if it has a leaf.
    pub fn code(&self, symbol: u8) -> Option<&[bool]> {
        let code = &self.codes[symbol as usize];
        (!code.is_empty()).then_some(code.as_slice())
    }

    /// Code for `symbol` as a string of `0`s and `1`s.
    pub fn code_string(&self, symbol: u8) -> Option<String> {
        self.code(symbol)
            .map(|code| code.iter().map(|&bit| if bit { '1' } else { '0' }).collect())
    }

    /// Total code bits needed to encode bytes with `frequencies`.
    pub fn encoded_bits(&self, frequencies: &[u64; RADIX]) -> u64 {
        self.codes
            .iter()
            .zip(frequencies)
            .map(|(code, &frequency)| code.len() as u64 * frequency)
            .sum()
    }
}

/// Statistics for one byte value of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolStats {
    /// The byte value.
    pub symbol: u8,
    /// Number of occurrences in the input.
    pub frequency: u64,
    /// Huffman code, as `0`s and `1`s.
    pub code: String,
    /// `code.len() * frequency`.
    pub encoded_bits: u64,
}

/// Tally byte frequencies over the 256-value alphabet.
pub fn frequencies(data: &[u8]) -> [u64; RADIX] {
    let mut frequencies = [0u64; RADIX];
    for &byte in data {
        frequencies[byte as usize] += 1;
    }
    frequencies
}

/// Code table statistics for every byte that occurs in `data`.
pub fn statistics(data: &[u8]) -> Vec<SymbolStats> {
    let frequencies = frequencies(data);
    let table = CodeTable::from_trie(&Trie::build(&frequencies));

    (0..RADIX)
        .filter(|&symbol| frequencies[symbol] > 0)
        .filter_map(|symbol| {
            let symbol = symbol as u8;
            table.code_string(symbol).map(|code| SymbolStats {
                symbol,
                frequency: frequencies[symbol as usize],
                encoded_bits: code.len() as u64 * frequencies[symbol as usize],
                code,
            })
        })
        .collect()
}

/// The Huffman stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Huffman;

impl Codec for Huffman {
    fn name(&self) -> &'static str {
        "huffman"
    }

    /// Compress the whole input, then close `output`.
    fn encode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
        let data = input.read_to_end()?;
        let length = checked_len(data.len())?;

        let frequencies = frequencies(&data);
        let trie = Trie::build(&frequencies);
        let table = CodeTable::from_trie(&trie);
        debug!(
            "huffman: {} bytes, {} leaves, {} code bits",
            length,
            trie.leaf_count(),
            table.encoded_bits(&frequencies)
        );

        trie.write_to(output)?;
        output.write_u32(length)?;

        for &byte in &data {
            for &bit in &table.codes[byte as usize] {
                output.write_bit(bit)?;
            }
        }

        output.close()
    }

    fn decode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
        let trie = Trie::read_from(input)?;
        let length = input.read_u32()?;
        debug!(
            "huffman: expanding {} bytes with {} leaves",
            length,
            trie.leaf_count()
        );

        for _ in 0..length {
            output.write_byte(trie.decode(input)?)?;
        }
        Ok(())
    }
}
