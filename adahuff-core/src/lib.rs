//! # AdaHuff Core
//!
//! Core components shared by the AdaHuff crates:
//!
//! - [`bitstream`]: MSB-first bit-level I/O over any `Read`/`Write`
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: Command surface                                     │
//! │     adahuff CLI                                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Adaptive Huffman model, tree walker, encoder/decoder│
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, error types                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use adahuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! let data = writer.finish().unwrap();
//! assert_eq!(data, vec![0b1010_0000]);
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;

pub use bitstream::{BitReader, BitWriter};
pub use error::{AdaHuffError, Result};
