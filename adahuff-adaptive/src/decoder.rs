//! Adaptive Huffman decoder (decompression).
//!
//! The decoder rebuilds the encoder's model symbol by symbol. It stops when
//! the input runs out mid-symbol or when it reads the end marker (the escape
//! code followed by a zero literal).
//!
//! # Known limitation
//!
//! A byte 0x00 that appears for the first time anywhere after the first
//! position is sent exactly like the end marker, so decoding stops there.

use crate::config::CodecConfig;
use crate::model::AdaptiveModel;
use crate::stats::CodecStats;
use crate::walker::TreeWalker;
use adahuff_core::bitstream::BitReader;
use adahuff_core::error::{AdaHuffError, Result};
use std::io::{Read, Write};

/// Output is handed to the sink in chunks of this size.
const CHUNK_SIZE: usize = 8192;

/// Decoder progress through a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Nothing decoded yet; the first byte is stored raw.
    AwaitingFirstByte,
    /// Decoding codes through the tree walker.
    Decoding,
    /// End marker seen or input exhausted.
    Done,
}

/// Adaptive Huffman decoder.
#[derive(Debug)]
pub struct AdaptiveDecoder {
    /// Code tree, updated exactly as the encoder's.
    model: AdaptiveModel,
    /// Cursor for the symbol being decoded.
    walker: TreeWalker,
    /// Current state.
    state: DecodeState,
    /// Decoder configuration.
    config: CodecConfig,
    /// Counters for the current run.
    stats: CodecStats,
}

impl AdaptiveDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            model: AdaptiveModel::new(),
            walker: TreeWalker::new(),
            state: DecodeState::AwaitingFirstByte,
            config,
            stats: CodecStats::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// The model as it stands after the symbols decoded so far.
    pub fn model(&self) -> &AdaptiveModel {
        &self.model
    }

    /// Counters for the current run.
    pub fn stats(&self) -> CodecStats {
        self.stats
    }

    /// Check if the decoder has finished.
    pub fn is_finished(&self) -> bool {
        self.state == DecodeState::Done
    }

    /// Decode the next symbol.
    ///
    /// Returns `Ok(None)` once the stream has ended. An empty source leaves
    /// the decoder in [`DecodeState::AwaitingFirstByte`].
    pub fn decode_symbol<R: Read>(&mut self, reader: &mut BitReader<R>) -> Result<Option<u8>> {
        match self.state {
            DecodeState::AwaitingFirstByte => match reader.read_byte()? {
                Some(byte) => {
                    self.accept(byte)?;
                    self.stats.escapes += 1;
                    self.state = DecodeState::Decoding;
                    Ok(Some(byte))
                }
                None => Ok(None),
            },
            DecodeState::Decoding => self.decode_code(reader),
            DecodeState::Done => Ok(None),
        }
    }

    /// Decode everything `reader` yields into `writer` as one fresh stream.
    pub fn decode<R: Read, W: Write>(&mut self, reader: R, mut writer: W) -> Result<CodecStats> {
        self.reset();

        let mut bits = BitReader::new(reader);
        let mut chunk = Vec::with_capacity(CHUNK_SIZE);
        while let Some(byte) = self.decode_symbol(&mut bits)? {
            chunk.push(byte);
            if chunk.len() == CHUNK_SIZE {
                writer.write_all(&chunk)?;
                chunk.clear();
            }
        }
        writer.write_all(&chunk)?;
        writer.flush()?;

        self.stats.compressed_bytes = bits.bytes_consumed();
        self.stats.distinct_symbols = self.model.distinct_symbols();
        Ok(self.stats)
    }

    /// Decode a byte slice into a new buffer.
    pub fn decode_bytes(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() * 2);
        self.decode(input, &mut output)?;
        Ok(output)
    }

    /// Reset the decoder to its initial state.
    pub fn reset(&mut self) {
        self.model = AdaptiveModel::new();
        self.walker.reset();
        self.state = DecodeState::AwaitingFirstByte;
        self.stats = CodecStats::default();
    }

    /// Feed bits to the walker until it resolves, then emit the symbol.
    fn decode_code<R: Read>(&mut self, reader: &mut BitReader<R>) -> Result<Option<u8>> {
        loop {
            let Some(bit) = reader.read_bit()? else {
                self.state = DecodeState::Done;
                return Ok(None);
            };
            if !self.walker.advance(&self.model, bit) {
                continue;
            }

            let symbol = self.walker.symbol();
            self.walker.reset();

            let byte = match symbol {
                Some(byte) => byte,
                None => match reader.read_byte()? {
                    Some(0) => {
                        self.stats.end_marker = true;
                        self.state = DecodeState::Done;
                        return Ok(None);
                    }
                    Some(byte) => {
                        self.stats.escapes += 1;
                        byte
                    }
                    None => {
                        self.state = DecodeState::Done;
                        return Ok(None);
                    }
                },
            };

            self.accept(byte)?;
            return Ok(Some(byte));
        }
    }

    /// Account for one decoded byte and update the model.
    fn accept(&mut self, byte: u8) -> Result<()> {
        if let Some(limit) = self.config.max_output
            && self.stats.uncompressed_bytes >= limit
        {
            return Err(AdaHuffError::output_limit(limit));
        }

        self.model.observe(byte);
        self.stats.uncompressed_bytes += 1;
        Ok(())
    }
}

impl Default for AdaptiveDecoder {
    fn default() -> Self {
        Self::new(CodecConfig::DEFAULT)
    }
}
