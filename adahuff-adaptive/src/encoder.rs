//! Adaptive Huffman encoder (compression).

use crate::config::{CodecConfig, EndMarker};
use crate::model::AdaptiveModel;
use crate::stats::CodecStats;
use crate::walker::TreeWalker;
use adahuff_core::bitstream::BitWriter;
use adahuff_core::error::Result;
use std::io::{self, Read, Write};

/// Read buffer size for streaming input.
const CHUNK_SIZE: usize = 8192;

/// Adaptive Huffman encoder.
#[derive(Debug)]
pub struct AdaptiveEncoder {
    /// Code tree, updated after every symbol.
    model: AdaptiveModel,
    /// Encoder configuration.
    config: CodecConfig,
    /// Reused code buffer.
    path: Vec<bool>,
    /// Counters for the current run.
    stats: CodecStats,
}

impl AdaptiveEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            model: AdaptiveModel::new(),
            config,
            path: Vec::with_capacity(64),
            stats: CodecStats::default(),
        }
    }

    /// The model as it stands after the symbols encoded so far.
    pub fn model(&self) -> &AdaptiveModel {
        &self.model
    }

    /// Counters for the current run.
    pub fn stats(&self) -> CodecStats {
        self.stats
    }

    /// Encode one byte.
    ///
    /// A known byte is sent as its current code. An unseen byte is sent as
    /// the escape code followed by its 8 raw bits; for the first byte of a
    /// stream the escape code is empty, so only the raw bits go out.
    pub fn encode_symbol<W: Write>(&mut self, byte: u8, writer: &mut BitWriter<W>) -> Result<()> {
        self.path.clear();
        if self.model.symbol_path_into(byte, &mut self.path) {
            writer.write_path(&self.path)?;
        } else {
            self.model.escape_path_into(&mut self.path);
            writer.write_path(&self.path)?;
            writer.write_bits(byte as u32, 8)?;
            self.stats.escapes += 1;
        }

        self.model.observe(byte);
        self.stats.uncompressed_bytes += 1;
        Ok(())
    }

    /// End the stream: append the end marker if required, then pad and flush.
    pub fn finish<W: Write>(&mut self, writer: &mut BitWriter<W>) -> Result<()> {
        if self.stats.uncompressed_bytes > 0 && self.needs_end_marker(writer.padding_bits()) {
            self.path.clear();
            self.model.escape_path_into(&mut self.path);
            writer.write_path(&self.path)?;
            writer.write_bits(0, 8)?;
            self.stats.end_marker = true;
        }

        writer.flush()?;
        self.stats.compressed_bytes = writer.bytes_written();
        self.stats.distinct_symbols = self.model.distinct_symbols();
        Ok(())
    }

    /// Encode everything `reader` yields into `writer` as one fresh stream.
    ///
    /// The model is reset first, so repeated calls are independent.
    pub fn encode<R: Read, W: Write>(&mut self, mut reader: R, writer: W) -> Result<CodecStats> {
        self.reset();

        let mut bits = BitWriter::new(writer);
        let mut buffer = [0u8; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &buffer[..n] {
                self.encode_symbol(byte, &mut bits)?;
            }
        }

        self.finish(&mut bits)?;
        Ok(self.stats)
    }

    /// Encode a byte slice into a new buffer.
    pub fn encode_bytes(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2 + 1);
        self.encode(input, &mut output)?;
        Ok(output)
    }

    /// Reset the encoder to its initial state.
    pub fn reset(&mut self) {
        self.model = AdaptiveModel::new();
        self.stats = CodecStats::default();
    }

    /// Whether `padding` zero bits after the last symbol would mislead a decoder.
    ///
    /// Runs the decoder's own walk over the padding: ending on a symbol leaf
    /// would emit a spurious byte, while ending on the escape leaf or not
    /// resolving at all ends the decode cleanly.
    fn needs_end_marker(&self, padding: u8) -> bool {
        match self.config.end_marker {
            EndMarker::Always => true,
            EndMarker::Auto => {
                let mut walker = TreeWalker::new();
                for _ in 0..padding {
                    if walker.advance(&self.model, false) {
                        return walker.is_symbol();
                    }
                }
                false
            }
        }
    }
}

impl Default for AdaptiveEncoder {
    fn default() -> Self {
        Self::new(CodecConfig::DEFAULT)
    }
}
